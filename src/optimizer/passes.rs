use std::collections::{HashMap, HashSet};

use crate::error::EvalError;
use crate::ir::{is_temp, Instr, Operand, TacProgram};
use crate::parser::BinOp;

/// Evaluate a binary operation over compile-time constants.
pub fn eval_binop(op: BinOp, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    Ok(match op {
        BinOp::Add => lhs + rhs,
        BinOp::Sub => lhs - rhs,
        BinOp::Mul => lhs * rhs,
        BinOp::Div => {
            if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            lhs / rhs
        }
    })
}

/// Replaces constant binary operations with pure copies of their value.
pub struct ConstantFolding;

impl ConstantFolding {
    pub fn run(program: &TacProgram) -> Result<TacProgram, EvalError> {
        let mut optimized = Vec::with_capacity(program.len());

        for instr in &program.0 {
            optimized.push(Self::fold(instr)?);
        }

        Ok(TacProgram(optimized))
    }

    fn fold(instr: &Instr) -> Result<Instr, EvalError> {
        if let Instr::Assign {
            dest,
            src,
            op: Some((op, rhs)),
        } = instr
        {
            if let (Some(lhs), Some(rhs)) = (src.as_const(), rhs.as_const()) {
                let value = eval_binop(*op, lhs, rhs)?;
                return Ok(Instr::copy(dest.clone(), Operand::Const(value)));
            }
        }
        Ok(instr.clone())
    }
}

/// Single forward scan rewriting operands whose value is statically known.
///
/// Knowledge is keyed by name; a definition that does not produce a constant
/// drops any stale entry for that name, which only matters for user
/// variables since temporaries are single-assignment by construction.
pub struct ConstantPropagation;

impl ConstantPropagation {
    pub fn run(program: &TacProgram) -> Result<TacProgram, EvalError> {
        let mut constants: HashMap<String, f64> = HashMap::new();
        let mut optimized = Vec::with_capacity(program.len());

        for instr in &program.0 {
            match instr {
                Instr::Assign { dest, src, op } => {
                    let src = Self::substitute(src, &constants);
                    let op = op
                        .as_ref()
                        .map(|(kind, rhs)| (*kind, Self::substitute(rhs, &constants)));

                    match (&src, &op) {
                        (Operand::Const(value), None) => {
                            constants.insert(dest.clone(), *value);
                        }
                        (Operand::Const(lhs), Some((kind, Operand::Const(rhs)))) => {
                            constants.insert(dest.clone(), eval_binop(*kind, *lhs, *rhs)?);
                        }
                        _ => {
                            constants.remove(dest);
                        }
                    }

                    optimized.push(Instr::Assign {
                        dest: dest.clone(),
                        src,
                        op,
                    });
                }
                Instr::Print { operand } => {
                    optimized.push(Instr::Print {
                        operand: Self::substitute(operand, &constants),
                    });
                }
            }
        }

        Ok(TacProgram(optimized))
    }

    fn substitute(operand: &Operand, constants: &HashMap<String, f64>) -> Operand {
        if let Some(value) = operand.as_var().and_then(|name| constants.get(name)) {
            return Operand::Const(*value);
        }
        operand.clone()
    }
}

/// Drops assignments whose result is never read. Print instructions are the
/// only observable effect and are always kept.
pub struct DeadCodeElimination;

impl DeadCodeElimination {
    pub fn run(program: &TacProgram) -> TacProgram {
        let used = Self::used_names(program);

        let kept = program
            .0
            .iter()
            .filter(|instr| match instr {
                Instr::Assign { dest, .. } => used.contains(dest.as_str()),
                Instr::Print { .. } => true,
            })
            .cloned()
            .collect();

        TacProgram(kept)
    }

    /// Every name appearing in operand position anywhere in the program.
    fn used_names(program: &TacProgram) -> HashSet<&str> {
        let mut used = HashSet::new();

        for instr in &program.0 {
            match instr {
                Instr::Assign { src, op, .. } => {
                    if let Some(name) = src.as_var() {
                        used.insert(name);
                    }
                    if let Some(name) = op.as_ref().and_then(|(_, rhs)| rhs.as_var()) {
                        used.insert(name);
                    }
                }
                Instr::Print { operand } => {
                    if let Some(name) = operand.as_var() {
                        used.insert(name);
                    }
                }
            }
        }

        used
    }
}

/// Local rewrites over adjacent instructions, iterated to a fixed point:
/// each applied rule can expose a new instance of another.
pub struct Peephole;

impl Peephole {
    pub fn run(program: &TacProgram) -> TacProgram {
        let mut instructions = program.0.clone();
        let mut changed = true;

        while changed {
            changed = false;
            let mut rewritten = Vec::with_capacity(instructions.len());
            let mut i = 0;

            while i < instructions.len() {
                if let Some((instr, consumed)) = Self::rewrite_at(&instructions, i) {
                    rewritten.push(instr);
                    i += consumed;
                    changed = true;
                } else {
                    rewritten.push(instructions[i].clone());
                    i += 1;
                }
            }

            instructions = rewritten;
        }

        TacProgram(instructions)
    }

    fn rewrite_at(instructions: &[Instr], index: usize) -> Option<(Instr, usize)> {
        // Copy fusion: `t = y; z = t <op> w` collapses to `z = y <op> w`
        // when `t` is a generated temporary read in first operand position.
        if let [Instr::Assign {
            dest: copy_dest,
            src: copy_src,
            op: None,
        }, Instr::Assign { dest, src, op }, ..] = &instructions[index..]
        {
            if is_temp(copy_dest) && src.as_var() == Some(copy_dest.as_str()) {
                let fused = Instr::Assign {
                    dest: dest.clone(),
                    src: copy_src.clone(),
                    op: op.clone(),
                };
                return Some((fused, 2));
            }
        }

        // Arithmetic identities: `x = y + 0` and `x = y * 1` become copies.
        if let Instr::Assign {
            dest,
            src,
            op: Some((kind, rhs)),
        } = &instructions[index]
        {
            let identity = match kind {
                BinOp::Add => rhs.as_const() == Some(0.0),
                BinOp::Mul => rhs.as_const() == Some(1.0),
                _ => false,
            };
            if identity {
                return Some((Instr::copy(dest.clone(), src.clone()), 1));
            }
        }

        None
    }
}
