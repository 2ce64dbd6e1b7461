use std::fmt;

use crate::parser::BinOp;

/// Prefix reserved for generated temporaries; user identifiers of the form
/// `t<digits>` would collide, which the language accepts as a known limit.
pub const TEMP_PREFIX: char = 't';

/// True for generated temporary names: `t` followed only by digits.
pub fn is_temp(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some(TEMP_PREFIX)
        && name.len() > 1
        && chars.all(|c| c.is_ascii_digit())
}

/// A TAC operand is either a compile-time constant or a name reference.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Const(f64),
    Var(String),
}

impl Operand {
    pub fn as_const(&self) -> Option<f64> {
        match self {
            Operand::Const(value) => Some(*value),
            Operand::Var(_) => None,
        }
    }

    pub fn as_var(&self) -> Option<&str> {
        match self {
            Operand::Const(_) => None,
            Operand::Var(name) => Some(name),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(value) => write!(f, "{value}"),
            Operand::Var(name) => f.write_str(name),
        }
    }
}

/// The closed TAC instruction set. Every optimizer pass must map a program
/// built from these two kinds back onto the same two kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
    /// `dest = src` when `op` is absent, otherwise `dest = src <op> rhs`.
    Assign {
        dest: String,
        src: Operand,
        op: Option<(BinOp, Operand)>,
    },
    Print {
        operand: Operand,
    },
}

impl Instr {
    pub fn copy(dest: impl Into<String>, src: Operand) -> Self {
        Instr::Assign {
            dest: dest.into(),
            src,
            op: None,
        }
    }

    pub fn binary(dest: impl Into<String>, src: Operand, op: BinOp, rhs: Operand) -> Self {
        Instr::Assign {
            dest: dest.into(),
            src,
            op: Some((op, rhs)),
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Assign {
                dest,
                src,
                op: Some((op, rhs)),
            } => write!(f, "{dest} = {src} {op} {rhs}"),
            Instr::Assign { dest, src, op: None } => write!(f, "{dest} = {src}"),
            Instr::Print { operand } => write!(f, "print {operand}"),
        }
    }
}

/// An ordered sequence of TAC instructions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TacProgram(pub Vec<Instr>);

impl TacProgram {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TacProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.0 {
            writeln!(f, "{instr}")?;
        }
        Ok(())
    }
}
