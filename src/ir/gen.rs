use crate::parser::{BinOp, Expr, Program, Stmt, UnaryOp};

use super::{Instr, Operand, TacProgram, TEMP_PREFIX};

/// Lowers a validated AST to TAC by post-order traversal. The temporary
/// counter starts at zero for every generator instance, so temp numbering
/// is deterministic per compilation.
pub struct IrGenerator {
    instructions: Vec<Instr>,
    temp_counter: usize,
}

impl IrGenerator {
    pub fn new() -> Self {
        Self {
            instructions: vec![],
            temp_counter: 0,
        }
    }

    pub fn generate(mut self, program: &Program) -> TacProgram {
        for stmt in &program.0 {
            self.gen_stmt(stmt);
        }

        TacProgram(self.instructions)
    }

    fn new_temp(&mut self) -> String {
        let name = format!("{TEMP_PREFIX}{}", self.temp_counter);
        self.temp_counter += 1;
        name
    }

    fn gen_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, init, .. } => {
                let value = self.gen_expr(init);
                // Always a copy, even when the initializer lowered to a bare
                // value; downstream passes rely on the uniform shape.
                self.instructions.push(Instr::copy(name.clone(), value));
            }
            Stmt::Print { expr } => {
                let operand = self.gen_expr(expr);
                self.instructions.push(Instr::Print { operand });
            }
        }
    }

    fn gen_expr(&mut self, expr: &Expr) -> Operand {
        match expr {
            Expr::Number(value) => Operand::Const(*value),
            Expr::Ident(name) => Operand::Var(name.clone()),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.gen_expr(lhs);
                let rhs = self.gen_expr(rhs);
                let temp = self.new_temp();
                self.instructions
                    .push(Instr::binary(temp.clone(), lhs, *op, rhs));
                Operand::Var(temp)
            }
            Expr::Unary { op, operand } => {
                let value = self.gen_expr(operand);
                match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Neg => {
                        let temp = self.new_temp();
                        self.instructions.push(Instr::binary(
                            temp.clone(),
                            Operand::Const(0.0),
                            BinOp::Sub,
                            value,
                        ));
                        Operand::Var(temp)
                    }
                }
            }
        }
    }
}

impl Default for IrGenerator {
    fn default() -> Self {
        Self::new()
    }
}
