use std::collections::HashSet;

use crate::error::SemanticError;
use crate::parser::{Expr, Program, Stmt};

use super::{SymbolTable, Ty, VarInfo};

/// Result of a successful analysis: the frozen symbol table plus any
/// unused-variable warnings, in declaration order.
#[derive(Debug)]
pub struct Analysis {
    pub symbol_table: SymbolTable,
    pub warnings: Vec<String>,
}

pub struct SemanticVisitor {
    symbol_table: SymbolTable,
    used: HashSet<String>,
}

impl SemanticVisitor {
    pub fn new() -> Self {
        Self {
            symbol_table: SymbolTable::new(),
            used: HashSet::new(),
        }
    }

    /// Walk the program in statement order, halting on the first hard error.
    /// Warnings never fail the analysis.
    pub fn analyze(mut self, program: &Program) -> Result<Analysis, SemanticError> {
        for stmt in &program.0 {
            self.visit_stmt(stmt)?;
        }

        let warnings = self.unused_warnings();
        Ok(Analysis {
            symbol_table: self.symbol_table,
            warnings,
        })
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::VarDecl { name, line, init } => {
                if self.symbol_table.is_declared(name) {
                    return Err(SemanticError::DuplicateDeclaration {
                        name: name.clone(),
                        line: *line,
                    });
                }
                let ty = self.infer_expr(init)?;
                self.symbol_table
                    .define(name.clone(), VarInfo { ty, line: *line });
                Ok(())
            }
            Stmt::Print { expr } => {
                self.infer_expr(expr)?;
                Ok(())
            }
        }
    }

    fn infer_expr(&mut self, expr: &Expr) -> Result<Ty, SemanticError> {
        match expr {
            Expr::Number(_) => Ok(Ty::Number),
            Expr::Ident(name) => {
                let info = self.symbol_table.lookup(name).ok_or_else(|| {
                    SemanticError::UndefinedVariable { name: name.clone() }
                })?;
                let ty = info.ty;
                self.used.insert(name.clone());
                Ok(ty)
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs_ty = self.infer_expr(lhs)?;
                let rhs_ty = self.infer_expr(rhs)?;
                // Unreachable while only `number` exists; kept so new types
                // cannot slip through arithmetic unchecked.
                if lhs_ty != Ty::Number || rhs_ty != Ty::Number {
                    return Err(SemanticError::TypeMismatch {
                        op: op.symbol().to_string(),
                        lhs: lhs_ty,
                        rhs: rhs_ty,
                    });
                }
                Ok(Ty::Number)
            }
            Expr::Unary { op, operand } => {
                let ty = self.infer_expr(operand)?;
                if ty != Ty::Number {
                    return Err(SemanticError::TypeMismatch {
                        op: op.symbol().to_string(),
                        lhs: ty,
                        rhs: ty,
                    });
                }
                Ok(Ty::Number)
            }
        }
    }

    /// Declared names never seen in operand position.
    fn unused_warnings(&self) -> Vec<String> {
        self.symbol_table
            .iter()
            .filter(|(name, _)| !self.used.contains(*name))
            .map(|(name, _)| format!("variable '{name}' is declared but never used"))
            .collect()
    }
}

impl Default for SemanticVisitor {
    fn default() -> Self {
        Self::new()
    }
}
