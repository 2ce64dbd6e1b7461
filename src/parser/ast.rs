use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Ident(String),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    VarDecl {
        name: String,
        line: usize,
        init: Expr,
    },
    Print {
        expr: Expr,
    },
}

/// The whole parsed program, in statement order. Read-only after parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct Program(pub Vec<Stmt>);

impl Program {
    /// Render the tree with two-space indentation per nesting level.
    pub fn pretty(&self) -> String {
        let mut out = String::from("Program:\n");
        for stmt in &self.0 {
            pretty_stmt(stmt, 1, &mut out);
        }
        out
    }
}

fn pretty_stmt(stmt: &Stmt, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    match stmt {
        Stmt::VarDecl { name, init, .. } => {
            out.push_str(&format!("{prefix}VariableDeclaration: {name}\n"));
            pretty_expr(init, indent + 1, out);
        }
        Stmt::Print { expr } => {
            out.push_str(&format!("{prefix}PrintStatement:\n"));
            pretty_expr(expr, indent + 1, out);
        }
    }
}

fn pretty_expr(expr: &Expr, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    match expr {
        Expr::Number(value) => out.push_str(&format!("{prefix}NumberLiteral: {value}\n")),
        Expr::Ident(name) => out.push_str(&format!("{prefix}Identifier: {name}\n")),
        Expr::Binary { op, lhs, rhs } => {
            out.push_str(&format!("{prefix}BinaryOperation: {op}\n"));
            pretty_expr(lhs, indent + 1, out);
            pretty_expr(rhs, indent + 1, out);
        }
        Expr::Unary { op, operand } => {
            out.push_str(&format!("{prefix}UnaryOperation: {op}\n"));
            pretty_expr(operand, indent + 1, out);
        }
    }
}
