//! Per-stage error enums (snafu) plus a top-level [`CompileError`] that wraps
//! them and names the producing stage. Grounded on the rchicc pack's
//! `error.rs` (snafu enums + `CompileResult` alias); the stage taxonomy
//! mirrors the original_source `main.py` except-clauses.

use snafu::Snafu;

use crate::analyzer::Ty;
use crate::lexer::TokenKind;

/// Result alias threaded through the public pipeline entry point.
pub type CompileResult<T> = Result<T, CompileError>;

/// Lexer stage failures.
#[derive(Debug, Snafu)]
pub enum LexError {
    #[snafu(display("unexpected character '{ch}' at line {line}, column {column}"))]
    UnexpectedCharacter { ch: char, line: usize, column: usize },
}

/// Parser stage failures.
#[derive(Debug, Snafu)]
pub enum ParseError {
    #[snafu(display(
        "expected {expected} but found {found} at line {line}, column {column}"
    ))]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        line: usize,
        column: usize,
    },
    #[snafu(display("expected a statement but found {found} at line {line}, column {column}"))]
    ExpectedStatement {
        found: TokenKind,
        line: usize,
        column: usize,
    },
    #[snafu(display("expected an expression but found {found} at line {line}, column {column}"))]
    ExpectedExpression {
        found: TokenKind,
        line: usize,
        column: usize,
    },
}

/// Semantic analysis stage failures.
#[derive(Debug, Snafu)]
pub enum SemanticError {
    #[snafu(display("variable '{name}' already declared at line {line}"))]
    DuplicateDeclaration { name: String, line: usize },
    #[snafu(display("undefined variable '{name}'"))]
    UndefinedVariable { name: String },
    #[snafu(display("type mismatch for '{op}': {lhs} vs {rhs}"))]
    TypeMismatch { op: String, lhs: Ty, rhs: Ty },
}

/// Constant-folding stage failures surfaced during optimization.
#[derive(Debug, Snafu)]
pub enum EvalError {
    #[snafu(display("division by zero"))]
    DivisionByZero,
}

/// Top-level error wrapping each per-stage enum. `?` in the pipeline converts
/// stage errors into this type automatically via the `context(false)` impls.
#[derive(Debug, Snafu)]
pub enum CompileError {
    #[snafu(display("{source}"), context(false))]
    Lex { source: LexError },
    #[snafu(display("{source}"), context(false))]
    Parse { source: ParseError },
    #[snafu(display("{source}"), context(false))]
    Semantic { source: SemanticError },
    #[snafu(display("{source}"), context(false))]
    Eval { source: EvalError },
}

impl CompileError {
    /// Name of the stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            CompileError::Lex { .. } => "lexical",
            CompileError::Parse { .. } => "syntax",
            CompileError::Semantic { .. } => "semantic",
            CompileError::Eval { .. } => "internal",
        }
    }
}
