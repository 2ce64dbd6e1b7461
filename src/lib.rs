//! Ahead-of-time compiler for a minimal let/print language, lowering source
//! text to x86-64 assembly through six stages: lexer, recursive-descent
//! parser, semantic analyzer, TAC generator, multi-pass optimizer, and a
//! code generator with naive register allocation.

pub mod analyzer;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod optimizer;
pub mod parser;

use analyzer::SemanticVisitor;
use codegen::Codegen;
use error::CompileResult;
use ir::IrGenerator;
use lexer::{dump_tokens, Lexer};
use optimizer::Optimizer;
use parser::Parser;

#[derive(Clone, Copy, Debug)]
pub struct CompileOptions {
    /// Optimization rounds; zero leaves the IR untouched.
    pub opt_rounds: u32,
    /// Record per-stage narration in [`Compilation::trace`].
    pub verbose: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            opt_rounds: 2,
            verbose: false,
        }
    }
}

/// Everything a successful compilation produces. The assembly is plain
/// text; the other fields are the stage dumps an embedding caller renders.
#[derive(Debug)]
pub struct Compilation {
    pub tokens: String,
    pub ast: String,
    pub symbols: String,
    pub warnings: Vec<String>,
    pub ir: String,
    pub optimized_ir: String,
    pub assembly: String,
    pub trace: Vec<String>,
}

struct Trace {
    lines: Vec<String>,
    enabled: bool,
}

impl Trace {
    fn new(enabled: bool) -> Self {
        Self {
            lines: vec![],
            enabled,
        }
    }

    fn push(&mut self, line: String) {
        if self.enabled {
            self.lines.push(line);
        }
    }
}

/// Run the full pipeline over `source`. Each call builds fresh component
/// instances, so concurrent compilations share no state.
pub fn compile(source: &str, options: &CompileOptions) -> CompileResult<Compilation> {
    let mut trace = Trace::new(options.verbose);

    let tokens = Lexer::tokenize(source)?;
    let token_dump = dump_tokens(&tokens);
    trace.push(format!("1. lexical analysis: {} tokens", tokens.len()));

    let program = Parser::new(tokens).parse()?;
    trace.push(format!("2. syntax analysis: {} statements", program.0.len()));

    let analysis = SemanticVisitor::new().analyze(&program)?;
    let symbols = analysis.symbol_table.listing();
    trace.push(format!(
        "3. semantic analysis: {} variables, {} warnings",
        analysis.symbol_table.iter().count(),
        analysis.warnings.len()
    ));

    let tac = IrGenerator::new().generate(&program);
    let ir_text = tac.to_string();
    trace.push(format!("4. ir generation: {} instructions", tac.len()));

    let optimized = if options.opt_rounds > 0 {
        let before = tac.len();
        let optimized = Optimizer::optimize(tac, options.opt_rounds)?;
        let reduction = if before > 0 {
            (before - optimized.len()) as f64 / before as f64 * 100.0
        } else {
            0.0
        };
        trace.push(format!(
            "5. optimization: {} -> {} instructions ({reduction:.1}% reduction)",
            before,
            optimized.len()
        ));
        optimized
    } else {
        trace.push("5. optimization: disabled".to_string());
        tac
    };
    let optimized_text = optimized.to_string();

    let assembly = Codegen::new().generate(&optimized);
    trace.push(format!(
        "6. code generation: {} lines of assembly",
        assembly.lines().count()
    ));

    Ok(Compilation {
        tokens: token_dump,
        ast: program.pretty(),
        symbols,
        warnings: analysis.warnings,
        ir: ir_text,
        optimized_ir: optimized_text,
        assembly,
        trace: trace.lines,
    })
}
