use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap_stdin::FileOrStdin;

use letc::{compile, CompileOptions};

/// Compiles a minimal let/print language to x86-64 assembly.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Source file to compile, or `-` to read from stdin
    input: FileOrStdin,

    /// Output assembly file
    #[arg(short, long, default_value = "out.asm")]
    output: PathBuf,

    /// Optimization rounds (0 disables optimization)
    #[arg(
        short = 'O',
        long = "optimize",
        default_value_t = 2,
        value_parser = clap::value_parser!(u32).range(0..=3)
    )]
    optimize: u32,

    /// Print every compilation stage
    #[arg(short, long)]
    verbose: bool,
}

fn print_section(title: &str, body: &str) {
    println!("=== {title} ===");
    println!("{}", body.trim_end());
    println!();
}

fn main() -> ExitCode {
    let args = Args::parse();

    let source = match args.input.contents() {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let options = CompileOptions {
        opt_rounds: args.optimize,
        verbose: args.verbose,
    };

    let result = match compile(&source, &options) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        for line in &result.trace {
            println!("{line}");
        }
        println!();
        print_section("tokens", &result.tokens);
        print_section("ast", &result.ast);
        print_section("symbol table", &result.symbols);
        print_section("three-address code", &result.ir);
        print_section("optimized three-address code", &result.optimized_ir);
        print_section("assembly", &result.assembly);
    }

    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }

    if let Err(err) = fs::write(&args.output, &result.assembly) {
        eprintln!("error: cannot write {}: {err}", args.output.display());
        return ExitCode::FAILURE;
    }
    println!("assembly written to {}", args.output.display());

    ExitCode::SUCCESS
}
