use letc::analyzer::SemanticVisitor;
use letc::codegen::{Codegen, RegisterAllocator, REGISTER_POOL};
use letc::ir::{is_temp, Instr, IrGenerator, Operand, TacProgram};
use letc::lexer::{Lexer, TokenKind};
use letc::optimizer::{
    ConstantFolding, ConstantPropagation, DeadCodeElimination, Optimizer, Peephole,
};
use letc::parser::{BinOp, Expr, Parser, Program, Stmt};
use letc::{compile, CompileOptions};

fn options(rounds: u32) -> CompileOptions {
    CompileOptions {
        opt_rounds: rounds,
        verbose: false,
    }
}

fn parse(source: &str) -> Program {
    let tokens = Lexer::tokenize(source).expect("lexing failed");
    Parser::new(tokens).parse().expect("parsing failed")
}

fn lower(source: &str) -> TacProgram {
    let program = parse(source);
    SemanticVisitor::new()
        .analyze(&program)
        .expect("analysis failed");
    IrGenerator::new().generate(&program)
}

fn var(name: &str) -> Operand {
    Operand::Var(name.to_string())
}

#[test]
fn lexer_tracks_positions() {
    let tokens = Lexer::tokenize("let x = 5;").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
    assert_eq!((tokens[1].line, tokens[1].column), (1, 5));
    assert_eq!((tokens[3].line, tokens[3].column), (1, 9));
}

#[test]
fn lexer_rejects_unknown_character() {
    let err = Lexer::tokenize("let x = 5;\nlet y = @;").unwrap_err();
    let message = err.to_string();
    assert!(message.contains('@'), "unexpected message: {message}");
    assert!(message.contains("line 2"), "unexpected message: {message}");
}

#[test]
fn lexer_skips_comments() {
    let tokens = Lexer::tokenize("# header\nlet x = 1; # trailing\n").unwrap();
    assert!(tokens.iter().all(|t| t.text != "#"));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Let));
}

#[test]
fn lexer_reads_decimal_literals() {
    let tokens = Lexer::tokenize("let x = 2.5;").unwrap();
    let number = tokens.iter().find(|t| t.kind == TokenKind::Number).unwrap();
    assert_eq!(number.text, "2.5");

    // A trailing dot is not part of the number and nothing else accepts it.
    let err = Lexer::tokenize("let x = 2.;").unwrap_err();
    assert!(err.to_string().contains('.'));
}

#[test]
fn parse_is_deterministic() {
    let source = "let x = 5 + 3;\nlet y = x * 2;\nprint(y);";
    assert_eq!(parse(source), parse(source));
}

#[test]
fn parser_builds_left_associative_chains() {
    let program = parse("let x = 1 - 2 - 3;");
    let Stmt::VarDecl { init, .. } = &program.0[0] else {
        panic!("expected a declaration");
    };
    let Expr::Binary { op: BinOp::Sub, lhs, rhs } = init else {
        panic!("expected an outer subtraction");
    };
    assert_eq!(**rhs, Expr::Number(3.0));
    let Expr::Binary { op: BinOp::Sub, lhs: inner_lhs, rhs: inner_rhs } = &**lhs else {
        panic!("expected a nested subtraction");
    };
    assert_eq!(**inner_lhs, Expr::Number(1.0));
    assert_eq!(**inner_rhs, Expr::Number(2.0));
}

#[test]
fn parser_binds_unary_tighter_than_binary() {
    let program = parse("let x = -2 * 3;");
    let Stmt::VarDecl { init, .. } = &program.0[0] else {
        panic!("expected a declaration");
    };
    let Expr::Binary { op: BinOp::Mul, lhs, .. } = init else {
        panic!("expected a multiplication");
    };
    assert!(matches!(&**lhs, Expr::Unary { .. }));
}

#[test]
fn parser_reports_expected_and_found_kinds() {
    let err = compile("let x 5;", &options(1)).unwrap_err();
    assert_eq!(err.stage(), "syntax");
    let message = err.to_string();
    assert!(message.contains("ASSIGN"), "unexpected message: {message}");
    assert!(message.contains("NUMBER"), "unexpected message: {message}");
}

#[test]
fn ir_always_copies_into_declared_variables() {
    let tac = lower("let x = 5;\nlet y = x;");
    let lines: Vec<_> = tac.to_string().lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["x = 5", "y = x"]);
}

#[test]
fn ir_lowers_negation_as_zero_minus() {
    let tac = lower("let x = -5;\nprint(x);");
    let lines: Vec<_> = tac.to_string().lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["t0 = 0 - 5", "x = t0", "print x"]);
}

#[test]
fn ir_unary_plus_is_a_noop() {
    let tac = lower("let x = +5;");
    assert_eq!(tac.to_string().trim(), "x = 5");
}

#[test]
fn temp_names_are_reserved() {
    assert!(is_temp("t0"));
    assert!(is_temp("t42"));
    assert!(!is_temp("t"));
    assert!(!is_temp("total"));
    assert!(!is_temp("x1"));
}

#[test]
fn folding_replaces_constant_operations_with_copies() {
    let program = TacProgram(vec![Instr::binary(
        "t0",
        Operand::Const(2.0),
        BinOp::Add,
        Operand::Const(3.0),
    )]);
    let folded = ConstantFolding::run(&program).unwrap();
    assert_eq!(folded.0, vec![Instr::copy("t0", Operand::Const(5.0))]);
}

#[test]
fn folding_reports_division_by_zero() {
    let program = TacProgram(vec![Instr::binary(
        "t0",
        Operand::Const(1.0),
        BinOp::Div,
        Operand::Const(0.0),
    )]);
    assert!(ConstantFolding::run(&program).is_err());

    let err = compile("let x = 1 / 0;\nprint(x);", &options(1)).unwrap_err();
    assert_eq!(err.stage(), "internal");
    assert!(err.to_string().contains("division by zero"));
}

#[test]
fn propagation_drops_stale_knowledge_on_redefinition() {
    let program = TacProgram(vec![
        Instr::copy("x", Operand::Const(1.0)),
        Instr::binary("x", var("y"), BinOp::Add, Operand::Const(2.0)),
        Instr::copy("z", var("x")),
    ]);
    let propagated = ConstantPropagation::run(&program).unwrap();
    // After the non-constant redefinition, reads of x must stay symbolic.
    assert_eq!(propagated.0[2], Instr::copy("z", var("x")));
}

#[test]
fn dce_keeps_prints_and_read_assignments() {
    let program = TacProgram(vec![
        Instr::copy("a", Operand::Const(1.0)),
        Instr::binary("b", var("a"), BinOp::Add, Operand::Const(1.0)),
        Instr::Print { operand: var("b") },
        Instr::copy("c", Operand::Const(2.0)),
    ]);
    let pruned = DeadCodeElimination::run(&program);
    assert_eq!(pruned.len(), 3);
    assert!(pruned.0.iter().any(|i| matches!(i, Instr::Print { .. })));
    assert!(!pruned.0.iter().any(|i| matches!(i, Instr::Assign { dest, .. } if dest == "c")));
}

#[test]
fn peephole_fuses_temporary_copies_only() {
    let fusable = TacProgram(vec![
        Instr::copy("t0", var("x")),
        Instr::binary("y", var("t0"), BinOp::Add, Operand::Const(1.0)),
    ]);
    let fused = Peephole::run(&fusable);
    assert_eq!(
        fused.0,
        vec![Instr::binary("y", var("x"), BinOp::Add, Operand::Const(1.0))]
    );

    // User variables are never fused away, even when the shape matches.
    let user_copy = TacProgram(vec![
        Instr::copy("a", var("x")),
        Instr::binary("y", var("a"), BinOp::Add, Operand::Const(1.0)),
    ]);
    assert_eq!(Peephole::run(&user_copy), user_copy);
}

#[test]
fn peephole_collapses_arithmetic_identities() {
    let add_zero = TacProgram(vec![Instr::binary(
        "x",
        var("y"),
        BinOp::Add,
        Operand::Const(0.0),
    )]);
    assert_eq!(Peephole::run(&add_zero).0, vec![Instr::copy("x", var("y"))]);

    let mul_one = TacProgram(vec![Instr::binary(
        "x",
        var("y"),
        BinOp::Mul,
        Operand::Const(1.0),
    )]);
    assert_eq!(Peephole::run(&mul_one).0, vec![Instr::copy("x", var("y"))]);
}

#[test]
fn optimizer_zero_rounds_returns_input_unchanged() {
    let tac = lower("let x = 5 + 3;\nprint(x);");
    let untouched = Optimizer::optimize(tac.clone(), 0).unwrap();
    assert_eq!(untouched, tac);

    let result = compile("let x = 5 + 3;\nprint(x);", &options(0)).unwrap();
    assert_eq!(result.ir, result.optimized_ir);
}

#[test]
fn optimizer_is_idempotent_once_converged() {
    let tac = lower("let x = 5 + 3;\nlet y = x * 2;\nprint(y);");
    let converged = Optimizer::optimize(tac, 3).unwrap();
    let again = Optimizer::optimize(converged.clone(), 1).unwrap();
    assert_eq!(converged, again);
}

#[test]
fn scenario_constant_chain_folds_to_print_16() {
    let source = "let x = 5 + 3;\nlet y = x * 2;\nprint(y);";
    let result = compile(source, &options(1)).unwrap();
    assert_eq!(result.optimized_ir.trim(), "print 16");
    assert!(result.assembly.contains("mov rdi, 16"));
    // No temporaries survive into the generated assembly.
    assert!(!result.optimized_ir.contains("t0"));
}

#[test]
fn scenario_identities_collapse_to_print_15() {
    let source = "let a = 10 + 5;\nlet b = a * 1;\nlet c = b + 0;\nprint(c);";
    let result = compile(source, &options(2)).unwrap();
    assert_eq!(result.optimized_ir.trim(), "print 15");
    assert!(result.assembly.contains("mov rdi, 15"));
}

#[test]
fn scenario_duplicate_declaration_fails_semantic_analysis() {
    let err = compile("let x = 5;\nlet x = 10;", &options(1)).unwrap_err();
    assert_eq!(err.stage(), "semantic");
    assert!(err.to_string().contains("already declared"));
}

#[test]
fn scenario_undefined_variable_fails_semantic_analysis() {
    let err = compile("print(z);", &options(1)).unwrap_err();
    assert_eq!(err.stage(), "semantic");
    assert!(err.to_string().contains("'z'"));
}

#[test]
fn scenario_unused_variable_warns_but_succeeds() {
    let result = compile("let a = 1;\nlet b = 2;\nprint(b);", &options(1)).unwrap();
    assert_eq!(
        result.warnings,
        vec!["variable 'a' is declared but never used".to_string()]
    );

    let clean = compile("let x = 1;\nprint(x);", &options(1)).unwrap();
    assert!(clean.warnings.is_empty());
}

#[test]
fn codegen_emits_division_sequence() {
    let result = compile("let x = 10 / 2;\nprint(x);", &options(0)).unwrap();
    assert!(result.assembly.contains("xor rdx, rdx"));
    assert!(result.assembly.contains("mov rbx, 2"));
    assert!(result.assembly.contains("idiv rbx"));
}

#[test]
fn codegen_emits_runtime_boilerplate() {
    let result = compile("print(1);", &options(1)).unwrap();
    assert!(result.assembly.contains("extern printf"));
    assert!(result.assembly.contains("print_fmt db '%d', 10, 0"));
    assert!(result.assembly.contains("_start:"));
    assert!(result.assembly.contains("call print_int"));
    assert!(result.assembly.contains("call exit"));
}

#[test]
fn codegen_skips_move_when_operand_already_in_argument_register() {
    // The sixth distinct name lands in rdi, so printing it needs no move.
    let mut instructions: Vec<_> = (0..6)
        .map(|i| Instr::copy(format!("v{i}"), Operand::Const(i as f64)))
        .collect();
    instructions.push(Instr::Print { operand: var("v5") });

    let assembly = Codegen::new().generate(&TacProgram(instructions));
    let lines: Vec<_> = assembly.lines().collect();
    let print_at = lines
        .iter()
        .position(|line| line.contains("Print: print v5"))
        .unwrap();
    assert_eq!(lines[print_at + 1], "    call print_int");
}

#[test]
fn regalloc_hands_out_pool_in_order_then_wraps() {
    let mut registers = RegisterAllocator::new();
    for (i, expected) in REGISTER_POOL.iter().enumerate() {
        assert_eq!(registers.allocate(&format!("v{i}")), *expected);
    }

    // The pool is exhausted: the next name wraps and evicts the first.
    assert_eq!(registers.allocate("v10"), "rax");
    assert_eq!(registers.get("v0"), None);
    assert_eq!(registers.get("v10"), Some("rax"));
}

#[test]
fn regalloc_is_stable_for_bound_names() {
    let mut registers = RegisterAllocator::new();
    let first = registers.allocate("a");
    assert_eq!(registers.allocate("a"), first);
}

#[test]
fn compile_populates_every_dump() {
    let result = compile("let x = 1;\nprint(x);", &options(2)).unwrap();
    assert!(result.tokens.contains("IDENTIFIER"));
    assert!(result.ast.starts_with("Program:"));
    assert!(result.symbols.contains("x: number"));
    assert!(!result.ir.is_empty());
    assert!(!result.assembly.is_empty());
    assert!(result.trace.is_empty());

    let verbose = CompileOptions {
        opt_rounds: 2,
        verbose: true,
    };
    let traced = compile("let x = 1;\nprint(x);", &verbose).unwrap();
    assert_eq!(traced.trace.len(), 6);
}

#[test]
fn default_options_match_standard_optimization_level() {
    assert_eq!(CompileOptions::default().opt_rounds, 2);
}
