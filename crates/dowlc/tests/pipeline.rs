use dowlc::ast::Statement;
use dowlc::{analyze, parse, tokenize, Frontend, Stage, TokenKind};
use test_log::test;
use tracing::info;

const SAMPLE: &str = "\
// running total
int total = 0;
float scale = 2.5;
do {
    /* body runs at least once */
    total = total + 1;
    scale = scale * total;
} while (total < 10);
";

#[test]
fn test_compile_sample() -> eyre::Result<()> {
    let compilation = Frontend::default().compile(SAMPLE)?;
    info!("compiled program:\n{}", compilation.program);
    assert_eq!(compilation.program.statements.len(), 3);
    assert!(matches!(
        compilation.program.statements.statements[2],
        Statement::DoWhile(_)
    ));
    let symbols = compilation
        .symbols
        .iter()
        .map(|(name, symbol)| format!("{name}: {}", symbol.ty))
        .collect::<Vec<_>>();
    assert_eq!(symbols, ["total: int", "scale: float"]);
    Ok(())
}

#[test]
fn test_stages_compose() -> eyre::Result<()> {
    let tokens = tokenize(SAMPLE)?;
    let program = parse(&tokens)?;
    let symbols = analyze(&program)?;
    assert_eq!(symbols, Frontend::default().compile(SAMPLE)?.symbols);
    Ok(())
}

#[test]
fn test_lexemes_rebuild_stripped_source() -> eyre::Result<()> {
    let tokens = tokenize(SAMPLE)?;
    let rebuilt = tokens
        .iter()
        .filter(|token| token.kind() != &TokenKind::Eof)
        .map(|token| token.lexeme())
        .collect::<String>();
    let stripped = SAMPLE
        .lines()
        .map(|line| line.split("//").next().unwrap_or_default())
        .filter(|line| !line.trim_start().starts_with("/*"))
        .flat_map(|line| line.split_whitespace())
        .collect::<String>();
    assert_eq!(rebuilt, stripped);
    Ok(())
}

#[test]
fn test_narrowing_declaration() {
    let err = Frontend::default().compile("int x = 3.14;").unwrap_err();
    assert_eq!(err.stage(), Stage::Semantic);
    assert_eq!((err.line(), err.column()), (1, 5));
}

#[test]
fn test_undeclared_assignment() {
    let err = Frontend::default().compile("x = 1;").unwrap_err();
    assert_eq!(err.stage(), Stage::Semantic);
    assert_eq!(err.message(), "Undeclared variable 'x'");
}

#[test]
fn test_redeclaration_at_second() {
    let err = Frontend::default().compile("int x; int x;").unwrap_err();
    assert_eq!(err.stage(), Stage::Semantic);
    assert_eq!(err.column(), 12);
}

#[test]
fn test_loop_body_declaration_visible_in_condition() -> eyre::Result<()> {
    let compilation = Frontend::default().compile("do { int x = 1; } while (x <= 2);")?;
    assert!(compilation.symbols.contains("x"));
    Ok(())
}

#[test]
fn test_narrowing_through_float_variable() {
    let err = Frontend::default()
        .compile("float a = 1; int b = a + 1;")
        .unwrap_err();
    assert_eq!(err.stage(), Stage::Semantic);
    assert_eq!(err.message(), "Cannot assign float to int variable 'b'");
}

#[test]
fn test_unclosed_loop_cites_eof() {
    let err = Frontend::default().compile("do { int x = 1;").unwrap_err();
    assert_eq!(err.stage(), Stage::Syntax);
    assert!(err.message().contains("EOF"), "{}", err.message());
    assert_eq!((err.line(), err.column()), (1, 16));
}

#[test]
fn test_unexpected_character_position() {
    let source = "int x;\ndo {\n   x = x + 1;  #\n} while (x);";
    let err = Frontend::default().compile(source).unwrap_err();
    assert_eq!(err.stage(), Stage::Lexical);
    assert_eq!((err.line(), err.column()), (3, 16));
    assert_eq!(err.to_string(), "Unexpected character: '#' at line 3, column 16");
}

#[test]
fn test_report_points_at_error() {
    let source = "int x;\nx = 1 # 2;\n";
    let err = Frontend::default().compile(source).unwrap_err();
    let report = err.report(source).to_string();
    let lines = report.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Unexpected character: '#'");
    assert_eq!(lines[1], "  -> 2:7");
    assert!(lines.contains(&"2 | x = 1 # 2;"), "{report}");
    assert!(lines.contains(&"          ~"), "{report}");
}

#[test]
fn test_compile_is_idempotent() -> eyre::Result<()> {
    let frontend = Frontend::builder().collect_trace(true).build();
    let first = frontend.compile(SAMPLE)?;
    let second = frontend.compile(SAMPLE)?;
    assert_eq!(first, second);

    let err_source = "int a; float b = 1.0; a = b;";
    assert_eq!(frontend.compile(err_source), frontend.compile(err_source));
    Ok(())
}

#[test]
fn test_long_operator_chain() -> eyre::Result<()> {
    let source = format!("int x = 1{};\nx = x{};", " + 1".repeat(199_999), " < 2".repeat(1_000));
    let compilation = Frontend::default().compile(&source)?;
    assert_eq!(compilation.tokens.len(), 2 * 200_000 + 2 * 1_001 + 6);
    assert_eq!(compilation.symbols.len(), 1);
    Ok(())
}

#[test]
fn test_deep_parentheses_are_rejected() {
    let source = format!("int x = {}1{};", "(".repeat(50_000), ")".repeat(50_000));
    let err = Frontend::default().compile(&source).unwrap_err();
    assert_eq!(err.stage(), Stage::Syntax);
    assert_eq!(err.message(), "Nesting deeper than 128 levels");
}
