// Panic-mode recovery, termination and scope balance on malformed input

use classfront::parser::lexer::Lexer;
use classfront::parser::trace::RecordingTracer;
use classfront::{analyze, Analysis, FrontendConfig, Parser, TokenKind};

fn run(source: &str) -> Analysis {
    analyze(source, FrontendConfig::default())
}

const MALFORMED: [&str; 12] = [
    "",
    "}}}}",
    "class",
    "class A {",
    "class A { int }",
    "class A { void m( { } }",
    "class A { void m() { if (x { while ( } }",
    "class A { void m() { for (int i = 0 i < 3; ) { } } }",
    "class A { void m() { switch (1) { case : case 2 default } } }",
    "class A { int m() { return return return; } }",
    "; ) , } class if for while do switch return",
    "class A { void m() { do { x = ; } while ) ; } } trailing tokens",
];

#[test]
fn test_malformed_input_terminates_with_errors() {
    for source in MALFORMED {
        let analysis = run(source);
        assert!(
            analysis.syntax_error_count() > 0,
            "no syntax error for {source:?}"
        );
    }
}

#[test]
fn test_scope_balance() {
    let well_formed = [
        "class A { int x; }",
        "class A { void m() { if (true) { } else { while (false) { } } } }",
        "class A { void m() { for (int i = 0; i < 2; i = i + 1) { do { } while (false); } } }",
        "class A { void m() { switch (1) { case 1: { } default: break; } } }",
    ];

    for source in well_formed.iter().chain(MALFORMED.iter()) {
        let analysis = run(source);
        assert_eq!(analysis.scopes.depth(), 1, "unbalanced for {source:?}");
        assert_eq!(
            analysis.scopes.entered(),
            analysis.scopes.exited(),
            "unbalanced for {source:?}"
        );
    }
}

#[test]
fn test_one_error_per_recovery_episode() {
    let analysis = run("class A { void m() { x = 1 + $ $ $ ; } }");
    assert!(analysis.lexical_errors().count() >= 1);
    assert_eq!(analysis.syntax_error_count(), 1, "{:?}", analysis.syntax_errors);
}

#[test]
fn test_recovery_resumes_at_next_member() {
    let analysis = run("class A { int x y; boolean ok; ) void m() { } }");
    assert_eq!(analysis.syntax_error_count(), 3, "{:?}", analysis.syntax_errors);
    assert!(analysis.symbols.get("ok").next().is_some());
    assert!(analysis.symbols.get("m").next().is_some());
}

#[test]
fn test_keywords_are_never_identifiers() {
    let source = "class int if iff true truex return print default classy";
    let tokens = Lexer::new(source).tokenize();
    let kinds: Vec<(&str, TokenKind)> = tokens.iter().map(|t| (t.lexeme.as_str(), t.kind)).collect();

    assert_eq!(
        kinds,
        vec![
            ("class", TokenKind::Keyword),
            ("int", TokenKind::Keyword),
            ("if", TokenKind::Keyword),
            ("iff", TokenKind::Id),
            ("true", TokenKind::Keyword),
            ("truex", TokenKind::Id),
            ("return", TokenKind::Keyword),
            ("print", TokenKind::Id),
            ("default", TokenKind::Id),
            ("classy", TokenKind::Id),
        ]
    );
}

#[test]
fn test_trace_is_balanced() {
    let mut tracer = RecordingTracer::default();
    let tokens = Lexer::new("class A { int m(int a) { if (a > 0) { return a; } return 0; } }").tokenize();
    let analysis = Parser::new(tokens).with_tracer(&mut tracer).parse();
    assert!(analysis.is_success());

    let entered = tracer
        .lines
        .iter()
        .filter(|l| l.trim_start().starts_with("- "))
        .count();
    assert_eq!(entered, tracer.exits);
    assert!(tracer.lines.iter().any(|l| l.trim_start() == "- if"));
    assert!(tracer.lines.iter().any(|l| l.trim_start() == "-- Type: int"));
}
