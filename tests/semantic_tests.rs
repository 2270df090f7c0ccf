// Scope, shadowing, call-site and condition checks

use classfront::{analyze, Analysis, FrontendConfig, SemanticError, Type};

fn run(source: &str) -> Analysis {
    analyze(source, FrontendConfig::default())
}

fn errors(source: &str) -> Vec<SemanticError> {
    let analysis = run(source);
    assert_eq!(
        analysis.syntax_error_count(),
        0,
        "unexpected syntax errors: {:?}",
        analysis.syntax_errors
    );
    analysis.semantic_errors
}

#[test]
fn test_shadowing_counts_each_occurrence() {
    let base = errors("class A { int x; void m() { int y; } }");
    assert!(base.is_empty());

    let shadowed = errors("class A { int x; void m() { int x; } }");
    assert_eq!(shadowed.len(), 1);
    assert!(matches!(shadowed[0], SemanticError::Shadowed { .. }));

    let twice = errors("class A { int x; void m() { int x; if (true) { int x; } } }");
    assert_eq!(twice.len(), 2);
}

#[test]
fn test_parameter_shadowing_a_field() {
    let errs = errors("class A { int n; void m(int n) { } }");
    assert_eq!(errs.len(), 1);
    assert_eq!(
        errs[0].to_string(),
        "variable 'n' already exists in parent scope 'global'; cannot redeclare in nested scope 'm@void(int)'"
    );
}

#[test]
fn test_sibling_scopes_do_not_clash() {
    let errs = errors(
        "class A { void m() { if (true) { int t; } else { int t; } while (false) { int t; } } }",
    );
    assert!(errs.is_empty(), "{errs:?}");
}

#[test]
fn test_locals_of_different_methods_do_not_clash() {
    let errs = errors("class A { void a() { int t; } void b() { int t; } }");
    assert!(errs.is_empty(), "{errs:?}");
}

#[test]
fn test_out_of_scope_use() {
    let errs = errors("class A { void m() { if (true) { int t; } t = 1; } }");
    assert_eq!(errs.len(), 1);
    assert!(matches!(errs[0], SemanticError::UndeclaredVariable { .. }));
}

#[test]
fn test_arity_error_is_reported_once() {
    let errs = errors(
        "class A { int f(int a, int b) { return a; } void m() { f(1); } }",
    );
    assert_eq!(errs.len(), 1);
    assert!(matches!(
        errs[0],
        SemanticError::ArityMismatch { expected: 2, found: 1, .. }
    ));
}

#[test]
fn test_each_mismatched_argument_is_reported() {
    let errs = errors(
        "class A { int f(int a, boolean b) { return a; } void m() { f(true, 1); } }",
    );
    assert_eq!(errs.len(), 2);
    assert!(matches!(
        errs[0],
        SemanticError::ArgumentTypeMismatch { position: 1, expected: Type::Int, found: Type::Boolean, .. }
    ));
    assert!(matches!(
        errs[1],
        SemanticError::ArgumentTypeMismatch { position: 2, expected: Type::Boolean, found: Type::Int, .. }
    ));
}

#[test]
fn test_arity_and_type_errors_are_independent() {
    let errs = errors(
        "class A { int f(int a, boolean b) { return a; } void m() { f(true, 1, 2); } }",
    );
    assert_eq!(errs.len(), 3);
    assert!(matches!(errs[0], SemanticError::ArityMismatch { .. }));
}

#[test]
fn test_call_to_unknown_method() {
    let errs = errors("class A { void m() { g(); } }");
    assert_eq!(errs.len(), 1);
    assert!(matches!(errs[0], SemanticError::UndeclaredMethod { .. }));
}

#[test]
fn test_call_to_variable_is_not_checked() {
    let errs = errors("class A { void m() { int n; n(); } }");
    assert!(errs.is_empty(), "{errs:?}");

    // The call still types as an error, so a condition built on it is rejected.
    let errs = errors("class A { void m() { int n; if (n()) { } } }");
    assert_eq!(errs.len(), 1);
    assert!(matches!(errs[0], SemanticError::ConditionNotBoolean { found: Type::Error, .. }));
}

#[test]
fn test_method_result_type_flows_into_checks() {
    let errs = errors(
        "class A { int size() { return 3; } void m() { if (size()) { } while (size() > 1) { } } }",
    );
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].to_string(), "if condition must be boolean, found int");
}

#[test]
fn test_condition_typing() {
    assert!(errors("class A { void m() { while (true) { } } }").is_empty());
    assert_eq!(errors("class A { void m() { while (1) { } } }").len(), 1);

    assert!(errors("class A { void m() { do { } while (1 < 2); } }").is_empty());
    let errs = errors("class A { void m() { do { } while (\"no\"); } }");
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].to_string(), "do-while condition must be boolean, found string");

    assert_eq!(errors("class A { void m() { for (;1;) { } } }").len(), 1);
    assert!(errors("class A { void m() { for (;;) { } } }").is_empty());
}

#[test]
fn test_switch_subject_must_be_int() {
    assert!(errors("class A { void m() { switch (1 + 2) { case 3: break; } } }").is_empty());

    let errs = errors("class A { void m() { switch ('c') { case 'c': break; } } }");
    assert_eq!(errs.len(), 1);
    assert!(matches!(errs[0], SemanticError::SwitchNotInt { found: Type::Char }));

    assert_eq!(errors("class A { void m() { switch (1.5) { } } }").len(), 1);
}

#[test]
fn test_return_checks() {
    assert!(errors("class A { void m() { return; } }").is_empty());
    assert!(errors("class A { string m() { return \"s\"; } }").is_empty());

    let errs = errors("class A { void m() { return 1; } }");
    assert!(matches!(errs[..], [SemanticError::ValueInVoidReturn { found: Type::Int }]));

    let errs = errors("class A { boolean m() { return 1.5; } }");
    assert!(matches!(
        errs[..],
        [SemanticError::ReturnTypeMismatch { expected: Type::Boolean, found: Type::Float }]
    ));
}

#[test]
fn test_assignment_checks_cover_initialisers() {
    let source = "class A { float f = 1; int i = 2.5; void m() { boolean b; b = 1; } }";

    assert!(errors(source).is_empty());

    let analysis = analyze(source, FrontendConfig::default().with_assignment_checks());
    assert_eq!(analysis.semantic_error_count(), 2);
    assert!(analysis
        .semantic_errors
        .iter()
        .all(|e| matches!(e, SemanticError::IncompatibleAssignment { .. })));
}
