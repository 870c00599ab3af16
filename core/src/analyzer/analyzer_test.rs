use super::*;
use crate::{
    ToString,
    ast::Expr,
    parser::{self, Span},
};
use bumpalo::Bump;
use pretty_assertions::assert_eq;

// Helper to parse and analyze a source string
fn analyze_source<'a>(arena: &'a Bump, source: &'a str) -> Result<&'a Expr<'a>, SyntaxError> {
    let parsed = parser::parse(arena, source).expect("parsing failed");
    analyze(arena, &parsed)
}

fn error_kind(source: &str) -> SyntaxErrorKind {
    let arena = Bump::new();
    analyze_source(&arena, source).expect_err("analysis should fail").kind
}

#[test]
fn test_round_trips_through_unparser() {
    let arena = Bump::new();
    let cases = [
        ("1 + 2 * 3", "(1 + (2 * 3))"),
        ("map x, y to x + y", "map x,y to (x + y)"),
        ("(map x to x)(1)", "(map x to x)(1)"),
        ("if true then 1 else 2", "if true then 1 else 2"),
        ("~false | true & false", "(~false | (true & false))"),
        ("cons(1, empty)", "cons(1, empty)"),
        ("let a := 1; b := a; in b", "let a := 1; b := a; in b"),
    ];
    for (source, expected) in cases {
        let expr = analyze_source(&arena, source).unwrap();
        assert_eq!(expr.to_string(), expected, "source {:?}", source);
    }
}

#[test]
fn test_uses_point_at_their_binder() {
    let arena = Bump::new();
    let expr = analyze_source(&arena, "map x to x + x").unwrap();
    let Expr::Map(lambda) = expr else {
        panic!("expected a lambda, got {}", expr);
    };
    let Expr::Binary { left, right, .. } = lambda.body else {
        panic!("expected a binary body");
    };
    let (Expr::Var(a), Expr::Var(b)) = (left, right) else {
        panic!("expected variables");
    };
    assert!(a.same(lambda.params[0]));
    assert!(b.same(lambda.params[0]));
}

#[test]
fn test_shadowing_resolves_to_innermost_binder() {
    let arena = Bump::new();
    let expr = analyze_source(&arena, "map x to map x to x").unwrap();
    let Expr::Map(outer) = expr else {
        panic!("expected a lambda");
    };
    let Expr::Map(inner) = outer.body else {
        panic!("expected a nested lambda");
    };
    let Expr::Var(var) = inner.body else {
        panic!("expected a variable");
    };
    assert!(var.same(inner.params[0]));
    assert!(!var.same(outer.params[0]));
}

#[test]
fn test_let_is_recursive() {
    let arena = Bump::new();
    let expr = analyze_source(&arena, "let x := y; y := x; in x").unwrap();
    let Expr::Let { defs, body } = expr else {
        panic!("expected a let");
    };
    let (Expr::Var(x_rhs), Expr::Var(y_rhs), Expr::Var(body_var)) = (defs[0].rhs, defs[1].rhs, body)
    else {
        panic!("expected variables");
    };
    assert!(x_rhs.same(defs[1].var));
    assert!(y_rhs.same(defs[0].var));
    assert!(body_var.same(defs[0].var));
}

#[test]
fn test_let_scope_ends_at_body() {
    assert_eq!(
        error_kind("(let x := 1; in x) + x"),
        SyntaxErrorKind::FreeVariable {
            name: "x".to_string(),
            span: Span(21..22),
        }
    );
}

#[test]
fn test_free_variable() {
    assert_eq!(
        error_kind("1 + y"),
        SyntaxErrorKind::FreeVariable {
            name: "y".to_string(),
            span: Span(4..5),
        }
    );
    assert_eq!(
        error_kind("map x to z"),
        SyntaxErrorKind::FreeVariable {
            name: "z".to_string(),
            span: Span(9..10),
        }
    );
}

#[test]
fn test_duplicate_parameter() {
    let kind = error_kind("map x, y, x to x");
    assert_eq!(
        kind,
        SyntaxErrorKind::DuplicateParameter {
            name: "x".to_string(),
            span: Span(0..16),
        }
    );
}

#[test]
fn test_duplicate_definition() {
    let source = "let x := 1; x := 2; in x";
    let kind = error_kind(source);
    assert_eq!(
        kind,
        SyntaxErrorKind::DuplicateDefinition {
            name: "x".to_string(),
            span: Span(17..18),
            first: Some(Span(9..10)),
        }
    );
}

#[test]
fn test_same_name_in_nested_scopes_is_fine() {
    let arena = Bump::new();
    assert!(analyze_source(&arena, "let x := 1; in let x := 2; in x").is_ok());
    assert!(analyze_source(&arena, "map x to let x := x; in x").is_ok());
}

#[test]
fn test_primitives_are_not_variables() {
    let arena = Bump::new();
    let expr = analyze_source(&arena, "first").unwrap();
    assert!(matches!(expr, Expr::Prim(crate::parser::PrimFun::First)));
}

#[test]
fn test_error_carries_source() {
    let arena = Bump::new();
    let err = analyze_source(&arena, "q").unwrap_err();
    assert_eq!(err.source, "q");
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("S001"));
}
