use bumpalo::Bump;
use pretty_assertions::assert_eq;

use crate::{
    analyzer,
    evaluator::{Env, Evaluator, EvaluatorOptions, Strategy, Suspension, Thunk},
    parser::{self, PrimFun},
    values::{ConsCell, Value},
};

fn list<'a>(arena: &'a Bump, items: &[Value<'a>]) -> Value<'a> {
    items.iter().rev().fold(Value::Empty, |rest, &first| {
        Value::Cons(arena.alloc(ConsCell::forced(first, rest)))
    })
}

#[test]
fn test_display_atoms() {
    assert_eq!(Value::Int(-42).to_string(), "-42");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::Empty.to_string(), "()");
    assert_eq!(Value::Prim(PrimFun::NumberP).to_string(), "number?");
    assert_eq!(Value::Prim(PrimFun::Cons).to_string(), "cons");
}

#[test]
fn test_display_lists() {
    let arena = Bump::new();
    let flat = list(&arena, &[Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert_eq!(flat.to_string(), "(1 2 3)");

    let inner = list(&arena, &[Value::Int(1), Value::Int(2)]);
    let nested = list(&arena, &[inner, Value::Empty, Value::Int(3)]);
    assert_eq!(nested.to_string(), "((1 2) () 3)");
}

#[test]
fn test_display_unforced_components() {
    let arena = Bump::new();
    let expr: &crate::ast::Expr = arena.alloc(crate::ast::Expr::Int(7));
    let cell = arena.alloc(ConsCell::new(
        Thunk::by_need(Suspension::new(expr, Env::EMPTY)),
        Thunk::by_name(Suspension::new(expr, Env::EMPTY)),
    ));
    assert_eq!(Value::Cons(cell).to_string(), "(... ...)");
}

#[test]
fn test_display_cyclic_list_terminates() {
    let arena = Bump::new();
    let cell: &ConsCell = arena.alloc(ConsCell::new(Thunk::forced(Value::Int(1)), Thunk::unset()));
    cell.rest_thunk().settle(Value::Cons(cell));
    assert_eq!(Value::Cons(cell).to_string(), "(1 ...)");
}

#[test]
fn test_display_closure() {
    let arena = Bump::new();
    let parsed = parser::parse(&arena, "map x, y to x + y").unwrap();
    let expr = analyzer::analyze(&arena, &parsed).unwrap();
    let mut ev = Evaluator::new(&arena, Strategy::default(), EvaluatorOptions::default());
    let value = ev.eval(expr).unwrap();
    assert_eq!(value.to_string(), "(closure: map x,y to (x + y))");
    assert_eq!(format!("{:?}", value), "Closure(map x,y)");
}

#[test]
fn test_kinds() {
    let arena = Bump::new();
    assert_eq!(Value::Int(0).kind(), "integer");
    assert_eq!(Value::Bool(false).kind(), "boolean");
    assert_eq!(Value::Empty.kind(), "empty list");
    assert_eq!(list(&arena, &[Value::Int(1)]).kind(), "cons");
    assert_eq!(Value::Prim(PrimFun::Rest).kind(), "primitive function");
}

#[test]
fn test_predicates() {
    let arena = Bump::new();
    let one = list(&arena, &[Value::Int(1)]);
    assert!(one.is_list());
    assert!(Value::Empty.is_list());
    assert!(!Value::Int(1).is_list());
    assert!(Value::Prim(PrimFun::First).is_function());
    assert!(!one.is_function());
    assert_eq!(Value::Int(3).as_int(), Some(3));
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::Int(3).as_bool(), None);
}

#[test]
fn test_shallow_equality_is_identity_for_cells() {
    let arena = Bump::new();
    let a = list(&arena, &[Value::Int(1)]);
    let b = list(&arena, &[Value::Int(1)]);
    assert_eq!(a, a);
    assert_ne!(a, b);
    assert_eq!(Value::Prim(PrimFun::First), Value::Prim(PrimFun::First));
    assert_ne!(Value::Int(1), Value::Bool(true));
}

#[test]
fn test_cons_cell_access() {
    let arena = Bump::new();
    let mut ev = Evaluator::new(&arena, Strategy::default(), EvaluatorOptions::default());
    let value = list(&arena, &[Value::Int(1), Value::Int(2)]);
    let cell = value.as_cons().unwrap();
    assert_eq!(cell.first(&mut ev).unwrap(), Value::Int(1));
    let rest = cell.rest(&mut ev).unwrap();
    assert_eq!(rest.to_string(), "(2)");
}
