//! The fixed set of primitive functions.

use tracing::trace;

use crate::{
    ToString,
    ast::Expr,
    evaluator::{Env, Evaluator, ExecutionError, RuntimeError},
    parser::PrimFun,
    values::{ConsCell, Value},
};

/// Apply `prim` to unevaluated argument expressions.
///
/// `cons` hands its operands to the active cons policy. Every other primitive
/// evaluates its single argument eagerly, whatever the binding policy.
pub(super) fn apply_prim<'a>(
    ev: &mut Evaluator<'a>,
    prim: PrimFun,
    args: &'a [&'a Expr<'a>],
    env: Env<'a>,
) -> Result<Value<'a>, ExecutionError> {
    if args.len() != prim.arity() {
        return Err(RuntimeError::ArityError {
            function: prim.name().to_string(),
            expected: prim.arity(),
            found: args.len(),
        }
        .into());
    }
    trace!(%prim, "applying primitive");

    match *args {
        [first, rest] => {
            let policy = ev.strategy().cons;
            policy.eval_cons(ev, first, rest, env)
        }
        [arg] => {
            let value = ev.eval_in(arg, env)?;
            apply_unary(ev, prim, value)
        }
        // Only reachable if a primitive gains a new arity.
        _ => Err(RuntimeError::ArityError {
            function: prim.name().to_string(),
            expected: prim.arity(),
            found: args.len(),
        }
        .into()),
    }
}

fn apply_unary<'a>(
    ev: &mut Evaluator<'a>,
    prim: PrimFun,
    value: Value<'a>,
) -> Result<Value<'a>, ExecutionError> {
    match prim {
        PrimFun::FunctionP => Ok(Value::bool(value.is_function())),
        PrimFun::NumberP => Ok(Value::bool(matches!(value, Value::Int(_)))),
        PrimFun::ListP => Ok(Value::bool(value.is_list())),
        PrimFun::ConsP => Ok(Value::bool(matches!(value, Value::Cons(_)))),
        PrimFun::EmptyP => Ok(Value::bool(matches!(value, Value::Empty))),
        PrimFun::Arity => match value {
            Value::Closure(closure) => Ok(Value::Int(closure.arity() as i64)),
            Value::Prim(other) => Ok(Value::Int(other.arity() as i64)),
            other => Err(type_error(prim, "function", other)),
        },
        PrimFun::First => expect_cons(prim, value)?.first(ev),
        PrimFun::Rest => expect_cons(prim, value)?.rest(ev),
        PrimFun::Cons => Err(RuntimeError::ArityError {
            function: prim.name().to_string(),
            expected: prim.arity(),
            found: 1,
        }
        .into()),
    }
}

fn expect_cons<'a>(prim: PrimFun, value: Value<'a>) -> Result<&'a ConsCell<'a>, ExecutionError> {
    value
        .as_cons()
        .ok_or_else(|| type_error(prim, "cons", value))
}

fn type_error(prim: PrimFun, expected: &'static str, found: Value<'_>) -> ExecutionError {
    RuntimeError::TypeError {
        operation: prim.name().to_string(),
        expected,
        found: found.kind(),
    }
    .into()
}
