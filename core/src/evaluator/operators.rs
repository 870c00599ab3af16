//! Unary, arithmetic and ordering operators.
//!
//! Operators are strict under every strategy: callers evaluate the operands
//! and these functions only check kinds and compute.

use crate::{
    ToString,
    evaluator::RuntimeError,
    parser::{BinaryOp, ComparisonOp, UnaryOp},
    values::Value,
};

pub(super) fn expect_int(operation: &str, value: Value<'_>) -> Result<i64, RuntimeError> {
    value.as_int().ok_or_else(|| RuntimeError::TypeError {
        operation: operation.to_string(),
        expected: "integer",
        found: value.kind(),
    })
}

pub(super) fn expect_bool(operation: &str, value: Value<'_>) -> Result<bool, RuntimeError> {
    value.as_bool().ok_or_else(|| RuntimeError::TypeError {
        operation: operation.to_string(),
        expected: "boolean",
        found: value.kind(),
    })
}

pub(super) fn eval_unary<'a>(op: UnaryOp, value: Value<'a>) -> Result<Value<'a>, RuntimeError> {
    match op {
        UnaryOp::Plus => expect_int(op.symbol(), value).map(Value::Int),
        // -i64::MIN wraps to itself.
        UnaryOp::Neg => expect_int(op.symbol(), value).map(|n| Value::Int(n.wrapping_neg())),
        UnaryOp::Not => expect_bool(op.symbol(), value).map(|b| Value::Bool(!b)),
    }
}

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow.
/// Division by zero returns an error.
pub(super) fn eval_binary_int(op: BinaryOp, left: i64, right: i64) -> Result<i64, RuntimeError> {
    match op {
        BinaryOp::Add => Ok(left.wrapping_add(right)),
        BinaryOp::Sub => Ok(left.wrapping_sub(right)),
        BinaryOp::Mul => Ok(left.wrapping_mul(right)),
        BinaryOp::Div => {
            if right == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                // Use wrapping_div to handle i64::MIN / -1 case
                Ok(left.wrapping_div(right))
            }
        }
    }
}

/// Integer ordering. `=` and `!=` are handled by structural equality and
/// never reach this function with non-integer operands.
pub(super) fn eval_comparison_int(op: ComparisonOp, left: i64, right: i64) -> bool {
    match op {
        ComparisonOp::Eq => left == right,
        ComparisonOp::Neq => left != right,
        ComparisonOp::Lt => left < right,
        ComparisonOp::Gt => left > right,
        ComparisonOp::Le => left <= right,
        ComparisonOp::Ge => left >= right,
    }
}
