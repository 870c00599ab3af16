//! Runtime values.

use core::fmt;
use core::ptr;

use crate::ast::{Lambda, PrimFun};
use crate::evaluator::{Env, Evaluator, ExecutionError, RuntimeError, Thunk};
use crate::ToString;

/// A Jam value. Small and `Copy`; compound values live in the arena.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Int(i64),
    Bool(bool),
    Empty,
    Cons(&'a ConsCell<'a>),
    Closure(&'a Closure<'a>),
    Prim(PrimFun),
}

impl<'a> Value<'a> {
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Kind name used in type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Empty => "empty list",
            Value::Cons(_) => "cons",
            Value::Closure(_) => "closure",
            Value::Prim(_) => "primitive function",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_cons(&self) -> Option<&'a ConsCell<'a>> {
        match *self {
            Value::Cons(cell) => Some(cell),
            _ => None,
        }
    }

    /// `empty` or a cons cell.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::Empty | Value::Cons(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Prim(_))
    }
}

// Shallow identity: compound values are equal only if they are the same
// allocation. Structural equality, which may force lazy cells, is
// `Evaluator::values_equal`.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Empty, Value::Empty) => true,
            (Value::Cons(a), Value::Cons(b)) => ptr::eq(*a, *b),
            (Value::Closure(a), Value::Closure(b)) => ptr::eq(*a, *b),
            (Value::Prim(a), Value::Prim(b)) => a == b,
            _ => false,
        }
    }
}

/// A function value: the literal plus the environment it was evaluated in.
pub struct Closure<'a> {
    pub lambda: &'a Lambda<'a>,
    pub env: Env<'a>,
}

impl<'a> Closure<'a> {
    pub fn new(lambda: &'a Lambda<'a>, env: Env<'a>) -> Self {
        Self { lambda, env }
    }

    pub fn arity(&self) -> usize {
        self.lambda.arity()
    }
}

/// A list pair whose components may still be suspended.
pub struct ConsCell<'a> {
    first: Thunk<'a>,
    rest: Thunk<'a>,
}

impl<'a> ConsCell<'a> {
    pub fn new(first: Thunk<'a>, rest: Thunk<'a>) -> Self {
        Self { first, rest }
    }

    /// Build a cell from values that are already computed.
    pub fn forced(first: Value<'a>, rest: Value<'a>) -> Self {
        Self::new(Thunk::forced(first), Thunk::forced(rest))
    }

    pub fn first(&self, ev: &mut Evaluator<'a>) -> Result<Value<'a>, ExecutionError> {
        self.first.force(ev, "first")
    }

    /// The tail, which must be a list. Lazy cons policies can only check this
    /// once the tail has been forced.
    pub fn rest(&self, ev: &mut Evaluator<'a>) -> Result<Value<'a>, ExecutionError> {
        let rest = self.rest.force(ev, "rest")?;
        if !rest.is_list() {
            return Err(RuntimeError::TypeError {
                operation: "cons".to_string(),
                expected: "list",
                found: rest.kind(),
            }
            .into());
        }
        Ok(rest)
    }

    pub fn first_thunk(&self) -> &Thunk<'a> {
        &self.first
    }

    pub fn rest_thunk(&self) -> &Thunk<'a> {
        &self.rest
    }

    /// The tail if it is a forced cons cell.
    fn forced_next(&self) -> Option<&'a ConsCell<'a>> {
        self.rest.peek().and_then(|rest| rest.as_cons())
    }
}

// Nested lists deeper than this render as `...`.
const MAX_DISPLAY_NESTING: usize = 64;

fn fmt_value(value: &Value<'_>, f: &mut fmt::Formatter<'_>, nesting: usize) -> fmt::Result {
    match value {
        Value::Int(n) => write!(f, "{}", n),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Empty => f.write_str("()"),
        Value::Cons(_) if nesting >= MAX_DISPLAY_NESTING => f.write_str("(...)"),
        Value::Cons(cell) => fmt_list(cell, f, nesting + 1),
        Value::Closure(closure) => write!(f, "(closure: {})", closure.lambda),
        Value::Prim(prim) => write!(f, "{}", prim),
    }
}

fn fmt_thunk(thunk: &Thunk<'_>, f: &mut fmt::Formatter<'_>, nesting: usize) -> fmt::Result {
    match thunk.peek() {
        Some(value) => fmt_value(&value, f, nesting),
        None => f.write_str("..."),
    }
}

// Walks only components that are already forced. A spine that loops back on
// itself (possible with memoised lazy cells) is cut off with `...`.
fn fmt_list(cell: &ConsCell<'_>, f: &mut fmt::Formatter<'_>, nesting: usize) -> fmt::Result {
    f.write_str("(")?;
    let mut current = cell;
    let mut slow = cell;
    let mut steps = 0usize;
    loop {
        fmt_thunk(&current.first, f, nesting)?;
        match current.rest.peek() {
            Some(Value::Empty) => break,
            Some(Value::Cons(next)) => {
                steps += 1;
                if steps % 2 == 0 {
                    slow = slow.forced_next().unwrap_or(slow);
                }
                if ptr::eq(next, slow) {
                    f.write_str(" ...")?;
                    break;
                }
                f.write_str(" ")?;
                current = next;
            }
            Some(other) => {
                f.write_str(" . ")?;
                fmt_value(&other, f, nesting)?;
                break;
            }
            None => {
                f.write_str(" ...")?;
                break;
            }
        }
    }
    f.write_str(")")
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_value(self, f, 0)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({})", n),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Empty => f.write_str("Empty"),
            Value::Cons(_) => write!(f, "Cons({})", self),
            Value::Closure(closure) => write!(f, "Closure({})", closure.lambda.head()),
            Value::Prim(prim) => write!(f, "Prim({})", prim),
        }
    }
}

impl fmt::Debug for Closure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure({} captures {:?})", self.lambda.head(), self.env)
    }
}

impl fmt::Debug for ConsCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsCell")
            .field("first", &self.first)
            .field("rest", &self.rest)
            .finish()
    }
}
