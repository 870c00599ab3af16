//! Evaluation strategies.
//!
//! A [`Strategy`] pairs a [`BindingPolicy`] (how application arguments and
//! `let` definitions become bindings) with a [`ConsPolicy`] (how `cons`
//! builds a list cell). The two axes are independent; the nine built-in
//! combinations are available as associated constants.

use core::fmt;

use crate::ast::{Expr, Variable};
use crate::evaluator::env::{Binding, Env};
use crate::evaluator::error::{ExecutionError, RuntimeError};
use crate::evaluator::eval::Evaluator;
use crate::evaluator::suspension::{Suspension, Thunk};
use crate::values::{ConsCell, Value};
use crate::ToString;

/// Decides how an argument expression is bound to a variable.
pub trait BindingPolicy: Sync {
    /// Short name used in logs and `Display` (`value`, `name`, `need`).
    fn name(&self) -> &'static str;

    /// Bind `var` to `arg`, which must be evaluated (now or later) in `env`.
    fn new_binding<'a>(
        &self,
        ev: &mut Evaluator<'a>,
        var: &'a Variable<'a>,
        arg: &'a Expr<'a>,
        env: Env<'a>,
    ) -> Result<&'a Binding<'a>, ExecutionError>;

    /// Placeholder used while setting up a recursive `let`.
    fn new_dummy_binding<'a>(
        &self,
        ev: &mut Evaluator<'a>,
        var: &'a Variable<'a>,
    ) -> &'a Binding<'a> {
        ev.alloc(Binding::placeholder(var))
    }
}

/// Decides how `cons(first, rest)` builds its cell.
pub trait ConsPolicy: Sync {
    /// Short name used in logs and `Display` (`value`, `name`, `need`).
    fn name(&self) -> &'static str;

    fn eval_cons<'a>(
        &self,
        ev: &mut Evaluator<'a>,
        first: &'a Expr<'a>,
        rest: &'a Expr<'a>,
        env: Env<'a>,
    ) -> Result<Value<'a>, ExecutionError>;
}

/// Evaluate arguments before the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallByValue;

/// Pass arguments unevaluated; re-evaluate on each use.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallByName;

/// Pass arguments unevaluated; evaluate on first use and remember.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallByNeed;

impl BindingPolicy for CallByValue {
    fn name(&self) -> &'static str {
        "value"
    }

    fn new_binding<'a>(
        &self,
        ev: &mut Evaluator<'a>,
        var: &'a Variable<'a>,
        arg: &'a Expr<'a>,
        env: Env<'a>,
    ) -> Result<&'a Binding<'a>, ExecutionError> {
        let value = ev.eval_in(arg, env)?;
        Ok(ev.alloc(Binding::value(var, value)))
    }
}

impl BindingPolicy for CallByName {
    fn name(&self) -> &'static str {
        "name"
    }

    fn new_binding<'a>(
        &self,
        ev: &mut Evaluator<'a>,
        var: &'a Variable<'a>,
        arg: &'a Expr<'a>,
        env: Env<'a>,
    ) -> Result<&'a Binding<'a>, ExecutionError> {
        Ok(ev.alloc(Binding::name(var, Suspension::new(arg, env))))
    }
}

impl BindingPolicy for CallByNeed {
    fn name(&self) -> &'static str {
        "need"
    }

    fn new_binding<'a>(
        &self,
        ev: &mut Evaluator<'a>,
        var: &'a Variable<'a>,
        arg: &'a Expr<'a>,
        env: Env<'a>,
    ) -> Result<&'a Binding<'a>, ExecutionError> {
        Ok(ev.alloc(Binding::need(var, Suspension::new(arg, env))))
    }
}

/// Evaluate both operands of `cons` immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eager;

/// Defer both operands; every access re-evaluates.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyName;

/// Defer both operands; the first access caches the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyNeed;

impl ConsPolicy for Eager {
    fn name(&self) -> &'static str {
        "value"
    }

    fn eval_cons<'a>(
        &self,
        ev: &mut Evaluator<'a>,
        first: &'a Expr<'a>,
        rest: &'a Expr<'a>,
        env: Env<'a>,
    ) -> Result<Value<'a>, ExecutionError> {
        let first = ev.eval_in(first, env)?;
        let rest = ev.eval_in(rest, env)?;
        if !rest.is_list() {
            return Err(RuntimeError::TypeError {
                operation: "cons".to_string(),
                expected: "list",
                found: rest.kind(),
            }
            .into());
        }
        let cell = ev.alloc(ConsCell::new(Thunk::forced(first), Thunk::forced(rest)));
        Ok(Value::Cons(cell))
    }
}

impl ConsPolicy for LazyName {
    fn name(&self) -> &'static str {
        "name"
    }

    fn eval_cons<'a>(
        &self,
        ev: &mut Evaluator<'a>,
        first: &'a Expr<'a>,
        rest: &'a Expr<'a>,
        env: Env<'a>,
    ) -> Result<Value<'a>, ExecutionError> {
        let cell = ev.alloc(ConsCell::new(
            Thunk::by_name(Suspension::new(first, env)),
            Thunk::by_name(Suspension::new(rest, env)),
        ));
        Ok(Value::Cons(cell))
    }
}

impl ConsPolicy for LazyNeed {
    fn name(&self) -> &'static str {
        "need"
    }

    fn eval_cons<'a>(
        &self,
        ev: &mut Evaluator<'a>,
        first: &'a Expr<'a>,
        rest: &'a Expr<'a>,
        env: Env<'a>,
    ) -> Result<Value<'a>, ExecutionError> {
        let cell = ev.alloc(ConsCell::new(
            Thunk::by_need(Suspension::new(first, env)),
            Thunk::by_need(Suspension::new(rest, env)),
        ));
        Ok(Value::Cons(cell))
    }
}

/// A binding policy paired with a cons policy.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub binding: &'static dyn BindingPolicy,
    pub cons: &'static dyn ConsPolicy,
}

impl Strategy {
    pub const fn new(binding: &'static dyn BindingPolicy, cons: &'static dyn ConsPolicy) -> Self {
        Self { binding, cons }
    }

    pub const VALUE_VALUE: Strategy = Strategy::new(&CallByValue, &Eager);
    pub const VALUE_NAME: Strategy = Strategy::new(&CallByValue, &LazyName);
    pub const VALUE_NEED: Strategy = Strategy::new(&CallByValue, &LazyNeed);
    pub const NAME_VALUE: Strategy = Strategy::new(&CallByName, &Eager);
    pub const NAME_NAME: Strategy = Strategy::new(&CallByName, &LazyName);
    pub const NAME_NEED: Strategy = Strategy::new(&CallByName, &LazyNeed);
    pub const NEED_VALUE: Strategy = Strategy::new(&CallByNeed, &Eager);
    pub const NEED_NAME: Strategy = Strategy::new(&CallByNeed, &LazyName);
    pub const NEED_NEED: Strategy = Strategy::new(&CallByNeed, &LazyNeed);

    /// The nine built-in strategies, binding axis major.
    pub const ALL: [Strategy; 9] = [
        Strategy::VALUE_VALUE,
        Strategy::VALUE_NAME,
        Strategy::VALUE_NEED,
        Strategy::NAME_VALUE,
        Strategy::NAME_NAME,
        Strategy::NAME_NEED,
        Strategy::NEED_VALUE,
        Strategy::NEED_NAME,
        Strategy::NEED_NEED,
    ];
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::VALUE_VALUE
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.binding.name(), self.cons.name())
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Strategy({})", self)
    }
}
