//! Deferred computations.
//!
//! A [`Suspension`] is an expression frozen together with the environment it
//! must be evaluated in. It never caches anything itself: the [`Thunk`] that
//! holds it decides whether a forced result replaces it (call-by-need) or not
//! (call-by-name).

use core::cell::Cell;
use core::fmt;

use tracing::trace;

use crate::ast::Expr;
use crate::evaluator::env::Env;
use crate::evaluator::error::{ExecutionError, RuntimeError};
use crate::evaluator::eval::Evaluator;
use crate::values::Value;
use crate::ToString;

#[derive(Clone, Copy)]
pub struct Suspension<'a> {
    pub expr: &'a Expr<'a>,
    pub env: Env<'a>,
}

impl<'a> Suspension<'a> {
    pub fn new(expr: &'a Expr<'a>, env: Env<'a>) -> Self {
        Self { expr, env }
    }

    /// Evaluate the frozen expression. Every call does the full work again.
    pub fn force(&self, ev: &mut Evaluator<'a>) -> Result<Value<'a>, ExecutionError> {
        ev.record_force();
        trace!(expr = %self.expr, "forcing suspension");
        ev.eval_in(self.expr, self.env)
    }
}

impl fmt::Debug for Suspension<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Suspension({})", self.expr)
    }
}

#[derive(Clone, Copy)]
enum State<'a> {
    /// Placeholder for a definition that has not been installed.
    Unset,
    Forced(Value<'a>),
    ByName(Suspension<'a>),
    ByNeed(Suspension<'a>),
    /// A by-need suspension is being forced right now.
    InProgress,
}

/// The cell behind every binding and every lazy cons component.
pub struct Thunk<'a> {
    state: Cell<State<'a>>,
}

impl<'a> Thunk<'a> {
    pub fn unset() -> Self {
        Self::with_state(State::Unset)
    }

    pub fn forced(value: Value<'a>) -> Self {
        Self::with_state(State::Forced(value))
    }

    pub fn by_name(suspension: Suspension<'a>) -> Self {
        Self::with_state(State::ByName(suspension))
    }

    pub fn by_need(suspension: Suspension<'a>) -> Self {
        Self::with_state(State::ByNeed(suspension))
    }

    fn with_state(state: State<'a>) -> Self {
        Self {
            state: Cell::new(state),
        }
    }

    /// Produce the value, evaluating the suspension if there is one.
    ///
    /// `label` names the thunk in errors (the variable name, or `first`/`rest`
    /// for cons components).
    pub fn force(&self, ev: &mut Evaluator<'a>, label: &str) -> Result<Value<'a>, ExecutionError> {
        match self.state.get() {
            State::Forced(value) => Ok(value),
            State::ByName(suspension) => suspension.force(ev),
            State::ByNeed(suspension) => {
                self.state.set(State::InProgress);
                match suspension.force(ev) {
                    Ok(value) => {
                        trace!(label, "memoised by-need value");
                        // Dropping the suspension releases its environment.
                        self.state.set(State::Forced(value));
                        Ok(value)
                    }
                    Err(err) => {
                        self.state.set(State::ByNeed(suspension));
                        Err(err)
                    }
                }
            }
            State::Unset => Err(RuntimeError::IllegalForwardReference {
                name: label.to_string(),
            }
            .into()),
            State::InProgress => Err(RuntimeError::EvaluationCycle {
                name: label.to_string(),
            }
            .into()),
        }
    }

    /// The value if it has already been computed, without doing any work.
    pub fn peek(&self) -> Option<Value<'a>> {
        match self.state.get() {
            State::Forced(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self.state.get(), State::Unset)
    }

    /// Whether forcing would re-run a suspension every time.
    pub fn is_by_name(&self) -> bool {
        matches!(self.state.get(), State::ByName(_))
    }

    /// Overwrite this thunk with the state of `other`.
    pub(crate) fn install(&self, other: &Thunk<'a>) {
        self.state.set(other.state.get());
    }

    /// Replace whatever is stored with an already computed value.
    pub(crate) fn settle(&self, value: Value<'a>) {
        self.state.set(State::Forced(value));
    }
}

impl fmt::Debug for Thunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.get() {
            State::Unset => f.write_str("Unset"),
            State::Forced(value) => write!(f, "Forced({:?})", value),
            State::ByName(suspension) => write!(f, "ByName({})", suspension.expr),
            State::ByNeed(suspension) => write!(f, "ByNeed({})", suspension.expr),
            State::InProgress => f.write_str("InProgress"),
        }
    }
}
