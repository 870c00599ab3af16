//! Strategy-parameterised tree-walking evaluator for Jam.
//!
//! The evaluator walks the resolved AST ([`crate::ast::Expr`]) and produces
//! runtime values ([`Value`](crate::values::Value)). How arguments are bound
//! and how `cons` builds cells are not hard-coded: both come from the
//! [`Strategy`] the evaluator is constructed with.
//!
//! ## Design Principles
//!
//! - **Never panic**: ill-typed programs raise [`RuntimeError`]s
//! - **Stack-safe**: depth tracking turns runaway recursion into
//!   [`ResourceExceededError::StackOverflow`]; with the `std` feature the
//!   native stack grows on demand, so the limit is reached first
//! - **Same answers**: a program that terminates under several strategies
//!   produces equal results under all of them. The exception is `=` between
//!   closures, which compares identity: call-by-name builds a new closure on
//!   every reference, so `f = f` is `false` there
//!
//! ## Example
//!
//! ```
//! use jam_core::{analyzer, evaluator::{Evaluator, EvaluatorOptions, Strategy}, parser};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let parsed = parser::parse(&arena, "let x := 2 * 3; in x + 12").unwrap();
//! let expr = analyzer::analyze(&arena, &parsed).unwrap();
//!
//! let mut evaluator = Evaluator::new(&arena, Strategy::NEED_NEED, EvaluatorOptions::default());
//! let result = evaluator.eval(expr).unwrap();
//! assert_eq!(result.as_int(), Some(18));
//! ```

pub mod env;
mod error;
mod eval;
mod operators;
pub mod policy;
mod primitives;
pub mod suspension;


pub use env::{Binding, Env};
pub use error::{ExecutionError, ResourceExceededError, RuntimeError};
pub use eval::{EvalStats, Evaluator, EvaluatorOptions};
pub use policy::{
    BindingPolicy, CallByName, CallByNeed, CallByValue, ConsPolicy, Eager, LazyName, LazyNeed,
    Strategy,
};
pub use suspension::{Suspension, Thunk};
