//! Name resolution.
//!
//! Turns the parser's textual tree into the [`crate::ast`] the evaluator
//! runs, rejecting free variables and duplicate binders on the way.

pub mod analyzer;
pub mod error;

#[cfg(test)]
mod analyzer_test;

pub use analyzer::analyze;
pub use error::{SyntaxError, SyntaxErrorKind};
