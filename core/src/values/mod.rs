//! Runtime values produced by the evaluator.

mod value;

pub use value::{Closure, ConsCell, Value};

#[cfg(test)]
mod value_test;
