//! Public API for the Jam language.
//!
//! An [`Interpreter`] parses and checks a program once; it can then be run
//! under any of the nine binding/cons strategies, or under a custom
//! [`Strategy`](crate::evaluator::Strategy).
//!
//! # Example
//!
//! ```
//! use jam_core::api::{Error, Interpreter};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let program = Interpreter::new(&arena, "rest(cons((map x to x(x))(map x to x(x)), empty))")?;
//!
//! // Lazy cons never evaluates the divergent head.
//! assert_eq!(program.value_need()?.to_string(), "()");
//! # Ok::<(), Error>(())
//! ```

pub mod error;
pub mod interpreter;

pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use interpreter::Interpreter;
