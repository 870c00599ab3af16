//! Jam - A small functional language with pluggable evaluation strategies
//!
//! # Overview
//!
//! Jam is a tiny expression language built to compare evaluation strategies.
//! Every program can be run under nine combinations of
//!
//! - a **binding policy** for function arguments and `let` definitions
//!   (call-by-value, call-by-name, call-by-need), and
//! - a **cons policy** for list cells (eager, lazy by name, lazy by need).
//!
//! # Quick Start
//!
//! ```
//! use jam::{Interpreter, Strategy};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let program = Interpreter::new(&arena, "
//!     let nats := map n to cons(n, nats(n + 1));
//!     in first(rest(rest(nats(0))))
//! ").unwrap();
//!
//! // Lazy cons makes the infinite list harmless.
//! assert_eq!(program.value_need().unwrap().as_int(), Some(2));
//! assert_eq!(program.eval_with(Strategy::NAME_NAME).unwrap().as_int(), Some(2));
//! ```
//!
//! # Errors
//!
//! Parse and scope errors carry source spans and can be rendered with
//! [`render_error`]. Runtime failures are structured values:
//!
//! ```
//! use jam::{Error, Interpreter, RuntimeError};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let program = Interpreter::new(&arena, "let x := x; in x").unwrap();
//! assert!(matches!(
//!     program.value_value(),
//!     Err(Error::Runtime(RuntimeError::IllegalForwardReference { .. }))
//! ));
//! ```

pub use jam_core::api::{Diagnostic, Error, Interpreter, RelatedInfo, Severity};

pub use jam_core::evaluator::{
    BindingPolicy, ConsPolicy, EvalStats, Evaluator, EvaluatorOptions, ResourceExceededError,
    RuntimeError, Strategy,
};
pub use jam_core::values::{self, Closure, ConsCell, Value};

pub use jam_core::{analyzer, ast, parser};

mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
