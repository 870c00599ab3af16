//! Runtime evaluation errors.
//!
//! Every failure aborts evaluation of the whole program; there is no recovery
//! inside the language.
//!
//! # Error Categories
//!
//! - **Runtime errors**: the program did something the language forbids
//!   (wrong operand kind, wrong argument count, reading a variable before its
//!   definition has been installed).
//!
//! - **Resource exceeded errors**: the evaluator's own limits were hit. This is
//!   how non-terminating programs are observed.

use crate::String;
use core::fmt;

/// Runtime evaluation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    Runtime(RuntimeError),

    ResourceExceeded(ResourceExceededError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A variable with no binding in the environment chain.
    ///
    /// The analyzer rejects free variables, so this only happens for trees
    /// built by hand.
    UnboundVariable { name: String },

    /// A placeholder binding was read before its definition was installed.
    IllegalForwardReference { name: String },

    /// A by-need value was demanded while it was being computed.
    EvaluationCycle { name: String },

    /// Operand or argument of the wrong kind.
    TypeError {
        operation: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Wrong number of arguments to a closure or primitive.
    ArityError {
        function: String,
        expected: usize,
        found: usize,
    },

    DivisionByZero,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceExceededError {
    /// Evaluation recursion depth exceeded.
    StackOverflow { depth: usize, max_depth: usize },

    /// Too many list cells forced while materialising a result.
    IterationLimit { limit: usize },
}

impl ExecutionError {
    /// The runtime error, if this is one.
    pub fn as_runtime(&self) -> Option<&RuntimeError> {
        match self {
            ExecutionError::Runtime(e) => Some(e),
            ExecutionError::ResourceExceeded(_) => None,
        }
    }

    pub fn is_stack_overflow(&self) -> bool {
        matches!(
            self,
            ExecutionError::ResourceExceeded(ResourceExceededError::StackOverflow { .. })
        )
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::Runtime(e) => write!(f, "{}", e),
            ExecutionError::ResourceExceeded(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UnboundVariable { name } => {
                write!(f, "Unbound variable '{}'", name)
            }
            RuntimeError::IllegalForwardReference { name } => {
                write!(
                    f,
                    "Illegal forward reference to '{}' before its definition was evaluated",
                    name
                )
            }
            RuntimeError::EvaluationCycle { name } => {
                write!(f, "Value of '{}' depends on itself", name)
            }
            RuntimeError::TypeError {
                operation,
                expected,
                found,
            } => write!(
                f,
                "Type error in {}: expected {}, found {}",
                operation, expected, found
            ),
            RuntimeError::ArityError {
                function,
                expected,
                found,
            } => write!(
                f,
                "Arity error: {} expects {} argument{}, got {}",
                function,
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ),
            RuntimeError::DivisionByZero => write!(f, "Division by zero"),
        }
    }
}

impl fmt::Display for ResourceExceededError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceExceededError::StackOverflow { depth, max_depth } => {
                write!(
                    f,
                    "Evaluation stack overflow: depth {} exceeds maximum of {}",
                    depth, max_depth
                )
            }
            ResourceExceededError::IterationLimit { limit } => {
                write!(f, "Result has more than {} list cells", limit)
            }
        }
    }
}

// Convenient conversions for error construction
impl From<RuntimeError> for ExecutionError {
    fn from(e: RuntimeError) -> Self {
        ExecutionError::Runtime(e)
    }
}

impl From<ResourceExceededError> for ExecutionError {
    fn from(e: ResourceExceededError) -> Self {
        ExecutionError::ResourceExceeded(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExecutionError {}

#[cfg(feature = "std")]
impl std::error::Error for RuntimeError {}

#[cfg(feature = "std")]
impl std::error::Error for ResourceExceededError {}
