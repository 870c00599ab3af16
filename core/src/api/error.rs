//! Public error types for the Jam API.
//!
//! Parser and analyzer errors are turned into [`Diagnostic`]s with source
//! spans. Runtime failures keep their structured form so callers can match
//! on them.

use crate::Vec;
use crate::String;
use crate::evaluator::{ExecutionError, ResourceExceededError, RuntimeError};
use crate::parser::Span;

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use core::fmt;

/// Public error type for all Jam operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The program was rejected before evaluation (parse or scope errors).
    ///
    /// Contains one or more diagnostics with source locations and context.
    Compilation { diagnostics: Vec<Diagnostic> },

    /// The program failed while running (type, arity, forward reference...).
    Runtime(RuntimeError),

    /// Evaluation limits exceeded (stack depth, iteration limit).
    ResourceExceeded(ResourceExceededError),
}

impl Error {
    /// The runtime error, if this is one.
    pub fn as_runtime(&self) -> Option<&RuntimeError> {
        match self {
            Error::Runtime(err) => Some(err),
            _ => None,
        }
    }

    /// Diagnostics of a compilation error; empty for runtime failures.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Compilation { diagnostics } => diagnostics,
            _ => &[],
        }
    }

    pub fn is_stack_overflow(&self) -> bool {
        matches!(
            self,
            Error::ResourceExceeded(ResourceExceededError::StackOverflow { .. })
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Compilation { diagnostics } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Compilation failed with {} error(s)", error_count)
            }
            Error::Runtime(err) => write!(f, "Runtime error: {}", err),
            Error::ResourceExceeded(err) => write!(f, "Resource limit exceeded: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A diagnostic message (error, warning, or info) with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Related locations that provide additional context.
    pub related: Vec<RelatedInfo>,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "S001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - compilation cannot succeed.
    Error,
    /// Warning - suspicious code that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Related information for a diagnostic (e.g., "first defined here").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// Source location of the related information.
    pub span: Span,

    /// Message explaining the relevance.
    pub message: String,
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<crate::parser::ParseError> for Error {
    fn from(err: crate::parser::ParseError) -> Self {
        Error::Compilation {
            diagnostics: crate::Vec::from([err.to_diagnostic()]),
        }
    }
}

impl From<crate::analyzer::SyntaxError> for Error {
    fn from(err: crate::analyzer::SyntaxError) -> Self {
        Error::Compilation {
            diagnostics: crate::Vec::from([err.to_diagnostic()]),
        }
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::Runtime(err) => Error::Runtime(err),
            ExecutionError::ResourceExceeded(err) => Error::ResourceExceeded(err),
        }
    }
}
