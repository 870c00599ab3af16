use alloc::string::ToString;

use crate::api::{Diagnostic, RelatedInfo, Severity};
use crate::parser::Span;
use crate::{String, Vec, format};

/// Scope error found while resolving names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub source: String,
}

impl core::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let diagnostic = self.to_diagnostic();
        write!(f, "{}: {}", diagnostic.severity, diagnostic.message)?;

        if let Some(ref code) = diagnostic.code {
            write!(f, " [{}]", code)?;
        }

        if let Some(ref help) = diagnostic.help {
            write!(f, "\nhelp: {}", help)?;
        }

        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SyntaxError {}

/// Specific kinds of scope errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A name with no enclosing binder
    FreeVariable { name: String, span: Span },
    /// The same name twice in one parameter list
    DuplicateParameter { name: String, span: Span },
    /// The same name defined twice in one `let`
    DuplicateDefinition {
        name: String,
        span: Span,
        first: Option<Span>,
    },
}

impl SyntaxErrorKind {
    /// Get the span of the error
    pub fn span(&self) -> Span {
        match self {
            SyntaxErrorKind::FreeVariable { span, .. } => span.clone(),
            SyntaxErrorKind::DuplicateParameter { span, .. } => span.clone(),
            SyntaxErrorKind::DuplicateDefinition { span, .. } => span.clone(),
        }
    }
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, source: String) -> Self {
        Self { kind, source }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut related = Vec::new();
        let (message, code, help) = match &self.kind {
            SyntaxErrorKind::FreeVariable { name, .. } => (
                format!("Undefined variable '{}'", name),
                "S001",
                "Bind it with `let` or as a `map` parameter",
            ),
            SyntaxErrorKind::DuplicateParameter { name, .. } => (
                format!("Duplicate parameter name '{}'", name),
                "S002",
                "Each parameter must have a unique name",
            ),
            SyntaxErrorKind::DuplicateDefinition { name, first, .. } => {
                if let Some(first) = first {
                    related.push(RelatedInfo {
                        span: first.clone(),
                        message: format!("'{}' first defined here", name),
                    });
                }
                (
                    format!("Duplicate definition of '{}'", name),
                    "S003",
                    "Each definition in a let must have a unique name",
                )
            }
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self.kind.span(),
            related,
            help: Some(help.to_string()),
            code: Some(code.to_string()),
        }
    }
}
