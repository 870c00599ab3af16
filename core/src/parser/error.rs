use alloc::string::ToString;

use crate::api::{Diagnostic, Severity};
use crate::parser::{Rule, Span};
use crate::{String, Vec, format};

/// Parser error with the source it was produced from.
#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected token
    UnexpectedToken { expected: String, found: String },
    /// Integer literal that does not fit in 64 bits
    InvalidNumber { text: String },
    /// Maximum nesting depth exceeded
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// Other parse errors (catch-all for Pest errors we don't specifically handle)
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: String, span: Span) -> Self {
        Self { kind, source, span }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, code, help) = match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => (
                format!("Expected {}, found {}", expected, found),
                "P001",
                None,
            ),
            ParseErrorKind::InvalidNumber { text } => (
                format!("Invalid number literal '{}'", text),
                "P002",
                Some(format!(
                    "Integer literals must be between 0 and {}",
                    i64::MAX
                )),
            ),
            ParseErrorKind::MaxDepthExceeded { max_depth, .. } => (
                format!(
                    "Expression nesting depth exceeds maximum of {} levels",
                    max_depth
                ),
                "P003",
                Some("Reduce nesting or simplify the expression".to_string()),
            ),
            ParseErrorKind::Other { message } => (message.clone(), "P999", None),
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self.span.clone(),
            related: Vec::new(),
            help,
            code: Some(code.to_string()),
        }
    }
}

impl core::fmt::Display for ParseError {
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
impl std::error::Error for ParseError {}

/// Convert Pest error to human-readable ParseError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => ParseErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: format_found(&negatives, source, span.0.start),
        },
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, source.to_string(), span)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    let mut concepts: Vec<&str> = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::integer | Rule::boolean | Rule::empty | Rule::prim => "literal",
            Rule::ident => "identifier",
            Rule::EOI => "end of input",
            Rule::kw_then => "'then'",
            Rule::kw_else => "'else'",
            Rule::kw_in => "'in'",
            Rule::kw_to => "'to'",
            Rule::definition => "definition",
            Rule::call_op => "'('",
            Rule::or
            | Rule::and
            | Rule::eq
            | Rule::neq
            | Rule::lt
            | Rule::gt
            | Rule::le
            | Rule::ge
            | Rule::add
            | Rule::sub
            | Rule::mul
            | Rule::div => "operator",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        None => "something else".to_string(),
        Some((only, [])) => only.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Describe what was found at `pos`, preferring the rules Pest reports.
fn format_found(rules: &[Rule], source: &str, pos: usize) -> String {
    if let Some(rule) = rules.first() {
        return match rule {
            Rule::ident => "identifier".to_string(),
            Rule::integer => "integer".to_string(),
            Rule::EOI => "end of input".to_string(),
            other => format!("{:?}", other),
        };
    }
    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_to_diagnostic() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: "expression".to_string(),
                found: "')'".to_string(),
            },
            "test source".to_string(),
            Span(10..20),
        );

        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.severity, Severity::Error);
        assert!(diagnostic.message.contains("Expected expression"));
        assert!(diagnostic.message.contains("found ')'"));
        assert_eq!(diagnostic.code, Some("P001".to_string()));
    }

    #[test]
    fn test_format_expected_rules() {
        assert_eq!(format_expected_rules(&[Rule::integer, Rule::boolean]), "literal");
        assert_eq!(
            format_expected_rules(&[Rule::ident, Rule::integer, Rule::EOI]),
            "identifier, literal or end of input"
        );
        assert_eq!(format_expected_rules(&[]), "something else");
    }

    #[test]
    fn test_format_found_falls_back_to_source() {
        assert_eq!(format_found(&[], "1 + )", 4), "')'");
        assert_eq!(format_found(&[], "1 +", 3), "end of input");
    }

    #[test]
    fn test_depth_error_display() {
        let error = ParseError::new(
            ParseErrorKind::MaxDepthExceeded {
                depth: 11,
                max_depth: 10,
            },
            "((((((((((((1))))))))))))".to_string(),
            Span(10..11),
        );
        let text = error.to_string();
        assert!(text.starts_with("error: Expression nesting depth exceeds maximum of 10 levels"));
        assert!(text.contains("[P003]"));
        assert!(text.contains("help: Reduce nesting"));
    }
}
