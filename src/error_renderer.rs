//! Error rendering using ariadne
//!
//! Compilation errors are drawn as source snippets with labels; runtime
//! failures have no span and are printed as a single line.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<input>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use jam::{Interpreter, render_error};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let source = "1 + * 2";
/// if let Err(e) = Interpreter::new(&arena, source) {
///     render_error(source, &e);
/// }
/// ```
pub fn render_error(source: &str, error: &Error) {
    render_error_to_writer(source, error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(source: &str, error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(source, error, writer, true)
}

/// Render an error to a String (useful for web UIs, logs, etc.)
pub fn render_error_to_string(source: &str, error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(source, error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes
///
/// Same as `render_error_to_string` but without ANSI escapes, so the output
/// can be compared in tests.
pub fn render_error_to_string_no_color(source: &str, error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(source, error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    source: &str,
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Compilation { diagnostics } => {
            render_diagnostics(source, diagnostics, writer, use_color)
        }
        Error::Runtime(_) | Error::ResourceExceeded(_) => writeln!(writer, "{}", error),
    }
}

fn render_diagnostics(
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Info => ReportKind::Advice,
        };

        let mut report = Report::build(kind, (SOURCE_ID, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_config(ariadne::Config::default().with_color(use_color));

        if let Some(code) = &diag.code {
            report = report.with_code(code);
        }

        let color = colors.next();
        report = report.with_label(
            Label::new((SOURCE_ID, diag.span.0.clone()))
                .with_message(&diag.message)
                .with_color(color),
        );

        for related in &diag.related {
            let color = colors.next();
            report = report.with_label(
                Label::new((SOURCE_ID, related.span.0.clone()))
                    .with_message(&related.message)
                    .with_color(color),
            );
        }

        if let Some(help) = &diag.help {
            report = report.with_help(help);
        }

        report
            .finish()
            .write((SOURCE_ID, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interpreter;
    use bumpalo::Bump;

    #[test]
    fn test_render_parse_error() {
        let arena = Bump::new();
        let source = "1 + * 2";
        let err = Interpreter::new(&arena, source).err().unwrap();
        let output = render_error_to_string_no_color(source, &err);

        assert!(output.contains("Error"));
        assert!(output.contains("1 + * 2"));
    }

    #[test]
    fn test_render_free_variable() {
        let arena = Bump::new();
        let source = "map x to x + y";
        let err = Interpreter::new(&arena, source).err().unwrap();
        let output = render_error_to_string_no_color(source, &err);

        assert!(output.contains("S001"));
        assert!(output.contains("'y'"));
        assert!(output.lines().count() > 1);
    }

    #[test]
    fn test_render_duplicate_definition_shows_both_sites() {
        let arena = Bump::new();
        let source = "let x := 1; x := 2; in x";
        let err = Interpreter::new(&arena, source).err().unwrap();
        let output = render_error_to_string_no_color(source, &err);

        assert!(output.contains("S003"));
        assert!(output.contains("first defined here"));
    }

    #[test]
    fn test_render_runtime_error_is_one_line() {
        let arena = Bump::new();
        let source = "1 / 0";
        let err = Interpreter::new(&arena, source)
            .unwrap()
            .value_value()
            .unwrap_err();
        assert_eq!(
            render_error_to_string_no_color(source, &err),
            "Runtime error: Division by zero\n"
        );
    }
}
