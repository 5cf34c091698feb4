//! Error formatting for parser errors
//!
//! Converts Chumsky parser errors into user-friendly diagnostic messages

use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticKind, FixIt};
use chumsky::error::{Rich, RichReason};

/// Convert Chumsky error reason to readable message
pub fn format_error_reason(reason: &RichReason<char>) -> String {
    match reason {
        RichReason::ExpectedFound { found, .. } => match found {
            Some(c) => format!("unexpected '{}'", c.escape_debug()),
            None => "unexpected end of input".to_string(),
        },
        RichReason::Custom(msg) => msg.to_string(),
    }
}

/// Convert Chumsky parse errors to diagnostics
pub fn errors_to_diagnostics(
    errors: Vec<Rich<char>>,
    filename: &str,
    source: &str,
) -> Vec<Diagnostic> {
    errors
        .into_iter()
        .map(|e| {
            let span = Span::new(e.span().start, e.span().end);
            let message = format_error_reason(e.reason());
            let mut diag = Diagnostic::error(DiagnosticKind::Parse, message, span, filename);

            augment_with_fixits(&mut diag, e.reason(), span, source);

            diag
        })
        .collect()
}

/// Attach fix-its for unbalanced delimiters
fn augment_with_fixits(diag: &mut Diagnostic, reason: &RichReason<char>, span: Span, source: &str) {
    let message = format_error_reason(reason);
    if message == "unexpected end of input" {
        let to_insert = compute_missing_closers(source);
        if !to_insert.is_empty() {
            diag.suggestions
                .push("Possible unclosed block or delimiter".to_string());
            diag.fixits.push(FixIt::replace(
                Span::new(span.end, span.end),
                to_insert,
                "Insert missing closers",
            ));
        }
        return;
    }

    // unexpected ')'
    let Some(inner) = message
        .strip_prefix("unexpected '")
        .and_then(|rest| rest.strip_suffix('\''))
    else {
        return;
    };
    if let Some(ch) = inner.chars().next() {
        if ")]}".contains(ch) {
            diag.fixits
                .push(FixIt::replace(span, "", format!("Remove '{ch}'")));
        } else if ch == ',' {
            diag.fixits.push(FixIt::replace(span, "", "Remove ','"));
        }
    }
}

/// Best-effort sequence of closing delimiters that would balance `source`.
/// Brackets inside string literals and comments are ignored.
fn compute_missing_closers(source: &str) -> String {
    let mut stack: Vec<char> = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            chars.next();
                        }
                        '"' | '\n' => break,
                        _ => {}
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '(' => stack.push(')'),
            '[' => stack.push(']'),
            '{' => stack.push('}'),
            ')' | ']' | '}' => {
                if let Some(pos) = stack.iter().rposition(|c| *c == ch) {
                    stack.remove(pos);
                }
            }
            _ => {}
        }
    }

    stack.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_closers_nested() {
        assert_eq!(compute_missing_closers("func f() {\n    g(1, [2"), "])}");
    }

    #[test]
    fn test_missing_closers_ignores_strings_and_comments() {
        assert_eq!(
            compute_missing_closers("let s = \"{(\" // [\n{"),
            "}"
        );
    }

    #[test]
    fn test_balanced_source_needs_nothing() {
        assert_eq!(compute_missing_closers("func f() { [1](0) }"), "");
    }
}
