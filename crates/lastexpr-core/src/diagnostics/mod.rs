use crate::ast::Span;
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Which stage produced the diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Parse,
    Expansion,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Parse => "parse",
            DiagnosticKind::Expansion => "expansion",
        }
    }
}

/// A single text edit suggestion, in byte spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixIt {
    /// Replace the text in `span` with `replacement`
    Replace {
        span: Span,
        replacement: String,
        /// Short label like "Remove '}'"
        label: String,
    },
}

impl FixIt {
    pub fn replace(span: Span, replacement: impl Into<String>, label: impl Into<String>) -> Self {
        FixIt::Replace {
            span,
            replacement: replacement.into(),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FixIt::Replace { label, .. } => label,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            FixIt::Replace { span, .. } => *span,
        }
    }

    pub fn replacement(&self) -> &str {
        match self {
            FixIt::Replace { replacement, .. } => replacement,
        }
    }

    /// Apply the edit to `source`. `None` when the span does not fall on
    /// character boundaries of `source`.
    pub fn apply(&self, source: &str) -> Option<String> {
        let span = self.span();
        let end = span.end.min(source.len());
        let start = span.start.min(end);
        let before = source.get(..start)?;
        let after = source.get(end..)?;
        Some(format!("{before}{}{after}", self.replacement()))
    }
}

/// Stable diagnostic code (e.g. "E0001")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub code: String,
    pub title: String,
}

impl DiagnosticCode {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
        }
    }
}

/// A secondary location worth pointing at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub message: String,
    pub span: Span,
    pub filename: String,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, span: Span, filename: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span,
            filename: filename.into(),
        }
    }
}

/// A diagnostic message with location and context
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub filename: String,
    pub code: Option<DiagnosticCode>,
    pub related_info: Vec<RelatedInfo>,
    pub notes: Vec<String>,
    pub help: Option<String>,
    /// Human-friendly suggestions that don't imply an automatic edit
    pub suggestions: Vec<String>,
    /// Machine-applicable edits
    pub fixits: Vec<FixIt>,
}

impl Diagnostic {
    fn new(
        kind: DiagnosticKind,
        severity: Severity,
        message: impl Into<String>,
        span: Span,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            span,
            filename: filename.into(),
            code: None,
            related_info: Vec::new(),
            notes: Vec::new(),
            help: None,
            suggestions: Vec::new(),
            fixits: Vec::new(),
        }
    }

    pub fn error(
        kind: DiagnosticKind,
        message: impl Into<String>,
        span: Span,
        filename: impl Into<String>,
    ) -> Self {
        Self::new(kind, Severity::Error, message, span, filename)
    }

    pub fn warning(
        kind: DiagnosticKind,
        message: impl Into<String>,
        span: Span,
        filename: impl Into<String>,
    ) -> Self {
        Self::new(kind, Severity::Warning, message, span, filename)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_related(mut self, related: RelatedInfo) -> Self {
        self.related_info.push(related);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the diagnostic with source code snippet
    pub fn format(&self, source: &str) -> String {
        let line_index = LineIndex::new(source);
        let formatter = DiagnosticFormatter {
            diagnostic: self,
            source,
            line_index: &line_index,
        };
        formatter.format()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity.as_str())?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code.code)?;
        }
        write!(
            f,
            ": {} at {}:{}:{}",
            self.message, self.filename, self.span.start, self.span.end
        )
    }
}

/// Line index for offset-to-line/column conversion
#[derive(Debug)]
pub struct LineIndex {
    /// Starting byte offset of each line
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert byte offset to (line, column), both 1-indexed
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        (line + 1, offset.saturating_sub(line_start) + 1)
    }

    /// Byte range of a 1-indexed line, newline excluded
    pub fn line_range(&self, line: usize) -> Option<(usize, usize)> {
        if line == 0 || line > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line - 1];
        let end = if line < self.line_starts.len() {
            self.line_starts[line].saturating_sub(1)
        } else {
            usize::MAX // Last line extends to EOF
        };
        Some((start, end))
    }

    /// Byte offset of a 1-indexed (line, column); column 0 means line start
    pub fn offset(&self, line: usize, col: usize) -> usize {
        let index = line.clamp(1, self.line_starts.len()) - 1;
        self.line_starts[index] + col.saturating_sub(1)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

struct DiagnosticFormatter<'a> {
    diagnostic: &'a Diagnostic,
    source: &'a str,
    line_index: &'a LineIndex,
}

impl DiagnosticFormatter<'_> {
    fn format(&self) -> String {
        let diag = self.diagnostic;
        let mut output = String::from(diag.severity.as_str());
        if let Some(code) = &diag.code {
            output.push_str(&format!("[{}]", code.code));
        }
        output.push_str(&format!(": {}\n", diag.message));

        let (start_line, start_col) = self.line_index.line_col(diag.span.start);
        let (end_line, end_col) = self.line_index.line_col(diag.span.end);

        output.push_str(&format!(
            "  --> {}:{}:{}\n",
            diag.filename, start_line, start_col
        ));
        output.push_str(&self.format_snippet(start_line, start_col, end_line, end_col));

        for related in &diag.related_info {
            let (line, col) = self.line_index.line_col(related.span.start);
            output.push_str(&format!(
                "  --> {}:{}:{}: {}\n",
                related.filename, line, col, related.message
            ));
        }

        for note in &diag.notes {
            output.push_str(&format!("note: {note}\n"));
        }

        if let Some(help) = &diag.help {
            output.push_str(&format!("help: {help}\n"));
        }

        for suggestion in &diag.suggestions {
            output.push_str(&format!("suggestion: {suggestion}\n"));
        }

        for fix in &diag.fixits {
            output.push_str(&format!("fix: {}\n", fix.label()));
        }

        output
    }

    fn format_snippet(
        &self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> String {
        let mut output = String::new();

        let width = end_line.max(start_line).to_string().len();

        // One line of context on each side
        let context_start = start_line.saturating_sub(1).max(1);
        let context_end = (end_line + 1).min(self.line_index.line_count());

        output.push_str(&format!("{:width$} |\n", ""));

        for line_num in context_start..=context_end {
            let Some((line_start, line_end)) = self.line_index.line_range(line_num) else {
                continue;
            };
            let line_end = line_end.min(self.source.len());
            let line_text = &self.source[line_start..line_end];

            output.push_str(&format!("{line_num:width$} | {line_text}\n"));

            if line_num < start_line || line_num > end_line {
                continue;
            }

            let from = if line_num == start_line { start_col - 1 } else { 0 };
            let to = if line_num == end_line {
                end_col - 1
            } else {
                line_text.chars().count()
            };
            let span_width = to.saturating_sub(from).max(1);

            output.push_str(&format!(
                "{:width$} | {}^{}\n",
                "",
                " ".repeat(from),
                "~".repeat(span_width - 1)
            ));
        }

        output.push_str(&format!("{:width$} |\n", ""));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_multi_line() {
        let source = "line1\nline2\nline3";
        let index = LineIndex::new(source);
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(5), (1, 6));
        assert_eq!(index.line_col(6), (2, 1));
        assert_eq!(index.line_col(12), (3, 1));
    }

    #[test]
    fn test_line_range() {
        let source = "line1\nline2\nline3";
        let index = LineIndex::new(source);
        assert_eq!(index.line_range(1), Some((0, 5)));
        assert_eq!(index.line_range(2), Some((6, 11)));
        assert_eq!(index.line_range(3), Some((12, usize::MAX)));
        assert_eq!(index.line_range(0), None);
    }

    #[test]
    fn test_diagnostic_format_single_line() {
        let source = "@ImplicitReturn\nvar x: Int { 1 }";
        let diag = Diagnostic::error(
            DiagnosticKind::Expansion,
            "@ImplicitReturn can only be applied to function declarations",
            Span::new(16, 32),
            "test.swift",
        )
        .with_code(DiagnosticCode::new("E0002", "wrong declaration kind"));
        let formatted = diag.format(source);
        assert!(formatted.starts_with("error[E0002]:"));
        assert!(formatted.contains("test.swift:2:1"));
        assert!(formatted.contains("var x: Int { 1 }"));
        assert!(formatted.contains("^~~~~~~~~~~~~~~\n"));
    }

    #[test]
    fn test_diagnostic_format_related_and_help() {
        let source = "@ImplicitReturn\nfunc f() -> Int";
        let diag = Diagnostic::error(
            DiagnosticKind::Expansion,
            "missing function body",
            Span::new(16, 31),
            "test.swift",
        )
        .with_related(RelatedInfo::new(
            "attribute applied here",
            Span::new(0, 15),
            "test.swift",
        ))
        .with_help("add a body");
        let formatted = diag.format(source);
        assert!(formatted.contains("test.swift:1:1: attribute applied here"));
        assert!(formatted.contains("help: add a body"));
    }

    #[test]
    fn test_display_includes_code() {
        let diag = Diagnostic::error(DiagnosticKind::Parse, "unexpected '}'", Span::new(3, 4), "a.swift")
            .with_code(DiagnosticCode::new("E0100", "syntax"));
        assert_eq!(diag.to_string(), "error[E0100]: unexpected '}' at a.swift:3:4");
    }

    #[test]
    fn test_warning_is_not_error() {
        let diag = Diagnostic::warning(DiagnosticKind::Expansion, "ignored", Span::new(0, 1), "t")
            .with_note("only the first attribute applies");
        assert!(!diag.is_error());
        assert_eq!(diag.severity.as_str(), "warning");
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn test_fixit_apply() {
        let fix = FixIt::replace(Span::new(5, 6), "", "Remove '}'");
        assert_eq!(fix.apply("f() {}}").as_deref(), Some("f() {}"));
    }

    #[test]
    fn test_fixit_apply_rejects_split_character() {
        // 'é' is two bytes; offset 2 lands inside it
        let fix = FixIt::replace(Span::new(2, 3), "", "Remove");
        assert_eq!(fix.apply("cé}"), None);
        let brace = FixIt::replace(Span::new(3, 4), "", "Remove '}'");
        assert_eq!(brace.apply("cé}").as_deref(), Some("cé"));
    }
}
