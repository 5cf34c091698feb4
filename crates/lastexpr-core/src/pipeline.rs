//! Parse, expand and print in one place
//!
//! A `Pipeline` owns one input file and a `Config` saying which attributes
//! are body macros and which strategy each one uses.
//!
//! ## Usage
//!
//! ```no_run
//! # use lastexpr_core::pipeline::Pipeline;
//! let source = "@ImplicitReturn\nfunc one() -> Int { 1 }".to_string();
//! let pipeline = Pipeline::new(source, "one.swift".to_string());
//!
//! match pipeline.run_all() {
//!     Ok(output) => print!("{}", output.text),
//!     Err(e) => eprintln!("{}", e.format_with_source(pipeline.source())),
//! }
//! ```
//!
//! ## Individual Stages
//!
//! ```no_run
//! # use lastexpr_core::pipeline::Pipeline;
//! # use lastexpr_core::config::Config;
//! let pipeline = Pipeline::new("let x = 1".to_string(), "x.swift".to_string())
//!     .with_config(Config::default());
//!
//! let file = pipeline.parse()?;
//! let expanded = pipeline.expand(file)?;
//! let text = pipeline.render(&expanded.file);
//! # Ok::<(), lastexpr_core::pipeline::PipelineError>(())
//! ```

use crate::ast::{Attribute, Block, Decl, Item, SourceFile, Span};
use crate::config::Config;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind, LineIndex, RelatedInfo};
use crate::parser;
use crate::printer::Printer;
use crate::transform::{self, ExpansionError, Strategy, WithOptionalBody};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Errors that can occur during pipeline execution
#[derive(Debug)]
pub enum PipelineError {
    /// Parse error(s)
    Parse(Vec<Diagnostic>),
    /// At least one expansion site failed. Every site's diagnostics are
    /// included, warnings too.
    Expansion(Vec<Diagnostic>),
}

impl PipelineError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            PipelineError::Parse(diagnostics) | PipelineError::Expansion(diagnostics) => {
                diagnostics
            }
        }
    }

    /// Format error for display to user
    pub fn format_display(&self) -> String {
        self.diagnostics()
            .iter()
            .map(|d| format!("{}", d))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format error with source code context
    pub fn format_with_source(&self, source: &str) -> String {
        self.diagnostics()
            .iter()
            .map(|d| d.format(source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_display())
    }
}

impl From<Vec<Diagnostic>> for PipelineError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        PipelineError::Parse(diagnostics)
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// What the pipeline's input text holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Swift-style source
    #[default]
    Source,
    /// A `SourceFile` tree serialized as JSON
    Json,
}

/// A file after expansion
#[derive(Debug, Clone)]
pub struct Expanded {
    pub file: SourceFile,
    pub warnings: Vec<Diagnostic>,
}

/// Printed result of a full run
#[derive(Debug, Clone)]
pub struct Output {
    pub text: String,
    pub warnings: Vec<Diagnostic>,
}

pub struct Pipeline {
    /// Input text, source or JSON depending on `format`
    source: String,
    /// Filename for error reporting
    filename: String,
    format: InputFormat,
    config: Config,
}

impl Pipeline {
    pub fn new(source: String, filename: String) -> Self {
        Self {
            source,
            filename,
            format: InputFormat::Source,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// Parse the input into a syntax tree
    pub fn parse(&self) -> PipelineResult<SourceFile> {
        match self.format {
            InputFormat::Source => Ok(parser::parse(&self.source, &self.filename)?),
            InputFormat::Json => self.parse_json(),
        }
    }

    fn parse_json(&self) -> PipelineResult<SourceFile> {
        serde_json::from_str(&self.source).map_err(|err| {
            let offset = LineIndex::new(&self.source)
                .offset(err.line(), err.column())
                .min(self.source.len());
            PipelineError::Parse(vec![Diagnostic::error(
                DiagnosticKind::Parse,
                format!("invalid syntax tree: {err}"),
                Span::new(offset, offset),
                &self.filename,
            )])
        })
    }

    /// Expand every top-level declaration carrying a registered attribute.
    ///
    /// A failing site leaves its declaration untouched and does not stop the
    /// others; all failures come back together.
    pub fn expand(&self, mut file: SourceFile) -> PipelineResult<Expanded> {
        let mut diagnostics = Vec::new();

        for item in &mut file.items {
            if let Item::Decl(decl) = item {
                self.expand_decl(decl, &mut diagnostics);
            }
        }

        if diagnostics.iter().any(Diagnostic::is_error) {
            return Err(PipelineError::Expansion(diagnostics));
        }

        Ok(Expanded {
            file,
            warnings: diagnostics,
        })
    }

    fn expand_decl(&self, decl: &mut Decl, diagnostics: &mut Vec<Diagnostic>) {
        let registered: Vec<(Attribute, Strategy)> = decl
            .attributes()
            .iter()
            .filter_map(|attr| {
                self.config
                    .strategy_for(&attr.name)
                    .map(|strategy| (attr.clone(), strategy))
            })
            .collect();

        // The first body macro wins
        let Some(((attribute, strategy), ignored)) = registered.split_first() else {
            return;
        };
        for (extra, _) in ignored {
            diagnostics.push(self.ignored_attribute_warning(extra, attribute, decl));
        }

        match transform::expand(attribute, &*decl, *strategy) {
            Ok(stmts) => {
                let span = decl.body().and_then(|body| body.span);
                decl.set_body(Block { stmts, span });
                decl.attributes_mut()
                    .retain(|attr| !self.config.is_registered(&attr.name));
            }
            Err(err) => {
                debug!(attribute = %attribute.name, error = %err, "expansion failed");
                diagnostics.push(self.expansion_error(&err, attribute, decl));
            }
        }
    }

    fn expansion_error(&self, err: &ExpansionError, attribute: &Attribute, decl: &Decl) -> Diagnostic {
        let span = err
            .span()
            .or(attribute.span)
            .unwrap_or_else(|| Span::new(0, 0));

        let mut diagnostic =
            Diagnostic::error(DiagnosticKind::Expansion, err.to_string(), span, &self.filename)
                .with_code(DiagnosticCode::new(err.code(), err.title()));

        if let Some(attr_span) = attribute.span {
            diagnostic = diagnostic.with_related(RelatedInfo::new(
                format!("@{} applied here", attribute.name),
                attr_span,
                &self.filename,
            ));
        }

        match err {
            ExpansionError::MissingBody { .. } => diagnostic.with_help(format!(
                "give the declaration a body or remove @{}",
                attribute.name
            )),
            ExpansionError::WrongDeclarationKind { .. } if matches!(decl, Decl::Variable(_)) => {
                diagnostic.with_note("computed properties are not expanded")
            }
            ExpansionError::WrongDeclarationKind { .. } => diagnostic,
        }
    }

    fn ignored_attribute_warning(&self, ignored: &Attribute, used: &Attribute, decl: &Decl) -> Diagnostic {
        let span = ignored
            .span
            .or_else(|| decl.span())
            .unwrap_or_else(|| Span::new(0, 0));

        Diagnostic::warning(
            DiagnosticKind::Expansion,
            format!("@{} ignored, @{} already expands this body", ignored.name, used.name),
            span,
            &self.filename,
        )
    }

    /// Print a tree with the configured indentation
    pub fn render(&self, file: &SourceFile) -> String {
        Printer::new(self.config.indent_width).print_file(file)
    }

    /// Run parse, expand and render
    pub fn run_all(&self) -> PipelineResult<Output> {
        let file = self.parse()?;
        let expanded = self.expand(file)?;
        Ok(Output {
            text: self.render(&expanded.file),
            warnings: expanded.warnings,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    fn pipeline(source: &str) -> Pipeline {
        Pipeline::new(source.to_string(), "test.swift".to_string())
    }

    #[test]
    fn test_pipeline_run_all() {
        let output = pipeline("@ImplicitReturn\nfunc one() -> Int {\n    1\n}\n")
            .run_all()
            .unwrap();
        assert_eq!(output.text, "func one() -> Int {\n    return 1\n}\n");
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_pipeline_unregistered_attribute_kept() {
        let output = pipeline("@discardableResult\nfunc one() -> Int {\n    1\n}\n")
            .run_all()
            .unwrap();
        assert_eq!(
            output.text,
            "@discardableResult\nfunc one() -> Int {\n    1\n}\n"
        );
    }

    #[test]
    fn test_pipeline_parse_error() {
        let result = pipeline("func broken( -> Int {").run_all();
        assert!(matches!(result, Err(PipelineError::Parse(_))));
    }

    #[test]
    fn test_pipeline_collects_every_failing_site() {
        let source = "@ImplicitReturn\nfunc a() -> Int\n\n@BareLastExprs\nvar b: Int {\n    1\n}\n\n@ImplicitReturn\nfunc c() -> Int {\n    3\n}\n";
        match pipeline(source).run_all() {
            Err(PipelineError::Expansion(diagnostics)) => {
                let codes: Vec<_> = diagnostics
                    .iter()
                    .filter_map(|d| d.code.as_ref().map(|c| c.code.as_str()))
                    .collect();
                assert_eq!(codes, vec!["E0001", "E0002"]);
                assert_eq!(diagnostics[0].related_info.len(), 1);
            }
            other => panic!("Expected expansion errors, got {other:?}"),
        }
    }

    #[test]
    fn test_pipeline_second_macro_warns() {
        let p = pipeline("@ImplicitReturn\n@BareLastExprs\nfunc one() -> Int {\n    1\n}\n");
        let output = p.run_all().unwrap();
        assert_eq!(output.text, "func one() -> Int {\n    return 1\n}\n");
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].severity, Severity::Warning);
        assert!(output.warnings[0].message.contains("@BareLastExprs ignored"));
    }

    #[test]
    fn test_pipeline_strategy_override() {
        let p = pipeline("@ImplicitReturn\nfunc one() -> Int {\n    1\n}\n")
            .with_config(Config::default().with_strategy_override(Strategy::ClosureWrap));
        let output = p.run_all().unwrap();
        assert_eq!(
            output.text,
            "func one() -> Int {\n    return {\n        return 1\n    }()\n}\n"
        );
    }

    #[test]
    fn test_pipeline_json_input() {
        let file = pipeline("@ImplicitReturn\nfunc one() -> Int {\n    1\n}\n")
            .parse()
            .unwrap();
        let json = serde_json::to_string(&file).unwrap();
        let output = Pipeline::new(json, "one.json".to_string())
            .with_input_format(InputFormat::Json)
            .run_all()
            .unwrap();
        assert_eq!(output.text, "func one() -> Int {\n    return 1\n}\n");
    }

    #[test]
    fn test_pipeline_invalid_json() {
        let result = Pipeline::new("{\"items\": [".to_string(), "bad.json".to_string())
            .with_input_format(InputFormat::Json)
            .parse();
        match result {
            Err(PipelineError::Parse(diagnostics)) => {
                assert!(diagnostics[0].message.starts_with("invalid syntax tree"))
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_pipeline_indent_width() {
        let config = Config {
            indent_width: 2,
            ..Config::default()
        };
        let output = pipeline("@ImplicitReturn\nfunc one() -> Int {\n    1\n}\n")
            .with_config(config)
            .run_all()
            .unwrap();
        assert_eq!(output.text, "func one() -> Int {\n  return 1\n}\n");
    }
}
