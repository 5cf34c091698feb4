use crate::ast::Span;
use thiserror::Error;

/// Why an attributed declaration could not be expanded
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpansionError {
    #[error("missing function body")]
    MissingBody { span: Option<Span> },

    #[error("@{attribute} can only be applied to function declarations")]
    WrongDeclarationKind {
        attribute: String,
        span: Option<Span>,
    },
}

impl ExpansionError {
    /// Stable code used in diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            ExpansionError::MissingBody { .. } => "E0001",
            ExpansionError::WrongDeclarationKind { .. } => "E0002",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ExpansionError::MissingBody { .. } => "missing body",
            ExpansionError::WrongDeclarationKind { .. } => "not a function",
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            ExpansionError::MissingBody { span }
            | ExpansionError::WrongDeclarationKind { span, .. } => *span,
        }
    }
}
