//! Tail-expression to explicit-return rewriting
//!
//! Entry point for body macros: given the attribute and the declaration it is
//! attached to, produce the replacement statements for the declaration's
//! body. Bodies of functions returning `Void` come back unchanged.

use crate::ast::{Attribute, Block, Decl, FunctionDecl, Span, Stmt, TypeText};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub mod branches;
pub mod closure_wrap;
pub mod direct;
mod errors;
pub mod quirk;
pub mod tail;
pub mod void;

pub use errors::ExpansionError;

/// How tail positions are made explicit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Insert `return` at every tail position
    Direct,
    /// Wrap blocks in immediately-invoked closures
    ClosureWrap,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::ClosureWrap => "closure_wrap",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration that may or may not carry a body
pub trait WithOptionalBody {
    fn body(&self) -> Option<&Block>;

    /// The declaration as a function, if it is one
    fn as_function(&self) -> Option<&FunctionDecl>;

    fn span(&self) -> Option<Span>;
}

impl WithOptionalBody for Decl {
    fn body(&self) -> Option<&Block> {
        match self {
            Decl::Function(func) => func.body.as_ref(),
            Decl::Variable(var) => var.accessor.as_ref(),
        }
    }

    fn as_function(&self) -> Option<&FunctionDecl> {
        match self {
            Decl::Function(func) => Some(func),
            Decl::Variable(_) => None,
        }
    }

    fn span(&self) -> Option<Span> {
        Decl::span(self)
    }
}

/// Expand `attribute` on `declaration`, returning the new body statements.
///
/// A declaration without a body is rejected before its kind is checked.
pub fn expand<D>(
    attribute: &Attribute,
    declaration: &D,
    strategy: Strategy,
) -> Result<Vec<Stmt>, ExpansionError>
where
    D: WithOptionalBody + ?Sized,
{
    let body = declaration.body().ok_or(ExpansionError::MissingBody {
        span: declaration.span(),
    })?;

    let func = declaration
        .as_function()
        .ok_or_else(|| ExpansionError::WrongDeclarationKind {
            attribute: attribute.name.clone(),
            span: declaration.span(),
        })?;

    debug!(
        function = %func.name,
        attribute = %attribute.name,
        %strategy,
        "expanding function body"
    );

    Ok(rewrite_function_body(func.return_type.as_ref(), body.clone(), strategy).stmts)
}

/// Rewrite a function-like body with the given strategy, unless its return
/// type is void
pub fn rewrite_function_body(
    return_type: Option<&TypeText>,
    body: Block,
    strategy: Strategy,
) -> Block {
    if void::returns_void(return_type) {
        debug!("void return type, body left unchanged");
        return body;
    }

    match strategy {
        Strategy::Direct => direct::explicit_returns(body),
        Strategy::ClosureWrap => closure_wrap::wrap_function_body(body),
    }
}
