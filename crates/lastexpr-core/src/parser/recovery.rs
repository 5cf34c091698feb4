//! Error recovery for top-level items
//!
//! When an item fails to parse, skip the rest of its line and keep going so
//! that one run reports every broken item instead of only the first.

use super::lexer;
use crate::ast::{Expr, Item, Stmt};
use chumsky::prelude::*;

/// Skip to the end of the current line, producing a placeholder item that
/// carries the skipped text
pub fn item_recovery<'a>() -> impl Parser<'a, &'a str, Item, extra::Err<Rich<'a, char>>> + Clone {
    lexer::ws()
        .ignore_then(none_of("\n").repeated().at_least(1).to_slice())
        .then_ignore(just('\n').or_not())
        .map(|skipped: &str| {
            Item::Statement(Stmt::Expr(Expr::Unrecognized {
                text: skipped.trim().to_string(),
            }))
        })
}
