//! Tail-position classification
//!
//! Only the last statement of a block is ever inspected or rewritten.

use crate::ast::{Block, ControlStmt, Expr, Stmt};

/// What sits in tail position of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailPosition {
    /// No statements at all
    Empty,
    /// A value-producing expression statement
    Value,
    /// An `if`/`switch` in statement position
    Branch,
    /// A declaration, which has no value to return
    Declaration,
    /// Anything else: an existing `return`, a loop, an assignment
    Other,
}

pub fn classify(block: &Block) -> TailPosition {
    block.last().map_or(TailPosition::Empty, classify_stmt)
}

/// Classify a statement as if it were the last one of its block
pub fn classify_stmt(stmt: &Stmt) -> TailPosition {
    match stmt {
        Stmt::Expr(expr) if expr.produces_value() => TailPosition::Value,
        Stmt::Control(ControlStmt::Expression(expr)) if expr.is_branching() => {
            TailPosition::Branch
        }
        Stmt::Decl(_) => TailPosition::Declaration,
        _ => TailPosition::Other,
    }
}

/// `return <expr>`
pub fn explicit_return(expr: Expr) -> Stmt {
    Stmt::ret(expr)
}

/// Turn the tail of `block` into an explicit return when it is a value or a
/// branch expression; leave it alone otherwise. Running this twice gives the
/// same result as running it once.
pub fn return_tail(mut block: Block) -> Block {
    if matches!(classify(&block), TailPosition::Value | TailPosition::Branch) {
        if let Some(Stmt::Expr(expr) | Stmt::Control(ControlStmt::Expression(expr))) =
            block.stmts.pop()
        {
            block.stmts.push(explicit_return(expr));
        }
    }
    block
}
