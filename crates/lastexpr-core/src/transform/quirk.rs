//! Re-association of the flat `target = value` sequence
//!
//! Hosts hand assignments over as a three element operator sequence. The
//! strategies need the value as a separate node to recurse into it, so that
//! exact shape becomes `Expr::Assignment`. Every other sequence is returned
//! as-is.

use crate::ast::Expr;

pub fn normalize(expr: Expr) -> Expr {
    match expr {
        Expr::Sequence { elements } => match <[Expr; 3]>::try_from(elements) {
            Ok([target, Expr::AssignmentOperator, value]) => Expr::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            Ok(elements) => Expr::Sequence {
                elements: elements.into(),
            },
            Err(elements) => Expr::Sequence { elements },
        },
        other => other,
    }
}
