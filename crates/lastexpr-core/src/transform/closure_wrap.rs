//! Closure wrapping: turn each value-producing block into `{ ... }()`
//!
//! The host already treats the last expression of a single-expression
//! closure as its result, so instead of chasing every tail position this
//! strategy puts each block in an immediately-invoked closure after making
//! its own tail explicit once. Function bodies, closure bodies and the
//! branches of an `if`/`switch` used as a value are wrapped. Branches of a
//! statement `if`/`switch` and loop bodies are only visited: a closure
//! boundary there would capture `return`, `break` and `continue`.

use super::branches::{self, BranchVisitor};
use super::{quirk, tail, Strategy};
use crate::ast::{Argument, Binding, Block, Closure, ControlStmt, Decl, Expr, Stmt, VarDecl};
use tracing::trace;

/// Whether an expression's result is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Value,
    Statement,
}

struct Branches(Position);

impl BranchVisitor for Branches {
    fn visit_condition(&self, condition: Expr) -> Expr {
        visit_expr(condition, Position::Value)
    }

    fn visit_branch(&self, block: Block) -> Block {
        match self.0 {
            Position::Value => wrap_block(block),
            Position::Statement => visit_block(block),
        }
    }
}

/// Wrap a function body. A resulting lone call statement (the wrapper itself,
/// for any non-empty body) becomes `return <call>`.
pub fn wrap_function_body(body: Block) -> Block {
    let mut wrapped = wrap_block(body);
    if matches!(wrapped.stmts.as_slice(), [Stmt::Expr(expr)] if expr.is_call()) {
        if let Some(Stmt::Expr(call)) = wrapped.stmts.pop() {
            wrapped.stmts.push(tail::explicit_return(call));
        }
    }
    wrapped
}

/// `{ stmts }` becomes `{ { stmts' }() }` where `stmts'` has its tail made
/// explicit and its children visited. Empty blocks stay empty.
pub fn wrap_block(block: Block) -> Block {
    if block.is_empty() {
        return block;
    }

    let Block { stmts, span } = block;
    // The tail becomes a `return` first, so a tail `if`/`switch` is visited as a value
    let inner = visit_block(tail::return_tail(Block::new(stmts)));
    trace!(statements = inner.stmts.len(), "wrapping block");

    Block {
        stmts: vec![Stmt::Expr(Expr::immediately_invoked(inner))],
        span,
    }
}

fn visit_block(block: Block) -> Block {
    Block {
        stmts: block.stmts.into_iter().map(visit_stmt).collect(),
        span: block.span,
    }
}

fn visit_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Expr(expr) => Stmt::Expr(visit_expr(expr, Position::Statement)),
        Stmt::Decl(Decl::Function(mut func)) => {
            if let Some(body) = func.body.take() {
                func.body = Some(super::rewrite_function_body(
                    func.return_type.as_ref(),
                    body,
                    Strategy::ClosureWrap,
                ));
            }
            Stmt::Decl(Decl::Function(func))
        }
        Stmt::Decl(Decl::Variable(var)) => Stmt::Decl(Decl::Variable(visit_var(var))),
        Stmt::Control(control) => Stmt::Control(match control {
            ControlStmt::Expression(expr) => {
                ControlStmt::Expression(visit_expr(expr, Position::Statement))
            }
            ControlStmt::Return(value) => {
                ControlStmt::Return(value.map(|value| visit_expr(value, Position::Value)))
            }
            ControlStmt::While { condition, body } => ControlStmt::While {
                condition: visit_expr(condition, Position::Value),
                body: visit_block(body),
            },
            ControlStmt::For {
                pattern,
                sequence,
                body,
            } => ControlStmt::For {
                pattern,
                sequence: visit_expr(sequence, Position::Value),
                body: visit_block(body),
            },
            other @ (ControlStmt::Break | ControlStmt::Continue) => other,
        }),
    }
}

fn visit_var(var: VarDecl) -> VarDecl {
    let accessor = match (var.accessor, var.bindings.first()) {
        (Some(accessor), Some(binding)) => Some(super::rewrite_function_body(
            binding.declared_type.as_ref(),
            accessor,
            Strategy::ClosureWrap,
        )),
        (accessor, _) => accessor,
    };

    let bindings = var
        .bindings
        .into_iter()
        .map(|binding| Binding {
            initializer: binding
                .initializer
                .map(|value| visit_expr(value, Position::Value)),
            ..binding
        })
        .collect();

    VarDecl {
        bindings,
        accessor,
        ..var
    }
}

fn visit_expr(expr: Expr, position: Position) -> Expr {
    match quirk::normalize(expr) {
        branching @ (Expr::If(_) | Expr::Switch(_)) => {
            branches::map_branching(&Branches(position), branching)
        }
        Expr::Closure(closure) => Expr::Closure(Closure {
            body: wrap_block(closure.body),
            ..closure
        }),
        Expr::Assignment { target, value } => Expr::Assignment {
            target,
            value: Box::new(visit_expr(*value, Position::Value)),
        },
        Expr::Call { callee, arguments } => Expr::Call {
            callee: Box::new(visit_expr(*callee, Position::Value)),
            arguments: visit_arguments(arguments),
        },
        Expr::Subscript { base, arguments } => Expr::Subscript {
            base: Box::new(visit_expr(*base, Position::Value)),
            arguments: visit_arguments(arguments),
        },
        Expr::Member { base, name } => Expr::Member {
            base: Box::new(visit_expr(*base, Position::Value)),
            name,
        },
        Expr::Prefix { op, operand } => Expr::Prefix {
            op,
            operand: Box::new(visit_expr(*operand, Position::Value)),
        },
        Expr::Tuple { elements } => Expr::Tuple {
            elements: visit_arguments(elements),
        },
        Expr::Array { elements } => Expr::Array {
            elements: elements
                .into_iter()
                .map(|element| visit_expr(element, Position::Value))
                .collect(),
        },
        other => other,
    }
}

fn visit_arguments(arguments: Vec<Argument>) -> Vec<Argument> {
    arguments
        .into_iter()
        .map(|arg| Argument {
            label: arg.label,
            value: visit_expr(arg.value, Position::Value),
        })
        .collect()
}
