//! Direct rewrite: put an explicit `return` at every tail position
//!
//! A dangling `if`/`switch` at the end of a body stays a statement and each
//! of its branches gets its own returns. Branches in value position (an
//! initializer, the right-hand side of an assignment, a `return` operand)
//! are walked for nested closures but keep their tails as values: a
//! `return` there would leave the enclosing function.

use super::branches::{self, BranchVisitor};
use super::tail::{self, TailPosition};
use super::{quirk, void, Strategy};
use crate::ast::{
    Argument, Binding, Block, Closure, ControlStmt, Decl, Expr, FunctionDecl, Stmt, TypeText,
    VarDecl,
};
use tracing::trace;

/// Branches of a dangling `if`/`switch` in tail position
struct TailBranches;

impl BranchVisitor for TailBranches {
    fn visit_condition(&self, condition: Expr) -> Expr {
        walk_expr(condition)
    }

    fn visit_branch(&self, block: Block) -> Block {
        explicit_returns(block)
    }
}

/// Branches of an `if`/`switch` used as a value
struct ValueBranches;

impl BranchVisitor for ValueBranches {
    fn visit_condition(&self, condition: Expr) -> Expr {
        walk_expr(condition)
    }

    fn visit_branch(&self, block: Block) -> Block {
        walk_block(block)
    }
}

/// Rewrite a body so that every tail position returns explicitly
pub fn explicit_returns(block: Block) -> Block {
    let Block { mut stmts, span } = block;
    let last = stmts.pop();

    let mut stmts: Vec<Stmt> = stmts.into_iter().map(walk_stmt).collect();
    stmts.extend(last.map(tail_stmt));

    Block { stmts, span }
}

fn tail_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Control(ControlStmt::Expression(expr)) if expr.is_branching() => {
            trace!("pushing returns into branches");
            Stmt::Control(ControlStmt::Expression(branches::map_branching(
                &TailBranches,
                expr,
            )))
        }
        stmt => {
            let walked = walk_stmt(stmt);
            match (tail::classify_stmt(&walked), walked) {
                (TailPosition::Value, Stmt::Expr(expr)) => tail::explicit_return(expr),
                (_, other) => other,
            }
        }
    }
}

fn walk_block(block: Block) -> Block {
    Block {
        stmts: block.stmts.into_iter().map(walk_stmt).collect(),
        span: block.span,
    }
}

fn walk_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Expr(expr) => Stmt::Expr(walk_expr(expr)),
        Stmt::Decl(Decl::Function(func)) => Stmt::Decl(Decl::Function(nested_function(func))),
        Stmt::Decl(Decl::Variable(var)) => Stmt::Decl(Decl::Variable(walk_var(var))),
        Stmt::Control(control) => Stmt::Control(match control {
            ControlStmt::Expression(expr) => ControlStmt::Expression(walk_expr(expr)),
            ControlStmt::Return(value) => ControlStmt::Return(value.map(walk_expr)),
            ControlStmt::While { condition, body } => ControlStmt::While {
                condition: walk_expr(condition),
                body: walk_block(body),
            },
            ControlStmt::For {
                pattern,
                sequence,
                body,
            } => ControlStmt::For {
                pattern,
                sequence: walk_expr(sequence),
                body: walk_block(body),
            },
            other @ (ControlStmt::Break | ControlStmt::Continue) => other,
        }),
    }
}

/// Nested `func`: its own full pass, gated on its own return type
fn nested_function(mut func: FunctionDecl) -> FunctionDecl {
    if let Some(body) = func.body.take() {
        func.body = Some(super::rewrite_function_body(
            func.return_type.as_ref(),
            body,
            Strategy::Direct,
        ));
    }
    func
}

fn walk_var(var: VarDecl) -> VarDecl {
    let accessor = match (var.accessor, var.bindings.first()) {
        (Some(accessor), Some(binding)) => Some(super::rewrite_function_body(
            binding.declared_type.as_ref(),
            accessor,
            Strategy::Direct,
        )),
        (accessor, _) => accessor,
    };

    let bindings = var
        .bindings
        .into_iter()
        .map(|binding| {
            let initializer = binding
                .initializer
                .map(|value| walk_value(value, binding.declared_type.as_ref()));
            Binding {
                initializer,
                ..binding
            }
        })
        .collect();

    VarDecl {
        bindings,
        accessor,
        ..var
    }
}

/// An initializer: a closure literal can take its result type from the
/// binding's declared function type
fn walk_value(expr: Expr, declared_type: Option<&TypeText>) -> Expr {
    match expr {
        Expr::Closure(closure) => {
            Expr::Closure(closure_literal(closure, declared_type.and_then(void::function_result)))
        }
        other => walk_expr(other),
    }
}

fn walk_expr(expr: Expr) -> Expr {
    match quirk::normalize(expr) {
        branching @ (Expr::If(_) | Expr::Switch(_)) => {
            branches::map_branching(&ValueBranches, branching)
        }
        Expr::Closure(closure) => Expr::Closure(closure_literal(closure, None)),
        Expr::Assignment { target, value } => Expr::Assignment {
            target,
            value: Box::new(walk_expr(*value)),
        },
        Expr::Call { callee, arguments } => Expr::Call {
            callee: Box::new(walk_expr(*callee)),
            arguments: walk_arguments(arguments),
        },
        Expr::Subscript { base, arguments } => Expr::Subscript {
            base: Box::new(walk_expr(*base)),
            arguments: walk_arguments(arguments),
        },
        Expr::Member { base, name } => Expr::Member {
            base: Box::new(walk_expr(*base)),
            name,
        },
        Expr::Prefix { op, operand } => Expr::Prefix {
            op,
            operand: Box::new(walk_expr(*operand)),
        },
        Expr::Tuple { elements } => Expr::Tuple {
            elements: walk_arguments(elements),
        },
        Expr::Array { elements } => Expr::Array {
            elements: elements.into_iter().map(walk_expr).collect(),
        },
        other => other,
    }
}

fn walk_arguments(arguments: Vec<Argument>) -> Vec<Argument> {
    arguments
        .into_iter()
        .map(|arg| Argument {
            label: arg.label,
            value: walk_expr(arg.value),
        })
        .collect()
}

/// A closure literal is rewritten only when its result type is known and
/// not void; otherwise it is left exactly as written.
fn closure_literal(closure: Closure, context_type: Option<TypeText>) -> Closure {
    let result_type = closure
        .signature
        .as_ref()
        .and_then(|signature| signature.return_type.clone())
        .or(context_type);

    match result_type {
        Some(ty) if !void::returns_void(Some(&ty)) => {
            trace!(result = %ty, "rewriting closure literal");
            Closure {
                body: explicit_returns(closure.body),
                ..closure
            }
        }
        _ => closure,
    }
}
