// Common test utilities and fixture loading
#![allow(dead_code)]

use lastexpr_core::ast::*;
use std::fs;
use std::path::PathBuf;

/// Load a test fixture file by name
pub fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.swift", name));

    fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()))
}

/// Parse source that must be valid
pub fn parse_ok(source: &str) -> SourceFile {
    lastexpr_core::parser::parse(source, "test.swift")
        .unwrap_or_else(|diags| panic!("Parse failed: {:?}", diags))
}

// Helpers to strip spans from the tree for comparison

pub fn strip_spans_file(file: SourceFile) -> SourceFile {
    SourceFile {
        items: file
            .items
            .into_iter()
            .map(|item| match item {
                Item::Import { path, .. } => Item::Import { path, span: None },
                Item::Decl(decl) => Item::Decl(strip_spans_decl(decl)),
                Item::Statement(stmt) => Item::Statement(strip_spans_stmt(stmt)),
            })
            .collect(),
    }
}

pub fn strip_spans_block(block: Block) -> Block {
    Block::new(block.stmts.into_iter().map(strip_spans_stmt).collect())
}

fn strip_spans_attributes(attributes: Vec<Attribute>) -> Vec<Attribute> {
    attributes
        .into_iter()
        .map(|attr| Attribute {
            span: None,
            ..attr
        })
        .collect()
}

fn strip_spans_decl(decl: Decl) -> Decl {
    match decl {
        Decl::Function(func) => Decl::Function(FunctionDecl {
            attributes: strip_spans_attributes(func.attributes),
            body: func.body.map(strip_spans_block),
            span: None,
            ..func
        }),
        Decl::Variable(var) => Decl::Variable(VarDecl {
            attributes: strip_spans_attributes(var.attributes),
            bindings: var
                .bindings
                .into_iter()
                .map(|binding| Binding {
                    initializer: binding.initializer.map(strip_spans_expr),
                    ..binding
                })
                .collect(),
            accessor: var.accessor.map(strip_spans_block),
            span: None,
            ..var
        }),
    }
}

pub fn strip_spans_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Expr(expr) => Stmt::Expr(strip_spans_expr(expr)),
        Stmt::Decl(decl) => Stmt::Decl(strip_spans_decl(decl)),
        Stmt::Control(control) => Stmt::Control(match control {
            ControlStmt::Expression(expr) => ControlStmt::Expression(strip_spans_expr(expr)),
            ControlStmt::Return(value) => ControlStmt::Return(value.map(strip_spans_expr)),
            ControlStmt::While { condition, body } => ControlStmt::While {
                condition: strip_spans_expr(condition),
                body: strip_spans_block(body),
            },
            ControlStmt::For {
                pattern,
                sequence,
                body,
            } => ControlStmt::For {
                pattern,
                sequence: strip_spans_expr(sequence),
                body: strip_spans_block(body),
            },
            other => other,
        }),
    }
}

fn strip_spans_if(if_expr: IfExpr) -> IfExpr {
    IfExpr {
        condition: Box::new(strip_spans_expr(*if_expr.condition)),
        then_block: strip_spans_block(if_expr.then_block),
        else_branch: if_expr.else_branch.map(|branch| match branch {
            ElseBranch::Block(block) => ElseBranch::Block(strip_spans_block(block)),
            ElseBranch::If(nested) => ElseBranch::If(Box::new(strip_spans_if(*nested))),
        }),
    }
}

fn strip_spans_arguments(arguments: Vec<Argument>) -> Vec<Argument> {
    arguments
        .into_iter()
        .map(|arg| Argument {
            label: arg.label,
            value: strip_spans_expr(arg.value),
        })
        .collect()
}

pub fn strip_spans_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Closure(closure) => Expr::Closure(Closure {
            body: strip_spans_block(closure.body),
            ..closure
        }),
        Expr::If(if_expr) => Expr::If(strip_spans_if(if_expr)),
        Expr::Switch(switch) => Expr::Switch(SwitchExpr {
            subject: Box::new(strip_spans_expr(*switch.subject)),
            cases: switch
                .cases
                .into_iter()
                .map(|case| match case {
                    SwitchCase::Case { label, body } => SwitchCase::Case {
                        label,
                        body: strip_spans_block(body),
                    },
                    other => other,
                })
                .collect(),
        }),
        Expr::Call { callee, arguments } => Expr::Call {
            callee: Box::new(strip_spans_expr(*callee)),
            arguments: strip_spans_arguments(arguments),
        },
        Expr::Subscript { base, arguments } => Expr::Subscript {
            base: Box::new(strip_spans_expr(*base)),
            arguments: strip_spans_arguments(arguments),
        },
        Expr::Member { base, name } => Expr::Member {
            base: Box::new(strip_spans_expr(*base)),
            name,
        },
        Expr::Prefix { op, operand } => Expr::Prefix {
            op,
            operand: Box::new(strip_spans_expr(*operand)),
        },
        Expr::Tuple { elements } => Expr::Tuple {
            elements: strip_spans_arguments(elements),
        },
        Expr::Array { elements } => Expr::Array {
            elements: elements.into_iter().map(strip_spans_expr).collect(),
        },
        Expr::Sequence { elements } => Expr::Sequence {
            elements: elements.into_iter().map(strip_spans_expr).collect(),
        },
        Expr::Assignment { target, value } => Expr::Assignment {
            target: Box::new(strip_spans_expr(*target)),
            value: Box::new(strip_spans_expr(*value)),
        },
        other => other,
    }
}
