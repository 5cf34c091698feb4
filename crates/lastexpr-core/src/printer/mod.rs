//! Canonical source printer
//!
//! Output layout is fixed: one statement per line, braces on the opening
//! line, `case` labels level with their `switch`. Original trivia is not
//! preserved. Printed output parses back to an equal tree (spans aside).

use crate::ast::{
    Argument, Attribute, Binding, Block, CaseLabel, Closure, ClosureSignature, ControlStmt, Decl,
    ElseBranch, Expr, FunctionDecl, IfExpr, Item, Literal, Param, SourceFile, Stmt, SwitchCase,
    SwitchExpr, VarDecl,
};

pub const DEFAULT_INDENT_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Printer {
    indent_width: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Printer::new(DEFAULT_INDENT_WIDTH)
    }
}

/// Print a whole file with the default indent width
pub fn print_file(file: &SourceFile) -> String {
    Printer::default().print_file(file)
}

/// Print a block (braces included) at indentation level zero
pub fn print_block(block: &Block) -> String {
    Printer::default().block(block, 0)
}

pub fn print_expr(expr: &Expr) -> String {
    Printer::default().expr(expr, 0)
}

impl Printer {
    pub fn new(indent_width: usize) -> Self {
        Printer { indent_width }
    }

    pub fn print_file(&self, file: &SourceFile) -> String {
        let mut out = String::new();
        let mut previous: Option<&Item> = None;

        for item in &file.items {
            if let Some(prev) = previous {
                let (a, b) = (ItemGroup::of(prev), ItemGroup::of(item));
                if a != b || a == ItemGroup::Body {
                    out.push('\n');
                }
            }
            out.push_str(&self.item(item));
            out.push('\n');
            previous = Some(item);
        }

        out
    }

    /// Print the statements of a body, one per line, at `level`
    pub fn print_stmts(&self, stmts: &[Stmt], level: usize) -> String {
        stmts
            .iter()
            .map(|stmt| format!("{}{}\n", self.indent(level), self.stmt(stmt, level)))
            .collect()
    }

    fn indent(&self, level: usize) -> String {
        " ".repeat(level * self.indent_width)
    }

    fn item(&self, item: &Item) -> String {
        match item {
            Item::Import { path, .. } => format!("import {path}"),
            Item::Decl(decl) => self.decl(decl, 0),
            Item::Statement(stmt) => self.stmt(stmt, 0),
        }
    }

    fn attributes(&self, attributes: &[Attribute], level: usize) -> String {
        attributes
            .iter()
            .map(|attr| format!("@{}\n{}", attr.name, self.indent(level)))
            .collect()
    }

    fn decl(&self, decl: &Decl, level: usize) -> String {
        match decl {
            Decl::Function(func) => self.function(func, level),
            Decl::Variable(var) => self.variable(var, level),
        }
    }

    fn function(&self, func: &FunctionDecl, level: usize) -> String {
        let params = func
            .params
            .iter()
            .map(param)
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = format!(
            "{}func {}({params})",
            self.attributes(&func.attributes, level),
            func.name
        );
        if let Some(return_type) = &func.return_type {
            out.push_str(&format!(" -> {return_type}"));
        }
        if let Some(body) = &func.body {
            out.push(' ');
            out.push_str(&self.block(body, level));
        }
        out
    }

    fn variable(&self, var: &VarDecl, level: usize) -> String {
        let introducer = if var.mutable { "var" } else { "let" };
        let bindings = var
            .bindings
            .iter()
            .map(|binding| self.binding(binding, level))
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = format!(
            "{}{introducer} {bindings}",
            self.attributes(&var.attributes, level)
        );
        if let Some(accessor) = &var.accessor {
            out.push(' ');
            out.push_str(&self.block(accessor, level));
        }
        out
    }

    fn binding(&self, binding: &Binding, level: usize) -> String {
        let mut out = binding.pattern.clone();
        if let Some(ty) = &binding.declared_type {
            out.push_str(&format!(": {ty}"));
        }
        if let Some(init) = &binding.initializer {
            out.push_str(" = ");
            out.push_str(&self.expr(init, level));
        }
        out
    }

    fn stmt(&self, stmt: &Stmt, level: usize) -> String {
        match stmt {
            Stmt::Expr(expr) => self.expr(expr, level),
            Stmt::Decl(decl) => self.decl(decl, level),
            Stmt::Control(control) => self.control(control, level),
        }
    }

    fn control(&self, control: &ControlStmt, level: usize) -> String {
        match control {
            ControlStmt::Expression(expr) => self.expr(expr, level),
            ControlStmt::Return(None) => "return".to_string(),
            ControlStmt::Return(Some(value)) => format!("return {}", self.expr(value, level)),
            ControlStmt::While { condition, body } => format!(
                "while {} {}",
                self.expr(condition, level),
                self.block(body, level)
            ),
            ControlStmt::For {
                pattern,
                sequence,
                body,
            } => format!(
                "for {pattern} in {} {}",
                self.expr(sequence, level),
                self.block(body, level)
            ),
            ControlStmt::Break => "break".to_string(),
            ControlStmt::Continue => "continue".to_string(),
        }
    }

    /// `{`, statements one level deeper, `}` at `level`
    fn block(&self, block: &Block, level: usize) -> String {
        if block.is_empty() {
            return "{}".to_string();
        }
        format!(
            "{{\n{}{}}}",
            self.print_stmts(&block.stmts, level + 1),
            self.indent(level)
        )
    }

    fn expr(&self, expr: &Expr, level: usize) -> String {
        match expr {
            Expr::Literal(lit) => literal(lit),
            Expr::Identifier { name } => name.clone(),
            Expr::ImplicitMember { name } => format!(".{name}"),
            Expr::Member { base, name } => format!("{}.{name}", self.expr(base, level)),
            Expr::Subscript { base, arguments } => format!(
                "{}[{}]",
                self.expr(base, level),
                self.arguments(arguments, level)
            ),
            Expr::Call { callee, arguments } => format!(
                "{}({})",
                self.expr(callee, level),
                self.arguments(arguments, level)
            ),
            Expr::Prefix { op, operand } => format!("{}{}", op.symbol(), self.expr(operand, level)),
            Expr::Tuple { elements } => format!("({})", self.arguments(elements, level)),
            Expr::Array { elements } => format!(
                "[{}]",
                elements
                    .iter()
                    .map(|e| self.expr(e, level))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Expr::Closure(closure) => self.closure(closure, level),
            Expr::If(if_expr) => self.if_expr(if_expr, level),
            Expr::Switch(switch) => self.switch(switch, level),
            Expr::Sequence { elements } => self.sequence(elements, level),
            Expr::BinaryOperator { op } => op.symbol().to_string(),
            Expr::AssignmentOperator => "=".to_string(),
            Expr::Assignment { target, value } => format!(
                "{} = {}",
                self.expr(target, level),
                self.expr(value, level)
            ),
            Expr::Unrecognized { text } => text.clone(),
        }
    }

    fn arguments(&self, arguments: &[Argument], level: usize) -> String {
        arguments
            .iter()
            .map(|arg| match &arg.label {
                Some(label) => format!("{label}: {}", self.expr(&arg.value, level)),
                None => self.expr(&arg.value, level),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Operands and operators separated by single spaces; range operators
    /// bind tight
    fn sequence(&self, elements: &[Expr], level: usize) -> String {
        let mut out = String::new();
        let mut tight = true;

        for element in elements {
            let is_range = matches!(element, Expr::BinaryOperator { op } if op.is_range());
            if !tight && !is_range {
                out.push(' ');
            }
            out.push_str(&self.expr(element, level));
            tight = is_range;
        }

        out
    }

    fn closure(&self, closure: &Closure, level: usize) -> String {
        let header = closure
            .signature
            .as_ref()
            .map(|sig| format!(" {} in", signature(sig)))
            .unwrap_or_default();

        if closure.body.is_empty() {
            return if header.is_empty() {
                "{}".to_string()
            } else {
                format!("{{{header} }}")
            };
        }

        format!(
            "{{{header}\n{}{}}}",
            self.print_stmts(&closure.body.stmts, level + 1),
            self.indent(level)
        )
    }

    fn if_expr(&self, if_expr: &IfExpr, level: usize) -> String {
        let mut out = format!(
            "if {} {}",
            self.expr(&if_expr.condition, level),
            self.block(&if_expr.then_block, level)
        );
        match &if_expr.else_branch {
            Some(ElseBranch::Block(block)) => {
                out.push_str(" else ");
                out.push_str(&self.block(block, level));
            }
            Some(ElseBranch::If(nested)) => {
                out.push_str(" else ");
                out.push_str(&self.if_expr(nested, level));
            }
            None => {}
        }
        out
    }

    fn switch(&self, switch: &SwitchExpr, level: usize) -> String {
        let mut out = format!("switch {} {{\n", self.expr(&switch.subject, level));

        for case in &switch.cases {
            out.push_str(&self.indent(level));
            match case {
                SwitchCase::Case { label, body } => {
                    match label {
                        CaseLabel::Patterns(patterns) => {
                            out.push_str(&format!("case {}:\n", patterns.join(", ")))
                        }
                        CaseLabel::Default => out.push_str("default:\n"),
                    }
                    out.push_str(&self.print_stmts(&body.stmts, level + 1));
                }
                SwitchCase::Unrecognized { text } => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }

        out.push_str(&self.indent(level));
        out.push('}');
        out
    }
}

/// Items of different groups, and any two items with bodies, are set off by
/// a blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemGroup {
    Import,
    Body,
    Plain,
}

impl ItemGroup {
    fn of(item: &Item) -> Self {
        match item {
            Item::Import { .. } => ItemGroup::Import,
            Item::Decl(Decl::Function(_)) => ItemGroup::Body,
            Item::Decl(Decl::Variable(var)) if var.accessor.is_some() => ItemGroup::Body,
            _ => ItemGroup::Plain,
        }
    }
}

fn literal(lit: &Literal) -> String {
    match lit {
        Literal::Integer(text) | Literal::Float(text) => text.clone(),
        Literal::String(raw) => format!("\"{raw}\""),
        Literal::Boolean(value) => value.to_string(),
        Literal::Nil => "nil".to_string(),
    }
}

fn param(param: &Param) -> String {
    match &param.label {
        Some(label) => format!("{label} {}: {}", param.name, param.r#type),
        None => format!("{}: {}", param.name, param.r#type),
    }
}

fn signature(sig: &ClosureSignature) -> String {
    let params = sig
        .params
        .iter()
        .map(|p| match &p.r#type {
            Some(ty) => format!("{}: {ty}", p.name),
            None => p.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = if sig.parenthesized {
        format!("({params})")
    } else {
        params
    };
    if let Some(ret) = &sig.return_type {
        out.push_str(&format!(" -> {ret}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, TypeText};

    #[test]
    fn test_print_block_with_labeled_call() {
        let call = Expr::call(
            Expr::ident("clamp"),
            vec![
                Argument::positional(Expr::ident("x")),
                Argument::labeled("to", Expr::integer(10)),
            ],
        );
        let block = Block::new(vec![Stmt::ret(call)]);
        assert_eq!(print_block(&block), "{\n    return clamp(x, to: 10)\n}");
        assert_eq!(print_block(&Block::new(vec![])), "{}");
    }

    #[test]
    fn test_print_sequence_spacing() {
        let seq = Expr::Sequence {
            elements: vec![
                Expr::integer(1),
                Expr::BinaryOperator {
                    op: BinaryOp::ClosedRange,
                },
                Expr::integer(8),
                Expr::BinaryOperator { op: BinaryOp::Add },
                Expr::ident("x"),
            ],
        };
        assert_eq!(print_expr(&seq), "1...8 + x");
    }

    #[test]
    fn test_print_immediately_invoked_closure() {
        let expr = Expr::immediately_invoked(Block::new(vec![Stmt::ret(Expr::ident("x"))]));
        assert_eq!(print_expr(&expr), "{\n    return x\n}()");
    }

    #[test]
    fn test_print_function() {
        let func = FunctionDecl {
            attributes: vec![Attribute::new("ImplicitReturn")],
            name: "add".to_string(),
            params: vec![
                Param::new(Some("_"), "lhs", "Int"),
                Param::new(Some("_"), "rhs", "Int"),
            ],
            return_type: Some(TypeText::new("Int")),
            body: Some(Block::new(vec![Stmt::Expr(Expr::Sequence {
                elements: vec![
                    Expr::ident("lhs"),
                    Expr::BinaryOperator { op: BinaryOp::Add },
                    Expr::ident("rhs"),
                ],
            })])),
            span: None,
        };
        let file = SourceFile {
            items: vec![Item::Decl(Decl::Function(func))],
        };
        assert_eq!(
            print_file(&file),
            "@ImplicitReturn\nfunc add(_ lhs: Int, _ rhs: Int) -> Int {\n    lhs + rhs\n}\n"
        );
    }

    #[test]
    fn test_print_switch_layout() {
        let switch = Expr::Switch(SwitchExpr {
            subject: Box::new(Expr::ident("n")),
            cases: vec![
                SwitchCase::Case {
                    label: CaseLabel::Patterns(vec!["1".to_string(), "2".to_string()]),
                    body: Block::new(vec![Stmt::Expr(Expr::string("low"))]),
                },
                SwitchCase::Case {
                    label: CaseLabel::Default,
                    body: Block::new(vec![Stmt::Expr(Expr::string("high"))]),
                },
            ],
        });
        assert_eq!(
            print_expr(&switch),
            "switch n {\ncase 1, 2:\n    \"low\"\ndefault:\n    \"high\"\n}"
        );
    }

    #[test]
    fn test_print_closure_signature() {
        let closure = Expr::Closure(Closure {
            signature: Some(ClosureSignature {
                params: vec![crate::ast::ClosureParam {
                    name: "x".to_string(),
                    r#type: Some(TypeText::new("Int")),
                }],
                parenthesized: true,
                return_type: Some(TypeText::new("Int")),
            }),
            body: Block::new(vec![Stmt::Expr(Expr::ident("x"))]),
        });
        assert_eq!(print_expr(&closure), "{ (x: Int) -> Int in\n    x\n}");
    }

    #[test]
    fn test_print_custom_indent() {
        let block = Block::new(vec![Stmt::Control(ControlStmt::Break)]);
        assert_eq!(Printer::new(2).block(&block, 1), "{\n    break\n  }");
    }

    #[test]
    fn test_blank_line_between_groups() {
        let file = SourceFile {
            items: vec![
                Item::Import {
                    path: "Foundation".to_string(),
                    span: None,
                },
                Item::Statement(Stmt::Expr(Expr::ident("a"))),
                Item::Statement(Stmt::Expr(Expr::ident("b"))),
            ],
        };
        assert_eq!(print_file(&file), "import Foundation\n\na\nb\n");
    }
}
