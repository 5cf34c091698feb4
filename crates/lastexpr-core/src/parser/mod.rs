use crate::ast::{Argument, ControlStmt, Decl, Expr, Item, SourceFile, Span, Stmt};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use chumsky::prelude::*;

mod errors;
mod expressions;
mod lexer;
mod literals;
mod operators;
pub mod recovery;
mod statements;
mod types;

pub fn parser<'a>() -> impl Parser<'a, &'a str, SourceFile, extra::Err<Rich<'a, char>>> {
    // Comments and whitespace
    let ws = lexer::ws();

    let ident = lexer::ident(ws.clone());
    let type_parser = types::type_parser(ws.clone());

    // Recursive expression and statement placeholders
    let mut expr_ref = Recursive::declare();
    let mut stmt_ref = Recursive::declare();

    let block = statements::block(ws.clone(), stmt_ref.clone());
    let closure = expressions::closure(ws.clone(), type_parser.clone(), stmt_ref.clone());
    let if_expr = expressions::if_expr(ws.clone(), expr_ref.clone(), block.clone());
    let switch_expr = expressions::switch_expr(ws.clone(), expr_ref.clone(), stmt_ref.clone());
    let arguments = expressions::arguments(ws.clone(), expr_ref.clone());

    let tuple = arguments
        .clone()
        .delimited_by(lexer::symbol(ws.clone(), "("), lexer::symbol(ws.clone(), ")"))
        .map(|elements| Expr::Tuple { elements });

    let array = expr_ref
        .clone()
        .separated_by(lexer::symbol(ws.clone(), ","))
        .allow_trailing()
        .collect::<Vec<Expr>>()
        .delimited_by(lexer::symbol(ws.clone(), "["), lexer::symbol(ws.clone(), "]"))
        .map(|elements| Expr::Array { elements });

    let implicit_member = ws
        .clone()
        .ignore_then(just('.'))
        .ignore_then(text::ident())
        .map(|name: &str| Expr::ImplicitMember {
            name: name.to_string(),
        });

    // Primary expressions (atoms)
    let primary = choice((
        literals::number(ws.clone()).boxed(),
        literals::string(ws.clone()).boxed(),
        literals::boolean(ws.clone()).boxed(),
        literals::nil(ws.clone()).boxed(),
        closure.boxed(),
        if_expr.clone().map(Expr::If).boxed(),
        switch_expr.clone().map(Expr::Switch).boxed(),
        tuple.boxed(),
        array.boxed(),
        implicit_member.boxed(),
        ident.clone().map(|name| Expr::Identifier { name }).boxed(),
    ))
    .boxed();

    // Postfix operators: calls, subscripts and member access. The opening
    // bracket of a call or subscript has to follow the callee directly.
    #[derive(Clone)]
    enum PostfixOp {
        Call(Vec<Argument>),
        Subscript(Vec<Argument>),
        Member(String),
    }

    let postfix_op = choice((
        arguments
            .clone()
            .delimited_by(just('('), lexer::symbol(ws.clone(), ")"))
            .map(PostfixOp::Call),
        arguments
            .clone()
            .delimited_by(just('['), lexer::symbol(ws.clone(), "]"))
            .map(PostfixOp::Subscript),
        ws.clone()
            .ignore_then(just('.'))
            .ignore_then(text::ident())
            .map(|name: &str| PostfixOp::Member(name.to_string())),
    ));

    let postfix = primary
        .then(postfix_op.repeated().collect::<Vec<_>>())
        .map(|(base, ops)| {
            ops.into_iter().fold(base, |base, op| match op {
                PostfixOp::Call(arguments) => Expr::Call {
                    callee: Box::new(base),
                    arguments,
                },
                PostfixOp::Subscript(arguments) => Expr::Subscript {
                    base: Box::new(base),
                    arguments,
                },
                PostfixOp::Member(name) => Expr::Member {
                    base: Box::new(base),
                    name,
                },
            })
        })
        .boxed();

    let prefixed = operators::prefix_op(ws.clone())
        .repeated()
        .collect::<Vec<_>>()
        .then(postfix)
        .map(|(ops, operand)| {
            // Apply operators right-to-left
            ops.into_iter().rev().fold(operand, |operand, op| Expr::Prefix {
                op,
                operand: Box::new(operand),
            })
        })
        .boxed();

    // Operator chains stay flat, the way the host hands them over
    let sequence = prefixed
        .clone()
        .then(
            operators::infix_op(ws.clone())
                .then(prefixed)
                .repeated()
                .collect::<Vec<_>>(),
        )
        .map(|(first, rest)| {
            if rest.is_empty() {
                first
            } else {
                let mut elements = Vec::with_capacity(rest.len() * 2 + 1);
                elements.push(first);
                for (op, operand) in rest {
                    elements.push(op);
                    elements.push(operand);
                }
                Expr::Sequence { elements }
            }
        })
        .boxed();

    expr_ref.define(sequence);

    // Statement parsers
    let var_decl = statements::var_decl(
        ws.clone(),
        type_parser.clone(),
        expr_ref.clone(),
        block.clone(),
    );
    let func_decl = statements::func_decl(ws.clone(), type_parser, block.clone());
    let control = statements::control_stmt(ws.clone(), expr_ref.clone(), block);

    let stmt = choice((
        var_decl
            .clone()
            .map(|var| Stmt::Decl(Decl::Variable(var)))
            .boxed(),
        func_decl
            .clone()
            .map(|func| Stmt::Decl(Decl::Function(func)))
            .boxed(),
        control.map(Stmt::Control).boxed(),
        // `if`/`switch` at the start of a statement are the statement form
        if_expr
            .map(|e| Stmt::Control(ControlStmt::Expression(Expr::If(e))))
            .boxed(),
        switch_expr
            .map(|e| Stmt::Control(ControlStmt::Expression(Expr::Switch(e))))
            .boxed(),
        expr_ref.clone().map(Stmt::Expr).boxed(),
    ))
    .then_ignore(lexer::symbol(ws.clone(), ";").or_not())
    .boxed();

    stmt_ref.define(stmt.clone());

    let import = lexer::keyword(ws.clone(), "import")
        .ignore_then(
            lexer::name(ws.clone())
                .separated_by(just('.'))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .try_map(|path, span| {
            Ok(Item::Import {
                path: path.join("."),
                span: Some(Span::from_chumsky(span)),
            })
        });

    let item = choice((
        import.boxed(),
        func_decl
            .map(|func| Item::Decl(Decl::Function(func)))
            .then_ignore(lexer::symbol(ws.clone(), ";").or_not())
            .boxed(),
        var_decl
            .map(|var| Item::Decl(Decl::Variable(var)))
            .then_ignore(lexer::symbol(ws.clone(), ";").or_not())
            .boxed(),
        stmt.map(Item::Statement).boxed(),
    ))
    // At the top level, skip the offending line and carry on
    .recover_with(via_parser(recovery::item_recovery()))
    .boxed();

    item.repeated()
        .collect::<Vec<Item>>()
        .then_ignore(ws)
        .then_ignore(end())
        .map(|items| SourceFile { items })
}

pub fn parse(source: &str, filename: &str) -> Result<SourceFile, Vec<Diagnostic>> {
    let (output, errs) = parser().parse(source).into_output_errors();

    match output {
        Some(file) if errs.is_empty() => Ok(file),
        _ if !errs.is_empty() => Err(errors::errors_to_diagnostics(errs, filename, source)),
        _ => Err(vec![Diagnostic::error(
            DiagnosticKind::Parse,
            "parser produced no output",
            Span::new(0, source.len()),
            filename,
        )]),
    }
}
