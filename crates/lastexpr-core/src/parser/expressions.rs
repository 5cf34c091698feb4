//! Compound expressions: closures, `if`, `switch` and argument lists

use super::lexer;
use crate::ast::{
    Argument, Block, CaseLabel, Closure, ClosureParam, ClosureSignature, ElseBranch, Expr, IfExpr,
    Span, Stmt, SwitchCase, SwitchExpr, TypeText,
};
use chumsky::prelude::*;

/// `label: value` or `value`, comma separated
pub fn arguments<'a, WS, E>(
    ws: WS,
    expr: E,
) -> impl Parser<'a, &'a str, Vec<Argument>, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let label = lexer::name(ws.clone()).then_ignore(lexer::symbol(ws.clone(), ":"));

    label
        .or_not()
        .then(expr)
        .map(|(label, value)| Argument { label, value })
        .separated_by(lexer::symbol(ws, ","))
        .allow_trailing()
        .collect::<Vec<_>>()
        .boxed()
}

/// Closure literal: `{ stmts }`, `{ (a: Int) -> Int in stmts }`, `{ a, b in stmts }`
pub fn closure<'a, WS, T, S>(
    ws: WS,
    type_parser: T,
    stmt: S,
) -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    T: Parser<'a, &'a str, TypeText, extra::Err<Rich<'a, char>>> + Clone + 'a,
    S: Parser<'a, &'a str, Stmt, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let param = lexer::name(ws.clone())
        .then(
            lexer::symbol(ws.clone(), ":")
                .ignore_then(type_parser.clone())
                .or_not(),
        )
        .map(|(name, r#type)| ClosureParam { name, r#type });

    let parenthesized = param
        .separated_by(lexer::symbol(ws.clone(), ","))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(lexer::symbol(ws.clone(), "("), lexer::symbol(ws.clone(), ")"))
        .then(
            lexer::symbol(ws.clone(), "->")
                .ignore_then(type_parser)
                .or_not(),
        )
        .map(|(params, return_type)| ClosureSignature {
            params,
            parenthesized: true,
            return_type,
        });

    let bare = lexer::ident(ws.clone())
        .separated_by(lexer::symbol(ws.clone(), ","))
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|names| ClosureSignature {
            params: names
                .into_iter()
                .map(|name| ClosureParam { name, r#type: None })
                .collect(),
            parenthesized: false,
            return_type: None,
        });

    let signature = choice((parenthesized, bare)).then_ignore(lexer::keyword(ws.clone(), "in"));

    lexer::symbol(ws.clone(), "{")
        .ignore_then(signature.or_not())
        .then(stmt.repeated().collect::<Vec<Stmt>>())
        .then_ignore(lexer::symbol(ws, "}"))
        .try_map(|(signature, stmts), span| {
            Ok(Expr::Closure(Closure {
                signature,
                body: Block {
                    stmts,
                    span: Some(Span::from_chumsky(span)),
                },
            }))
        })
        .boxed()
}

/// `if cond { } else if cond { } else { }`
pub fn if_expr<'a, WS, E, B>(
    ws: WS,
    expr: E,
    block: B,
) -> impl Parser<'a, &'a str, IfExpr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
    B: Parser<'a, &'a str, Block, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    recursive(|if_ref| {
        let else_branch = lexer::keyword(ws.clone(), "else").ignore_then(choice((
            if_ref.map(|nested| ElseBranch::If(Box::new(nested))),
            block.clone().map(ElseBranch::Block),
        )));

        lexer::keyword(ws.clone(), "if")
            .ignore_then(expr)
            .then(block)
            .then(else_branch.or_not())
            .map(|((condition, then_block), else_branch)| IfExpr {
                condition: Box::new(condition),
                then_block,
                else_branch,
            })
    })
    .boxed()
}

/// `switch subject { case p1, p2: stmts  default: stmts }`
///
/// `#if ... #endif` groups between cases are kept as unrecognized text.
pub fn switch_expr<'a, WS, E, S>(
    ws: WS,
    expr: E,
    stmt: S,
) -> impl Parser<'a, &'a str, SwitchExpr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
    S: Parser<'a, &'a str, Stmt, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let pattern = expr
        .clone()
        .to_slice()
        .map(|text: &str| text.trim().to_string());

    let label = choice((
        lexer::keyword(ws.clone(), "case")
            .ignore_then(
                pattern
                    .separated_by(lexer::symbol(ws.clone(), ","))
                    .at_least(1)
                    .collect::<Vec<String>>(),
            )
            .map(CaseLabel::Patterns),
        lexer::keyword(ws.clone(), "default").to(CaseLabel::Default),
    ))
    .then_ignore(lexer::symbol(ws.clone(), ":"));

    let body = stmt
        .repeated()
        .collect::<Vec<Stmt>>()
        .try_map(|stmts, span| {
            Ok(Block {
                stmts,
                span: Some(Span::from_chumsky(span)),
            })
        });

    let case = label
        .then(body)
        .map(|(label, body)| SwitchCase::Case { label, body });

    let conditional_group = ws
        .clone()
        .ignore_then(
            just("#if")
                .then(any().and_is(just("#endif").not()).repeated())
                .then(just("#endif"))
                .to_slice(),
        )
        .map(|text: &str| SwitchCase::Unrecognized {
            text: text.to_string(),
        });

    lexer::keyword(ws.clone(), "switch")
        .ignore_then(expr)
        .then(
            choice((conditional_group, case))
                .repeated()
                .collect::<Vec<_>>()
                .delimited_by(lexer::symbol(ws.clone(), "{"), lexer::symbol(ws, "}")),
        )
        .map(|(subject, cases)| SwitchExpr {
            subject: Box::new(subject),
            cases,
        })
        .boxed()
}
