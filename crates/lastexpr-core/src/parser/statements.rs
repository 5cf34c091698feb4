//! Blocks, declarations and control statements

use super::lexer;
use crate::ast::{
    Attribute, Binding, Block, ControlStmt, Expr, FunctionDecl, Param, Span, Stmt, TypeText,
    VarDecl,
};
use chumsky::prelude::*;

/// `{ stmts }`
pub fn block<'a, WS, S>(
    ws: WS,
    stmt: S,
) -> impl Parser<'a, &'a str, Block, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    S: Parser<'a, &'a str, Stmt, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::symbol(ws.clone(), "{")
        .ignore_then(stmt.repeated().collect::<Vec<Stmt>>())
        .then_ignore(lexer::symbol(ws, "}"))
        .try_map(|stmts, span| {
            Ok(Block {
                stmts,
                span: Some(Span::from_chumsky(span)),
            })
        })
        .boxed()
}

/// `@Name` attributes
pub fn attributes<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, Vec<Attribute>, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    ws.ignore_then(
        just('@')
            .ignore_then(text::ident())
            .try_map(|name: &str, span| {
                Ok(Attribute {
                    name: name.to_string(),
                    span: Some(Span::from_chumsky(span)),
                })
            }),
    )
    .repeated()
    .collect::<Vec<_>>()
    .boxed()
}

/// Binding pattern: `name`, `_` or `(a, b)`, kept as text
pub fn pattern<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, String, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let tuple = lexer::ident(ws.clone())
        .separated_by(lexer::symbol(ws.clone(), ","))
        .collect::<Vec<_>>()
        .delimited_by(lexer::symbol(ws.clone(), "("), lexer::symbol(ws.clone(), ")"))
        .map(|names| format!("({})", names.join(", ")));

    choice((tuple, lexer::ident(ws))).boxed()
}

/// `let`/`var` declarations, including computed properties
/// (`var name: Type { ... }`)
pub fn var_decl<'a, WS, T, E, B>(
    ws: WS,
    type_parser: T,
    expr: E,
    block: B,
) -> impl Parser<'a, &'a str, VarDecl, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    T: Parser<'a, &'a str, TypeText, extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
    B: Parser<'a, &'a str, Block, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let introducer = choice((
        lexer::keyword(ws.clone(), "let").to(false),
        lexer::keyword(ws.clone(), "var").to(true),
    ));

    let computed = pattern(ws.clone())
        .then_ignore(lexer::symbol(ws.clone(), ":"))
        .then(type_parser.clone())
        .then(block)
        .map(|((pattern, declared_type), accessor)| {
            (
                vec![Binding {
                    pattern,
                    declared_type: Some(declared_type),
                    initializer: None,
                }],
                Some(accessor),
            )
        });

    let binding = pattern(ws.clone())
        .then(
            lexer::symbol(ws.clone(), ":")
                .ignore_then(type_parser)
                .or_not(),
        )
        .then(lexer::symbol(ws.clone(), "=").ignore_then(expr).or_not())
        .map(|((pattern, declared_type), initializer)| Binding {
            pattern,
            declared_type,
            initializer,
        });

    let stored = binding
        .separated_by(lexer::symbol(ws.clone(), ","))
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|bindings| (bindings, None));

    ws.clone()
        .ignore_then(
            attributes(ws)
                .then(introducer)
                .then(choice((computed, stored)))
                .try_map(|((attributes, mutable), (bindings, accessor)), span| {
                    Ok(VarDecl {
                        attributes,
                        mutable,
                        bindings,
                        accessor,
                        span: Some(Span::from_chumsky(span)),
                    })
                }),
        )
        .boxed()
}

/// `func name(label param: Type) -> Type { ... }`, body optional
pub fn func_decl<'a, WS, T, B>(
    ws: WS,
    type_parser: T,
    block: B,
) -> impl Parser<'a, &'a str, FunctionDecl, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    T: Parser<'a, &'a str, TypeText, extra::Err<Rich<'a, char>>> + Clone + 'a,
    B: Parser<'a, &'a str, Block, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let param = lexer::name(ws.clone())
        .then(lexer::name(ws.clone()).or_not())
        .then_ignore(lexer::symbol(ws.clone(), ":"))
        .then(type_parser.clone())
        .map(|((first, second), r#type)| match second {
            Some(name) => Param {
                label: Some(first),
                name,
                r#type,
            },
            None => Param {
                label: None,
                name: first,
                r#type,
            },
        });

    let params = param
        .separated_by(lexer::symbol(ws.clone(), ","))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(lexer::symbol(ws.clone(), "("), lexer::symbol(ws.clone(), ")"));

    let return_type = lexer::symbol(ws.clone(), "->")
        .ignore_then(type_parser)
        .or_not();

    ws.clone()
        .ignore_then(
            attributes(ws.clone())
                .then_ignore(lexer::keyword(ws.clone(), "func"))
                .then(lexer::ident(ws))
                .then(params)
                .then(return_type)
                .then(block.or_not())
                .try_map(|((((attributes, name), params), return_type), body), span| {
                    Ok(FunctionDecl {
                        attributes,
                        name,
                        params,
                        return_type,
                        body,
                        span: Some(Span::from_chumsky(span)),
                    })
                }),
        )
        .boxed()
}

/// `return`, `break`, `continue`, `while` and `for`
pub fn control_stmt<'a, WS, E, B>(
    ws: WS,
    expr: E,
    block: B,
) -> impl Parser<'a, &'a str, ControlStmt, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
    B: Parser<'a, &'a str, Block, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let return_stmt = lexer::keyword(ws.clone(), "return")
        .ignore_then(expr.clone().or_not())
        .map(ControlStmt::Return);

    let while_stmt = lexer::keyword(ws.clone(), "while")
        .ignore_then(expr.clone())
        .then(block.clone())
        .map(|(condition, body)| ControlStmt::While { condition, body });

    let for_stmt = lexer::keyword(ws.clone(), "for")
        .ignore_then(pattern(ws.clone()))
        .then_ignore(lexer::keyword(ws.clone(), "in"))
        .then(expr)
        .then(block)
        .map(|((pattern, sequence), body)| ControlStmt::For {
            pattern,
            sequence,
            body,
        });

    choice((
        return_stmt,
        lexer::keyword(ws.clone(), "break").to(ControlStmt::Break),
        lexer::keyword(ws, "continue").to(ControlStmt::Continue),
        while_stmt,
        for_stmt,
    ))
    .boxed()
}
