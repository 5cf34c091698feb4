//! Type annotations
//!
//! Types are only ever compared by spelling, so the parser recognises their
//! shape and hands back the trimmed source slice.

use super::lexer;
use crate::ast::TypeText;
use chumsky::prelude::*;

/// Creates a parser for type annotations: named, dotted and generic types,
/// `?`/`!` suffixes, tuples, arrays, dictionaries and function types.
pub fn type_parser<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, TypeText, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let shape = recursive(|ty| {
        let generic_args = lexer::symbol(ws.clone(), "<")
            .ignore_then(
                ty.clone()
                    .separated_by(lexer::symbol(ws.clone(), ","))
                    .at_least(1)
                    .collect::<Vec<()>>(),
            )
            .then_ignore(lexer::symbol(ws.clone(), ">"));

        let named = lexer::name(ws.clone())
            .then(just('.').ignore_then(text::ident()).repeated())
            .then(generic_args.or_not())
            .ignored();

        // `(Int, label: String)` and `()`
        let tuple_element = lexer::name(ws.clone())
            .then_ignore(lexer::symbol(ws.clone(), ":"))
            .or_not()
            .then(ty.clone());
        let tuple = tuple_element
            .separated_by(lexer::symbol(ws.clone(), ","))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(lexer::symbol(ws.clone(), "("), lexer::symbol(ws.clone(), ")"))
            .ignored();

        // `[Element]` and `[Key: Value]`
        let collection = ty
            .clone()
            .then(lexer::symbol(ws.clone(), ":").ignore_then(ty.clone()).or_not())
            .delimited_by(lexer::symbol(ws.clone(), "["), lexer::symbol(ws.clone(), "]"))
            .ignored();

        let atom = choice((tuple, collection, named)).then(one_of("?!").repeated());

        atom.then(lexer::symbol(ws.clone(), "->").ignore_then(ty).or_not())
            .ignored()
    });

    shape
        .to_slice()
        .map(|text: &str| TypeText::new(text.trim()))
        .boxed()
}
