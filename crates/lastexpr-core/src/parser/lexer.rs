//! Token-level parsers: whitespace, comments, keywords, identifiers and
//! punctuation.
//!
//! Every token parser skips leading whitespace only. Trailing whitespace is
//! left for whoever parses next, which lets call and subscript parentheses
//! insist on being glued to their callee.

use chumsky::prelude::*;

/// Parser for line comments (`//` to end of line)
pub fn line_comment<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone {
    just("//").then(none_of("\n").repeated()).ignored()
}

/// Parser for block comments (`/* ... */`)
pub fn block_comment<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone {
    just("/*")
        .then(any().and_is(just("*/").not()).repeated())
        .then(just("*/"))
        .ignored()
}

/// Parser for all whitespace and comments
pub fn ws<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone {
    let comment = choice((block_comment(), line_comment()));
    let ws_item = comment.or(one_of(" \t\r\n").ignored());
    ws_item.repeated()
}

/// Reserved words that cannot be used as plain identifiers
pub const KEYWORDS: &[&str] = &[
    "let", "var", "func", "return", "if", "else", "switch", "case", "default", "while", "for",
    "in", "break", "continue", "true", "false", "nil", "import",
];

/// Punctuation or operator text
pub fn symbol<'a, WS>(
    ws: WS,
    text: &'static str,
) -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    ws.ignore_then(just(text)).ignored()
}

/// A whole-word keyword
pub fn keyword<'a, WS>(
    ws: WS,
    word: &'static str,
) -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    ws.ignore_then(text::ident().try_map(move |s: &str, span| {
        if s == word {
            Ok(())
        } else {
            Err(Rich::custom(span, format!("expected '{word}'")))
        }
    }))
}

/// Identifier that is not a keyword
pub fn ident<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, String, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    ws.ignore_then(text::ident().try_map(|s: &str, span| {
        if KEYWORDS.contains(&s) {
            Err(Rich::custom(
                span,
                format!("'{s}' is a keyword and cannot be used as an identifier"),
            ))
        } else {
            Ok(s.to_string())
        }
    }))
}

/// Identifier in a position where keywords are fine: argument labels,
/// member names, type names
pub fn name<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, String, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    ws.ignore_then(text::ident()).map(|s: &str| s.to_string())
}
