use super::lexer;
use crate::ast::{Expr, Literal};
use chumsky::prelude::*;

/// Creates a parser for number literals (integers and decimal floats)
pub fn number<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    ws.ignore_then(
        text::int(10)
            .then(just('.').then(text::digits(10)).or_not())
            .to_slice(),
    )
    .map(|s: &str| {
        if s.contains('.') {
            Expr::Literal(Literal::Float(s.to_string()))
        } else {
            Expr::Literal(Literal::Integer(s.to_string()))
        }
    })
    .boxed()
}

/// Creates a parser for string literals.
///
/// The contents are kept raw: escapes and `\(...)` interpolations are not
/// decoded, so the printer can write them back untouched.
pub fn string<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let escape = just('\\').then(any()).ignored();
    let plain = none_of("\\\"\n").ignored();

    ws.ignore_then(just('"'))
        .ignore_then(escape.or(plain).repeated().to_slice())
        .then_ignore(just('"'))
        .map(Expr::string)
        .boxed()
}

/// Creates a parser for boolean literals (true/false)
pub fn boolean<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    choice((
        lexer::keyword(ws.clone(), "true").to(Expr::Literal(Literal::Boolean(true))),
        lexer::keyword(ws, "false").to(Expr::Literal(Literal::Boolean(false))),
    ))
    .boxed()
}

/// Creates a parser for the nil literal
pub fn nil<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::keyword(ws, "nil").to(Expr::Literal(Literal::Nil)).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_float() {
        let parser = number(lexer::ws());
        assert_eq!(
            parser.parse(" 42").into_result(),
            Ok(Expr::Literal(Literal::Integer("42".to_string())))
        );
        assert_eq!(
            parser.parse("3.25").into_result(),
            Ok(Expr::Literal(Literal::Float("3.25".to_string())))
        );
    }

    #[test]
    fn test_number_does_not_eat_range_dots() {
        let parser = number(lexer::ws()).then_ignore(just("...8"));
        assert!(parser.parse("1...8").into_result().is_ok());
    }

    #[test]
    fn test_string_keeps_interpolation_raw() {
        let parser = string(lexer::ws());
        assert_eq!(
            parser.parse(r#""value: \(x) \"q\"""#).into_result(),
            Ok(Expr::string(r#"value: \(x) \"q\""#))
        );
    }

    #[test]
    fn test_boolean_requires_whole_word() {
        let parser = boolean(lexer::ws());
        assert!(parser.parse("true").into_result().is_ok());
        assert!(parser.parse("trueish").into_result().is_err());
    }
}
