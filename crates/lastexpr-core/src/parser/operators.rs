use crate::ast::{BinaryOp, Expr, PrefixOp};
use chumsky::prelude::*;

/// Prefix operators: `!` and `-`
pub fn prefix_op<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, PrefixOp, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    ws.ignore_then(choice((
        just('!').to(PrefixOp::Not),
        just('-').to(PrefixOp::Negate),
    )))
}

/// Infix operators as `Sequence` elements. Longer spellings are tried first
/// so `==` never reads as `=` and `..<` never as `<`.
pub fn infix_op<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let three = choice((
        just("...").to(BinaryOp::ClosedRange),
        just("..<").to(BinaryOp::HalfOpenRange),
        just("===").to(BinaryOp::Identical),
        just("!==").to(BinaryOp::NotIdentical),
    ));

    let two = choice((
        just("==").to(BinaryOp::Eq),
        just("!=").to(BinaryOp::Ne),
        just("<=").to(BinaryOp::Le),
        just(">=").to(BinaryOp::Ge),
        just("&&").to(BinaryOp::And),
        just("||").to(BinaryOp::Or),
        just("??").to(BinaryOp::NilCoalesce),
        just("+=").to(BinaryOp::AddAssign),
        just("-=").to(BinaryOp::SubAssign),
        just("*=").to(BinaryOp::MulAssign),
        just("/=").to(BinaryOp::DivAssign),
        just("%=").to(BinaryOp::RemAssign),
    ));

    // `->` belongs to signatures, never to an operator chain
    let one = choice((
        just('+').to(BinaryOp::Add),
        just('-').and_is(just("->").not()).to(BinaryOp::Sub),
        just('*').to(BinaryOp::Mul),
        just('/').to(BinaryOp::Div),
        just('%').to(BinaryOp::Rem),
        just('<').to(BinaryOp::Lt),
        just('>').to(BinaryOp::Gt),
    ));

    let binary = choice((three, two, one)).map(|op| Expr::BinaryOperator { op });
    let assign = just('=').to(Expr::AssignmentOperator);

    ws.ignore_then(choice((binary, assign)))
}
