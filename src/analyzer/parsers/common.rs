use std::cell::Cell;

use super::super::{core::*, prelude::*};
use crate::tokenizer::{
    keyword::Keyword,
    literal::Literal,
    symbol::{Delimiter, Operator},
    token::{Token, TokenSpan},
};

pub fn delimiter(d: Delimiter) -> impl Parser<TokenSpan, ()> {
    let expected = format!("`{}`", d);
    satisfy(&expected, move |t: &TokenSpan| {
        (t.token == Token::Delimiter(d.clone())).then_some(())
    })
}

pub fn operator(op: Operator) -> impl Parser<TokenSpan, ()> {
    let expected = format!("`{}`", op);
    satisfy(&expected, move |t: &TokenSpan| {
        (t.token == Token::Operator(op.clone())).then_some(())
    })
}

pub fn keyword(kw: Keyword) -> impl Parser<TokenSpan, ()> {
    let expected = format!("`{}`", kw);
    satisfy(&expected, move |t: &TokenSpan| {
        (t.token == Token::Keyword(kw.clone())).then_some(())
    })
}

// Delimiters
pub fn parse_comma() -> impl Parser<TokenSpan, ()> {
    delimiter(Delimiter::Comma)
}

pub fn parse_colon() -> impl Parser<TokenSpan, ()> {
    delimiter(Delimiter::Colon)
}

pub fn parse_equal() -> impl Parser<TokenSpan, ()> {
    delimiter(Delimiter::Equal)
}

pub fn parse_open_paren() -> impl Parser<TokenSpan, ()> {
    delimiter(Delimiter::OpenParen)
}

pub fn parse_close_paren() -> impl Parser<TokenSpan, ()> {
    delimiter(Delimiter::CloseParen)
}

pub fn parse_open_bracket() -> impl Parser<TokenSpan, ()> {
    delimiter(Delimiter::OpenBracket)
}

pub fn parse_close_bracket() -> impl Parser<TokenSpan, ()> {
    delimiter(Delimiter::CloseBracket)
}

pub fn parse_open_brace() -> impl Parser<TokenSpan, ()> {
    delimiter(Delimiter::OpenBrace)
}

pub fn parse_close_brace() -> impl Parser<TokenSpan, ()> {
    delimiter(Delimiter::CloseBrace)
}

pub fn parse_newline() -> impl Parser<TokenSpan, ()> {
    satisfy("newline", |t: &TokenSpan| t.token.is_newline().then_some(()))
}

/// Attribute keys, block types and `.attr` steps accept keywords as names.
pub fn parse_name() -> impl Parser<TokenSpan, String> {
    satisfy("name", |t: &TokenSpan| t.token.as_name().map(str::to_string))
}

pub fn parse_identifier() -> impl Parser<TokenSpan, String> {
    satisfy("identifier", |t: &TokenSpan| match &t.token {
        Token::Identifier(name) => Some(name.clone()),
        _ => None,
    })
}

/// Block label: an identifier or a quoted string without interpolation.
pub fn parse_label() -> impl Parser<TokenSpan, String> {
    satisfy("block label", |t: &TokenSpan| match &t.token {
        Token::Identifier(name) => Some(name.clone()),
        Token::Literal(literal @ Literal::Template(_)) => literal.static_text(),
        _ => None,
    })
}

/// Position of the first token at or after `pos` that is not a newline.
pub fn skip_newlines(input: &[TokenSpan], pos: usize) -> usize {
    input[pos.min(input.len())..]
        .iter()
        .position(|t| !t.token.is_newline())
        .map_or(input.len(), |offset| pos + offset)
}

pub fn peek_is(input: &[TokenSpan], pos: usize, token: &Token) -> bool {
    input.get(pos).is_some_and(|t| t.token == *token)
}

/// Error for whatever sits at `pos` when `expected` was required there.
pub fn unexpected(input: &[TokenSpan], pos: usize, expected: &str) -> ParseError {
    match input.get(pos) {
        Some(t) => ParseError::Unexpected {
            expected: expected.to_string(),
            found: t.token.to_string(),
            span: t.span(),
        },
        None => ParseError::UnexpectedEOF {
            expected: expected.to_string(),
        },
    }
}

/// Deepest nesting of expressions, unary operators and blocks the parser
/// descends into before giving up.
pub const MAX_NESTING_DEPTH: usize = 64;

thread_local! {
    static NESTING: Cell<usize> = const { Cell::new(0) };
}

/// Runs `parser` one nesting level deeper. Past [`MAX_NESTING_DEPTH`] it fails
/// at the token where the next level would start.
pub fn nested<O>(
    input: &[TokenSpan],
    pos: usize,
    parser: impl Fn(&[TokenSpan], usize) -> ParseResult<O>,
) -> ParseResult<O> {
    let depth = NESTING.with(Cell::get);
    if depth >= MAX_NESTING_DEPTH {
        return Err(ParseError::Fail {
            message: format!("Nesting is limited to {} levels", MAX_NESTING_DEPTH),
            span: input
                .get(pos)
                .or(input.last())
                .map(TokenSpan::span)
                .unwrap_or_default(),
        });
    }

    NESTING.with(|n| n.set(depth + 1));
    let result = parser(input, pos);
    NESTING.with(|n| n.set(depth));
    result
}
