//! Spaces, tabs and line breaks.
//!
//! Newlines survive tokenization because they terminate attributes; the
//! preprocessor decides where they are insignificant.

use nom::{
    bytes::complete::tag,
    combinator::{map, opt, recognize},
    error::{context, ContextError, ErrorKind, ParseError, VerboseError},
    sequence::pair,
};

use super::token::{ParserResult, Token};

/// A run of blanks. A lone `\r` not followed by `\n` counts as a blank.
///
/// ```
/// # use hclmeta::tokenizer::whitespace::parse_whitespace;
/// # use hclmeta::tokenizer::token::Token;
/// let (rest, token) = parse_whitespace(" \t source").unwrap();
/// assert_eq!(token, Token::Whitespace(" \t ".to_string()));
/// assert_eq!(rest, "source");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<Token> {
    let blanks = input
        .char_indices()
        .take_while(|&(i, c)| match c {
            ' ' | '\t' => true,
            '\r' => !input[i + 1..].starts_with('\n'),
            _ => false,
        })
        .map(|(i, c)| i + c.len_utf8())
        .last();

    match blanks {
        Some(end) => Ok((&input[end..], Token::Whitespace(input[..end].to_string()))),
        None => Err(nom::Err::Error(VerboseError::add_context(
            input,
            "blank",
            VerboseError::from_error_kind(input, ErrorKind::Space),
        ))),
    }
}

/// `\n`, optionally preceded by `\r`.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_newline(input: &str) -> ParserResult<Token> {
    context(
        "line break",
        map(recognize(pair(opt(tag("\r")), tag("\n"))), |_| {
            Token::Newline
        }),
    )(input)
}
