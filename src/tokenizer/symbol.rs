//! # Symbol Token Handling
//!
//! This module defines the symbols (operators and delimiters) of HCL native syntax
//! and provides functionality for parsing symbol tokens.
//!
//! ## Symbol Types
//!
//! * [`Operator`]: Arithmetic, comparison, logical, and traversal operators
//! * [`Delimiter`]: Structural elements like braces, brackets, and the `=` of an attribute
//!
//! The source text of each symbol lives in its strum `serialize` attribute and
//! drives both parsing and display. Operators are tried before delimiters
//! because `==` and `=>` share a prefix with `=`.

use std::fmt;

use nom::{
    combinator::map,
    error::{context, ErrorKind, ParseError, VerboseError},
};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::token::{ParserResult, Token};

/// Represents operators in HCL expressions.
#[derive(Debug, Clone, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIter)]
pub enum Operator {
    /// Object `for` expression arrow (`=>`)
    #[strum(serialize = "=>")]
    FatArrow,
    /// Expansion / grouping marker (`...`)
    #[strum(serialize = "...")]
    Ellipsis,
    /// Attribute access (`.`)
    #[strum(serialize = ".")]
    Dot,
    /// Conditional operator (`?`)
    #[strum(serialize = "?")]
    Question,

    #[strum(serialize = "==")]
    EqualEqual,
    #[strum(serialize = "!=")]
    NotEqual,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = ">=")]
    GreaterEqual,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = "<=")]
    LessEqual,

    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "*")]
    Star,
    #[strum(serialize = "/")]
    Slash,
    #[strum(serialize = "%")]
    Percent,

    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,
    #[strum(serialize = "!")]
    Not,
}

/// Represents delimiters in HCL native syntax.
///
/// `Display` goes through `AsRefStr`: strum's `Display` derive reads braces in
/// `serialize` as format placeholders.
#[derive(Debug, Clone, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
pub enum Delimiter {
    #[strum(serialize = "{")]
    OpenBrace,
    #[strum(serialize = "}")]
    CloseBrace,
    #[strum(serialize = "(")]
    OpenParen,
    #[strum(serialize = ")")]
    CloseParen,
    #[strum(serialize = "[")]
    OpenBracket,
    #[strum(serialize = "]")]
    CloseBracket,
    #[strum(serialize = ",")]
    Comma,
    /// Object item separator and conditional / `for` result separator (`:`)
    #[strum(serialize = ":")]
    Colon,
    /// Attribute and object item assignment (`=`)
    #[strum(serialize = "=")]
    Equal,
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Picks the longest symbol of `S` that prefixes `input`.
///
/// Comparing every variant keeps `==` from being read as `=` `=` and `...`
/// from being read as three dots, whatever order the variants are declared in.
fn longest_symbol<S>(input: &str) -> ParserResult<S>
where
    S: IntoEnumIterator + AsRef<str>,
{
    S::iter()
        .filter(|symbol| input.starts_with(symbol.as_ref()))
        .max_by_key(|symbol| symbol.as_ref().len())
        .map(|symbol| {
            let len = symbol.as_ref().len();
            (&input[len..], symbol)
        })
        .ok_or_else(|| {
            nom::Err::Error(VerboseError::from_error_kind(input, ErrorKind::Tag))
        })
}

/// ```
/// # use hclmeta::tokenizer::symbol::{parse_operator, Operator};
/// # use hclmeta::tokenizer::token::Token;
/// let (rest, token) = parse_operator("== rest").unwrap();
/// assert_eq!(token, Token::Operator(Operator::EqualEqual));
/// assert_eq!(rest, " rest");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_operator(input: &str) -> ParserResult<Token> {
    context("operator", map(longest_symbol::<Operator>, Token::Operator))(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_delimiter(input: &str) -> ParserResult<Token> {
    context("delimiter", map(longest_symbol::<Delimiter>, Token::Delimiter))(input)
}
