use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::not_line_ending,
    combinator::{map, value},
    error::context,
    sequence::{delimited, pair},
};

use super::token::{CommentType, ParserResult, Token};

/// `# ...` or `// ...` up to, not including, the line break.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_line_comment(input: &str) -> ParserResult<Token> {
    let marker = alt((
        value(CommentType::Hash, tag("#")),
        value(CommentType::Line, tag("//")),
    ));
    context(
        "line comment",
        map(pair(marker, not_line_ending), |(comment_type, text): (_, &str)| {
            Token::Comment {
                content: text.trim().to_string(),
                comment_type,
            }
        }),
    )(input)
}

/// `/* ... */`, which may span lines. Content is kept untrimmed.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_block_comment(input: &str) -> ParserResult<Token> {
    let body = delimited(tag("/*"), take_until("*/"), tag("*/"));
    context(
        "block comment",
        map(body, |text: &str| {
            Token::Comment {
                content: text.to_string(),
                comment_type: CommentType::Block,
            }
        }),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_comment(input: &str) -> ParserResult<Token> {
    alt((parse_block_comment, parse_line_comment))(input)
}
