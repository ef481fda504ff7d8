//! # Literal Token Handling
//!
//! Numbers, quoted templates, and heredocs. A quoted template is always a single
//! token: interpolation (`${ ... }`) and directive (`%{ ... }`) sequences are matched
//! by brace depth, including quoted strings nested inside them, and kept as raw text.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, one_of},
    combinator::{map, opt, recognize},
    error::{context, ErrorKind, ParseError as _, VerboseError},
    sequence::{pair, tuple},
};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// Literal text with escapes already applied
    Literal(String),
    /// Raw source text between `${` and `}`
    Interpolation(String),
    /// Raw source text between `%{` and `}`
    Directive(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Number literal kept as written; evaluation happens later
    Number(String),
    Template(Vec<TemplatePart>),
    Heredoc {
        marker: String,
        strip_indent: bool,
        content: String,
    },
}

impl Literal {
    /// Returns the text of a template that has no interpolation or directive.
    pub fn static_text(&self) -> Option<String> {
        match self {
            Literal::Template(parts) => parts
                .iter()
                .map(|part| match part {
                    TemplatePart::Literal(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(|texts| texts.concat()),
            _ => None,
        }
    }
}

fn fail<T>(input: &str, kind: ErrorKind) -> ParserResult<'_, T> {
    Err(nom::Err::Error(VerboseError::from_error_kind(input, kind)))
}

fn flush(literal: &mut String, parts: &mut Vec<TemplatePart>) {
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(std::mem::take(literal)));
    }
}

/// Decodes the escape sequence following a backslash.
/// Returns the decoded character and the number of bytes consumed after the backslash.
fn unescape(input: &str) -> Option<(char, usize)> {
    let c = input.chars().next()?;
    let simple = match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    };
    if let Some(decoded) = simple {
        return Some((decoded, 1));
    }
    let digits = match c {
        'u' => 4,
        'U' => 8,
        _ => return None,
    };
    let hex = input.get(1..1 + digits)?;
    let code = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(code).map(|decoded| (decoded, 1 + digits))
}

/// Scans the inside of `${ ... }` or `%{ ... }` up to the matching close brace.
fn scan_interpolation(input: &str) -> ParserResult<String> {
    let mut depth = 1usize;
    let mut i = 0;
    while let Some(c) = input[i..].chars().next() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let inner = input[..i].trim().trim_start_matches('~').trim_end_matches('~');
                    return Ok((&input[i + 1..], inner.trim().to_string()));
                }
            }
            '"' => {
                let (rest, _) = scan_template(&input[i..])?;
                i = input.len() - rest.len();
                continue;
            }
            _ => {}
        }
        i += c.len_utf8();
    }
    fail(input, ErrorKind::Eof)
}

fn scan_template(input: &str) -> ParserResult<Vec<TemplatePart>> {
    let Some(body) = input.strip_prefix('"') else {
        return fail(input, ErrorKind::Char);
    };
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while let Some(c) = body[i..].chars().next() {
        let rest = &body[i..];
        if rest.starts_with("$${") || rest.starts_with("%%{") {
            literal.push_str(&rest[1..3]);
            i += 3;
            continue;
        }
        if rest.starts_with("${") || rest.starts_with("%{") {
            flush(&mut literal, &mut parts);
            let (after, inner) = scan_interpolation(&rest[2..])?;
            parts.push(if c == '$' {
                TemplatePart::Interpolation(inner)
            } else {
                TemplatePart::Directive(inner)
            });
            i = body.len() - after.len();
            continue;
        }
        match c {
            '"' => {
                flush(&mut literal, &mut parts);
                return Ok((&body[i + 1..], parts));
            }
            '\n' => return fail(rest, ErrorKind::Char),
            '\\' => match unescape(&rest[1..]) {
                Some((decoded, consumed)) => {
                    literal.push(decoded);
                    i += 1 + consumed;
                    continue;
                }
                None => return fail(rest, ErrorKind::Escaped),
            },
            _ => literal.push(c),
        }
        i += c.len_utf8();
    }

    fail(input, ErrorKind::Eof)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_template_literal(input: &str) -> ParserResult<Literal> {
    context("quoted template", map(scan_template, Literal::Template))(input)
}

fn scan_heredoc(input: &str) -> ParserResult<Literal> {
    let (rest, _) = tag("<<")(input)?;
    let (rest, strip) = opt(char('-'))(rest)?;
    let (rest, marker) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(rest)?;
    let (mut rest, _) = alt((tag("\r\n"), tag("\n")))(rest)?;

    let mut lines: Vec<&str> = Vec::new();
    while !rest.is_empty() {
        let (line, after) = match rest.find('\n') {
            Some(n) => (&rest[..n], &rest[n + 1..]),
            None => (rest, ""),
        };
        let line = line.trim_end_matches('\r');
        if line.trim() == marker {
            let end = line.find(marker).map_or(line.len(), |p| p + marker.len());
            let strip_indent = strip.is_some();
            let content = heredoc_content(&lines, strip_indent);
            return Ok((
                &rest[end..],
                Literal::Heredoc {
                    marker: marker.to_string(),
                    strip_indent,
                    content,
                },
            ));
        }
        lines.push(line);
        rest = after;
    }

    fail(rest, ErrorKind::Eof)
}

fn heredoc_content(lines: &[&str], strip_indent: bool) -> String {
    let indent = if strip_indent {
        lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.len() - line.trim_start().len())
            .min()
            .unwrap_or(0)
    } else {
        0
    };
    lines
        .iter()
        .map(|line| format!("{}\n", line.get(indent..).unwrap_or("")))
        .collect()
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_heredoc(input: &str) -> ParserResult<Literal> {
    context("heredoc", scan_heredoc)(input)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_number_literal(input: &str) -> ParserResult<Literal> {
    context(
        "number literal",
        map(
            recognize(tuple((
                digit1,
                opt(pair(char('.'), digit1)),
                opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
            ))),
            |s: &str| Literal::Number(s.to_string()),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<Token> {
    context(
        "literal",
        map(
            alt((parse_template_literal, parse_heredoc, parse_number_literal)),
            Token::Literal,
        ),
    )(input)
}
