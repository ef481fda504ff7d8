//! # Analyzer
//!
//! Turns the preprocessed token stream into an [`ast::Body`] with parser
//! combinators over `&[TokenSpan]`. Every expression keeps the byte span of its
//! first and last token, so the raw source of an attribute value can be re-read
//! later without copying the syntax tree.
//!
//! [`parse_file`] runs the whole front end for one file and never fails: problems
//! come back as diagnostics next to whatever could be parsed.

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

use std::collections::HashMap;

pub use core::ParseError;
pub use core::ParseResult;
pub use core::Parser;

pub use crate::ast;
use crate::{
    diagnostics::{Diagnostic, Diagnostics},
    preprocessor::{Preprocessor, TokenPreprocessor},
    source::SourceFile,
    tokenizer::token::{Span, TokenSpan, Tokenizer, TokenizerError},
};

/// Tokenizes and parses one configuration file.
///
/// Returns `None` for the body when the file cannot be read as UTF-8, cannot be
/// tokenized, or has a syntax error; the reason is in the diagnostics. Duplicate
/// attribute names do not discard the body: the first definition is kept and
/// each repeat is reported.
#[tracing::instrument(level = "debug", skip(file), fields(filename = file.filename()))]
pub fn parse_file(file: &SourceFile) -> (Option<ast::Body>, Diagnostics) {
    let mut diags = Diagnostics::new();

    let text = match std::str::from_utf8(file.bytes()) {
        Ok(text) => text,
        Err(e) => {
            diags.push(Diagnostic::error(
                "Invalid file encoding",
                format!("The file {} is not valid UTF-8: {}.", file.filename(), e),
            ));
            return (None, diags);
        }
    };

    let tokens = match Tokenizer::new().tokenize(text) {
        Ok(tokens) => TokenPreprocessor.process(tokens),
        Err(e) => {
            diags.push(tokenizer_diagnostic(file, &e));
            return (None, diags);
        }
    };
    tracing::debug!("{} tokens after preprocessing", tokens.len());

    let mut body = match parse_tokens(&tokens) {
        Ok(body) => body,
        Err(e) => {
            diags.push(syntax_diagnostic(file, &tokens, &e));
            return (None, diags);
        }
    };

    remove_duplicate_attributes(&mut body, file, &mut diags);
    (Some(body), diags)
}

/// Parses a whole token stream as a file body.
pub fn parse_tokens(tokens: &[TokenSpan]) -> Result<ast::Body, ParseError> {
    let (pos, body) = parsers::parse_body(tokens, 0)?;
    if pos < tokens.len() {
        return Err(ParseError::WithContext {
            message: "argument or block definition".to_string(),
            inner: Box::new(parsers::common::unexpected(tokens, pos, "end of input")),
        });
    }
    Ok(body)
}

fn tokenizer_diagnostic(file: &SourceFile, error: &TokenizerError) -> Diagnostic {
    let TokenizerError::ParseError { found, .. } = error;
    Diagnostic::error(
        "Invalid character",
        format!("The text starting with {:?} is not valid here.", found),
    )
    .with_subject(file.range(&error.span()))
}

fn syntax_diagnostic(file: &SourceFile, tokens: &[TokenSpan], error: &ParseError) -> Diagnostic {
    let summary = match error.context() {
        Some(context) => format!("Invalid {}", context),
        None => "Invalid syntax".to_string(),
    };
    let subject = error.span().unwrap_or_else(|| end_of_input(tokens));
    Diagnostic::error(summary, format!("{}.", error.root_cause())).with_subject(file.range(&subject))
}

fn end_of_input(tokens: &[TokenSpan]) -> Span {
    tokens.last().map_or_else(
        || Span {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        },
        |last| Span {
            start: last.end,
            end: last.end,
            ..last.span()
        },
    )
}

/// Keeps the first definition of each attribute name per body, recursively.
fn remove_duplicate_attributes(body: &mut ast::Body, file: &SourceFile, diags: &mut Diagnostics) {
    let mut seen: HashMap<String, Span> = HashMap::new();
    body.structures.retain(|structure| match structure {
        ast::Structure::Attribute(attr) => match seen.get(&attr.name) {
            Some(first) => {
                diags.push(
                    Diagnostic::error(
                        "Duplicate argument",
                        format!(
                            "The argument {:?} was already set at {}. Each argument may be set only once.",
                            attr.name,
                            file.range(first)
                        ),
                    )
                    .with_subject(file.range(&attr.name_span)),
                );
                false
            }
            None => {
                seen.insert(attr.name.clone(), attr.name_span);
                true
            }
        },
        ast::Structure::Block(_) => true,
    });

    for structure in &mut body.structures {
        if let ast::Structure::Block(block) = structure {
            remove_duplicate_attributes(&mut block.body, file, diags);
        }
    }
}
