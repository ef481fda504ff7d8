//! Token-stream cleanup between the tokenizer and the analyzer.

use crate::tokenizer::{
    symbol::Delimiter,
    token::{Token, TokenSpan},
};

pub trait Preprocessor<T> {
    fn process(&self, input: Vec<T>) -> Vec<T>;
}

/// Drops whitespace and comments.
///
/// Newlines are kept where they terminate attributes and dropped inside
/// `( ... )` and `[ ... ]`, where the grammar lets expressions span lines.
/// Inside `{ ... }` newlines stay, because they separate object items as well
/// as body items.
#[derive(Debug, Clone, Default)]
pub struct TokenPreprocessor;

impl Preprocessor<TokenSpan> for TokenPreprocessor {
    fn process(&self, input: Vec<TokenSpan>) -> Vec<TokenSpan> {
        let mut open: Vec<Delimiter> = Vec::new();
        let mut output = Vec::with_capacity(input.len());

        for span in input {
            match &span.token {
                Token::Whitespace(_) | Token::Comment { .. } => continue,
                Token::Newline => {
                    if matches!(
                        open.last(),
                        Some(Delimiter::OpenParen) | Some(Delimiter::OpenBracket)
                    ) {
                        continue;
                    }
                }
                Token::Delimiter(
                    d @ (Delimiter::OpenParen | Delimiter::OpenBracket | Delimiter::OpenBrace),
                ) => open.push(d.clone()),
                Token::Delimiter(
                    Delimiter::CloseParen | Delimiter::CloseBracket | Delimiter::CloseBrace,
                ) => {
                    open.pop();
                }
                _ => {}
            }
            output.push(span);
        }

        output
    }
}
