use thiserror::Error;

use crate::tokenizer::token::Span;

// Parser trait

pub trait Parser<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

/// Plain functions over the token slice are parsers too, so hand written
/// loops compose with the combinators.
impl<I, O, F> Parser<I, O> for F
where
    F: Fn(&[I], usize) -> ParseResult<O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        self(input, pos)
    }
}

pub type ParseResult<O> = Result<(usize, O), ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected {found}, expected {expected}")]
    Unexpected {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEOF { expected: String },
    #[error("No alternative")]
    NoAlternative,
    #[error("{message}")]
    Fail { message: String, span: Span },
    #[error("{message}: {inner}")]
    WithContext {
        message: String,
        inner: Box<ParseError>,
    },
}

impl ParseError {
    /// Location of the innermost failure, `None` at end of input.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Unexpected { span, .. } | ParseError::Fail { span, .. } => Some(*span),
            ParseError::WithContext { inner, .. } => inner.span(),
            ParseError::UnexpectedEOF { .. } | ParseError::NoAlternative => None,
        }
    }

    /// Byte offset reached before failing, used to pick the most informative
    /// error among alternatives.
    pub fn progress(&self) -> usize {
        match self {
            ParseError::UnexpectedEOF { .. } => usize::MAX,
            ParseError::NoAlternative => 0,
            ParseError::WithContext { inner, .. } => inner.progress(),
            _ => self.span().map_or(0, |span| span.start),
        }
    }

    /// Name of the innermost construct that was being parsed.
    pub fn context(&self) -> Option<&str> {
        match self {
            ParseError::WithContext { message, inner } => {
                inner.context().or(Some(message.as_str()))
            }
            _ => None,
        }
    }

    /// A `Fail` stops alternatives and repetitions instead of being retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self.root_cause(), ParseError::Fail { .. })
    }

    /// The innermost error with every context layer removed.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            ParseError::WithContext { inner, .. } => inner.root_cause(),
            _ => self,
        }
    }
}
