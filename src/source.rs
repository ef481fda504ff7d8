use crate::{diagnostics::SourceRange, tokenizer::token::Span};

/// Bytes of one configuration file plus its name.
///
/// Shared read-only by everything that needs the original text; nothing
/// in the crate mutates it after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    filename: String,
    bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The bytes covered by `span`, or `None` when it falls outside the file.
    pub fn read_at(&self, span: &Span) -> Option<&[u8]> {
        self.bytes.get(span.start..span.end)
    }

    pub fn range(&self, span: &Span) -> SourceRange {
        SourceRange {
            filename: self.filename.clone(),
            line: span.line,
            column: span.column,
            start: span.start,
            end: span.end,
        }
    }
}
