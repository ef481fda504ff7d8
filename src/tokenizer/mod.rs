//! # Tokenizer Component
//!
//! The Tokenizer component is responsible for lexical analysis of HCL native syntax,
//! transforming raw configuration text into a token stream for the analyzer.
//!
//! ## Design Principles
//!
//! * **Comprehensive Token Information**: Each token includes its byte offsets as well as
//!   line and column, so later stages can re-read the exact source text of any expression.
//! * **Format Preservation**: Whitespace, comments, and newlines are preserved as tokens.
//!   Newlines are significant in HCL (they terminate attributes), the rest is dropped by
//!   the [`preprocessor`](crate::preprocessor).
//! * **Opaque Templates**: Quoted templates and heredocs are single tokens. Their
//!   interpolations are kept as raw text and never evaluated.
//!
//! ## Component Structure
//!
//! * [`token`]: Core token types and tokenizer implementation
//! * [`keyword`]: Keyword representation (`true`, `false`, `null`, `for`, `in`, `if`)
//! * [`symbol`]: Operators and delimiters parsing
//! * [`literal`]: Number, quoted template, and heredoc literal parsing
//! * [`whitespace`]: Whitespace and newline handling
//! * [`comment`]: Comment parsing (`#`, `//`, `/* */`)
//!
//! ## Usage Example
//!
//! ```rust
//! use hclmeta::tokenizer::token::{Tokenizer, TokenSpan};
//!
//! fn tokenize_example() -> Result<Vec<TokenSpan>, Box<dyn std::error::Error>> {
//!     let input = r#"module "network" {
//!         source = "./network"
//!     }"#;
//!
//!     let mut tokenizer = Tokenizer::new();
//!     let tokens = tokenizer.tokenize(input)?;
//!     Ok(tokens)
//! }
//! ```

pub mod comment;
pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;
