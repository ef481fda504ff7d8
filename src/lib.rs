//! # hclmeta: Module metadata from HCL configuration
//!
//! hclmeta reads a directory of HCL native-syntax configuration files and
//! extracts the child module calls it declares, with a best-effort typed value
//! for every argument of each call. The result serializes to JSON or renders as
//! markdown.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source bytes → Tokenizer → Preprocessor → Analyzer → Classifier → Attribute Table → JSON / Markdown
//! ```
//!
//! ### Stage 1: Tokenization
//!
//! The [`tokenizer`] module turns raw text into tokens that carry their byte
//! offsets, line and column.
//!
//! ### Stage 2: Preprocessing
//!
//! The [`preprocessor`] module drops whitespace and comments, and the newlines
//! HCL ignores inside parentheses and brackets.
//!
//! ### Stage 3: Analysis
//!
//! The [`analyzer`] module builds the [`ast`] of bodies, attributes and blocks
//! with parser combinators. Expressions are parsed but never evaluated.
//!
//! ### Stage 4: Attribute resolution
//!
//! The [`attributes`] module classifies each attribute. Literal values are taken
//! as they are; any other expression is read back from the source as text,
//! unquoted, and sniffed for a boolean or number before falling back to a string.
//! Failures become [`diagnostics`] and only drop the attribute concerned.
//!
//! ### Stage 5: Output
//!
//! [`module::Module`] aggregates the decoded `module` blocks of a directory, as
//! read by the [`loader`]. It serializes with serde; attribute tables encode as
//! JSON objects of bare scalars. The [`formatter`] renders it as markdown.
//!
//! ## Example
//!
//! ```rust
//! use hclmeta::loader::{load_module_with, MemoryFileSystem};
//! use hclmeta::config::LoaderConfig;
//!
//! let fs = MemoryFileSystem::new().with_file(
//!     "network/main.tf",
//!     "module \"vpc\" {\n  source = \"./vpc\"\n  cidr = var.cidr\n}\n",
//! );
//! let module = load_module_with(&fs, "network", &LoaderConfig::default());
//! let json = serde_json::to_value(&module).unwrap();
//! assert_eq!(json["module_calls"]["vpc"]["attributes"]["cidr"], "var.cidr");
//! ```

pub mod analyzer;
pub mod ast;
pub mod attributes;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod formatter;
pub mod loader;
pub mod module;
pub mod preprocessor;
pub mod source;
pub mod tokenizer;
pub mod value;

// Re-exports
pub use attributes::{Attribute, AttributeTable};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::*;
pub use loader::{load_module, load_module_with};
pub use module::{Module, ModuleCall, SourcePos};
pub use source::SourceFile;
pub use value::{Number, Value};
