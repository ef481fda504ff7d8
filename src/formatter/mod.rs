//! Output forms of a [`Module`](crate::module::Module): markdown for people,
//! indented JSON for tools.

pub mod error;
pub mod json;
pub mod markdown;

pub use error::FormatterError;
pub use json::render_json;
pub use markdown::{render_markdown, MarkdownVisitor};

use std::io::Write;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Error, InternalResult};
use crate::module::Module;

/// Writes `module` in the format `output` selects.
pub fn render<W: Write>(writer: W, module: &Module, output: &OutputConfig) -> InternalResult<()> {
    match output.format {
        OutputFormat::Json => render_json(writer, module, output.indent),
        OutputFormat::Markdown => render_markdown(writer, module),
    }
    .map_err(|source| Error::Render {
        format: output.format,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parse_file;
    use crate::source::SourceFile;

    fn module(source: &str) -> Module {
        let file = SourceFile::new("mod/main.tf", source);
        let (body, _) = parse_file(&file);
        let mut module = Module::new("mod");
        module.add_file(&body.unwrap(), &file);
        module
    }

    #[test]
    fn test_render_selects_format() {
        let module = module("module \"a\" {\n  source = \"./a\"\n}\n");

        let mut out = Vec::new();
        render(&mut out, &module, &OutputConfig::default()).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("# Module `mod`"));

        let output = OutputConfig {
            format: OutputFormat::Json,
            ..OutputConfig::default()
        };
        let mut out = Vec::new();
        render(&mut out, &module, &output).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("{\n  \"path\""));
    }

    #[test]
    fn test_render_failure_names_format() {
        let module = module("module \"a\" {\n  source = \"./a\"\n  big = \"inf\"\n}\n");
        let output = OutputConfig {
            format: OutputFormat::Json,
            ..OutputConfig::default()
        };
        let err = render(Vec::new(), &module, &output).unwrap_err();
        assert!(matches!(
            err,
            Error::Render {
                format: OutputFormat::Json,
                source: FormatterError::Json(_),
            }
        ));
        assert!(err.to_string().starts_with("error producing json output: "));
    }
}
