use std::io::Write;

use crate::diagnostics::Diagnostic;
use crate::formatter::error::FormatterError;
use crate::module::{Module, ModuleCall};

/// Writes a [`Module`] as markdown to `writer`.
pub fn render_markdown<W: Write>(writer: W, module: &Module) -> Result<(), FormatterError> {
    MarkdownVisitor::new(writer).format_module(module)
}

pub struct MarkdownVisitor<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownVisitor<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn format_module(&mut self, module: &Module) -> Result<(), FormatterError> {
        self.line(&format!("# Module `{}`", module.path))?;

        if !module.module_calls.is_empty() {
            self.blank()?;
            self.line("Child Modules:")?;
            for call in module.module_calls.values() {
                self.format_call(call)?;
            }
        }

        if !module.diagnostics.is_empty() {
            self.blank()?;
            self.line("## Problems")?;
            for diagnostic in &module.diagnostics {
                self.format_diagnostic(diagnostic)?;
            }
        }

        self.writer.flush()?;
        Ok(())
    }

    fn format_call(&mut self, call: &ModuleCall) -> Result<(), FormatterError> {
        let mut line = format!("* `{}` from `{}`", call.name, call.source);
        if let Some(version) = &call.version {
            line.push_str(&format!(" (`{}`)", version));
        }
        self.line(&line)?;

        for attr in call.attributes.iter() {
            self.line(&format!("  * `{}`: `{}`", attr.name, attr.value))?;
        }
        Ok(())
    }

    fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> Result<(), FormatterError> {
        self.blank()?;
        self.line(&format!("## {}: {}", diagnostic.severity, diagnostic.summary))?;

        if let Some(subject) = &diagnostic.subject {
            self.blank()?;
            self.line(&format!(
                "(at `{}` line {})",
                subject.filename, subject.line
            ))?;
        }
        if !diagnostic.detail.is_empty() {
            self.blank()?;
            self.line(&diagnostic.detail)?;
        }
        Ok(())
    }

    fn line(&mut self, text: &str) -> Result<(), FormatterError> {
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }

    fn blank(&mut self) -> Result<(), FormatterError> {
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parse_file;
    use crate::source::SourceFile;

    fn render(module: &Module) -> String {
        let mut out = Vec::new();
        render_markdown(&mut out, module).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn module(source: &str) -> Module {
        let file = SourceFile::new("mod/main.tf", source);
        let mut module = Module::new("mod");
        let (body, diags) = parse_file(&file);
        module.diagnostics.extend(diags);
        if let Some(body) = body {
            module.add_file(&body, &file);
        }
        module
    }

    #[test]
    fn test_empty_module() {
        assert_eq!(render(&Module::new("empty")), "# Module `empty`\n");
    }

    #[test]
    fn test_child_modules() {
        let module = module(
            "module \"b\" {\n  source = \"./b\"\n  version = \"1.0\"\n  n = 3\n  id = var.id\n}\nmodule \"a\" {\n  source = \"./a\"\n}\n",
        );
        assert_eq!(
            render(&module),
            "# Module `mod`\n\
             \n\
             Child Modules:\n\
             * `a` from `./a`\n\
             * `b` from `./b` (`1.0`)\n  \
               * `id`: `var.id`\n  \
               * `n`: `3`\n"
        );
    }

    #[test]
    fn test_float_values_keep_their_kind() {
        let module = module(
            "module \"a\" {\n  source = \"./a\"\n  whole = 2.0\n  count = 2\n  ratio = \"1e20\"\n}\n",
        );
        assert_eq!(
            render(&module),
            "# Module `mod`\n\
             \n\
             Child Modules:\n\
             * `a` from `./a`\n  \
               * `count`: `2`\n  \
               * `ratio`: `1.0e20`\n  \
               * `whole`: `2.0`\n"
        );
    }

    #[test]
    fn test_problems() {
        let module = module("module \"a\" {\n  count = 1\n}\nmodule \"a\" \"b\" {\n}\n");
        let text = render(&module);
        assert!(text.starts_with("# Module `mod`\n\nChild Modules:\n* `a` from ``\n  * `count`: `1`\n"));
        assert!(text.contains(
            "\n## Problems\n\n## Error: Missing required argument\n\n(at `mod/main.tf` line 1)\n\nThe argument \"source\" is required"
        ));
        assert!(text.contains("\n## Error: Invalid module block\n\n(at `mod/main.tf` line 4)\n"));
        assert!(text.ends_with(".\n"));
    }

    #[test]
    fn test_warning_without_subject_or_detail() {
        let mut module = Module::new("mod");
        module.diagnostics.push(Diagnostic::warning("Something odd", ""));
        assert_eq!(
            render(&module),
            "# Module `mod`\n\n## Problems\n\n## Warning: Something odd\n"
        );
    }
}
