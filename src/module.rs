//! # Module document
//!
//! A [`Module`] is everything read from one configuration directory: the child
//! modules it calls and the diagnostics found while reading it.
//!
//! ```text
//! module "consul" {
//!   source  = "hashicorp/consul/aws"
//!   version = "0.1.0"
//!   servers = 3
//! }
//! ```
//!
//! decodes to a [`ModuleCall`] named `consul` whose attribute table holds
//! `servers` only; `source` and `version` have their own fields.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    ast,
    attributes::{build_table, AttributeTable},
    diagnostics::{Diagnostic, Diagnostics},
    source::SourceFile,
};

pub const MODULE_BLOCK: &str = "module";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePos {
    pub filename: String,
    pub line: usize,
}

/// A `module` block: a call to a child module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleCall {
    pub name: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Every argument other than `source` and `version`.
    #[serde(skip_serializing_if = "AttributeTable::is_empty")]
    pub attributes: AttributeTable,
    pub pos: SourcePos,
}

impl ModuleCall {
    /// Decodes one `module` block.
    ///
    /// Returns `None` only when the block has no usable name. A missing or
    /// unsuitable `source` is reported but the call is still returned, with an
    /// empty source.
    pub fn decode(block: &ast::Block, file: &SourceFile) -> (Option<ModuleCall>, Diagnostics) {
        let mut diags = Diagnostics::new();

        let name = match block.labels.as_slice() {
            [label] => label.value.clone(),
            labels => {
                diags.push(
                    Diagnostic::error(
                        "Invalid module block",
                        format!(
                            "A module block needs exactly one label, the name of the call; found {}.",
                            labels.len()
                        ),
                    )
                    .with_subject(file.range(&block.ident_span)),
                );
                return (None, diags);
            }
        };

        for nested in block.body.blocks() {
            diags.push(
                Diagnostic::warning(
                    "Nested block ignored",
                    format!(
                        "The {:?} block inside module call {:?} is not read.",
                        nested.ident, name
                    ),
                )
                .with_subject(file.range(&nested.ident_span)),
            );
        }

        let source = match block.body.attribute("source") {
            Some(attr) => static_string(attr, file, &mut diags).unwrap_or_default(),
            None => {
                diags.push(
                    Diagnostic::error(
                        "Missing required argument",
                        format!(
                            "The argument \"source\" is required in module call {:?}, but no definition was found.",
                            name
                        ),
                    )
                    .with_subject(file.range(&block.ident_span)),
                );
                String::new()
            }
        };
        let version = block
            .body
            .attribute("version")
            .and_then(|attr| static_string(attr, file, &mut diags));

        let (attributes, table_diags) = build_table(
            block
                .body
                .attributes()
                .filter(|attr| attr.name != "source" && attr.name != "version"),
            file,
        );
        diags.extend(table_diags);

        let call = ModuleCall {
            name,
            source,
            version,
            attributes,
            pos: SourcePos {
                filename: file.filename().to_string(),
                line: block.ident_span.line,
            },
        };
        (Some(call), diags)
    }
}

fn static_string(attr: &ast::Attribute, file: &SourceFile, diags: &mut Diagnostics) -> Option<String> {
    let value = attr.expr.static_string();
    if value.is_none() {
        diags.push(
            Diagnostic::error(
                "Unsuitable value type",
                format!(
                    "The argument {:?} must be a string without interpolations or directives.",
                    attr.name
                ),
            )
            .with_subject(file.range(&attr.expr.span)),
        );
    }
    value
}

/// Metadata of one module directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub path: String,
    pub module_calls: BTreeMap<String, ModuleCall>,
    #[serde(skip_serializing_if = "Diagnostics::is_empty")]
    pub diagnostics: Diagnostics,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            module_calls: BTreeMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Decodes every top-level `module` block of a parsed file. Other blocks
    /// and root attributes are ignored.
    pub fn add_file(&mut self, body: &ast::Body, file: &SourceFile) {
        for block in body.blocks().filter(|block| block.ident == MODULE_BLOCK) {
            let (call, diags) = ModuleCall::decode(block, file);
            self.diagnostics.extend(diags);
            let Some(call) = call else {
                continue;
            };

            if let Some(first) = self.module_calls.get(&call.name) {
                self.diagnostics.push(
                    Diagnostic::error(
                        "Duplicate module call",
                        format!(
                            "A module call named {:?} was already defined at {}:{}. Module calls must have unique names within a module.",
                            call.name, first.pos.filename, first.pos.line
                        ),
                    )
                    .with_subject(file.range(&block.ident_span)),
                );
                continue;
            }
            tracing::debug!("module call {:?} from {:?}", call.name, call.source);
            self.module_calls.insert(call.name.clone(), call);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}
