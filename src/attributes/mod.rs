//! # Attributes
//!
//! Resolved attributes of one block and the table that holds them.
//!
//! - [`classifier`] decides the [`Value`] of a single attribute.
//! - [`builder`] resolves every attribute of a block into an [`AttributeTable`].
//! - [`encoder`] turns a table into a JSON object of bare scalars.

pub mod builder;
pub mod classifier;
pub mod encoder;
mod unquote;

use std::collections::BTreeMap;

pub use builder::build_table;
pub use classifier::{resolve, ResolveError};
pub use encoder::{encode_table, encode_value, EncodeError};
pub use unquote::unquote;

use crate::{
    ast,
    diagnostics::{Diagnostic, Diagnostics, SourceRange},
    source::SourceFile,
    tokenizer::token::Span,
    value::Value,
};

/// An attribute whose value has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    /// Range of the whole `name = expr` definition.
    pub range: SourceRange,
    /// Byte span of the expression inside its file.
    pub expr_span: Span,
    pub value: Value,
}

/// Resolved attributes of one block, ordered by name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeTable(BTreeMap<String, Attribute>);

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute unless one with the same name is already present.
    /// Returns whether it was added.
    pub fn insert(&mut self, attribute: Attribute) -> bool {
        match self.0.entry(attribute.name.clone()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(attribute);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.0.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(|attr| &attr.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.values()
    }

    /// Builds a table from a body that may only contain attributes.
    ///
    /// Every nested block is an "Unexpected block" error, and no table is
    /// returned when there is one.
    pub fn from_body(body: &ast::Body, file: &SourceFile) -> (Option<AttributeTable>, Diagnostics) {
        let mut diags: Diagnostics = body
            .blocks()
            .map(|block| {
                Diagnostic::error(
                    "Unexpected block",
                    format!("Blocks are not allowed here; found a {:?} block.", block.ident),
                )
                .with_subject(file.range(&block.ident_span))
            })
            .collect();
        if diags.has_errors() {
            return (None, diags);
        }

        let (table, table_diags) = build_table(body.attributes(), file);
        diags.extend(table_diags);
        (Some(table), diags)
    }
}

impl<'a> IntoIterator for &'a AttributeTable {
    type Item = (&'a String, &'a Attribute);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parse_file;

    fn body(file: &SourceFile) -> ast::Body {
        let (body, diags) = parse_file(file);
        assert!(diags.is_empty(), "{:?}", diags);
        body.unwrap()
    }

    #[test]
    fn test_from_body() {
        let file = SourceFile::new("vars.tf", "b = 2\na = var.a\n");
        let (table, diags) = AttributeTable::from_body(&body(&file), &file);
        let table = table.unwrap();
        assert!(diags.is_empty());
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.value("a"), Some(&Value::from("var.a")));
        assert_eq!(table.get("b").unwrap().range.line, 1);
    }

    #[test]
    fn test_from_body_rejects_blocks() {
        let file = SourceFile::new("vars.tf", "a = 1\nnested {\n}\nother \"x\" {}\n");
        let (table, diags) = AttributeTable::from_body(&body(&file), &file);
        assert!(table.is_none());
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.summary == "Unexpected block"));
        assert_eq!(diags.iter().nth(1).unwrap().subject.as_ref().unwrap().line, 4);
    }

    #[test]
    fn test_insert_keeps_first() {
        let file = SourceFile::new("vars.tf", "a = 1\n");
        let (table, _) = AttributeTable::from_body(&body(&file), &file);
        let mut table = table.unwrap();
        let mut again = table.get("a").unwrap().clone();
        again.value = Value::from(2);
        assert!(!table.insert(again));
        assert_eq!(table.value("a"), Some(&Value::from(1)));
    }
}
