mod classifier_proptest;

use hclmeta::{analyzer::parse_file, attributes::build_table, AttributeTable, Diagnostics, SourceFile};

/// Parses `source` as a flat body and resolves its attributes.
pub fn table_of(source: &str) -> (AttributeTable, Diagnostics) {
    let file = SourceFile::new("main.tf", source);
    let (body, diags) = parse_file(&file);
    assert!(diags.is_empty(), "{:?}", diags);
    let body = body.expect("parsed body");
    build_table(body.attributes(), &file)
}
