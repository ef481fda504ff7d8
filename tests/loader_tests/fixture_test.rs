use std::path::Path;

use hclmeta::{formatter::render_markdown, load_module};
use pretty_assertions::assert_eq;

use crate::{fixture_names, FIXTURES_DIR};

#[test]
fn test_fixtures_json() {
    let names = fixture_names();
    assert!(!names.is_empty());

    for name in names {
        let dir = Path::new(FIXTURES_DIR).join(&name);
        let want_src = std::fs::read_to_string(dir.join(format!("{}.out.json", name)))
            .unwrap_or_else(|e| panic!("failed to read result file for {}: {}", name, e));
        let want: serde_json::Value = serde_json::from_str(&want_src).unwrap();

        let module = load_module(&dir);
        let got = serde_json::to_value(&module).unwrap();

        assert_eq!(want, got, "fixture {}", name);
    }
}

#[test]
fn test_fixtures_markdown() {
    for name in fixture_names() {
        let dir = Path::new(FIXTURES_DIR).join(&name);
        let Ok(want) = std::fs::read_to_string(dir.join(format!("{}.out.md", name))) else {
            continue;
        };

        let module = load_module(&dir);
        let mut out = Vec::new();
        render_markdown(&mut out, &module).unwrap();

        assert_eq!(want, String::from_utf8(out).unwrap(), "fixture {}", name);
    }
}

#[test]
fn test_module_calls_values() {
    let module = load_module(Path::new(FIXTURES_DIR).join("module-calls"));
    assert!(module.diagnostics.is_empty());

    let foo = &module.module_calls["foo"];
    let values: Vec<String> = foo
        .attributes
        .iter()
        .map(|attr| format!("{}: {} {}", attr.name, attr.value.type_name(), attr.value))
        .collect();
    assert_eq!(
        values,
        vec![
            "id: string data.external.something.result.id",
            "something: string var.something",
            "something_else: string ${var.something}-2",
            "unused: number 2",
        ]
    );
}
