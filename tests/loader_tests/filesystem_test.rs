use std::path::Path;

use hclmeta::{
    config::LoaderConfig,
    load_module, load_module_with,
    loader::{FileSystem, MemoryFileSystem, OsFileSystem},
    Value,
};
use pretty_assertions::assert_eq;

use crate::{fixture_names, FIXTURES_DIR};

#[test]
fn test_memory_filesystem_matches_disk() {
    for name in fixture_names() {
        let dir = Path::new(FIXTURES_DIR).join(&name);

        let mut fs = MemoryFileSystem::new();
        for path in OsFileSystem.read_dir(&dir).unwrap() {
            fs.insert(&path, std::fs::read(&path).unwrap());
        }

        let from_memory = load_module_with(&fs, &dir, &LoaderConfig::default());
        let from_disk = load_module(&dir);
        assert_eq!(from_memory, from_disk, "fixture {}", name);
    }
}

#[test]
fn test_load_temp_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("main.tf"),
        "module \"net\" {\n  source = \"./net\"\n  cidr = \"10.0.0.0/16\"\n  azs = 3\n}\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".main.tf.swp"),
        "module \"net\" {\n  source = \"./stale\"\n}\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("main.tf~"), "not { valid").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "module \"x\" {}").unwrap();
    std::fs::create_dir(dir.path().join("nested.tf")).unwrap();

    let module = load_module(dir.path());
    assert!(module.diagnostics.is_empty(), "{:?}", module.diagnostics);
    assert_eq!(module.module_calls.len(), 1);

    let net = &module.module_calls["net"];
    assert_eq!(net.source, "./net");
    assert_eq!(net.attributes.value("cidr"), Some(&Value::from("10.0.0.0/16")));
    assert_eq!(net.attributes.value("azs"), Some(&Value::from(3)));
    assert_eq!(
        net.pos.filename,
        dir.path().join("main.tf").display().to_string()
    );
}

#[test]
fn test_syntax_error_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.tf"), "module \"a\" {\n  source = \n}\n").unwrap();
    std::fs::write(dir.path().join("b.tf"), "module \"b\" {\n  source = \"./b\"\n}\n").unwrap();

    let module = load_module(dir.path());
    assert!(module.has_errors());
    assert_eq!(module.diagnostics.len(), 1);
    let diag = module.diagnostics.iter().next().unwrap();
    assert_eq!(diag.subject.as_ref().unwrap().line, 2);
    assert_eq!(module.module_calls.keys().collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let module = load_module(dir.path().join("missing"));
    assert!(module.has_errors());
    assert_eq!(
        module.diagnostics.iter().next().unwrap().summary,
        "Failed to read module directory"
    );
}
