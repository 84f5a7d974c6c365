use mirror_loader::mirror_types::{TypeKind, TypeRef};
use mirror_loader::{load_namespace, parse_namespace, ImportResolver, LookupError};
use std::io::Write;
use std::path::PathBuf;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
    path
}

#[test]
fn load_follows_relative_and_include_imports() {
    let file = fixtures_path().join("app.namespace.yaml");
    let include_dirs = vec![fixtures_path().join("include")];

    let namespace = load_namespace(&[file], &include_dirs).expect("load should succeed");

    // Metadata comes from the requested file even though its imports load first
    assert_eq!(namespace.module(), "example.com/app");
    assert_eq!(namespace.output_package(), Some("app"));
    assert_eq!(namespace.dependencies(), ["vimagination.zapto.org/cache".to_string()]);

    let paths: Vec<&str> = namespace.packages().map(|p| p.path.as_str()).collect();
    assert_eq!(paths, vec!["example.com/app/store", "vimagination.zapto.org/cache", "sync"]);

    assert!(namespace.declaration("sync", "Mutex").is_some());
    assert_eq!(namespace.package_name("vimagination.zapto.org/cache"), "cache");
}

#[test]
fn circular_imports_load_each_file_once() {
    let file = fixtures_path().join("app.namespace.yaml");
    let include_dirs = vec![fixtures_path().join("include")];

    let mut resolver = ImportResolver::new(include_dirs);
    resolver.load_file_with_imports(&file).expect("load should succeed");

    assert_eq!(resolver.loaded_file_count(), 3);
    assert_eq!(resolver.get_all_files().len(), 3);
}

#[test]
fn generic_declarations_survive_loading() {
    let file = fixtures_path().join("app.namespace.yaml");
    let include_dirs = vec![fixtures_path().join("include")];
    let namespace = load_namespace(&[file], &include_dirs).expect("load should succeed");

    let lru = namespace
        .declaration("vimagination.zapto.org/cache", "LRU")
        .expect("LRU should be declared");
    assert_eq!(lru.param_names(), vec!["K".to_string(), "V".to_string()]);
    assert_eq!(lru.underlying.to_string(), "struct{limit int; data map[K]V}");

    let store = namespace
        .lookup("example.com/app/store.Store")
        .expect("Store should resolve");
    assert_eq!(store, TypeRef::new("example.com/app/store", "Store"));
}

#[test]
fn missing_import_is_reported() {
    let file = fixtures_path().join("app.namespace.yaml");

    let err = load_namespace(&[file], &[]).expect_err("std import needs the include dir");

    assert!(err.to_string().contains("std.namespace.yaml"));
}

#[test]
fn duplicate_package_across_files_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = write_file(
        &dir,
        "first.yaml",
        "namespace:\n  module: example.com/a\npackages:\n  - path: example.com/a\n",
    );
    let second = write_file(
        &dir,
        "second.yaml",
        "namespace:\n  module: example.com/b\npackages:\n  - path: example.com/a\n",
    );

    let err = load_namespace(&[first, second], &[]).expect_err("duplicate package");

    assert!(err.to_string().contains("example.com/a"));
}

#[test]
fn parse_single_document() {
    let namespace = parse_namespace(
        r#"
namespace:
  module: example.com/app
packages:
  - path: strings
    types:
      - name: Builder
        underlying:
          struct:
            fields:
              - name: addr
                type:
                  pointer:
                    named: { package: strings, name: Builder }
              - name: buf
                type:
                  slice:
                    basic: byte
      - name: Reader
        underlying:
          interface:
            methods:
              - name: Read
                signature:
                  params:
                    - type: { slice: { basic: byte } }
                  results:
                    - type: { basic: int }
                    - type: { basic: error }
"#,
    )
    .expect("parse should succeed");

    let builder = namespace.declaration("strings", "Builder").expect("Builder");
    assert_eq!(
        builder.underlying.to_string(),
        "struct{addr *strings.Builder; buf []byte}"
    );

    assert!(matches!(
        namespace.lookup("strings.Reader"),
        Err(LookupError::NotComposite { kind, .. }) if kind == "interface"
    ));

    let reader = namespace.declaration("strings", "Reader").expect("Reader");
    assert!(matches!(&reader.underlying, TypeKind::Interface(iface) if iface.methods.len() == 1));
}

#[test]
fn parse_rejects_imports() {
    let result = parse_namespace("namespace:\n  module: example.com/app\n  imports: [other.yaml]\n");

    assert!(result.is_err());
}
