use super::*;
use crate::test_support::MODULE;
use mirror_loader::Namespace;
use mirror_types::Package;

fn source() -> Namespace {
    let mut named = Package::new("example.com/app/text", vec![]);
    named.name = Some("strings".to_string());

    let mut ns = Namespace::new(MODULE)
        .with_dependency("vimagination.zapto.org/cache")
        .with_dependency("github.com/other");
    ns.add_package(named).expect("package should register");
    ns
}

fn entry(path: &str, alias: &str, explicit: bool, group: ImportGroup) -> ImportEntry {
    ImportEntry {
        path: path.to_string(),
        alias: alias.to_string(),
        explicit,
        group,
    }
}

#[test]
fn test_groups_sort_and_suffix_aliases() {
    let ns = source();
    let mut imports = ImportAccumulator::new();
    for path in [
        "vimagination.zapto.org/cache",
        "unsafe",
        "strings",
        "github.com/other/cache",
        "example.com/app/text",
    ] {
        imports.record(path);
    }

    assert_eq!(
        imports.finish(&ns),
        vec![
            entry("example.com/app/text", "strings", false, ImportGroup::FirstParty),
            entry("strings", "strings1", true, ImportGroup::FirstParty),
            entry("unsafe", "unsafe", false, ImportGroup::FirstParty),
            entry("github.com/other/cache", "cache", false, ImportGroup::Dependency),
            entry("vimagination.zapto.org/cache", "cache1", true, ImportGroup::Dependency),
        ]
    );
}

#[test]
fn test_recording_order_does_not_matter() {
    let ns = source();
    let paths = ["io", "vimagination.zapto.org/cache", "strings", "unsafe", "github.com/other/cache"];

    let mut forward = ImportAccumulator::new();
    let mut backward = ImportAccumulator::new();
    for path in paths {
        forward.record(path);
    }
    for path in paths.iter().rev() {
        backward.record(path);
        backward.record(path);
    }

    assert_eq!(forward.len(), 5);
    assert_eq!(backward.len(), 5);
    assert_eq!(forward.finish(&ns), backward.finish(&ns));
}

#[test]
fn test_nothing_recorded() {
    let imports = ImportAccumulator::new();

    assert!(imports.is_empty());
    assert!(imports.finish(&source()).is_empty());
}
