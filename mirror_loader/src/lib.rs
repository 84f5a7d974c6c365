//! Namespace File Loading and Type Lookup
//!
//! This crate loads YAML namespace files from disk, resolves the imports
//! between them, and merges the result into a [`Namespace`]: the complete
//! type namespace of a module that the generator walks, together with the
//! lookup and import-classification queries the generator relies on.

pub mod file;
pub mod namespace;
pub mod resolver;

use std::path::PathBuf;

// Re-export commonly used types at the crate root
pub use file::{NamespaceFile, NamespaceMetadata};
pub use namespace::{LookupError, Namespace};
pub use resolver::ImportResolver;

// Re-export mirror_types for convenience
pub use mirror_types;

/// Load every file (and its imports) and merge them into one namespace.
/// The first file supplies the module metadata.
pub fn load_namespace(files: &[PathBuf], include_dirs: &[PathBuf]) -> anyhow::Result<Namespace> {
    let mut resolver = ImportResolver::new(include_dirs.to_vec());

    for file in files {
        resolver.load_file_with_imports(file)?;
    }

    resolver.into_namespace()
}

/// Parse a single namespace document that has no imports.
pub fn parse_namespace(yaml: &str) -> anyhow::Result<Namespace> {
    let file: NamespaceFile = serde_yml::from_str(yaml)?;

    if !file.imports().is_empty() {
        anyhow::bail!("namespace imports need a file location; use load_namespace");
    }

    Namespace::from_files(vec![file])
}
