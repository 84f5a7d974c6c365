//! The merged type namespace of a module.
//!
//! A [`Namespace`] owns every package loaded from namespace files, keyed by
//! import path in load order, plus the module metadata needed to tell
//! first-party packages from external dependencies.

use crate::file::NamespaceFile;
use indexmap::IndexMap;
use mirror_types::{is_exported, is_internal, Package, TypeDecl, TypeKind, TypeRef};
use thiserror::Error;

/* Errors reported when a requested root type cannot be used */
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("module-less type: {0}")]
    Unqualified(String),
    #[error("unknown namespace '{namespace}' in {type_name}")]
    UnknownNamespace { namespace: String, type_name: String },
    #[error("no type found: {0}")]
    UnknownType(String),
    #[error("cannot process internal type: {0}")]
    Internal(String),
    #[error("cannot reference unexported type: {0}")]
    Unexported(String),
    #[error("not a struct type: {type_name} is a {kind}")]
    NotComposite { type_name: String, kind: String },
}

#[derive(Debug, Clone, Default)]
pub struct Namespace {
    module: String,
    output_package: Option<String>,
    dependencies: Vec<String>,
    packages: IndexMap<String, Package>,
}

impl Namespace {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }

    /* Merge loaded files; the first file supplies the module metadata */
    pub fn from_files(files: Vec<NamespaceFile>) -> anyhow::Result<Self> {
        let mut files = files.into_iter();
        let Some(root) = files.next() else {
            anyhow::bail!("No namespace files loaded");
        };

        let mut namespace = Namespace::new(root.namespace.module.clone());
        namespace.output_package = root.namespace.package.clone();

        for file in std::iter::once(root).chain(files) {
            for dependency in file.dependencies() {
                namespace.add_dependency(dependency.clone());
            }
            for package in file.packages {
                namespace.add_package(package)?;
            }
        }

        Ok(namespace)
    }

    pub fn with_dependency(mut self, module_path: impl Into<String>) -> Self {
        self.add_dependency(module_path.into());
        self
    }

    pub fn with_package(mut self, package: Package) -> anyhow::Result<Self> {
        self.add_package(package)?;
        Ok(self)
    }

    pub fn add_dependency(&mut self, module_path: String) {
        if !self.dependencies.contains(&module_path) {
            self.dependencies.push(module_path);
        }
    }

    /* A package path may only be described once across all loaded files */
    pub fn add_package(&mut self, package: Package) -> anyhow::Result<()> {
        if self.packages.contains_key(&package.path) {
            anyhow::bail!("package '{}' is defined more than once", package.path);
        }

        tracing::debug!(
            package = %package.path,
            types = package.types.len(),
            "registered package"
        );

        self.packages.insert(package.path.clone(), package);

        Ok(())
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn output_package(&self) -> Option<&str> {
        self.output_package.as_deref()
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn package(&self, path: &str) -> Option<&Package> {
        self.packages.get(path)
    }

    pub fn declaration(&self, package: &str, name: &str) -> Option<&TypeDecl> {
        self.packages.get(package).and_then(|p| p.lookup(name))
    }

    /* Name a package is imported under when no alias is given */
    pub fn package_name(&self, path: &str) -> String {
        match self.packages.get(path) {
            Some(package) => package.package_name(),
            None => mirror_types::default_package_name(path),
        }
    }

    /* True when the path belongs to one of the listed dependency modules */
    pub fn is_dependency(&self, path: &str) -> bool {
        self.dependencies.iter().any(|dep| {
            path == dep
                || path
                    .strip_prefix(dep.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /* Resolve `<package path>.<Name>` to a struct declaration. A trailing
       `[...]` argument list is ignored: generic roots are mirrored generically. */
    pub fn lookup(&self, type_name: &str) -> Result<TypeRef, LookupError> {
        let base = type_name.split('[').next().unwrap_or(type_name);

        let Some(pos) = base.rfind('.') else {
            return Err(LookupError::Unqualified(type_name.to_string()));
        };
        let (path, name) = (&base[..pos], &base[pos + 1..]);

        if path.is_empty() || name.is_empty() || name.contains('/') {
            return Err(LookupError::Unqualified(type_name.to_string()));
        }

        if is_internal(path) {
            return Err(LookupError::Internal(type_name.to_string()));
        }

        if !is_exported(name) {
            return Err(LookupError::Unexported(type_name.to_string()));
        }

        let package = self
            .packages
            .get(path)
            .ok_or_else(|| LookupError::UnknownNamespace {
                namespace: path.to_string(),
                type_name: type_name.to_string(),
            })?;

        let decl = package
            .lookup(name)
            .ok_or_else(|| LookupError::UnknownType(type_name.to_string()))?;

        match &decl.underlying {
            TypeKind::Struct(_) => Ok(TypeRef::new(path, name)),
            other => Err(LookupError::NotComposite {
                type_name: type_name.to_string(),
                kind: other.kind_name().to_string(),
            }),
        }
    }
}
