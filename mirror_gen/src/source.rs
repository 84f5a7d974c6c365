use crate::imports::ImportGroup;
use mirror_loader::{LookupError, Namespace};
use mirror_types::{TypeDecl, TypeRef};

/// The type namespace a synthesis run reads from.
pub trait TypeSource {
    /// Resolve a requested `<package path>.<Name>` to a struct type.
    fn resolve_root(&self, qualified: &str) -> Result<TypeRef, LookupError>;

    fn declaration(&self, package: &str, name: &str) -> Option<&TypeDecl>;

    /// Name the package at `path` is imported under by default.
    fn package_name(&self, path: &str) -> String;

    fn classify(&self, path: &str) -> ImportGroup;
}

impl TypeSource for Namespace {
    fn resolve_root(&self, qualified: &str) -> Result<TypeRef, LookupError> {
        self.lookup(qualified)
    }

    fn declaration(&self, package: &str, name: &str) -> Option<&TypeDecl> {
        Namespace::declaration(self, package, name)
    }

    fn package_name(&self, path: &str) -> String {
        Namespace::package_name(self, path)
    }

    fn classify(&self, path: &str) -> ImportGroup {
        if self.is_dependency(path) {
            ImportGroup::Dependency
        } else {
            ImportGroup::FirstParty
        }
    }
}
