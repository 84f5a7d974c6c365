use mirror_types::Package;
use serde_derive::{Deserialize, Serialize};

/* ============================================================================
   Namespace File
   ============================================================================ */

/* Module-level metadata at the top of a namespace file */
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct NamespaceMetadata {
    /* Path of the module the described packages are compiled into */
    pub module: String,

    /* Name of the package the generated file belongs to */
    #[serde(default)]
    pub package: Option<String>,

    /* Module paths of external dependencies (used for import grouping) */
    #[serde(default)]
    pub dependencies: Vec<String>,

    /* Other namespace files to merge, relative to this file or an include directory */
    #[serde(default)]
    pub imports: Vec<String>,
}

/* A namespace file: metadata plus the packages it describes */
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct NamespaceFile {
    pub namespace: NamespaceMetadata,
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl NamespaceFile {
    pub fn module(&self) -> &str {
        &self.namespace.module
    }

    pub fn imports(&self) -> &[String] {
        &self.namespace.imports
    }

    pub fn dependencies(&self) -> &[String] {
        &self.namespace.dependencies
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }
}
