//! Import accumulation and alias assignment.

use crate::source::TypeSource;
use crate::tree::ImportEntry;
use serde_derive::Serialize;
use std::collections::{BTreeSet, HashSet};

/* Standard library and module-local packages come before external dependencies */
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ImportGroup {
    FirstParty,
    Dependency,
}

/// Package paths referenced by the declarations of one run.
#[derive(Debug, Default)]
pub struct ImportAccumulator {
    paths: BTreeSet<String>,
}

impl ImportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: &str) {
        self.paths.insert(path.to_string());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Group, sort and alias the recorded paths.
    ///
    /// Aliases are assigned in output order from one shared set: the default
    /// package name when free, otherwise the name with the smallest numeric
    /// suffix that is.
    pub fn finish(self, source: &dyn TypeSource) -> Vec<ImportEntry> {
        let mut ordered: Vec<(ImportGroup, String)> = self
            .paths
            .into_iter()
            .map(|path| (source.classify(&path), path))
            .collect();
        ordered.sort();

        let mut taken: HashSet<String> = HashSet::new();
        let mut entries = Vec::with_capacity(ordered.len());

        for (group, path) in ordered {
            let name = source.package_name(&path);
            let mut alias = name.clone();
            let mut suffix = 0;

            while taken.contains(&alias) {
                suffix += 1;
                alias = format!("{}{}", name, suffix);
            }

            taken.insert(alias.clone());
            entries.push(ImportEntry {
                explicit: suffix > 0,
                path,
                alias,
                group,
            });
        }

        entries
    }
}

#[cfg(test)]
#[path = "imports_tests.rs"]
mod imports_tests;
