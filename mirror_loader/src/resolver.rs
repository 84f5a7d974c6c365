use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::file::NamespaceFile;
use crate::namespace::Namespace;

/* Import resolver for loading and merging namespace files */
pub struct ImportResolver {
    /* Track loaded files so circular imports terminate */
    loaded_files: HashSet<PathBuf>,

    /* Include directories for searching imports */
    include_dirs: Vec<PathBuf>,

    /* All loaded namespace files, imports before their importer */
    all_files: Vec<NamespaceFile>,

    /* Index in all_files of the first file requested by the caller */
    root_index: Option<usize>,
}

impl ImportResolver {
    /* Create a new import resolver with the given include directories */
    pub fn new(include_dirs: Vec<PathBuf>) -> Self {
        Self {
            loaded_files: HashSet::new(),
            include_dirs,
            all_files: Vec::new(),
            root_index: None,
        }
    }

    /* Resolve an import path relative to a base file or include directories */
    fn resolve_import_path(&self, import_path: &str, base_file: &Path) -> anyhow::Result<PathBuf> {
        /* First try relative to the base file's directory */
        if let Some(parent) = base_file.parent() {
            let relative_path = parent.join(import_path);
            if relative_path.exists() {
                return Ok(relative_path.canonicalize()?);
            }
        }

        /* Then try each include directory */
        for include_dir in &self.include_dirs {
            let include_path = include_dir.join(import_path);
            if include_path.exists() {
                return Ok(include_path.canonicalize()?);
            }
        }

        anyhow::bail!(
            "Import '{}' not found relative to '{}' or in include directories",
            import_path,
            base_file.display()
        )
    }

    /* Load a namespace file and recursively load its imports */
    pub fn load_file_with_imports(&mut self, file_path: &Path) -> anyhow::Result<()> {
        self.load_file(file_path, true)
    }

    fn load_file(&mut self, file_path: &Path, requested: bool) -> anyhow::Result<()> {
        let canonical_path = file_path
            .canonicalize()
            .map_err(|e| anyhow::anyhow!("cannot open '{}': {}", file_path.display(), e))?;

        if self.loaded_files.contains(&canonical_path) {
            tracing::debug!(file = %file_path.display(), "skipping already loaded file");
            return Ok(());
        }

        /* Mark as loaded before processing imports to cut cycles */
        self.loaded_files.insert(canonical_path);

        tracing::debug!(file = %file_path.display(), "loading namespace file");

        let contents = std::fs::read_to_string(file_path)?;
        let namespace_file: NamespaceFile = serde_yml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("failed to parse '{}': {}", file_path.display(), e))?;

        tracing::debug!(
            module = namespace_file.module(),
            packages = namespace_file.packages().len(),
            imports = namespace_file.imports().len(),
            "parsed namespace file"
        );

        for import in namespace_file.imports().to_vec() {
            let import_path = self.resolve_import_path(&import, file_path)?;
            self.load_file(&import_path, false)?;
        }

        if requested && self.root_index.is_none() {
            self.root_index = Some(self.all_files.len());
        }

        self.all_files.push(namespace_file);

        Ok(())
    }

    /* Get all loaded namespace files */
    pub fn get_all_files(&self) -> &[NamespaceFile] {
        &self.all_files
    }

    /* Get the number of loaded files */
    pub fn loaded_file_count(&self) -> usize {
        self.loaded_files.len()
    }

    /* Merge everything loaded; the first requested file supplies the metadata */
    pub fn into_namespace(mut self) -> anyhow::Result<Namespace> {
        if let Some(root) = self.root_index.filter(|&idx| idx > 0) {
            let file = self.all_files.remove(root);
            self.all_files.insert(0, file);
        }

        Namespace::from_files(self.all_files)
    }
}
