/* Generate command - writes mirror types and conversion functions */

use super::common::{generate_line, load};
use anyhow::{Context, anyhow};
use mirror_gen::{RenderOptions, render, synthesize};
use std::path::PathBuf;

/* Options for the generate command */
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
  pub files: Vec<PathBuf>,
  pub include_dirs: Vec<PathBuf>,
  pub output: PathBuf,
  /* Overrides the namespace's package */
  pub package: Option<String>,
  /* Omit the go:generate line */
  pub exclude_comment: bool,
  pub types: Vec<String>,
}

/* Execute the generate command */
pub fn run(options: GenerateOptions) -> anyhow::Result<()> {
  let namespace = load(&options.files, &options.include_dirs)?;

  let package = options
    .package
    .clone()
    .or_else(|| namespace.output_package().map(str::to_string))
    .ok_or_else(|| anyhow!("no package name: pass -p or set namespace.package"))?;

  let go_generate = (!options.exclude_comment).then(|| {
    generate_line(
      &options.files,
      &options.include_dirs,
      &options.output,
      options.package.as_deref(),
      &options.types,
    )
  });

  let tree = synthesize(&namespace, &options.types).context("failed to synthesize mirrors")?;

  let source = render(
    &tree,
    &RenderOptions {
      package,
      generate_line: go_generate,
    },
  );

  /* Only written once rendering succeeded, so a failed run leaves no file */
  std::fs::write(&options.output, source)
    .with_context(|| format!("failed to write {}", options.output.display()))?;

  tracing::info!(
    output = %options.output.display(),
    decls = tree.decls.len(),
    stubs = tree.stubs.len(),
    "wrote mirrors"
  );

  Ok(())
}
