/* Analyze command - prints the synthesized declaration tree */

use super::common::load;
use clap::ValueEnum;
use mirror_gen::{DeclarationTree, synthesize};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
  Json,
  Yaml,
}

/* Execute the analyze command */
pub fn run(
  files: Vec<PathBuf>,
  include_dirs: Vec<PathBuf>,
  format: TreeFormat,
  types: Vec<String>,
) -> anyhow::Result<()> {
  let namespace = load(&files, &include_dirs)?;
  let tree = synthesize(&namespace, &types)?;

  println!("{}", format_tree(&tree, format)?);

  Ok(())
}

pub fn format_tree(tree: &DeclarationTree, format: TreeFormat) -> anyhow::Result<String> {
  match format {
    TreeFormat::Json => Ok(serde_json::to_string_pretty(tree)?),
    /* Go through a JSON value so enums come out as plain maps */
    TreeFormat::Yaml => Ok(serde_yml::to_string(&serde_json::to_value(tree)?)?),
  }
}
