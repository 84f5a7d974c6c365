/* Common utilities shared between the generate and analyze commands */

use mirror_loader::{Namespace, load_namespace};
use std::path::{Path, PathBuf};

/* Load namespace files with their imports */
pub fn load(files: &[PathBuf], include_dirs: &[PathBuf]) -> anyhow::Result<Namespace> {
  for dir in include_dirs {
    tracing::debug!(dir = %dir.display(), "include directory");
  }

  let namespace = load_namespace(files, include_dirs)?;

  tracing::info!(
    module = namespace.module(),
    packages = namespace.packages().count(),
    "loaded namespace"
  );

  Ok(namespace)
}

/* Arguments of a go:generate line that reruns this invocation from the
   output file's directory */
pub fn generate_line(
  files: &[PathBuf],
  include_dirs: &[PathBuf],
  output: &Path,
  package: Option<&str>,
  types: &[String],
) -> String {
  let mut args = vec!["mirror-gen".to_string(), "generate".to_string()];

  for file in files {
    args.push("-f".to_string());
    args.push(file.display().to_string());
  }

  for dir in include_dirs {
    args.push("-i".to_string());
    args.push(dir.display().to_string());
  }

  let output_name = output
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_else(|| output.display().to_string());
  args.push("-o".to_string());
  args.push(output_name);

  if let Some(package) = package {
    args.push("-p".to_string());
    args.push(package.to_string());
  }

  args.extend(types.iter().cloned());

  args.join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_generate_line_uses_output_base_name() {
    let line = generate_line(
      &[PathBuf::from("app.namespace.yaml")],
      &[PathBuf::from("std")],
      Path::new("/tmp/out/mirrors.go"),
      Some("mirrors"),
      &["sync.Mutex".to_string()],
    );

    assert_eq!(
      line,
      "mirror-gen generate -f app.namespace.yaml -i std -o mirrors.go -p mirrors sync.Mutex"
    );
  }

  #[test]
  fn test_generate_line_without_package() {
    let line = generate_line(&[PathBuf::from("ns.yaml")], &[], Path::new("out.go"), None, &["a.T".to_string()]);

    assert_eq!(line, "mirror-gen generate -f ns.yaml -o out.go a.T");
  }
}
