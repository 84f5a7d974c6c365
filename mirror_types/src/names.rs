/* Naming rules shared by the loader and the generator */

/* Exported names start with an upper case letter */
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/* Packages under an `internal` path element may only be imported from their parent tree */
pub fn is_internal(path: &str) -> bool {
    path == "internal"
        || path.starts_with("internal/")
        || path.ends_with("/internal")
        || path.contains("/internal/")
}

/* Package name assumed for an import path when the namespace does not declare one.
   "example.com/foo/v2" -> "foo", "gopkg.in/yaml.v3" -> "yaml", "go-cache" -> "go_cache" */
pub fn default_package_name(path: &str) -> String {
    let mut segments = path.rsplit('/');
    let mut last = segments.next().unwrap_or(path);

    if is_major_version(last) {
        if let Some(previous) = segments.next() {
            last = previous;
        }
    }

    let base = last.split('.').next().unwrap_or(last);

    base.replace('-', "_")
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}
