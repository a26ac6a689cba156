//! Utility functions for cross-platform path handling

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and fold `..` into its parent
///
/// Does not touch the filesystem, so symlinks are not resolved. Paths coming
/// out of different glob expansions compare equal once normalized.
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if !out.pop() {
          out.push("..");
        }
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

/// Build an absolute glob pattern for `pattern` relative to `base`
///
/// Absolute patterns are used as-is. For relative patterns, glob metacharacters
/// in `base` are escaped so only the user-supplied part acts as a glob.
pub fn anchored_pattern(base: &Path, pattern: &str) -> String {
  let pattern_path = Path::new(pattern);
  if pattern_path.is_absolute() {
    return normalize_path(pattern_path).to_string_lossy().to_string();
  }

  let base = normalize_path(base);
  let escaped_base = glob::Pattern::escape(&base.to_string_lossy());
  let joined = Path::new(&escaped_base).join(pattern_path);
  normalize_path(&joined).to_string_lossy().to_string()
}

/// Last path component, used as the display name of a repository
pub fn display_name(path: &Path) -> String {
  path
    .file_name()
    .map(|name| name.to_string_lossy().to_string())
    .unwrap_or_else(|| path.to_string_lossy().to_string())
}
