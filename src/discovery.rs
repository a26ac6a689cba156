//! Repository discovery
//!
//! Turns the user's `--repo` / `--exclude-repo` patterns into the ordered list
//! of git repositories to scan. Patterns are resolved against a base directory
//! (the current directory at runtime) and may contain shell globs.

use crate::core::error::{ConfigError, ResultExt, TicketsError, TicketsResult};
use crate::utils::{anchored_pattern, normalize_path};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the repositories selected by `includes` minus `excludes`
///
/// With no include patterns, `base` itself and its immediate subdirectories are
/// candidates. Only directories containing a `.git` directory survive, in
/// first-seen order; later duplicates are dropped. An empty result is not an error.
pub fn find_repositories(base: &Path, includes: &[String], excludes: &[String]) -> TicketsResult<Vec<PathBuf>> {
  let base = normalize_path(base);

  let candidates = if includes.is_empty() {
    default_candidates(&base)?
  } else {
    expand_patterns(&base, includes)?
  };
  let excluded: HashSet<PathBuf> = expand_patterns(&base, excludes)?.into_iter().collect();

  let mut seen = HashSet::new();
  let repos: Vec<PathBuf> = candidates
    .into_iter()
    .filter(|path| is_git_repo(path))
    .filter(|path| {
      let keep = !excluded.contains(path);
      if !keep {
        tracing::debug!(path = %path.display(), "repository excluded");
      }
      keep
    })
    .filter(|path| seen.insert(path.clone()))
    .collect();

  tracing::debug!(count = repos.len(), "repositories discovered");
  Ok(repos)
}

/// Whether `dir` holds git metadata
pub fn is_git_repo(dir: &Path) -> bool {
  dir.join(".git").is_dir()
}

/// `base` followed by its immediate subdirectories, sorted by name
fn default_candidates(base: &Path) -> TicketsResult<Vec<PathBuf>> {
  let entries = fs::read_dir(base).with_context(|| format!("Failed to read directory {}", base.display()))?;

  let mut subdirs = Vec::new();
  for entry in entries {
    let entry = entry.with_context(|| format!("Failed to read directory {}", base.display()))?;
    let path = entry.path();
    if path.is_dir() {
      subdirs.push(path);
    }
  }
  subdirs.sort();

  let mut candidates = Vec::with_capacity(subdirs.len() + 1);
  candidates.push(base.to_path_buf());
  candidates.extend(subdirs);
  Ok(candidates)
}

/// Expand every pattern in parallel and flatten the matches in input order
fn expand_patterns(base: &Path, patterns: &[String]) -> TicketsResult<Vec<PathBuf>> {
  let expanded: Vec<Vec<PathBuf>> = patterns
    .par_iter()
    .map(|pattern| expand_pattern(base, pattern))
    .collect::<TicketsResult<_>>()?;

  Ok(expanded.into_iter().flatten().collect())
}

/// Expand one pattern into the existing paths it names
fn expand_pattern(base: &Path, pattern: &str) -> TicketsResult<Vec<PathBuf>> {
  let anchored = anchored_pattern(base, pattern);

  let paths = glob::glob(&anchored).map_err(|e| {
    TicketsError::Config(ConfigError::InvalidPattern {
      pattern: pattern.to_string(),
      reason: e.msg.to_string(),
    })
  })?;

  let mut matches = Vec::new();
  for path in paths {
    matches.push(normalize_path(&path?));
  }

  if matches.is_empty() {
    tracing::debug!(%pattern, "pattern matched nothing");
  }
  Ok(matches)
}
