//! Repository-level git queries used by the discovery pipeline

use super::GitRunner;
use crate::core::error::TicketsResult;
use std::path::Path;

/// A single repository bound to a git runner
#[derive(Clone, Copy)]
pub struct Repo<'a> {
  git: &'a dyn GitRunner,
  path: &'a Path,
}

impl<'a> Repo<'a> {
  pub fn new(git: &'a dyn GitRunner, path: &'a Path) -> Self {
    Self { git, path }
  }

  pub fn path(&self) -> &Path {
    self.path
  }

  /// Update every configured remote
  pub fn fetch_all(&self) -> TicketsResult<()> {
    self.git.run(self.path, &["fetch", "--all", "--quiet"])?;
    Ok(())
  }

  /// All tag names, most recently created first
  pub fn tags_by_creation_date(&self) -> TicketsResult<Vec<String>> {
    let out = self.git.run(
      self.path,
      &["for-each-ref", "--sort=-creatordate", "--format=%(refname:short)", "refs/tags/"],
    )?;
    Ok(non_empty_lines(&out))
  }

  /// Configured remote names, in git's order
  pub fn remotes(&self) -> TicketsResult<Vec<String>> {
    let out = self.git.run(self.path, &["remote"])?;
    Ok(non_empty_lines(&out))
  }

  /// Local branch names
  pub fn local_branches(&self) -> TicketsResult<Vec<String>> {
    let out = self.git.run(self.path, &["branch", "--format=%(refname:short)"])?;
    Ok(non_empty_lines(&out))
  }

  /// One subject line per commit in `range`, in log order
  pub fn commit_subjects(&self, range: &str) -> TicketsResult<Vec<String>> {
    let out = self.git.run(self.path, &["log", "--pretty=format:%s", range, "--"])?;
    if out.trim().is_empty() {
      return Ok(Vec::new());
    }
    Ok(out.lines().map(str::to_string).collect())
  }

  /// Whether `possible_parent` is an ancestor of `possible_child`
  ///
  /// Any failure (including unknown refs) counts as "not an ancestor".
  pub fn is_ancestor(&self, possible_parent: &str, possible_child: &str) -> bool {
    self
      .git
      .run(self.path, &["merge-base", "--is-ancestor", possible_parent, possible_child])
      .is_ok()
  }
}

fn non_empty_lines(out: &str) -> Vec<String> {
  out
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(str::to_string)
    .collect()
}
