//! Primary branch resolution

use crate::core::error::TicketsResult;
use crate::core::vcs::Repo;

/// Remote name prefixes, most preferred first (`up` covers `upstream`); anything else ranks last
const REMOTE_PRIORITY: &[&str] = &["up", "origin"];

/// Integration branch names, most preferred first
const PRIMARY_BRANCHES: &[&str] = &["main", "master"];

/// Where the commit range ends: `to_commit` verbatim, or the primary branch
pub fn end_reference(repo: &Repo<'_>, to_commit: Option<&str>) -> TicketsResult<String> {
  match to_commit {
    Some(commit) => Ok(commit.to_string()),
    None => primary_branch(repo),
  }
}

/// `<remote>/<branch>` for the preferred remote and integration branch
///
/// The branch is `main` or `master`, whichever exists locally first in that
/// order. Without either the result is `HEAD`; without any remote the bare
/// local branch name is used.
pub fn primary_branch(repo: &Repo<'_>) -> TicketsResult<String> {
  let remotes = repo.remotes()?;
  let branches = repo.local_branches()?;

  let Some(branch) = PRIMARY_BRANCHES
    .iter()
    .find(|candidate| branches.iter().any(|b| b == *candidate))
  else {
    return Ok("HEAD".to_string());
  };

  Ok(match preferred_remote(&remotes) {
    Some(remote) => format!("{}/{}", remote, branch),
    None => branch.to_string(),
  })
}

/// Highest-priority remote; ties broken alphabetically
pub fn preferred_remote(remotes: &[String]) -> Option<&str> {
  remotes
    .iter()
    .min_by(|a, b| remote_rank(a).cmp(&remote_rank(b)).then_with(|| a.cmp(b)))
    .map(String::as_str)
}

fn remote_rank(name: &str) -> usize {
  REMOTE_PRIORITY
    .iter()
    .position(|prefix| name.starts_with(prefix))
    .unwrap_or(REMOTE_PRIORITY.len())
}
