//! Git access for release-tickets
//!
//! Everything the tool needs from version control goes through the narrow
//! [`GitRunner`] seam: run git with some arguments inside a repository and get
//! its standard output back. [`SystemGit`] is the production runner; tests use a
//! scripted runner that returns canned text without spawning processes.

pub mod repo;
pub mod system_git;

pub use repo::Repo;
pub use system_git::SystemGit;

use crate::core::error::TicketsResult;
use std::path::Path;

/// Runs git commands inside a repository
pub trait GitRunner {
  /// Run `git <args>` with `repo` as working directory
  ///
  /// Returns captured stdout on success. A non-zero exit status is reported as
  /// `GitError::CommandFailed` carrying the exit code and stderr.
  fn run(&self, repo: &Path, args: &[&str]) -> TicketsResult<String>;
}
