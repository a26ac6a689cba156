//! System git backend
//!
//! Spawns the `git` binary for every operation. Output is decoded lossily so a
//! stray non-UTF-8 commit subject never aborts a run.

use super::GitRunner;
use crate::core::error::{GitError, TicketsError, TicketsResult};
use std::path::Path;
use std::process::Command;

/// Variables that would point git at a different repository than `-C <repo>`
const REPO_LOCATION_ENV: &[&str] = &[
  "GIT_DIR",
  "GIT_WORK_TREE",
  "GIT_INDEX_FILE",
  "GIT_OBJECT_DIRECTORY",
  "GIT_ALTERNATE_OBJECT_DIRECTORIES",
  "GIT_COMMON_DIR",
  "GIT_NAMESPACE",
];

/// Git runner backed by the system `git` binary
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl SystemGit {
  pub fn new() -> Self {
    Self
  }

  /// Create a git command for `repo`
  ///
  /// - Sets working directory to the repository
  /// - Inherits the user's environment (proxy, CA, credentials) minus
  ///   anything that relocates the repository
  /// - Never prompts for credentials
  /// - Forces plain, unpaged, unquoted output
  fn git_cmd(&self, repo: &Path) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(repo);

    for key in REPO_LOCATION_ENV {
      cmd.env_remove(key);
    }
    cmd.env("GIT_TERMINAL_PROMPT", "0");

    cmd.arg("-c").arg("core.quotePath=false");
    cmd.arg("-c").arg("color.ui=false");
    cmd.arg("--no-pager");

    cmd
  }
}

impl GitRunner for SystemGit {
  fn run(&self, repo: &Path, args: &[&str]) -> TicketsResult<String> {
    let command = format!("git {}", args.join(" "));
    tracing::debug!(repo = %repo.display(), %command, "running git");

    let output = self.git_cmd(repo).args(args).output().map_err(|e| {
      TicketsError::Git(GitError::Spawn {
        command: command.clone(),
        reason: e.to_string(),
      })
    })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).to_string();
      tracing::debug!(%command, code = ?output.status.code(), stderr = %stderr.trim(), "git exited non-zero");
      return Err(TicketsError::Git(GitError::CommandFailed {
        command,
        exit_code: output.status.code(),
        stderr,
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }
}
