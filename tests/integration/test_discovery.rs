//! Integration tests for repository selection

use crate::helpers::{TestWorkspace, run_release_tickets, run_release_tickets_raw};
use anyhow::Result;

#[test]
fn test_no_repositories_found() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_dir("docs")?;

  let output = run_release_tickets_raw(&ws.path, &["-n"])?;

  assert_eq!(output.status.code(), Some(0));
  assert!(String::from_utf8_lossy(&output.stdout).contains("No git repositories found"));

  Ok(())
}

#[test]
fn test_current_directory_is_a_candidate() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("ABC-1 add endpoint")?;

  let stdout = run_release_tickets(&api.path, &["-n"])?;

  assert!(stdout.contains("Searching for tickets in 1 repositories..."), "{stdout}");
  assert!(stdout.contains("  api: v1.0.0 (1 tickets)"), "{stdout}");

  Ok(())
}

#[test]
fn test_repo_globs_and_exclusions() -> Result<()> {
  let ws = TestWorkspace::new()?;
  for name in ["svc-billing", "svc-legacy", "web"] {
    let repo = ws.add_repo(name)?;
    repo.tag("v1.0.0")?;
    repo.commit("ABC-1 change")?;
  }

  let stdout = run_release_tickets(&ws.path, &["-n", "-r", "svc-*", "-x", "svc-legacy"])?;

  assert!(stdout.contains("Searching for tickets in 1 repositories..."), "{stdout}");
  assert!(stdout.contains("  svc-billing: v1.0.0 (1 tickets)"), "{stdout}");
  assert!(!stdout.contains("svc-legacy"), "{stdout}");
  assert!(!stdout.contains("web"), "{stdout}");

  Ok(())
}

#[test]
fn test_repo_patterns_keep_command_line_order() -> Result<()> {
  let ws = TestWorkspace::new()?;
  for name in ["alpha", "beta"] {
    let repo = ws.add_repo(name)?;
    repo.tag("v1.0.0")?;
  }

  let stdout = run_release_tickets(&ws.path, &["-n", "-r", "beta", "-r", "alpha"])?;

  let beta = stdout.find("  beta: ").expect("beta listed");
  let alpha = stdout.find("  alpha: ").expect("alpha listed");
  assert!(beta < alpha, "{stdout}");

  Ok(())
}
