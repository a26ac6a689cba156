//! Integration tests for the config file

use crate::helpers::{TestWorkspace, run_release_tickets, run_release_tickets_raw};
use anyhow::Result;

#[test]
fn test_config_file_prefixes() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("PAY-1 charge cards")?;
  api.commit("OPS-2 bump runners")?;
  ws.write(
    "release-tickets.toml",
    r#"
prefixes = ["pay"]
fetch_latest = false
"#,
  )?;

  let stdout = run_release_tickets(&ws.path, &[])?;

  assert!(stdout.contains("PAY-1"), "{stdout}");
  assert!(!stdout.contains("OPS-2"), "{stdout}");

  Ok(())
}

#[test]
fn test_command_line_overrides_config() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("PAY-1 charge cards")?;
  api.commit("OPS-2 bump runners")?;
  ws.write("release-tickets.toml", "prefixes = [\"PAY\"]\nfetch_latest = false\n")?;

  let stdout = run_release_tickets(&ws.path, &["-p", "OPS"])?;

  assert!(stdout.contains("OPS-2"), "{stdout}");
  assert!(!stdout.contains("PAY-1"), "{stdout}");

  Ok(())
}

#[test]
fn test_missing_explicit_config_fails() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release_tickets_raw(&ws.path, &["--config", "nope.toml"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Config file not found"));

  Ok(())
}

#[test]
fn test_invalid_argument_exits_with_one() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release_tickets_raw(&ws.path, &["--max-tickets", "abc"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("invalid value 'abc'"));

  Ok(())
}

#[test]
fn test_help_exits_with_zero() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release_tickets_raw(&ws.path, &["--help"])?;

  assert_eq!(output.status.code(), Some(0));
  assert!(String::from_utf8_lossy(&output.stdout).contains("--max-tickets"));

  Ok(())
}
