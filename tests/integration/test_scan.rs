//! Integration tests for the ticket scan

use crate::helpers::{TestWorkspace, run_release_tickets, run_release_tickets_raw};
use anyhow::Result;

#[test]
fn test_tagged_and_untagged_repositories() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.commit("ABC-100 shipped before the release")?;
  api.tag("v1.0.0")?;
  api.commit("ABC-1 add endpoint")?;
  api.commit("ABC-2 fix pagination")?;
  let fresh = ws.add_repo("fresh")?;
  fresh.commit("ABC-3 prototype")?;
  ws.add_dir("docs")?;

  let stdout = run_release_tickets(&ws.path, &["--no-fetch-latest"])?;

  assert!(stdout.contains("Searching for tickets in 2 repositories..."), "{stdout}");
  assert!(stdout.contains("  Searching commits: v1.0.0..main"), "{stdout}");
  assert!(stdout.contains("  api: v1.0.0 (2 tickets)"), "{stdout}");
  assert!(stdout.contains("  fresh: no release tag found"), "{stdout}");
  assert!(stdout.contains("Found 2 unique tickets across all repositories."), "{stdout}");
  assert!(!stdout.contains("ABC-100"), "tickets before the tag must not be listed");
  assert!(!stdout.contains("ABC-3"), "untagged repositories contribute no tickets");

  Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("PAY-1 add endpoint")?;
  api.commit("PAY-2 and pay-1 follow-up")?;

  let stdout = run_release_tickets(&ws.path, &["-n", "--json", "-p", "PAY"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout)?;

  let mut tickets: Vec<String> = serde_json::from_value(json["tickets"].clone())?;
  tickets.sort();
  assert_eq!(tickets, vec!["PAY-1", "PAY-2"]);
  assert_eq!(json["repositories"][0]["name"], "api");
  assert_eq!(json["repositories"][0]["tag"], "v1.0.0");
  assert!(json["repositories"][0]["exclusion"].is_null());
  assert!(json.get("links").is_none());

  Ok(())
}

#[test]
fn test_json_links_with_jira_url() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("OPS-9 rotate keys")?;

  let stdout = run_release_tickets(
    &ws.path,
    &["-n", "--json", "-j", "https://example.atlassian.net/browse"],
  )?;
  let json: serde_json::Value = serde_json::from_str(&stdout)?;

  assert_eq!(json["links"][0]["ticket"], "OPS-9");
  assert_eq!(json["links"][0]["url"], "https://example.atlassian.net/browse/OPS-9");

  Ok(())
}

#[test]
fn test_threshold_excludes_noisy_repository() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("ABC-1 one")?;
  api.commit("ABC-2 two")?;
  let web = ws.add_repo("web")?;
  web.tag("v2.0.0")?;
  web.commit("WEB-1 one")?;

  let stdout = run_release_tickets(&ws.path, &["-n", "--max-tickets", "1"])?;

  assert!(stdout.contains("Excluding repository with 2 tickets (exceeds threshold of 1)"), "{stdout}");
  assert!(stdout.contains("  api: ticket count 2 exceeds configured maximum of 1"), "{stdout}");
  assert!(stdout.contains("  web: v2.0.0 (1 tickets)"), "{stdout}");
  assert!(stdout.contains("Found 1 unique tickets across all repositories."), "{stdout}");

  Ok(())
}

#[test]
fn test_tag_pattern_selects_release_tag() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("ABC-1 after release")?;
  api.tag("nightly-1")?;
  api.commit("ABC-2 after nightly")?;

  let latest = run_release_tickets(&ws.path, &["-n"])?;
  assert!(latest.contains("Latest tag: nightly-1"), "{latest}");
  assert!(latest.contains("  api: nightly-1 (1 tickets)"), "{latest}");

  let filtered = run_release_tickets(&ws.path, &["-n", "--tag-pattern", "v*"])?;
  assert!(filtered.contains("Searching commits: v1.0.0..main"), "{filtered}");
  assert!(filtered.contains("  api: v1.0.0 (2 tickets)"), "{filtered}");

  Ok(())
}

#[test]
fn test_explicit_end_commit() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("ABC-1 included")?;
  let end = api.head()?;
  api.commit("ABC-2 after the end commit")?;

  let stdout = run_release_tickets(&ws.path, &["-n", "--to-commit", &end])?;

  assert!(stdout.contains("ABC-1"), "{stdout}");
  assert!(!stdout.contains("ABC-2"), "{stdout}");

  Ok(())
}

#[test]
fn test_no_tickets_message() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("refactor without ticket")?;

  let stdout = run_release_tickets(&ws.path, &["-n"])?;

  assert!(stdout.contains("  No tickets found"), "{stdout}");
  assert!(stdout.contains("No tickets found in any repository"), "{stdout}");

  Ok(())
}

#[test]
fn test_jira_links_in_summary() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("ABC-1 add endpoint")?;

  let stdout = run_release_tickets(&ws.path, &["-n", "-j", "https://example.atlassian.net/browse"])?;
  assert!(stdout.contains("ABC-1  https://example.atlassian.net/browse/ABC-1"), "{stdout}");

  Ok(())
}

#[test]
fn test_invalid_jira_url_fails() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let api = ws.add_repo("api")?;
  api.tag("v1.0.0")?;
  api.commit("ABC-1 add endpoint")?;

  let output = run_release_tickets_raw(&ws.path, &["-n", "-j", "example.atlassian.net"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("Invalid Jira base URL: example.atlassian.net"), "{stderr}");

  Ok(())
}

#[test]
fn test_fetch_with_local_remote() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let origin = ws.add_repo("origin-src")?;
  origin.tag("v1.0.0")?;
  origin.commit("ABC-1 upstream work")?;

  let clones = ws.add_dir("clones")?;
  crate::helpers::git(&clones, &["clone", "--quiet", "../origin-src", "api"])?;
  origin.commit("ABC-2 pushed after the clone")?;

  let stdout = run_release_tickets(&clones, &["--fetch-latest"])?;

  assert!(stdout.contains("Searching commits: v1.0.0..origin/main"), "{stdout}");
  assert!(stdout.contains("  api: v1.0.0 (2 tickets)"), "{stdout}");

  Ok(())
}
