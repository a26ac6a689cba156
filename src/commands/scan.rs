//! `release-tickets` - find tickets completed since each repository's last release
//!
//! Discovers repositories under the current directory (or the given patterns),
//! scans them one at a time, prints a block per repository as it finishes and
//! ends with the cross-repository summary.

use crate::core::config::ScanOptions;
use crate::core::error::TicketsResult;
use crate::core::scan::Scanner;
use crate::core::vcs::SystemGit;
use crate::discovery::find_repositories;
use crate::report::{RunSummary, render_repository, render_summary};
use crate::tickets::ticket_url;
use crate::ui::Palette;
use serde::Serialize;
use std::path::Path;

/// Ticket with its Jira link, for `--json` output
#[derive(Debug, Serialize)]
struct TicketLink {
  ticket: String,
  url: String,
}

/// `--json` document: the summary plus links when a Jira URL is configured
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
  #[serde(flatten)]
  summary: &'a RunSummary,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  links: Vec<TicketLink>,
}

/// Run the scan from `base` with resolved options
pub fn run_scan(base: &Path, options: &ScanOptions, json: bool) -> TicketsResult<()> {
  let palette = Palette::detect();
  let repos = find_repositories(base, &options.repos, &options.exclude_repos)?;

  if repos.is_empty() {
    if json {
      print_json(&RunSummary::new(), options)?;
    } else {
      println!("No git repositories found");
    }
    return Ok(());
  }

  let git = SystemGit::new();
  let scanner = Scanner::new(&git, options)?;

  if !json {
    println!("Searching for tickets in {} repositories...", repos.len());
  }
  tracing::info!(count = repos.len(), fetch = options.fetch_latest, "scanning repositories");

  let summary = scanner.scan_all(&repos, |result| {
    if !json {
      println!();
      print!("{}", render_repository(result, &palette));
    }
  });

  tracing::info!(
    excluded = summary.excluded_count(),
    tickets = summary.tickets().len(),
    "scan finished"
  );

  if json {
    print_json(&summary, options)?;
  } else {
    println!();
    println!();
    print!("{}", render_summary(&summary, options.jira_base_url.as_deref(), &palette)?);
  }

  Ok(())
}

fn print_json(summary: &RunSummary, options: &ScanOptions) -> TicketsResult<()> {
  let links = match options.jira_base_url.as_deref() {
    Some(base) => summary
      .tickets()
      .iter()
      .map(|ticket| {
        Ok(TicketLink {
          ticket: ticket.clone(),
          url: ticket_url(ticket, base)?,
        })
      })
      .collect::<TicketsResult<Vec<_>>>()?,
    None => Vec::new(),
  };

  let report = JsonReport { summary, links };
  println!("{}", serde_json::to_string_pretty(&report)?);
  Ok(())
}
