//! Per-repository results and the cross-repository summary
//!
//! [`RunSummary`] is built up one repository at a time. Excluded repositories
//! are listed with their reason but never contribute tickets to the global list.

use crate::core::error::TicketsResult;
use crate::release::CommitRange;
use crate::tickets::ticket_url;
use crate::ui::{self, Palette};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a repository was left out of the release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Exclusion {
  /// No tag (or no tag matching the filter) exists yet
  NoReleaseTag,
  /// More tickets than the configured maximum; usually a stale or wrong tag
  TooManyTickets { count: usize, max: usize },
  /// A git step other than tag lookup or log failed
  GitFailure { message: String },
}

impl fmt::Display for Exclusion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Exclusion::NoReleaseTag => write!(f, "no release tag found"),
      Exclusion::TooManyTickets { count, max } => {
        write!(f, "ticket count {} exceeds configured maximum of {}", count, max)
      }
      Exclusion::GitFailure { message } => write!(f, "git failure: {}", message),
    }
  }
}

/// Outcome of scanning one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryResult {
  pub name: String,
  pub path: PathBuf,
  pub tag: Option<String>,
  #[serde(serialize_with = "serialize_range")]
  pub range: Option<CommitRange>,
  pub tickets: Vec<String>,
  pub exclusion: Option<Exclusion>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub warnings: Vec<String>,
}

fn serialize_range<S: serde::Serializer>(range: &Option<CommitRange>, serializer: S) -> Result<S::Ok, S::Error> {
  match range {
    Some(range) => serializer.serialize_some(&range.to_string()),
    None => serializer.serialize_none(),
  }
}

impl RepositoryResult {
  pub fn new(name: impl Into<String>, path: &Path) -> Self {
    Self {
      name: name.into(),
      path: path.to_path_buf(),
      tag: None,
      range: None,
      tickets: Vec::new(),
      exclusion: None,
      warnings: Vec::new(),
    }
  }

  pub fn excluded(mut self, reason: Exclusion) -> Self {
    self.exclusion = Some(reason);
    self
  }

  pub fn is_excluded(&self) -> bool {
    self.exclusion.is_some()
  }
}

/// Everything found in one run
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
  repositories: Vec<RepositoryResult>,
  tickets: Vec<String>,
  #[serde(skip)]
  seen: HashSet<String>,
}

impl RunSummary {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a repository's outcome; its tickets join the global list unless excluded
  pub fn record(&mut self, result: RepositoryResult) {
    if !result.is_excluded() {
      for ticket in &result.tickets {
        if self.seen.insert(ticket.clone()) {
          self.tickets.push(ticket.clone());
        }
      }
    }
    self.repositories.push(result);
  }

  pub fn repositories(&self) -> &[RepositoryResult] {
    &self.repositories
  }

  /// Unique tickets across included repositories, in discovery order
  pub fn tickets(&self) -> &[String] {
    &self.tickets
  }

  pub fn excluded_count(&self) -> usize {
    self.repositories.iter().filter(|r| r.is_excluded()).count()
  }
}

/// Progress block printed as soon as a repository has been scanned
pub fn render_repository(result: &RepositoryResult, palette: &Palette) -> String {
  let mut out = format!("{}\n", palette.paint(ui::REPO, &result.name));

  if let Some(tag) = &result.tag {
    out.push_str(&format!("  Latest tag: {}\n", palette.paint(ui::TAG, tag)));
  }
  if let Some(range) = &result.range {
    let line = format!("  Searching commits: {}", range);
    out.push_str(&format!("{}\n", palette.paint(ui::MUTED, &line)));
  }
  for warning in &result.warnings {
    let line = format!("Warning: {}", warning);
    out.push_str(&format!("  {}\n", palette.paint(ui::ALERT, &line)));
  }

  let alert = match &result.exclusion {
    Some(Exclusion::NoReleaseTag) => Some("No release tag found, excluding repository".to_string()),
    Some(Exclusion::TooManyTickets { count, max }) => Some(format!(
      "Excluding repository with {} tickets (exceeds threshold of {})",
      count, max
    )),
    Some(Exclusion::GitFailure { message }) => Some(format!("Git failure, excluding repository: {}", message)),
    None => None,
  };

  match alert {
    Some(line) => out.push_str(&format!("  {}\n", palette.paint(ui::ALERT, &line))),
    None if result.tickets.is_empty() => out.push_str("  No tickets found\n"),
    None => {
      out.push_str(&format!("  Found {} tickets:\n", result.tickets.len()));
      for ticket in &result.tickets {
        out.push_str(&format!("    {}\n", palette.paint(ui::TICKET, ticket)));
      }
    }
  }

  out
}

/// Final cross-repository summary
///
/// Fails only when `jira_base_url` is set but malformed.
pub fn render_summary(summary: &RunSummary, jira_base_url: Option<&str>, palette: &Palette) -> TicketsResult<String> {
  let mut out = String::new();
  for line in [
    "*************************",
    "******** Summary ********",
    "*************************",
  ] {
    out.push_str(&format!("{}\n", palette.paint(ui::BANNER, line)));
  }
  out.push('\n');

  out.push_str("Repositories and their latest tags:\n");
  for repo in summary.repositories() {
    let name = palette.paint(ui::REPO, &repo.name);
    match &repo.exclusion {
      Some(reason) => {
        out.push_str(&format!("  {}: {}\n", name, palette.paint(ui::ALERT, &reason.to_string())));
      }
      None => {
        let tag = repo.tag.as_deref().unwrap_or("no tag");
        let count = format!("({} tickets)", repo.tickets.len());
        out.push_str(&format!(
          "  {}: {} {}\n",
          name,
          palette.paint(ui::TAG, tag),
          palette.paint(ui::MUTED, &count)
        ));
      }
    }
  }
  out.push('\n');

  if summary.tickets().is_empty() {
    out.push_str("No tickets found in any repository\n");
    return Ok(out);
  }

  out.push_str(&format!(
    "Found {} unique tickets across all repositories.\n\n",
    summary.tickets().len()
  ));
  out.push_str("Tickets:\n");
  for ticket in summary.tickets() {
    let painted = palette.paint(ui::TICKET, ticket);
    match jira_base_url {
      Some(base) => out.push_str(&format!("{}  {}\n", painted, ticket_url(ticket, base)?)),
      None => out.push_str(&format!("{}\n", painted)),
    }
  }

  Ok(out)
}
