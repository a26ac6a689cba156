//! Ticket identifier extraction from commit subjects
//!
//! A ticket ID is a `PREFIX-NUMBER` token such as `PAY-1234`. With configured
//! prefixes only those projects match (case-insensitively); without them any
//! run of uppercase letters followed by `-` and digits counts.

use crate::core::error::{ConfigError, TicketsError, TicketsResult};
use crate::core::vcs::Repo;
use crate::release::CommitRange;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Fallback pattern when no prefixes are configured
const GENERIC_TICKET_PATTERN: &str = r"[A-Z]+-\d+";

/// Compiled ticket-ID matcher
#[derive(Debug, Clone)]
pub struct TicketMatcher {
  regex: Regex,
}

impl TicketMatcher {
  /// Build a matcher for `prefixes`, or the generic pattern if there are none
  pub fn new(prefixes: &[String]) -> TicketsResult<Self> {
    let prefixes: Vec<String> = prefixes
      .iter()
      .map(|p| p.trim())
      .filter(|p| !p.is_empty())
      .map(regex::escape)
      .collect();

    let regex = if prefixes.is_empty() {
      Regex::new(GENERIC_TICKET_PATTERN)?
    } else {
      RegexBuilder::new(&format!(r"(?:{})-\d+", prefixes.join("|")))
        .case_insensitive(true)
        .build()?
    };

    Ok(Self { regex })
  }

  /// Every ticket ID mentioned in `subjects`, uppercased, first occurrence wins
  pub fn extract<S: AsRef<str>>(&self, subjects: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tickets = Vec::new();

    for subject in subjects {
      for found in self.regex.find_iter(subject.as_ref()) {
        let ticket = found.as_str().to_uppercase();
        if seen.insert(ticket.clone()) {
          tickets.push(ticket);
        }
      }
    }

    tickets
  }
}

/// Tickets referenced by the commits in `range`
///
/// A failing log query (unknown ref, shallow clone) is reported and treated as
/// "no tickets" so one broken repository does not stop the run.
pub fn find_tickets(repo: &Repo<'_>, range: &CommitRange, matcher: &TicketMatcher) -> Vec<String> {
  match repo.commit_subjects(&range.to_string()) {
    Ok(subjects) => {
      tracing::debug!(repo = %repo.path().display(), %range, commits = subjects.len(), "read commit subjects");
      matcher.extract(&subjects)
    }
    Err(err) => {
      tracing::warn!(repo = %repo.path().display(), %range, "commit log query failed: {}", err);
      Vec::new()
    }
  }
}

/// Link to `ticket` on the Jira instance behind `base_url`
///
/// `base_url` must be an http(s) URL ending in a `/browse` path segment, e.g.
/// `https://example.atlassian.net/browse`. Anything after `/browse` is ignored.
pub fn ticket_url(ticket: &str, base_url: &str) -> TicketsResult<String> {
  let browse = Regex::new(r"^(https?://.+/browse)")?;
  let base = browse
    .captures(base_url)
    .and_then(|caps| caps.get(1))
    .ok_or_else(|| {
      TicketsError::Config(ConfigError::InvalidJiraUrl {
        url: base_url.to_string(),
      })
    })?;

  Ok(format!("{}/{}", base.as_str(), ticket))
}
