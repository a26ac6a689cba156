//! The release-ticket discovery pipeline
//!
//! For each repository, strictly one after another:
//!
//! 1. `git fetch --all` (when enabled)
//! 2. resolve the latest release tag; none means the repository is excluded
//! 3. resolve the end reference and build the commit range
//! 4. extract tickets from the commit subjects in that range
//! 5. apply the per-repository ticket threshold
//!
//! Failures inside one repository become an exclusion on its result; only
//! invalid settings (ticket prefixes, tag pattern) abort the run.

use crate::core::config::ScanOptions;
use crate::core::error::TicketsResult;
use crate::core::vcs::{GitRunner, Repo};
use crate::release::{CommitRange, TagFilter, end_reference, latest_tag};
use crate::report::{Exclusion, RepositoryResult, RunSummary};
use crate::tickets::{TicketMatcher, find_tickets};
use crate::utils::display_name;
use std::path::{Path, PathBuf};

/// Settings compiled once per run
pub struct Scanner<'a> {
  git: &'a dyn GitRunner,
  options: &'a ScanOptions,
  matcher: TicketMatcher,
  tag_filter: Option<TagFilter>,
}

impl<'a> Scanner<'a> {
  pub fn new(git: &'a dyn GitRunner, options: &'a ScanOptions) -> TicketsResult<Self> {
    let matcher = TicketMatcher::new(&options.prefixes)?;
    let tag_filter = options.tag_pattern.as_deref().map(TagFilter::new).transpose()?;

    Ok(Self {
      git,
      options,
      matcher,
      tag_filter,
    })
  }

  /// Scan `repos` in order, calling `on_result` as each one finishes
  pub fn scan_all<F>(&self, repos: &[PathBuf], mut on_result: F) -> RunSummary
  where
    F: FnMut(&RepositoryResult),
  {
    let mut summary = RunSummary::new();
    for path in repos {
      let result = self.scan(path);
      on_result(&result);
      summary.record(result);
    }
    summary
  }

  /// Scan a single repository
  pub fn scan(&self, path: &Path) -> RepositoryResult {
    let repo = Repo::new(self.git, path);
    let result = RepositoryResult::new(display_name(path), path);
    let _span = tracing::debug_span!("scan", repo = %result.name).entered();

    if self.options.fetch_latest
      && let Err(err) = repo.fetch_all()
    {
      tracing::warn!(repo = %result.name, "fetch failed: {}", err);
      return result.excluded(Exclusion::GitFailure {
        message: first_line(&err.to_string()),
      });
    }

    let Some(tag) = latest_tag(&repo, self.tag_filter.as_ref()) else {
      tracing::info!(repo = %result.name, "no release tag, excluding");
      return result.excluded(Exclusion::NoReleaseTag);
    };

    let mut result = RepositoryResult {
      tag: Some(tag.clone()),
      ..result
    };

    let end = match end_reference(&repo, self.options.to_commit.as_deref()) {
      Ok(end) => end,
      Err(err) => {
        tracing::warn!(repo = %result.name, "could not resolve end reference: {}", err);
        return result.excluded(Exclusion::GitFailure {
          message: first_line(&err.to_string()),
        });
      }
    };

    let range = CommitRange::new(Some(tag.as_str()), end);
    if !repo.is_ancestor(&tag, &range.end) {
      result
        .warnings
        .push(format!("{} is not an ancestor of {}", tag, range.end));
    }

    let tickets = find_tickets(&repo, &range, &self.matcher);
    result.range = Some(range);

    if tickets.len() > self.options.max_tickets {
      tracing::info!(repo = %result.name, count = tickets.len(), "ticket threshold exceeded, excluding");
      return result.excluded(Exclusion::TooManyTickets {
        count: tickets.len(),
        max: self.options.max_tickets,
      });
    }

    result.tickets = tickets;
    result
  }
}

fn first_line(message: &str) -> String {
  message.lines().next().unwrap_or_default().to_string()
}
