//! Release markers: which tag was released last and where the search ends
//!
//! For every repository the pipeline needs two references:
//!
//! - the **release tag**: most recently created tag, optionally filtered by a
//!   shell glob such as `v*` (see [`tags`])
//! - the **end reference**: an explicit commit, or the primary branch on the
//!   preferred remote (see [`branch`])
//!
//! Together they form the [`CommitRange`] handed to `git log`.

pub mod branch;
pub mod tags;

pub use branch::end_reference;
pub use tags::{TagFilter, latest_tag};

use std::fmt;

/// Commits reachable from `end` but not from `start`
///
/// Without a start tag the range covers the whole history of `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
  pub start: Option<String>,
  pub end: String,
}

impl CommitRange {
  pub fn new(start: Option<&str>, end: impl Into<String>) -> Self {
    Self {
      start: start.map(str::to_string),
      end: end.into(),
    }
  }
}

impl fmt::Display for CommitRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.start {
      Some(start) => write!(f, "{}..{}", start, self.end),
      None => write!(f, "{}", self.end),
    }
  }
}
