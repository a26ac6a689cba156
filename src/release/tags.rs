//! Latest release tag lookup

use crate::core::error::{ConfigError, TicketsError, TicketsResult};
use crate::core::vcs::Repo;
use glob::{MatchOptions, Pattern};

/// Shell-glob filter for release tag names
///
/// `*` and `?` do not cross `/`, so `v*` matches `v1.2.0` but not `v1/rc`.
#[derive(Debug, Clone)]
pub struct TagFilter {
  pattern: Pattern,
}

impl TagFilter {
  pub fn new(pattern: &str) -> TicketsResult<Self> {
    let pattern = Pattern::new(pattern).map_err(|e| {
      TicketsError::Config(ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
      })
    })?;
    Ok(Self { pattern })
  }

  pub fn matches(&self, tag: &str) -> bool {
    let options = MatchOptions {
      case_sensitive: true,
      require_literal_separator: true,
      require_literal_leading_dot: false,
    };
    self.pattern.matches_with(tag, options)
  }
}

/// Most recently created tag, or the most recent one accepted by `filter`
///
/// `None` when the repository has no (matching) tags or the tag listing fails.
/// That is the normal "never released" state, not an error.
pub fn latest_tag(repo: &Repo<'_>, filter: Option<&TagFilter>) -> Option<String> {
  let tags = match repo.tags_by_creation_date() {
    Ok(tags) => tags,
    Err(err) => {
      tracing::debug!(repo = %repo.path().display(), "tag listing failed: {}", err);
      return None;
    }
  };

  match filter {
    Some(filter) => tags.into_iter().find(|tag| filter.matches(tag)),
    None => tags.into_iter().next(),
  }
}
