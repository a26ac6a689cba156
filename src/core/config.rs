use crate::core::error::{ConfigError, ResultExt, TicketsError, TicketsResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-repository ticket count above which a repository is left out
pub const DEFAULT_MAX_TICKETS: usize = 30;

/// Optional config file for release-tickets
/// Searched in order: release-tickets.toml, .release-tickets.toml, .config/release-tickets.toml
///
/// # Example
///
/// ```toml
/// repos = ["services/*", "web-app"]
/// exclude_repos = ["services/legacy-*"]
/// prefixes = ["PAY", "CORE"]
/// tag_pattern = "v*"
/// max_tickets = 50
/// fetch_latest = false
/// jira_base_url = "https://example.atlassian.net/browse"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
  pub repos: Vec<String>,
  pub exclude_repos: Vec<String>,
  pub prefixes: Vec<String>,
  pub tag_pattern: Option<String>,
  pub max_tickets: Option<usize>,
  pub fetch_latest: Option<bool>,
  pub jira_base_url: Option<String>,
}

impl FileConfig {
  /// Find config file in search order
  pub fn find_config_path(dir: &Path) -> Option<PathBuf> {
    let candidates = [
      dir.join("release-tickets.toml"),
      dir.join(".release-tickets.toml"),
      dir.join(".config").join("release-tickets.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load the config file found under `dir`, if any
  pub fn discover(dir: &Path) -> TicketsResult<Option<Self>> {
    match Self::find_config_path(dir) {
      Some(path) => Self::load(&path).map(Some),
      None => Ok(None),
    }
  }

  /// Load an explicitly named config file
  pub fn load(path: &Path) -> TicketsResult<Self> {
    if !path.is_file() {
      return Err(TicketsError::Config(ConfigError::NotFound {
        path: path.to_path_buf(),
      }));
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: FileConfig = toml_edit::de::from_str(&content).map_err(|e| {
      TicketsError::with_help(
        format!("Failed to parse config from {}: {}", path.display(), e),
        "Supported keys: repos, exclude_repos, prefixes, tag_pattern, max_tickets, fetch_latest, jira_base_url",
      )
    })?;

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
  }
}

/// Values given on the command line; `None`/empty means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub repos: Vec<String>,
  pub exclude_repos: Vec<String>,
  pub prefixes: Vec<String>,
  pub tag_pattern: Option<String>,
  pub max_tickets: Option<usize>,
  pub to_commit: Option<String>,
  pub fetch_latest: Option<bool>,
  pub jira_base_url: Option<String>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
  /// Include patterns; empty means the current directory and its subdirectories
  pub repos: Vec<String>,
  pub exclude_repos: Vec<String>,
  /// Ticket prefixes; empty means the generic `[A-Z]+-\d+` pattern
  pub prefixes: Vec<String>,
  pub tag_pattern: Option<String>,
  pub max_tickets: usize,
  /// Explicit end of the commit range; `None` resolves the primary branch
  pub to_commit: Option<String>,
  pub fetch_latest: bool,
  pub jira_base_url: Option<String>,
}

impl Default for ScanOptions {
  fn default() -> Self {
    Self {
      repos: Vec::new(),
      exclude_repos: Vec::new(),
      prefixes: Vec::new(),
      tag_pattern: None,
      max_tickets: DEFAULT_MAX_TICKETS,
      to_commit: None,
      fetch_latest: true,
      jira_base_url: None,
    }
  }
}

impl ScanOptions {
  /// Merge config file values with command-line overrides
  ///
  /// Command-line lists replace config lists when non-empty; scalar flags win
  /// whenever they were given.
  pub fn resolve(file: FileConfig, cli: Overrides) -> Self {
    fn pick(cli: Vec<String>, file: Vec<String>) -> Vec<String> {
      if cli.is_empty() { file } else { cli }
    }

    Self {
      repos: pick(cli.repos, file.repos),
      exclude_repos: pick(cli.exclude_repos, file.exclude_repos),
      prefixes: pick(cli.prefixes, file.prefixes),
      tag_pattern: cli.tag_pattern.or(file.tag_pattern),
      max_tickets: cli.max_tickets.or(file.max_tickets).unwrap_or(DEFAULT_MAX_TICKETS),
      to_commit: cli.to_commit,
      fetch_latest: cli.fetch_latest.or(file.fetch_latest).unwrap_or(true),
      jira_base_url: cli.jira_base_url.or(file.jira_base_url),
    }
  }
}
