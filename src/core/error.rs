//! Error types for release-tickets with contextual messages and exit codes
//!
//! Every failure that reaches the process boundary is printed with an optional
//! help line and terminates the run with exit code 1. Conditions such as "no
//! repositories", "no tags" or "no tickets" are not errors and never show up here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-tickets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Normal completion, including runs that found nothing
  Success = 0,
  /// Any uncaught error
  Failure = 1,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-tickets
#[derive(Debug)]
pub enum TicketsError {
  /// Invalid configuration (bad URLs, patterns, config files)
  Config(ConfigError),

  /// Git invocation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl TicketsError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    TicketsError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    TicketsError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// I/O errors are folded into a message so the context is not lost.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      TicketsError::Message { message, context, help } => TicketsError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      TicketsError::Io(err) => TicketsError::Message {
        message: ctx_str,
        context: Some(format!("I/O error: {}", err)),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    ExitCode::Failure
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      TicketsError::Config(e) => e.help_message(),
      TicketsError::Git(e) => e.help_message(),
      TicketsError::Message { help, .. } => help.clone(),
      TicketsError::Io(_) => None,
    }
  }
}

impl fmt::Display for TicketsError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TicketsError::Config(e) => write!(f, "{}", e),
      TicketsError::Git(e) => write!(f, "{}", e),
      TicketsError::Io(e) => write!(f, "I/O error: {}", e),
      TicketsError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for TicketsError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      TicketsError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for TicketsError {
  fn from(err: io::Error) -> Self {
    TicketsError::Io(err)
  }
}

impl From<String> for TicketsError {
  fn from(msg: String) -> Self {
    TicketsError::message(msg)
  }
}

impl From<&str> for TicketsError {
  fn from(msg: &str) -> Self {
    TicketsError::message(msg)
  }
}

impl From<serde_json::Error> for TicketsError {
  fn from(err: serde_json::Error) -> Self {
    TicketsError::message(format!("JSON error: {}", err))
  }
}

impl From<regex::Error> for TicketsError {
  fn from(err: regex::Error) -> Self {
    TicketsError::message(format!("Invalid ticket pattern: {}", err))
  }
}

impl From<glob::GlobError> for TicketsError {
  fn from(err: glob::GlobError) -> Self {
    TicketsError::message(format!("Failed to read {}: {}", err.path().display(), err.error()))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// Jira base URL does not point at a `/browse` endpoint
  InvalidJiraUrl { url: String },

  /// Glob pattern (tag filter, repository pattern) failed to compile
  InvalidPattern { pattern: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some(
        "Create the file or drop --config to use release-tickets.toml from the current directory.".to_string(),
      ),
      ConfigError::InvalidJiraUrl { .. } => {
        Some("Use the browse URL of your Jira instance, e.g. https://yourdomain.atlassian.net/browse".to_string())
      }
      ConfigError::InvalidPattern { .. } => Some("Patterns use shell glob syntax, e.g. 'v*' or 'release-*'.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Config file not found: {}", path.display())
      }
      ConfigError::InvalidJiraUrl { url } => {
        write!(f, "Invalid Jira base URL: {}", url)
      }
      ConfigError::InvalidPattern { pattern, reason } => {
        write!(f, "Invalid glob pattern '{}': {}", pattern, reason)
      }
    }
  }
}

/// Git invocation errors
#[derive(Debug)]
pub enum GitError {
  /// git could not be spawned at all
  Spawn { command: String, reason: String },

  /// git ran and exited non-zero
  CommandFailed {
    command: String,
    exit_code: Option<i32>,
    stderr: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::Spawn { .. } => Some("Make sure git is installed and available on PATH.".to_string()),
      GitError::CommandFailed { stderr, .. } => {
        if stderr.contains("Could not read from remote") || stderr.contains("Permission denied") {
          Some("Check your remote access, or rerun with --no-fetch-latest to search local refs only.".to_string())
        } else {
          None
        }
      }
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::Spawn { command, reason } => {
        write!(f, "Failed to run {}: {}", command, reason)
      }
      GitError::CommandFailed {
        command,
        exit_code,
        stderr,
      } => {
        match exit_code {
          Some(code) => write!(f, "Git command failed (exit code {}): {}", code, command)?,
          None => write!(f, "Git command terminated by signal: {}", command)?,
        }
        let stderr = stderr.trim();
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr)?;
        }
        Ok(())
      }
    }
  }
}

/// Result type alias for release-tickets
pub type TicketsResult<T> = Result<T, TicketsError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> TicketsResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> TicketsResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<TicketsError>,
{
  fn context(self, ctx: impl Into<String>) -> TicketsResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> TicketsResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print an error to stderr with help text
pub fn print_error(error: &TicketsError) {
  eprintln!("Error: {}", error);

  if let Some(help) = error.help_message() {
    eprintln!("Help: {}", help);
  }
}
