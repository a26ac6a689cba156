mod commands;
mod core;
mod discovery;
mod logging;
mod release;
mod report;
mod tickets;
mod ui;
mod utils;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use crate::core::config::{FileConfig, Overrides, ScanOptions};
use crate::core::error::{ExitCode, ResultExt, TicketsResult, print_error};
use std::path::{Path, PathBuf};

/// Find the Jira tickets completed since the last release tag of each git repository
#[derive(Parser, Debug)]
#[command(name = "release-tickets")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Repository path or glob to include (repeatable; default: current directory and its subdirectories)
  #[arg(short, long = "repo", value_name = "PATH_OR_GLOB", action = ArgAction::Append)]
  repos: Vec<String>,

  /// Repository path or glob to exclude after expansion (repeatable)
  #[arg(short = 'x', long = "exclude-repo", value_name = "PATH_OR_GLOB", action = ArgAction::Append)]
  exclude_repos: Vec<String>,

  /// Ticket prefix to match, e.g. PAY (repeatable; default: any UPPERCASE-123 token)
  #[arg(short, long = "prefix", value_name = "PREFIX", action = ArgAction::Append)]
  prefixes: Vec<String>,

  /// Shell glob selecting release tags, e.g. 'v*' (default: most recent tag)
  #[arg(short, long)]
  tag_pattern: Option<String>,

  /// Exclude repositories with more tickets than this [default: 30]
  #[arg(short, long)]
  max_tickets: Option<usize>,

  /// End of the commit range (default: primary branch of the preferred remote)
  #[arg(short = 'c', long)]
  to_commit: Option<String>,

  /// Run `git fetch --all` before searching (default)
  #[arg(long, overrides_with = "no_fetch_latest")]
  fetch_latest: bool,

  /// Search local refs only, without fetching
  #[arg(short = 'n', long, overrides_with = "fetch_latest")]
  no_fetch_latest: bool,

  /// Jira base URL for ticket links, e.g. https://example.atlassian.net/browse
  #[arg(short, long)]
  jira_base_url: Option<String>,

  /// Config file (default: release-tickets.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Print the summary as JSON
  #[arg(long)]
  json: bool,

  /// Log git invocations and decisions to stderr
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn fetch_override(&self) -> Option<bool> {
    if self.no_fetch_latest {
      Some(false)
    } else if self.fetch_latest {
      Some(true)
    } else {
      None
    }
  }

  fn overrides(self) -> Overrides {
    let fetch_latest = self.fetch_override();
    Overrides {
      repos: self.repos,
      exclude_repos: self.exclude_repos,
      prefixes: self.prefixes,
      tag_pattern: self.tag_pattern,
      max_tickets: self.max_tickets,
      to_commit: self.to_commit,
      fetch_latest,
      jira_base_url: self.jira_base_url,
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => std::process::exit(usage_exit_code(&err).as_i32()),
  };
  logging::init_tracing(cli.verbose);

  let code = match run(cli) {
    Ok(()) => ExitCode::Success,
    Err(err) => {
      print_error(&err);
      err.exit_code()
    }
  };

  std::process::exit(code.as_i32());
}

/// Print clap's output; help and version requests are not failures
fn usage_exit_code(err: &clap::Error) -> ExitCode {
  if let Err(io_err) = err.print() {
    eprintln!("Error: {}", io_err);
  }
  match err.kind() {
    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
    _ => ExitCode::Failure,
  }
}

fn run(cli: Cli) -> TicketsResult<()> {
  let cwd = std::env::current_dir().context("Failed to get current directory")?;
  let json = cli.json;

  let file_config = load_config(&cwd, cli.config.as_deref())?;
  let options = ScanOptions::resolve(file_config, cli.overrides());
  tracing::debug!(?options, "resolved options");

  commands::run_scan(&cwd, &options, json)
}

/// Explicit `--config` must exist; the default locations are optional
fn load_config(cwd: &Path, explicit: Option<&Path>) -> TicketsResult<FileConfig> {
  match explicit {
    Some(path) => FileConfig::load(&cwd.join(path)),
    None => Ok(FileConfig::discover(cwd)?.unwrap_or_default()),
  }
}
