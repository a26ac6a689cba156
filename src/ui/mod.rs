//! Terminal styling for the console report

use anstyle::{AnsiColor, Color, Style};
use std::io::IsTerminal;

/// Repository names
pub const REPO: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
/// Release tags
pub const TAG: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
/// Ticket identifiers
pub const TICKET: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
/// Exclusions and warnings
pub const ALERT: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightRed)));
/// Secondary details (ranges, counts)
pub const MUTED: Style = Style::new()
  .italic()
  .fg_color(Some(Color::Ansi(AnsiColor::BrightBlack)));
/// Summary banner
pub const BANNER: Style = Style::new()
  .bold()
  .bg_color(Some(Color::Ansi(AnsiColor::BrightBlue)));

/// Applies styles when color output is enabled
#[derive(Debug, Clone, Copy)]
pub struct Palette {
  enabled: bool,
}

impl Palette {
  /// Color when stdout is a terminal and `NO_COLOR` is unset
  pub fn detect() -> Self {
    let enabled = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    Self { enabled }
  }

  /// Never emit escape codes
  #[cfg(test)]
  pub fn plain() -> Self {
    Self { enabled: false }
  }

  pub fn paint(&self, style: Style, text: &str) -> String {
    if self.enabled {
      format!("{}{}{}", style.render(), text, style.render_reset())
    } else {
      text.to_string()
    }
  }
}
