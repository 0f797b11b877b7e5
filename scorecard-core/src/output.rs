//! # Output Formatting
//!
//! Terminal messages with colors and emojis, plus the score banding shared
//! by the terminal summary and the rendered report.

use owo_colors::OwoColorize;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode to owo-colors' global override
  pub fn apply(self) {
    match self {
      Self::Yes | Self::Always => owo_colors::set_override(true),
      Self::No | Self::Never => owo_colors::set_override(false),
      Self::Auto => owo_colors::unset_override(),
    }
  }
}

/// Quality band of a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
  Green,
  Yellow,
  Orange,
  Red,
}

impl ScoreBand {
  pub fn of(score: u32) -> Self {
    match score {
      90.. => Self::Green,
      80..=89 => Self::Yellow,
      70..=79 => Self::Orange,
      _ => Self::Red,
    }
  }

  /// CSS color name used in the report
  pub fn css_color(self) -> &'static str {
    match self {
      Self::Green => "green",
      Self::Yellow => "yellow",
      Self::Orange => "orange",
      Self::Red => "red",
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Format a service path
pub fn format_service_path(path: &str) -> String {
  path.bright_green().to_string()
}

/// Format a score in its band's terminal color
pub fn format_score(score: u32) -> String {
  let text = score.to_string();
  match ScoreBand::of(score) {
    ScoreBand::Green => text.green().to_string(),
    ScoreBand::Yellow => text.yellow().to_string(),
    ScoreBand::Orange => text.bright_red().to_string(),
    ScoreBand::Red => text.red().bold().to_string(),
  }
}
