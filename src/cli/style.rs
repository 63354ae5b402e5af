//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escape codes when
//! stdout is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize: Display + Sized {
    /// De-emphasized hint text
    fn muted(&self) -> String {
        format!("{}", self.dimmed())
    }

    /// Headings and prompts
    fn emphasis(&self) -> String {
        format!("{}", self.bold())
    }

    /// Branch names and counts
    fn accent(&self) -> String {
        format!("{}", self.cyan())
    }

    /// Completed actions
    fn success(&self) -> String {
        format!("{}", self.green())
    }

    /// Non-fatal problems
    fn warn(&self) -> String {
        format!("{}", self.yellow())
    }

    /// Fatal problems
    fn error(&self) -> String {
        format!("{}", self.red().bold())
    }
}

impl<T: Display> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Spinner style for long-running git calls
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
