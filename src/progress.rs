//! Progress feedback for batch classification.
//!
//! A bar is drawn on stderr only when it is a terminal, quiet mode is off
//! and no `-v` flag was given. Verbose runs interleave log lines, which a
//! redrawing bar would garble.

use indicatif::{ProgressBar, ProgressStyle};

pub const TEMPLATE_CLASSIFY: &str = "{msg} [{bar:40}] {pos}/{len} patterns ({percent}%) - {eta}";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output
    pub quiet_mode: bool,
    /// Number of `-v` flags
    pub verbosity: u8,
}

impl ProgressConfig {
    /// Respects the `DOVMAP_QUIET` environment variable.
    pub fn from_env(verbosity: u8) -> Self {
        Self {
            quiet_mode: std::env::var("DOVMAP_QUIET").is_ok(),
            verbosity,
        }
    }

    pub fn quiet() -> Self {
        Self {
            quiet_mode: true,
            verbosity: 0,
        }
    }

    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode || self.verbosity > 0 {
            return false;
        }

        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }

    /// A bar of `len` steps, or a hidden one when progress is not shown.
    pub fn create_bar(&self, len: u64, message: &str) -> ProgressBar {
        if !self.should_show_progress() {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(TEMPLATE_CLASSIFY)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░  "),
        );
        bar.set_message(message.to_string());
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_runs_hide_progress() {
        let config = ProgressConfig {
            quiet_mode: false,
            verbosity: 1,
        };
        assert!(!config.should_show_progress());
        assert!(ProgressConfig::quiet().create_bar(10, "x").is_hidden());
    }
}
