//! User-facing presentation layer
//!
//! This module handles:
//! - Numbered workflow stages and outcome lines styled with `console`
//! - A spinner for short captured queries (indicatif)
//! - The single interactive yes/no question, see [`confirm`]
//!
//! All stage reporting goes through the [`Reporter`] trait so the workflow
//! can run silently under test.

pub mod confirm;

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Receives workflow progress
pub trait Reporter {
    /// A new numbered stage begins
    fn stage(&self, index: usize, total: usize, title: &str);

    /// Supplementary line under the current stage
    fn detail(&self, message: &str);

    /// Stage-level success line
    fn done(&self, message: &str);
}

/// Prints stages to stdout with colors when attached to a terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn stage(&self, index: usize, total: usize, title: &str) {
        println!(
            "{} {}",
            style(format!("[{index}/{total}]")).cyan().bold(),
            style(title).bold()
        );
    }

    fn detail(&self, message: &str) {
        println!("      {message}");
    }

    fn done(&self, message: &str) {
        println!("      {} {message}", style("✓").green());
    }
}

/// Reporter that prints nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn stage(&self, _index: usize, _total: usize, _title: &str) {}

    fn detail(&self, _message: &str) {}

    fn done(&self, _message: &str) {}
}

/// Highlighted notice, e.g. a shell reload reminder
pub fn notice(message: &str) {
    println!("{} {message}", style("note:").yellow().bold());
}

pub fn warn(message: &str) {
    eprintln!("{} {message}", style("warning:").yellow().bold());
}

pub fn success(message: &str) {
    println!("{} {message}", style("✓").green().bold());
}

/// Steady spinner with `message`; hidden automatically when not on a terminal
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .map(|s| s.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]))
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
