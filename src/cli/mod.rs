//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - detect: Detect command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod detect;
pub mod install;

pub use completions::CompletionsArgs;
pub use detect::DetectArgs;
pub use install::InstallArgs;

/// signal-sandbox - Signal Desktop in a distrobox sandbox
///
/// Installs the container tool if needed, prepares a sandbox, installs
/// Signal Desktop inside it and exports the launcher to the host.
#[derive(Parser, Debug)]
#[command(
    name = "signal-sandbox",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install Signal Desktop inside a distrobox sandbox",
    long_about = "signal-sandbox installs distrobox when it is missing, creates or reuses an \
                  Ubuntu sandbox, installs Signal Desktop from its apt repository inside it, \
                  and exports the application to the host launcher menu.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  signal-sandbox install                     \x1b[90m# Install with defaults\x1b[0m\n   \
                  signal-sandbox install --recreate          \x1b[90m# Start from a fresh sandbox\x1b[0m\n   \
                  signal-sandbox install --dry-run           \x1b[90m# Show the plan only\x1b[0m\n   \
                  signal-sandbox detect --json               \x1b[90m# Print what was found on this host\x1b[0m\n   \
                  signal-sandbox script                      \x1b[90m# Print the in-sandbox install script\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/signal-sandbox/config.yaml)
    #[arg(long, short = 'c', global = true, env = "SIGNAL_SANDBOX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Emit diagnostic logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install Signal Desktop into the sandbox
    Install(InstallArgs),

    /// Show what was detected about this host
    Detect(DetectArgs),

    /// Print the script that runs inside the sandbox
    Script,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
