use clap::Parser;

use crate::config::Overrides;

/// Arguments for the install command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Install with defaults:\n    signal-sandbox install\n\n\
                   Replace an existing sandbox without asking:\n    signal-sandbox install --recreate\n\n\
                   Use another sandbox name and image:\n    signal-sandbox install --name signal-noble --image ubuntu:24.04\n\n\
                   Show what would happen:\n    signal-sandbox install --dry-run")]
pub struct InstallArgs {
    /// Remove and recreate the sandbox if it already exists
    #[arg(long, conflicts_with = "reuse")]
    pub recreate: bool,

    /// Keep an existing sandbox without asking
    #[arg(long)]
    pub reuse: bool,

    /// Sandbox name
    #[arg(long, short = 'n', value_name = "NAME", env = "SIGNAL_SANDBOX_NAME")]
    pub name: Option<String>,

    /// Container image the sandbox is created from
    #[arg(long, short = 'i', value_name = "IMAGE", env = "SIGNAL_SANDBOX_IMAGE")]
    pub image: Option<String>,

    /// Package installed inside the sandbox and exported to the host
    #[arg(long, value_name = "PACKAGE", env = "SIGNAL_SANDBOX_APP")]
    pub app: Option<String>,

    /// Give up on any external command after this many seconds
    #[arg(long, value_name = "SECS", env = "SIGNAL_SANDBOX_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl InstallArgs {
    /// Settings given on the command line or through the environment
    pub fn overrides(&self) -> Overrides {
        Overrides {
            sandbox_name: self.name.clone(),
            image: self.image.clone(),
            app_id: self.app.clone(),
            command_timeout_secs: self.timeout,
        }
    }
}
