use clap::Parser;

/// Arguments for the detect command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the detected host:\n    signal-sandbox detect\n\n\
                  Machine-readable output:\n    signal-sandbox detect --json")]
pub struct DetectArgs {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
