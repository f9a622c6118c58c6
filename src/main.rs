//! signal-sandbox - Signal Desktop in a distrobox sandbox
//!
//! Detects the host's package manager and shell, makes sure distrobox and a
//! container backend are available, prepares a reusable Ubuntu sandbox,
//! installs Signal Desktop inside it and exports the launcher to the host.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod error;
mod export;
mod host;
mod logging;
mod operations;
mod profile;
mod runner;
mod sandbox;
mod script;
mod temp;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.log_json);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(cli.config, args),
        Commands::Detect(args) => commands::detect::run(cli.config, args),
        Commands::Script => commands::script::run(cli.config),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
