//! Detect command implementation

use std::path::PathBuf;

use console::style;

use crate::cli::DetectArgs;
use crate::config::Settings;
use crate::error::{self, Result};
use crate::host::{self, HostEnvironment, RunContext};
use crate::profile;
use crate::runner::SystemRunner;

pub fn run(config: Option<PathBuf>, args: DetectArgs) -> Result<()> {
    let settings = Settings::load(config.as_deref())?;
    let ctx = RunContext::from_process_env()?;
    let env = host::probe(&ctx, &SystemRunner, &settings);

    if args.json {
        let json = serde_json::to_string_pretty(&env)
            .map_err(|e| error::fs::serialize_failed("host environment", e.to_string()))?;
        println!("{json}");
    } else {
        for line in describe(&env, &ctx, &settings) {
            println!("{line}");
        }
    }
    Ok(())
}

fn yes_no(found: bool) -> String {
    if found {
        style("yes").green().to_string()
    } else {
        style("no").red().to_string()
    }
}

/// Human-readable report of the probed host
pub fn describe(env: &HostEnvironment, ctx: &RunContext, settings: &Settings) -> Vec<String> {
    vec![
        format!("{}", style("Host").bold()),
        format!("  package manager:  {}", env.package_manager),
        format!(
            "  shell:            {} ({})",
            env.shell,
            profile::config_file_for(env.shell, &ctx.home).display()
        ),
        format!(
            "  {:<17} {}",
            format!("{}:", settings.container_tool),
            yes_no(env.has_container_tool)
        ),
        format!("  container backend: {}", yes_no(env.has_container_runtime)),
        format!("  curl:             {}", yes_no(env.has_curl)),
        format!("  wget:             {}", yes_no(env.has_wget)),
        format!("  sudo:             {}", yes_no(env.has_sudo)),
        format!("  sh:               {}", yes_no(env.has_posix_shell)),
    ]
}
