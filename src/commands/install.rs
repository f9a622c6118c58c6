//! Install command implementation
//!
//! The installation process:
//! 1. Load settings (file, environment, flags) and the host context
//! 2. Probe the host and check prerequisites
//! 3. Print the plan and stop when `--dry-run` is given
//! 4. Otherwise run the workflow and print launch instructions

use std::io::IsTerminal;
use std::path::PathBuf;

use console::style;

use crate::cli::InstallArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::export;
use crate::host::RunContext;
use crate::operations::install::InstallSummary;
use crate::operations::{InstallOperation, InstallOptions};
use crate::runner::SystemRunner;
use crate::script;
use crate::ui::{self, ConsoleReporter};
use crate::ui::confirm::{DefaultAnswer, InquirePrompter, Prompter};

pub fn run(config: Option<PathBuf>, args: InstallArgs) -> Result<()> {
    let settings = Settings::load(config.as_deref())?.with_overrides(args.overrides())?;
    let mut ctx = RunContext::from_process_env()?;
    let options = InstallOptions::from(&args);

    // Without a terminal the recreate question falls back to its default (reuse)
    let prompter: Box<dyn Prompter> = if std::io::stdin().is_terminal() {
        Box::new(InquirePrompter)
    } else {
        Box::new(DefaultAnswer)
    };
    let runner = SystemRunner;

    let mut op = InstallOperation::new(
        &settings,
        &mut ctx,
        &runner,
        prompter.as_ref(),
        &ConsoleReporter,
        options,
    );
    let env = op.probe()?;

    if op.options().dry_run {
        print_plan(&op.plan(&env), &settings);
        return Ok(());
    }

    let summary = op.execute(&env)?;
    print_finished(&settings, &summary);
    Ok(())
}

fn print_plan(steps: &[String], settings: &Settings) {
    println!();
    println!("{}", style("Dry run, nothing was changed. Plan:").bold());
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    println!();
    println!("{}", style("Script run inside the sandbox:").bold());
    print!("{}", script::build_install_script(settings));
}

fn print_finished(settings: &Settings, summary: &InstallSummary) {
    println!();
    ui::success(&format!(
        "{} is installed in sandbox '{}'",
        settings.app_id, settings.sandbox_name
    ));
    for line in export::launch_instructions(
        &settings.container_tool,
        &settings.sandbox_name,
        &settings.app_id,
    ) {
        println!("  {line}");
    }
    if summary.tool.needs_shell_reload() {
        ui::notice(&format!(
            "{} was installed under {}. Reload your shell profile before using it directly.",
            settings.container_tool, settings.install_prefix
        ));
    }
}
