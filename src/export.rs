//! Exporting the installed application to the host's launcher menu

use tracing::info;

use crate::error::{Result, SandboxError};
use crate::host::RunContext;
use crate::runner::{CommandRunner, Invocation};

/// Build the invocation that exports `app_id` from the sandbox
pub fn export_invocation(tool: &str, sandbox: &str, app_id: &str) -> Invocation {
    Invocation::new(tool).args(["enter", sandbox, "--", "distrobox-export", "--app", app_id])
}

/// Create a host launcher entry for `app_id` installed in `sandbox`
pub fn export_app(
    tool: &str,
    sandbox: &str,
    app_id: &str,
    ctx: &RunContext,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let inv = export_invocation(tool, sandbox, app_id);
    info!(command = %inv, "exporting application");
    let output = runner.run(&inv, &ctx.search_path)?;
    if !output.success() {
        return Err(SandboxError::ExportFailed {
            name: sandbox.to_string(),
            app: app_id.to_string(),
            reason: output.failure_reason(),
        });
    }
    Ok(())
}

/// How to start the exported application
pub fn launch_instructions(tool: &str, sandbox: &str, app_id: &str) -> Vec<String> {
    vec![
        format!("Search for '{app_id}' in your application menu, or run:"),
        format!("  {tool} enter {sandbox} -- {app_id}"),
    ]
}
