//! In-sandbox installation script
//!
//! The script trusts the application's package repository, installs the
//! application, and removes what it downloaded. It runs under `set -euo
//! pipefail`, so the first failing step ends it. Downloads go to a scratch
//! directory that an `EXIT` trap removes however the script ends.
//!
//! [`InstallScript`] owns the temporary file. The file is removed when the
//! value is closed or dropped, which covers early returns and unwinding.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{self, Result};
use crate::host::RunContext;
use crate::runner::{CommandRunner, Invocation};
use crate::ui;

/// Number of numbered steps the script announces
pub const STEP_COUNT: usize = 5;

const KEYRING_DIR: &str = "/usr/share/keyrings";
const SOURCES_DIR: &str = "/etc/apt/sources.list.d";

/// Quote `value` for a POSIX shell
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Render the installation script for `settings`
pub fn build_install_script(settings: &Settings) -> String {
    let app = settings.app_id.as_str();
    let keyring = settings.keyring_file.as_str();
    let sources = settings.sources_file();
    let packages = format!(
        "{} {}",
        shell_quote(app),
        shell_quote(&settings.audio_package)
    );

    let steps = [
        (
            "Fetching signing key".to_string(),
            vec![
                format!(
                    "wget -qO- {} | gpg --dearmor > {keyring}",
                    shell_quote(&settings.key_url)
                ),
                format!("sudo install -D -m 644 {keyring} {KEYRING_DIR}/{keyring}"),
            ],
        ),
        (
            "Registering package source".to_string(),
            vec![
                format!(
                    "wget -qO {sources} {}",
                    shell_quote(&settings.sources_url)
                ),
                format!("sudo install -D -m 644 {sources} {SOURCES_DIR}/{sources}"),
            ],
        ),
        (
            format!("Installing {app}"),
            vec![
                "sudo apt-get update".to_string(),
                format!(
                    "sudo env DEBIAN_FRONTEND=noninteractive apt-get install -y {packages}"
                ),
            ],
        ),
        (format!("{app} installed"), Vec::new()),
        (
            "Cleaning up".to_string(),
            vec![format!("rm -f {keyring} {sources}")],
        ),
    ];

    let mut script = String::from(
        "#!/usr/bin/env bash\nset -euo pipefail\n\nworkdir=\"$(mktemp -d)\"\ntrap 'rm -rf \"$workdir\"' EXIT\ncd \"$workdir\"\n",
    );
    for (i, (title, commands)) in steps.iter().enumerate() {
        script.push_str(&format!(
            "\necho {}\n",
            shell_quote(&format!("[{}/{STEP_COUNT}] {title}", i + 1))
        ));
        for command in commands {
            script.push_str(command);
            script.push('\n');
        }
    }
    script
}

/// The script materialized as a temporary file
#[derive(Debug)]
pub struct InstallScript {
    file: NamedTempFile,
}

impl InstallScript {
    /// Write `content` to a new executable file in `dir`
    pub fn materialize(content: &str, dir: &Path) -> Result<Self> {
        let write_err = |e: std::io::Error| error::script::write_failed(e.to_string());

        let mut file = tempfile::Builder::new()
            .prefix("signal-sandbox-")
            .suffix(".sh")
            .tempfile_in(dir)
            .map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(file.path(), fs::Permissions::from_mode(0o755))
                .map_err(write_err)?;
        }

        debug!(path = %file.path().display(), "materialized install script");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, reporting failure
    pub fn close(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close().map_err(|e| {
            error::fs::io_error(format!("Failed to remove {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "removed install script");
        Ok(())
    }
}

/// Run `script` inside the named sandbox through the container tool
pub fn run_in_sandbox(
    tool: &str,
    name: &str,
    script: &InstallScript,
    timeout: Option<std::time::Duration>,
    ctx: &RunContext,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let inv = Invocation::new(tool)
        .args(["enter", name, "--", "bash"])
        .arg(script.path().display().to_string())
        .timeout(timeout);
    info!(command = %inv, "running install script in sandbox");
    let output = runner.run(&inv, &ctx.search_path)?;
    if !output.success() {
        return Err(error::script::failed(name, output.failure_reason()));
    }
    Ok(())
}

/// Materialize, run and remove the installation script
///
/// The script file is gone when this returns, whatever the outcome.
pub fn install_in_sandbox(
    settings: &Settings,
    ctx: &RunContext,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let script = InstallScript::materialize(&build_install_script(settings), &ctx.temp_dir)?;
    let outcome = run_in_sandbox(
        &settings.container_tool,
        &settings.sandbox_name,
        &script,
        settings.timeout(),
        ctx,
        runner,
    );
    if let Err(e) = script.close() {
        ui::warn(&format!("Could not remove the install script: {e}"));
    }
    outcome
}
