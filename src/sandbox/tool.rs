//! Making sure the container tool is installed
//!
//! With a known package manager the tool and its default backend are
//! installed in one package-manager call. Otherwise the tool's universal
//! installer is downloaded with curl or wget, run with a user-local prefix,
//! and the prefix's `bin/` is registered on PATH. A backend is not installed
//! on that path, so one must already be present.

use std::path::PathBuf;

use tracing::info;

use crate::config::Settings;
use crate::error::{self, Result};
use crate::host::{HostEnvironment, PackageManagerKind, RunContext};
use crate::profile::{self, PathEntryOutcome};
use crate::runner::{CommandRunner, Invocation};

/// How the container tool became available
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// It was on PATH before the run
    AlreadyInstalled,
    /// Installed by the host package manager
    PackageManager(PackageManagerKind),
    /// Installed under a user-local prefix by the universal installer
    UserPrefix {
        bin_dir: PathBuf,
        profile: PathEntryOutcome,
    },
}

impl ToolOutcome {
    /// Whether other shells need a profile reload to find the tool
    pub fn needs_shell_reload(&self) -> bool {
        matches!(
            self,
            ToolOutcome::UserPrefix {
                profile: PathEntryOutcome::Added(_),
                ..
            }
        )
    }
}

/// Which program downloads the universal installer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTool {
    Curl,
    Wget,
}

impl FetchTool {
    /// curl when available, wget otherwise
    pub fn select(env: &HostEnvironment) -> Option<Self> {
        if env.has_curl {
            Some(FetchTool::Curl)
        } else if env.has_wget {
            Some(FetchTool::Wget)
        } else {
            None
        }
    }

    /// Download `url` to stdout
    pub fn download(self, url: &str) -> Invocation {
        match self {
            FetchTool::Curl => Invocation::new("curl").args(["-fsSL", url]),
            FetchTool::Wget => Invocation::new("wget").args(["-qO-", url]),
        }
    }
}

/// Prefix `argv` with sudo when requested
pub fn privileged(argv: Vec<String>, use_sudo: bool) -> Invocation {
    let mut argv = argv.into_iter();
    if use_sudo {
        Invocation::new("sudo").args(argv)
    } else {
        let program = argv.next().unwrap_or_default();
        Invocation::new(program).args(argv)
    }
}

/// Ensure the container tool resolves on the run's PATH
pub fn ensure_container_tool(
    env: &HostEnvironment,
    settings: &Settings,
    ctx: &mut RunContext,
    runner: &dyn CommandRunner,
) -> Result<ToolOutcome> {
    let tool = settings.container_tool.as_str();
    if ctx.search_path.has(tool) {
        return Ok(ToolOutcome::AlreadyInstalled);
    }

    let outcome = match env.package_manager {
        PackageManagerKind::Unknown => install_to_prefix(env, settings, ctx, runner)?,
        pm => install_with_package_manager(pm, env, settings, ctx, runner)?,
    };

    if !ctx.search_path.has(tool) {
        return Err(error::tool::not_found(tool));
    }
    info!(tool, ?outcome, "container tool available");
    Ok(outcome)
}

fn install_with_package_manager(
    pm: PackageManagerKind,
    env: &HostEnvironment,
    settings: &Settings,
    ctx: &RunContext,
    runner: &dyn CommandRunner,
) -> Result<ToolOutcome> {
    let tool = settings.container_tool.as_str();
    let argv = pm
        .install_argv(&[tool, settings.container_backend.as_str()])
        .ok_or_else(|| error::tool::install_failed(tool, pm.to_string(), "unsupported"))?;
    let inv = privileged(argv, env.has_sudo).timeout(settings.timeout());

    info!(command = %inv, "installing container tool");
    let output = runner.run(&inv, &ctx.search_path)?;
    if !output.success() {
        return Err(error::tool::install_failed(
            tool,
            pm.to_string(),
            output.failure_reason(),
        ));
    }
    Ok(ToolOutcome::PackageManager(pm))
}

fn install_to_prefix(
    env: &HostEnvironment,
    settings: &Settings,
    ctx: &mut RunContext,
    runner: &dyn CommandRunner,
) -> Result<ToolOutcome> {
    let tool = settings.container_tool.as_str();
    let installer = "universal installer";
    let fetch = FetchTool::select(env)
        .ok_or_else(|| error::prereq::no_fetch_tool(format!("{tool} installer")))?;
    if !env.has_posix_shell {
        return Err(error::prereq::missing(
            "POSIX shell (sh)",
            "The universal installer is a shell script; install dash or bash",
        ));
    }

    let download = fetch
        .download(&settings.installer_url)
        .capture()
        .timeout(settings.timeout());
    info!(command = %download, "downloading container tool installer");
    let script = runner.run(&download, &ctx.search_path)?;
    if !script.success() || script.stdout.is_empty() {
        return Err(error::tool::install_failed(tool, installer, script.failure_reason()));
    }

    let prefix = ctx.expand_home(&settings.install_prefix);
    let run = Invocation::new("sh")
        .args(["-s", "--", "--prefix"])
        .arg(prefix.display().to_string())
        .stdin(script.stdout)
        .timeout(settings.timeout());
    info!(prefix = %prefix.display(), "running container tool installer");
    let output = runner.run(&run, &ctx.search_path)?;
    if !output.success() {
        return Err(error::tool::install_failed(tool, installer, output.failure_reason()));
    }

    let bin_dir = prefix.join("bin");
    let profile = profile::ensure_path_entry(&bin_dir, env.shell, ctx)?;

    let backends = settings.backend_candidates();
    if !backends.iter().any(|b| ctx.search_path.has(b)) {
        return Err(error::tool::no_backend(&backends));
    }

    Ok(ToolOutcome::UserPrefix { bin_dir, profile })
}
