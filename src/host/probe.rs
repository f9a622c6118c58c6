//! Environment prober
//!
//! Pure queries against the run's search path and the user database. None of
//! these fail: an unrecognized host yields [`PackageManagerKind::Unknown`] or
//! [`ShellKind::Other`], which the workflow handles downstream.

use tracing::debug;

use super::{HostEnvironment, PackageManagerKind, RunContext, SearchPath, ShellKind};
use crate::config::Settings;
use crate::runner::{CommandRunner, Invocation};

/// First known package manager found on the search path
pub fn detect_package_manager(path: &SearchPath) -> PackageManagerKind {
    PackageManagerKind::PROBE_ORDER
        .into_iter()
        .find(|pm| pm.executable().is_some_and(|exe| path.has(exe)))
        .unwrap_or(PackageManagerKind::Unknown)
}

/// The user's shell from `$SHELL`, falling back to the user database
pub fn detect_shell(ctx: &RunContext, runner: &dyn CommandRunner) -> ShellKind {
    if let Some(shell) = &ctx.shell {
        return ShellKind::from_path(shell);
    }
    login_shell(ctx, runner)
        .map(|shell| ShellKind::from_path(&shell))
        .unwrap_or(ShellKind::Other)
}

fn login_shell(ctx: &RunContext, runner: &dyn CommandRunner) -> Option<String> {
    let user = ctx.user.as_deref()?;
    if !ctx.search_path.has("getent") {
        return None;
    }
    let inv = Invocation::new("getent").args(["passwd", user]).capture();
    let output = runner.run(&inv, &ctx.search_path).ok()?;
    if !output.success() {
        debug!(user, status = output.status_code, "getent passwd found no entry");
        return None;
    }
    parse_passwd_shell(&output.stdout_str())
}

/// Seventh field of the first `passwd` line
pub fn parse_passwd_shell(entry: &str) -> Option<String> {
    entry
        .lines()
        .next()?
        .split(':')
        .nth(6)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Probe everything the workflow needs to know about the host
pub fn probe(ctx: &RunContext, runner: &dyn CommandRunner, settings: &Settings) -> HostEnvironment {
    let path = &ctx.search_path;
    let shell = detect_shell(ctx, runner);
    let package_manager = detect_package_manager(path);
    let env = HostEnvironment {
        package_manager,
        shell,
        has_container_tool: path.has(&settings.container_tool),
        has_container_runtime: settings.backend_candidates().iter().any(|b| path.has(b)),
        has_curl: path.has("curl"),
        has_wget: path.has("wget"),
        has_sudo: path.has("sudo"),
        has_posix_shell: path.has("sh"),
    };
    debug!(?env, "probed host");
    env
}
