//! Host environment model
//!
//! This module handles:
//! - The package manager and shell kinds the installer knows about
//! - The [`HostEnvironment`] snapshot produced once per run by [`probe`]
//! - The [`RunContext`] threaded through every step (home, PATH, temp dir)

pub mod probe;
mod search_path;

pub use probe::probe;
pub use search_path::SearchPath;

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SandboxError};
use crate::temp::temp_dir_base;

/// Host package managers, in probe priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Zypper,
    Apk,
    Unknown,
}

impl PackageManagerKind {
    /// Known managers in the order they are probed
    pub const PROBE_ORDER: [PackageManagerKind; 6] = [
        PackageManagerKind::Apt,
        PackageManagerKind::Dnf,
        PackageManagerKind::Yum,
        PackageManagerKind::Pacman,
        PackageManagerKind::Zypper,
        PackageManagerKind::Apk,
    ];

    /// Executable whose presence identifies this manager
    pub fn executable(self) -> Option<&'static str> {
        match self {
            PackageManagerKind::Apt => Some("apt-get"),
            PackageManagerKind::Dnf => Some("dnf"),
            PackageManagerKind::Yum => Some("yum"),
            PackageManagerKind::Pacman => Some("pacman"),
            PackageManagerKind::Zypper => Some("zypper"),
            PackageManagerKind::Apk => Some("apk"),
            PackageManagerKind::Unknown => None,
        }
    }

    /// Non-interactive install arguments for `packages`, program first
    pub fn install_argv(self, packages: &[&str]) -> Option<Vec<String>> {
        let program = self.executable()?;
        let verb: &[&str] = match self {
            PackageManagerKind::Apt
            | PackageManagerKind::Dnf
            | PackageManagerKind::Yum
            | PackageManagerKind::Zypper => &["install", "-y"],
            PackageManagerKind::Pacman => &["-S", "--noconfirm", "--needed"],
            PackageManagerKind::Apk => &["add"],
            PackageManagerKind::Unknown => return None,
        };
        let mut argv = vec![program.to_string()];
        if self == PackageManagerKind::Zypper {
            argv.push("--non-interactive".to_string());
        }
        argv.extend(verb.iter().map(ToString::to_string));
        argv.extend(packages.iter().map(ToString::to_string));
        Some(argv)
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackageManagerKind::Apt => "apt",
            PackageManagerKind::Dnf => "dnf",
            PackageManagerKind::Yum => "yum",
            PackageManagerKind::Pacman => "pacman",
            PackageManagerKind::Zypper => "zypper",
            PackageManagerKind::Apk => "apk",
            PackageManagerKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Interactive shells, grouped by startup-file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
    Ksh,
    Tcsh,
    Csh,
    Other,
}

impl ShellKind {
    /// Map a shell path such as `/usr/bin/zsh` or a login name like `-bash`
    pub fn from_path(shell: &str) -> Self {
        let name = Path::new(shell.trim())
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .trim_start_matches('-');
        match name {
            "bash" => ShellKind::Bash,
            "zsh" => ShellKind::Zsh,
            "fish" => ShellKind::Fish,
            "ksh" | "ksh93" | "mksh" | "pdksh" => ShellKind::Ksh,
            "tcsh" => ShellKind::Tcsh,
            "csh" => ShellKind::Csh,
            _ => ShellKind::Other,
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShellKind::Bash => "bash",
            ShellKind::Zsh => "zsh",
            ShellKind::Fish => "fish",
            ShellKind::Ksh => "ksh",
            ShellKind::Tcsh => "tcsh",
            ShellKind::Csh => "csh",
            ShellKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// What the host offers, derived once per run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostEnvironment {
    pub package_manager: PackageManagerKind,
    pub shell: ShellKind,
    /// The container tool itself (distrobox) resolves on PATH
    pub has_container_tool: bool,
    /// A container backend (podman or docker) resolves on PATH
    pub has_container_runtime: bool,
    pub has_curl: bool,
    pub has_wget: bool,
    pub has_sudo: bool,
    /// A POSIX `sh` to run downloaded installers with
    pub has_posix_shell: bool,
}

/// Per-run state shared by every step
#[derive(Debug, Clone)]
pub struct RunContext {
    pub home: PathBuf,
    pub search_path: SearchPath,
    /// Value of `$SHELL`, if set
    pub shell: Option<String>,
    /// Login name used for the user-database fallback
    pub user: Option<String>,
    /// Where the install script is materialized
    pub temp_dir: PathBuf,
}

impl RunContext {
    /// Build the context from the current process environment
    pub fn from_process_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or(SandboxError::HomeNotFound)?;
        Ok(Self {
            home,
            search_path: SearchPath::from_env(),
            shell: non_empty_var("SHELL"),
            user: non_empty_var("USER").or_else(|| non_empty_var("LOGNAME")),
            temp_dir: temp_dir_base(),
        })
    }

    /// Expand a leading `~` against the run's home directory
    pub fn expand_home(&self, path: &str) -> PathBuf {
        if path == "~" {
            return self.home.clone();
        }
        match path.strip_prefix("~/") {
            Some(rest) => self.home.join(rest),
            None => PathBuf::from(path),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
