//! Shell profile editor
//!
//! Locates the startup file of the user's shell and appends a PATH extension
//! in that shell's syntax. Appending is idempotent: an existing equivalent
//! line (literal path, `$HOME/...`, `${HOME}/...` or `~/...`) is left alone.
//!
//! The run's [`SearchPath`](crate::host::SearchPath) is extended immediately
//! so later steps find the new tools without a shell restart; other sessions
//! only see the change after reloading their profile.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{self, Result};
use crate::host::{RunContext, ShellKind};
use crate::ui;

/// Comment written above every line this tool adds
const MARKER: &str = "# Added by signal-sandbox";

/// Result of [`ensure_path_entry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEntryOutcome {
    /// A line was appended to this file
    Added(PathBuf),
    /// This file already extends PATH with the directory
    AlreadyPresent(PathBuf),
}

impl PathEntryOutcome {
    pub fn file(&self) -> &Path {
        match self {
            PathEntryOutcome::Added(p) | PathEntryOutcome::AlreadyPresent(p) => p,
        }
    }
}

/// Canonical startup file for `shell` under `home`
pub fn config_file_for(shell: ShellKind, home: &Path) -> PathBuf {
    match shell {
        ShellKind::Bash => home.join(".bashrc"),
        ShellKind::Zsh => home.join(".zshrc"),
        ShellKind::Fish => home.join(".config").join("fish").join("config.fish"),
        ShellKind::Ksh => {
            let kshrc = home.join(".kshrc");
            if kshrc.exists() {
                kshrc
            } else {
                home.join(".profile")
            }
        }
        ShellKind::Tcsh | ShellKind::Csh => home.join(".cshrc"),
        ShellKind::Other => home.join(".profile"),
    }
}

/// The line that puts `dir` in front of PATH, in `shell` syntax
pub fn path_line(shell: ShellKind, dir: &Path, home: &Path) -> String {
    let dir = display_dir(dir, home);
    match shell {
        ShellKind::Fish => format!("fish_add_path \"{dir}\""),
        ShellKind::Tcsh | ShellKind::Csh => format!("set path=(\"{dir}\" $path)"),
        ShellKind::Bash | ShellKind::Zsh | ShellKind::Ksh | ShellKind::Other => {
            format!("export PATH=\"{dir}:$PATH\"")
        }
    }
}

/// Whether `content` already has a PATH extension for `dir`
pub fn has_path_entry(content: &str, shell: ShellKind, dir: &Path, home: &Path) -> bool {
    let spellings = spellings(dir, home);
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter(|line| is_path_assignment(line, shell))
        .any(|line| spellings.iter().any(|s| mentions(line, s)))
}

/// Append a PATH extension for `dir` to the shell's startup file, once
///
/// Always extends `ctx.search_path` so the rest of the run sees `dir`.
pub fn ensure_path_entry(
    dir: &Path,
    shell: ShellKind,
    ctx: &mut RunContext,
) -> Result<PathEntryOutcome> {
    if ctx.search_path.prepend(dir) {
        debug!(dir = %dir.display(), "added to run PATH");
    }

    let file = config_file_for(shell, &ctx.home);
    let existing = match fs::read_to_string(&file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(error::fs::profile_write_failed(
                file.display().to_string(),
                e.to_string(),
            ));
        }
    };

    if has_path_entry(&existing, shell, dir, &ctx.home) {
        debug!(file = %file.display(), "PATH entry already present");
        return Ok(PathEntryOutcome::AlreadyPresent(file));
    }

    append_entry(&file, &existing, &path_line(shell, dir, &ctx.home))?;
    info!(file = %file.display(), dir = %dir.display(), "extended PATH in shell profile");
    ui::notice(&format!(
        "Added {} to PATH in {}. Restart your shell or run 'source {}' to use it in other sessions.",
        dir.display(),
        file.display(),
        file.display()
    ));
    Ok(PathEntryOutcome::Added(file))
}

fn append_entry(file: &Path, existing: &str, line: &str) -> Result<()> {
    let write_err = |e: std::io::Error| {
        error::fs::profile_write_failed(file.display().to_string(), e.to_string())
    };

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut block = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        block.push('\n');
    }
    block.push('\n');
    block.push_str(MARKER);
    block.push('\n');
    block.push_str(line);
    block.push('\n');

    let mut handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .map_err(write_err)?;
    handle.write_all(block.as_bytes()).map_err(write_err)
}

/// `$HOME/...` for directories under home, the literal path otherwise
fn display_dir(dir: &Path, home: &Path) -> String {
    match dir.strip_prefix(home) {
        Ok(rel) if !rel.as_os_str().is_empty() => format!("$HOME/{}", rel.display()),
        _ => dir.display().to_string(),
    }
}

fn spellings(dir: &Path, home: &Path) -> Vec<String> {
    let mut forms = vec![dir.display().to_string()];
    if let Ok(rel) = dir.strip_prefix(home) {
        if !rel.as_os_str().is_empty() {
            let rel = rel.display();
            forms.push(format!("$HOME/{rel}"));
            forms.push(format!("${{HOME}}/{rel}"));
            forms.push(format!("~/{rel}"));
        }
    }
    forms
}

fn is_path_assignment(line: &str, shell: ShellKind) -> bool {
    match shell {
        ShellKind::Fish => {
            line.starts_with("fish_add_path")
                || (line.starts_with("set ") && line.contains("PATH"))
        }
        ShellKind::Tcsh | ShellKind::Csh => {
            line.starts_with("set path") || line.starts_with("setenv PATH")
        }
        ShellKind::Bash | ShellKind::Zsh | ShellKind::Ksh | ShellKind::Other => {
            line.starts_with("export PATH=") || line.starts_with("PATH=")
        }
    }
}

/// `needle` occurs in `line` as a whole path, not as a prefix of a longer one
fn mentions(line: &str, needle: &str) -> bool {
    line.match_indices(needle).any(|(idx, _)| {
        line[idx + needle.len()..]
            .chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.')))
    })
}
