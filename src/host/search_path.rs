//! Executable search path carried through a run
//!
//! The installer may put a freshly installed tool's directory on `PATH`
//! halfway through a run. Instead of mutating the process environment, the
//! updated value lives here and is handed to every lookup and child process.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Ordered list of directories searched for executables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Parse a `PATH`-style value
    pub fn from_os(value: &OsStr) -> Self {
        Self {
            dirs: env::split_paths(value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
        }
    }

    /// Snapshot of the current process `PATH`
    pub fn from_env() -> Self {
        env::var_os("PATH")
            .map(|v| Self::from_os(&v))
            .unwrap_or_default()
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    /// Put `dir` in front of the search order
    ///
    /// Returns `false` when the directory was already present.
    pub fn prepend(&mut self, dir: impl Into<PathBuf>) -> bool {
        let dir = dir.into();
        if self.contains(&dir) {
            return false;
        }
        self.dirs.insert(0, dir);
        true
    }

    /// Value suitable for a child's `PATH` variable
    pub fn to_os_string(&self) -> OsString {
        env::join_paths(&self.dirs).unwrap_or_default()
    }

    /// Resolve `program` to an executable in one of the directories
    pub fn find(&self, program: &str) -> Option<PathBuf> {
        if self.dirs.is_empty() {
            return None;
        }
        which::which_in(program, Some(self.to_os_string()), Path::new("/")).ok()
    }

    pub fn has(&self, program: &str) -> bool {
        self.find(program).is_some()
    }
}
