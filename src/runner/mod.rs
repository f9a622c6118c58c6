//! Subprocess seam
//!
//! Every external program (container tool, package manager, fetch tools,
//! `getent`) is invoked through the [`CommandRunner`] trait. The real
//! implementation lives in [`system`]; tests substitute a recording double.
//!
//! Runners never consult the process-global `PATH`: the caller passes the
//! [`SearchPath`] of the current run, which may have been extended earlier in
//! the same run.

mod system;

pub use system::SystemRunner;

use std::fmt;
use std::time::Duration;

use crate::error::Result;
use crate::host::SearchPath;

/// How a child's standard streams are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect stdout/stderr for the caller
    Capture,
    /// Share the terminal (needed for sudo prompts and live progress)
    Inherit,
}

/// A single program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub mode: OutputMode,
    pub stdin: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

impl Invocation {
    /// Create an invocation of `program` that shares the terminal
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            mode: OutputMode::Inherit,
            stdin: None,
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Capture output instead of sharing the terminal
    pub fn capture(mut self) -> Self {
        self.mode = OutputMode::Capture;
        self
    }

    /// Feed `input` to the child's stdin
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Program followed by its arguments, as they would be typed
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Exit status and collected output of a finished child
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }

    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Short human-readable reason for a non-zero exit
    ///
    /// Includes the last non-empty stderr line when output was captured.
    pub fn failure_reason(&self) -> String {
        let stderr = String::from_utf8_lossy(&self.stderr);
        match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
            Some(line) => format!("exit status {}: {}", self.status_code, line.trim()),
            None => format!("exit status {}", self.status_code),
        }
    }
}

/// Runs external programs on behalf of the workflow
pub trait CommandRunner {
    /// Run `invocation` to completion, resolving the program against `path`
    ///
    /// A non-zero exit is not an error at this level; callers inspect
    /// [`CommandOutput::success`] and map failures to their own error kinds.
    fn run(&self, invocation: &Invocation, path: &SearchPath) -> Result<CommandOutput>;
}
