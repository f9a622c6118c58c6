//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides a scratch host layout (home, bin, tmp under one temp
//! directory), fake executables, a [`RecordingRunner`] that stands in for the
//! container tool and package manager, and a [`FixedAnswer`] prompter.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, test_context, RecordingRunner};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     let ctx = test_context(&temp);
//!     let runner = RecordingRunner::new();
//!     runner.respond("distrobox list", listing_output(&["ubuntu-signal"]));
//! }
//! ```

#![allow(clippy::unwrap_used, clippy::panic)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::Result;
use crate::host::{RunContext, SearchPath};
use crate::runner::{CommandOutput, CommandRunner, Invocation};
use crate::ui::confirm::Prompter;

/// Create a temp directory in the system temp location.
///
/// Uses `crate::temp::temp_dir_base()` to ensure temp dirs are never
/// created under the current working directory.
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Scratch context: `home/`, `bin/` (the only PATH entry) and `tmp/`
pub fn test_context(temp: &TempDir) -> RunContext {
    let home = temp.path().join("home");
    let bin = temp.path().join("bin");
    let tmp = temp.path().join("tmp");
    for dir in [&home, &bin, &tmp] {
        fs::create_dir_all(dir).unwrap();
    }
    RunContext {
        home,
        search_path: SearchPath::from_os(bin.as_os_str()),
        shell: Some("/bin/bash".to_string()),
        user: Some("tester".to_string()),
        temp_dir: tmp,
    }
}

/// Write an executable `#!/bin/sh` stub named `name` into `dir`
pub fn fake_executable(dir: &Path, name: &str) -> PathBuf {
    fake_script(dir, name, "exit 0\n")
}

/// Write an executable shell script with the given body into `dir`
pub fn fake_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

/// Successful output with the given stdout
pub fn ok_output(stdout: &str) -> CommandOutput {
    CommandOutput {
        status_code: 0,
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Failed output with the given status and stderr
pub fn failed_output(status_code: i32, stderr: &str) -> CommandOutput {
    CommandOutput {
        status_code,
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// `distrobox list` table containing the given sandbox names
pub fn listing_output(names: &[&str]) -> CommandOutput {
    let mut table = String::from("ID           | NAME                 | STATUS             | IMAGE\n");
    for (i, name) in names.iter().enumerate() {
        table.push_str(&format!(
            "{i:0>12} | {name:<20} | Exited (0) 2 days ago | docker.io/library/ubuntu:latest\n"
        ));
    }
    ok_output(&table)
}

/// A file argument as it looked while the command ran
#[derive(Debug, Clone)]
pub struct ObservedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Records every invocation and answers from a scripted table.
///
/// Unmatched invocations succeed with empty output. Matching is by prefix of
/// the invocation's display string, first rule wins.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    responses: RefCell<Vec<(String, CommandOutput)>>,
    creates: RefCell<Vec<(String, PathBuf)>>,
    panics_on: RefCell<Option<String>>,
    observed: RefCell<Vec<ObservedFile>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, prefix: &str, output: CommandOutput) {
        self.responses
            .borrow_mut()
            .push((prefix.to_string(), output));
    }

    pub fn fail(&self, prefix: &str, status_code: i32) {
        self.respond(prefix, failed_output(status_code, "simulated failure"));
    }

    /// Make a matching invocation drop an executable at `path`
    pub fn creates(&self, prefix: &str, path: PathBuf) {
        self.creates.borrow_mut().push((prefix.to_string(), path));
    }

    /// Panic when a matching invocation runs
    pub fn panics_on(&self, prefix: &str) {
        *self.panics_on.borrow_mut() = Some(prefix.to_string());
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn argvs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }

    /// Existing files passed as arguments, captured at call time
    pub fn observed_files(&self) -> Vec<ObservedFile> {
        self.observed.borrow().clone()
    }

    /// Whether any recorded invocation starts with `prefix`
    pub fn called(&self, prefix: &str) -> bool {
        self.argvs().iter().any(|a| a.starts_with(prefix))
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation, _path: &SearchPath) -> Result<CommandOutput> {
        let line = invocation.to_string();
        self.calls.borrow_mut().push(invocation.clone());

        for arg in &invocation.args {
            let path = Path::new(arg);
            if path.is_absolute() && path.is_file() {
                self.observed.borrow_mut().push(ObservedFile {
                    path: path.to_path_buf(),
                    contents: fs::read_to_string(path).unwrap_or_default(),
                });
            }
        }

        if let Some(prefix) = self.panics_on.borrow().as_deref() {
            if line.starts_with(prefix) {
                panic!("simulated abort during '{line}'");
            }
        }

        for (prefix, path) in self.creates.borrow().iter() {
            if line.starts_with(prefix.as_str()) {
                let dir = path.parent().unwrap();
                let name = path.file_name().unwrap().to_str().unwrap();
                fake_executable(dir, name);
            }
        }

        let output = self
            .responses
            .borrow()
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_default();
        Ok(output)
    }
}

/// Prompter that always gives the same answer and counts questions
pub struct FixedAnswer {
    answer: bool,
    asked: Cell<usize>,
}

impl FixedAnswer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Cell::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.get()
    }
}

impl Prompter for FixedAnswer {
    fn confirm(&self, _question: &str, _default: bool) -> Result<bool> {
        self.asked.set(self.asked.get() + 1);
        Ok(self.answer)
    }
}
