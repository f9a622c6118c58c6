//! Common test utilities for signal-sandbox integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Stub container tool: logs its arguments and answers `list` from `$STUB_SANDBOX`
const DISTROBOX_STUB: &str = r#"echo "distrobox $*" >> "$STUB_LOG"
case "$1" in
  list)
    printf 'ID | NAME | STATUS | IMAGE\n'
    if [ -n "$STUB_SANDBOX" ]; then
      printf 'abc123 | %s | Up 2 hours | ubuntu:latest\n' "$STUB_SANDBOX"
    fi
    ;;
  enter)
    if [ "$4" = "bash" ] && [ -n "$STUB_SCRIPT_STATUS" ]; then
      exit "$STUB_SCRIPT_STATUS"
    fi
    ;;
esac
exit 0
"#;

/// An isolated host: its own HOME, config dir, scratch dir and PATH
pub struct TestHost {
    pub temp: TempDir,
    pub home: PathBuf,
    pub bin: PathBuf,
    pub scratch: PathBuf,
    pub config_home: PathBuf,
}

impl TestHost {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let bin = temp.path().join("bin");
        let scratch = temp.path().join("scratch");
        let config_home = temp.path().join("config");
        for dir in [&home, &bin, &scratch, &config_home] {
            fs::create_dir_all(dir).expect("Failed to create host directory");
        }
        Self {
            temp,
            home,
            bin,
            scratch,
            config_home,
        }
    }

    /// Put an executable shell script named `name` on the host PATH
    pub fn install_stub(&self, name: &str, body: &str) -> PathBuf {
        let path = self.bin.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}")).expect("Failed to write stub");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to make stub executable");
        }
        path
    }

    /// Put do-nothing executables on the host PATH
    pub fn install_noops(&self, names: &[&str]) {
        for name in names {
            self.install_stub(name, "exit 0\n");
        }
    }

    /// Put the logging distrobox stub and a podman backend on the host PATH
    pub fn install_distrobox(&self) {
        self.install_stub("distrobox", DISTROBOX_STUB);
        self.install_noops(&["podman"]);
    }

    pub fn log_path(&self) -> PathBuf {
        self.temp.path().join("calls.log")
    }

    /// Lines logged by the stubs, in call order
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// Files left in the scratch directory
    pub fn scratch_entries(&self) -> usize {
        fs::read_dir(&self.scratch)
            .expect("Failed to read scratch directory")
            .count()
    }

    pub fn write_file(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    /// The binary, wired to this host only
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("signal-sandbox").expect("binary should build");
        cmd.env_clear()
            .env("HOME", &self.home)
            .env("PATH", &self.bin)
            .env("SHELL", "/bin/bash")
            .env("USER", "tester")
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("SIGNAL_SANDBOX_TMPDIR", &self.scratch)
            .env("STUB_LOG", self.log_path());
        cmd
    }
}
