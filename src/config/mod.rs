//! Installer settings
//!
//! Fixed identifiers and URLs come with built-in defaults and can be changed
//! from a YAML file, environment variables or flags. Layering, highest first:
//! command-line flag, `SIGNAL_SANDBOX_*` variable (both handled by clap), YAML
//! file, defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, Result};

/// Directory name under the user's config directory
const CONFIG_DIR: &str = "signal-sandbox";

/// Settings file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Backends the container tool can drive, in preference order
pub const KNOWN_BACKENDS: [&str; 2] = ["podman", "docker"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Name of the sandbox the application lives in
    pub sandbox_name: String,
    /// Image the sandbox is created from
    pub image: String,
    /// Package installed in the sandbox and exported to the host
    pub app_id: String,
    /// Audio library the application needs at runtime
    pub audio_package: String,
    /// Container-management tool
    pub container_tool: String,
    /// Backend installed alongside the tool by the host package manager
    pub container_backend: String,
    /// Prefix for the universal installer; its `bin/` is added to PATH
    pub install_prefix: String,
    pub key_url: String,
    /// File name the signing key is installed under in `/usr/share/keyrings`;
    /// must match the `Signed-By:` path of the downloaded sources file
    pub keyring_file: String,
    pub sources_url: String,
    pub installer_url: String,
    /// Per-command limit; unset waits indefinitely
    pub command_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sandbox_name: "ubuntu-signal".to_string(),
            image: "ubuntu:latest".to_string(),
            app_id: "signal-desktop".to_string(),
            audio_package: "libasound2t64".to_string(),
            container_tool: "distrobox".to_string(),
            container_backend: "podman".to_string(),
            install_prefix: "~/.local".to_string(),
            key_url: "https://updates.signal.org/desktop/apt/keys.asc".to_string(),
            keyring_file: "signal-desktop-keyring.gpg".to_string(),
            sources_url: "https://updates.signal.org/static/desktop/apt/signal-desktop.sources"
                .to_string(),
            installer_url: "https://raw.githubusercontent.com/89luca89/distrobox/main/install"
                .to_string(),
            command_timeout_secs: None,
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sandbox_name: Option<String>,
    pub image: Option<String>,
    pub app_id: Option<String>,
    pub command_timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from `explicit`, or from the default location if present
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.is_file()),
        };
        let settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse a YAML settings file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading settings");
        let content = fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Apply flag/environment values on top of file settings
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(name) = overrides.sandbox_name {
            self.sandbox_name = name;
        }
        if let Some(image) = overrides.image {
            self.image = image;
        }
        if let Some(app) = overrides.app_id {
            self.app_id = app;
        }
        if overrides.command_timeout_secs.is_some() {
            self.command_timeout_secs = overrides.command_timeout_secs;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("sandbox_name", &self.sandbox_name),
            ("image", &self.image),
            ("app_id", &self.app_id),
            ("container_tool", &self.container_tool),
            ("container_backend", &self.container_backend),
            ("install_prefix", &self.install_prefix),
            ("keyring_file", &self.keyring_file),
        ] {
            if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
                return Err(error::config::invalid(format!(
                    "{field} must be a non-empty value without spaces, got '{value}'"
                )));
            }
        }
        for (field, url) in [
            ("key_url", &self.key_url),
            ("sources_url", &self.sources_url),
            ("installer_url", &self.installer_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(error::config::invalid(format!(
                    "{field} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        if self.keyring_file.contains('/') {
            return Err(error::config::invalid(format!(
                "keyring_file must be a file name, got '{}'",
                self.keyring_file
            )));
        }
        let sources = self.sources_file();
        if !(sources.ends_with(".sources") || sources.ends_with(".list")) {
            return Err(error::config::invalid(format!(
                "sources_url must name a .sources or .list file, got '{}'",
                self.sources_url
            )));
        }
        if self.command_timeout_secs == Some(0) {
            return Err(error::config::invalid(
                "command_timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Last path segment of `sources_url`
    pub fn sources_file(&self) -> &str {
        self.sources_url
            .rsplit('/')
            .next()
            .unwrap_or(&self.sources_url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }

    /// Configured backend first, then the other known backends
    pub fn backend_candidates(&self) -> Vec<&str> {
        let mut candidates = vec![self.container_backend.as_str()];
        candidates.extend(
            KNOWN_BACKENDS
                .iter()
                .copied()
                .filter(|b| *b != self.container_backend),
        );
        candidates
    }
}

/// `<config dir>/signal-sandbox/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}
