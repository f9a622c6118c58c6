//! Error types and handling for signal-sandbox
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`prereq`]: Missing host prerequisites
//! - [`tool`]: Container tool installation errors
//! - [`sandbox`]: Sandbox list/create/remove errors
//! - [`script`]: In-sandbox install script errors
//! - [`config`]: Configuration and argument errors
//! - [`fs`]: File system and output errors

pub mod config;
pub mod fs;
pub mod prereq;
pub mod sandbox;
pub mod script;
pub mod tool;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for signal-sandbox operations
#[derive(Error, Diagnostic, Debug)]
pub enum SandboxError {
    // Prerequisite errors
    #[error("Missing prerequisite: {what}")]
    #[diagnostic(code(signal_sandbox::prereq::missing), help("{help}"))]
    MissingPrerequisite { what: String, help: String },

    #[error("Neither curl nor wget is available to download the {what}")]
    #[diagnostic(
        code(signal_sandbox::prereq::no_fetch_tool),
        help("Install curl or wget with your system package manager and run again")
    )]
    NoFetchTool { what: String },

    #[error("Could not determine the home directory")]
    #[diagnostic(
        code(signal_sandbox::prereq::no_home),
        help("Set the HOME environment variable")
    )]
    HomeNotFound,

    // Container tool errors
    #[error("Failed to install {tool} with {installer}: {reason}")]
    #[diagnostic(code(signal_sandbox::tool::install_failed))]
    ToolInstallFailed {
        tool: String,
        installer: String,
        reason: String,
    },

    #[error("{tool} is still not available after installation")]
    #[diagnostic(
        code(signal_sandbox::tool::not_found),
        help("Check that the install location is on your PATH, or install {tool} manually")
    )]
    ToolNotFound { tool: String },

    #[error("No container backend found (looked for {candidates})")]
    #[diagnostic(
        code(signal_sandbox::tool::no_backend),
        help("Install podman (recommended) or docker with your distribution's package manager")
    )]
    NoContainerBackend { candidates: String },

    // Sandbox errors
    #[error("Failed to list sandboxes: {reason}")]
    #[diagnostic(code(signal_sandbox::sandbox::list_failed))]
    SandboxListFailed { reason: String },

    #[error("Failed to create sandbox '{name}': {reason}")]
    #[diagnostic(
        code(signal_sandbox::sandbox::create_failed),
        help("Check that your container backend works, e.g. 'podman run --rm {image} true'")
    )]
    SandboxCreateFailed {
        name: String,
        image: String,
        reason: String,
    },

    #[error("Failed to remove sandbox '{name}': {reason}")]
    #[diagnostic(code(signal_sandbox::sandbox::remove_failed))]
    SandboxRemoveFailed { name: String, reason: String },

    // Script errors
    #[error("Failed to write install script: {reason}")]
    #[diagnostic(code(signal_sandbox::script::write_failed))]
    ScriptWriteFailed { reason: String },

    #[error("Installation inside sandbox '{name}' failed: {reason}")]
    #[diagnostic(
        code(signal_sandbox::script::failed),
        help("Re-run with --recreate to start from a fresh sandbox")
    )]
    ScriptFailed { name: String, reason: String },

    // Export errors
    #[error("Failed to export '{app}' from sandbox '{name}': {reason}")]
    #[diagnostic(
        code(signal_sandbox::export::failed),
        help("You can still start it with: distrobox enter {name} -- {app}")
    )]
    ExportFailed {
        name: String,
        app: String,
        reason: String,
    },

    // Shell profile errors
    #[error("Failed to update shell profile: {path}: {reason}")]
    #[diagnostic(code(signal_sandbox::profile::write_failed))]
    ProfileWriteFailed { path: String, reason: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(signal_sandbox::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(signal_sandbox::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(signal_sandbox::config::invalid))]
    ConfigInvalid { message: String },

    // Process errors
    #[error("Failed to run '{program}': {reason}")]
    #[diagnostic(code(signal_sandbox::process::spawn_failed))]
    CommandSpawnFailed { program: String, reason: String },

    #[error("'{program}' did not finish within {seconds}s")]
    #[diagnostic(
        code(signal_sandbox::process::timed_out),
        help("Raise the limit with --timeout, or omit it to wait indefinitely")
    )]
    CommandTimedOut { program: String, seconds: u64 },

    #[error("Failed to read answer: {message}")]
    #[diagnostic(
        code(signal_sandbox::ui::prompt_failed),
        help("Pass --reuse or --recreate to skip the question")
    )]
    PromptFailed { message: String },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(signal_sandbox::cli::invalid_argument))]
    InvalidArgument { message: String },

    #[error("Failed to serialize {what}: {reason}")]
    #[diagnostic(code(signal_sandbox::output::serialize_failed))]
    SerializeFailed { what: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(signal_sandbox::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for SandboxError {
    fn from(err: std::io::Error) -> Self {
        SandboxError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SandboxError {
    fn from(err: serde_yaml::Error) -> Self {
        SandboxError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SandboxError {
    fn from(err: inquire::InquireError) -> Self {
        SandboxError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SandboxError>;
