//! Missing host prerequisite errors

use super::SandboxError;

/// Creates a missing prerequisite error with a remediation hint
pub fn missing(what: impl Into<String>, help: impl Into<String>) -> SandboxError {
    SandboxError::MissingPrerequisite {
        what: what.into(),
        help: help.into(),
    }
}

/// Creates an error for a download that has no curl or wget to run with
pub fn no_fetch_tool(what: impl Into<String>) -> SandboxError {
    SandboxError::NoFetchTool { what: what.into() }
}
