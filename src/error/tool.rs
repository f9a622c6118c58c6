//! Container tool installation errors

use super::SandboxError;

/// Creates a tool install failure error
pub fn install_failed(
    tool: impl Into<String>,
    installer: impl Into<String>,
    reason: impl Into<String>,
) -> SandboxError {
    SandboxError::ToolInstallFailed {
        tool: tool.into(),
        installer: installer.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a tool that still does not resolve after installing it
pub fn not_found(tool: impl Into<String>) -> SandboxError {
    SandboxError::ToolNotFound { tool: tool.into() }
}

/// Creates a missing container backend error
pub fn no_backend(candidates: &[&str]) -> SandboxError {
    SandboxError::NoContainerBackend {
        candidates: candidates.join(", "),
    }
}
