//! Sandbox lifecycle errors

use super::SandboxError;

/// Creates a sandbox listing failure error
pub fn list_failed(reason: impl Into<String>) -> SandboxError {
    SandboxError::SandboxListFailed {
        reason: reason.into(),
    }
}

/// Creates a sandbox creation failure error
pub fn create_failed(
    name: impl Into<String>,
    image: impl Into<String>,
    reason: impl Into<String>,
) -> SandboxError {
    SandboxError::SandboxCreateFailed {
        name: name.into(),
        image: image.into(),
        reason: reason.into(),
    }
}

/// Creates a sandbox removal failure error
pub fn remove_failed(name: impl Into<String>, reason: impl Into<String>) -> SandboxError {
    SandboxError::SandboxRemoveFailed {
        name: name.into(),
        reason: reason.into(),
    }
}
