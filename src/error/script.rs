//! Install script errors

use super::SandboxError;

/// Creates a script materialization error
pub fn write_failed(reason: impl Into<String>) -> SandboxError {
    SandboxError::ScriptWriteFailed {
        reason: reason.into(),
    }
}

/// Creates an in-sandbox step failure error
pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> SandboxError {
    SandboxError::ScriptFailed {
        name: name.into(),
        reason: reason.into(),
    }
}
