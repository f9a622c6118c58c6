//! File system and output errors

use super::SandboxError;

/// Creates a shell profile write error
pub fn profile_write_failed(path: impl Into<String>, reason: impl Into<String>) -> SandboxError {
    SandboxError::ProfileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> SandboxError {
    SandboxError::IoError {
        message: message.into(),
    }
}

/// Creates an output serialization error
pub fn serialize_failed(what: impl Into<String>, reason: impl Into<String>) -> SandboxError {
    SandboxError::SerializeFailed {
        what: what.into(),
        reason: reason.into(),
    }
}
