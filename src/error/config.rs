//! Configuration and argument errors

use super::SandboxError;

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> SandboxError {
    SandboxError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> SandboxError {
    SandboxError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> SandboxError {
    SandboxError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates an invalid command-line argument error
pub fn invalid_argument(message: impl Into<String>) -> SandboxError {
    SandboxError::InvalidArgument {
        message: message.into(),
    }
}
