//! High-level operations
//!
//! The install operation coordinates:
//! - Host probing (from host module)
//! - Container tool and sandbox provisioning (from sandbox module)
//! - The in-sandbox install script (from script module)
//! - Application export (from export module)
//! - UI: Stage reporting and the recreate prompt (from ui module)

pub mod install;

pub use install::{InstallOperation, InstallOptions};
