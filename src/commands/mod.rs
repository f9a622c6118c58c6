//! Command implementations for the signal-sandbox CLI

pub mod completions;
pub mod detect;
pub mod install;
pub mod script;
pub mod version;
