//! The recreate-or-reuse question
//!
//! This is the only interactive decision in the workflow. It sits behind
//! [`Prompter`] so that non-interactive runs and tests can answer it.

use inquire::Confirm;

use crate::error::{Result, SandboxError};

/// Asks yes/no questions
pub trait Prompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;
}

/// Terminal prompt backed by inquire
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        Confirm::new(question)
            .with_default(default)
            .with_help_message("Press Enter for the default, or answer y/n")
            .prompt()
            .map_err(|e| SandboxError::PromptFailed {
                message: e.to_string(),
            })
    }
}

/// Prompter for runs without a terminal: answers with the default
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAnswer;

impl Prompter for DefaultAnswer {
    fn confirm(&self, _question: &str, default: bool) -> Result<bool> {
        Ok(default)
    }
}
