//! Sandbox provisioning
//!
//! This module handles:
//! - Installing the container tool when it is missing, see [`tool`]
//! - Finding an existing sandbox by exact name, see [`listing`]
//! - Creating, reusing or recreating the named sandbox

pub mod listing;
pub mod tool;

pub use tool::{ToolOutcome, ensure_container_tool};

use tracing::{debug, info};

use crate::error::{self, Result};
use crate::host::RunContext;
use crate::runner::{CommandRunner, Invocation};
use crate::ui::{self, confirm::Prompter};

/// What to do when the sandbox already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingSandbox {
    /// Ask the user, defaulting to reuse
    #[default]
    Ask,
    Reuse,
    Recreate,
}

/// What [`ensure_sandbox`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxAction {
    Created,
    Reused,
    Recreated,
}

impl SandboxAction {
    pub fn describe(self) -> &'static str {
        match self {
            SandboxAction::Created => "created",
            SandboxAction::Reused => "reused",
            SandboxAction::Recreated => "recreated",
        }
    }
}

/// A named sandbox managed through the container tool
#[derive(Debug, Clone)]
pub struct Sandbox<'a> {
    pub tool: &'a str,
    pub name: &'a str,
    pub image: &'a str,
}

impl Sandbox<'_> {
    /// Whether the tool's listing has an entry with exactly this name
    pub fn exists(&self, ctx: &RunContext, runner: &dyn CommandRunner) -> Result<bool> {
        let inv = Invocation::new(self.tool)
            .args(["list", "--no-color"])
            .capture();
        let pb = ui::spinner(&format!("Looking for sandbox '{}'", self.name));
        let output = runner.run(&inv, &ctx.search_path);
        pb.finish_and_clear();

        let output = output?;
        if !output.success() {
            return Err(error::sandbox::list_failed(output.failure_reason()));
        }
        let found = listing::listing_contains(&output.stdout_str(), self.name);
        debug!(name = self.name, found, "checked sandbox listing");
        Ok(found)
    }

    pub fn create(&self, ctx: &RunContext, runner: &dyn CommandRunner) -> Result<()> {
        let inv = Invocation::new(self.tool).args([
            "create", "--name", self.name, "--image", self.image, "--yes",
        ]);
        info!(command = %inv, "creating sandbox");
        let output = runner.run(&inv, &ctx.search_path)?;
        if !output.success() {
            return Err(error::sandbox::create_failed(
                self.name,
                self.image,
                output.failure_reason(),
            ));
        }
        Ok(())
    }

    pub fn remove(&self, ctx: &RunContext, runner: &dyn CommandRunner) -> Result<()> {
        let inv = Invocation::new(self.tool).args(["rm", "--force", self.name]);
        info!(command = %inv, "removing sandbox");
        let output = runner.run(&inv, &ctx.search_path)?;
        if !output.success() {
            return Err(error::sandbox::remove_failed(
                self.name,
                output.failure_reason(),
            ));
        }
        Ok(())
    }
}

/// Make sure the sandbox exists, honoring `policy` when it already does
///
/// An existing sandbox is only removed after an explicit yes (or
/// [`ExistingSandbox::Recreate`]); the question defaults to keeping it.
pub fn ensure_sandbox(
    sandbox: &Sandbox<'_>,
    policy: ExistingSandbox,
    prompter: &dyn Prompter,
    ctx: &RunContext,
    runner: &dyn CommandRunner,
) -> Result<SandboxAction> {
    if !sandbox.exists(ctx, runner)? {
        sandbox.create(ctx, runner)?;
        return Ok(SandboxAction::Created);
    }

    let recreate = match policy {
        ExistingSandbox::Reuse => false,
        ExistingSandbox::Recreate => true,
        ExistingSandbox::Ask => prompter.confirm(
            &format!(
                "Sandbox '{}' already exists. Remove it and create a fresh one?",
                sandbox.name
            ),
            false,
        )?,
    };

    if !recreate {
        info!(name = sandbox.name, "reusing existing sandbox");
        return Ok(SandboxAction::Reused);
    }

    sandbox.remove(ctx, runner)?;
    sandbox.create(ctx, runner)?;
    Ok(SandboxAction::Recreated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SandboxError;
    use crate::test_fixtures::{
        FixedAnswer, RecordingRunner, create_temp_dir, listing_output, test_context,
    };

    const SANDBOX: Sandbox<'static> = Sandbox {
        tool: "distrobox",
        name: "ubuntu-signal",
        image: "ubuntu:latest",
    };

    #[test]
    fn test_absent_sandbox_is_created_without_asking() {
        let temp = create_temp_dir();
        let ctx = test_context(&temp);
        let runner = RecordingRunner::new();
        runner.respond("distrobox list", listing_output(&["fedora-dev"]));
        let prompter = FixedAnswer::new(true);

        let action =
            ensure_sandbox(&SANDBOX, ExistingSandbox::Ask, &prompter, &ctx, &runner).unwrap();
        assert_eq!(action, SandboxAction::Created);
        assert_eq!(prompter.times_asked(), 0);
        assert_eq!(
            runner.argvs(),
            [
                "distrobox list --no-color",
                "distrobox create --name ubuntu-signal --image ubuntu:latest --yes",
            ]
        );
    }

    #[test]
    fn test_existing_sandbox_kept_when_declined() {
        let temp = create_temp_dir();
        let ctx = test_context(&temp);
        let runner = RecordingRunner::new();
        runner.respond("distrobox list", listing_output(&["ubuntu-signal"]));
        let prompter = FixedAnswer::new(false);

        let action =
            ensure_sandbox(&SANDBOX, ExistingSandbox::Ask, &prompter, &ctx, &runner).unwrap();
        assert_eq!(action, SandboxAction::Reused);
        assert_eq!(prompter.times_asked(), 1);
        assert!(!runner.called("distrobox rm"));
        assert!(!runner.called("distrobox create"));
    }

    #[test]
    fn test_existing_sandbox_recreated_when_confirmed() {
        let temp = create_temp_dir();
        let ctx = test_context(&temp);
        let runner = RecordingRunner::new();
        runner.respond("distrobox list", listing_output(&["ubuntu-signal"]));
        let prompter = FixedAnswer::new(true);

        let action =
            ensure_sandbox(&SANDBOX, ExistingSandbox::Ask, &prompter, &ctx, &runner).unwrap();
        assert_eq!(action, SandboxAction::Recreated);
        assert_eq!(
            runner.argvs(),
            [
                "distrobox list --no-color",
                "distrobox rm --force ubuntu-signal",
                "distrobox create --name ubuntu-signal --image ubuntu:latest --yes",
            ]
        );
    }

    #[test]
    fn test_policy_flags_skip_prompt() {
        let temp = create_temp_dir();
        let ctx = test_context(&temp);
        let prompter = FixedAnswer::new(true);

        let runner = RecordingRunner::new();
        runner.respond("distrobox list", listing_output(&["ubuntu-signal"]));
        let action =
            ensure_sandbox(&SANDBOX, ExistingSandbox::Reuse, &prompter, &ctx, &runner).unwrap();
        assert_eq!(action, SandboxAction::Reused);

        let runner = RecordingRunner::new();
        runner.respond("distrobox list", listing_output(&["ubuntu-signal"]));
        let action =
            ensure_sandbox(&SANDBOX, ExistingSandbox::Recreate, &prompter, &ctx, &runner)
                .unwrap();
        assert_eq!(action, SandboxAction::Recreated);
        assert_eq!(prompter.times_asked(), 0);
    }

    #[test]
    fn test_similar_name_does_not_count_as_existing() {
        let temp = create_temp_dir();
        let ctx = test_context(&temp);
        let runner = RecordingRunner::new();
        runner.respond("distrobox list", listing_output(&["ubuntu-signal-old"]));
        let prompter = FixedAnswer::new(false);

        let action =
            ensure_sandbox(&SANDBOX, ExistingSandbox::Ask, &prompter, &ctx, &runner).unwrap();
        assert_eq!(action, SandboxAction::Created);
        assert_eq!(prompter.times_asked(), 0);
    }

    #[test]
    fn test_create_failure() {
        let temp = create_temp_dir();
        let ctx = test_context(&temp);
        let runner = RecordingRunner::new();
        runner.fail("distrobox create", 1);

        let err = ensure_sandbox(
            &SANDBOX,
            ExistingSandbox::Ask,
            &FixedAnswer::new(false),
            &ctx,
            &runner,
        )
        .unwrap_err();
        assert!(matches!(err, SandboxError::SandboxCreateFailed { .. }));
    }

    #[test]
    fn test_remove_failure_stops_before_create() {
        let temp = create_temp_dir();
        let ctx = test_context(&temp);
        let runner = RecordingRunner::new();
        runner.respond("distrobox list", listing_output(&["ubuntu-signal"]));
        runner.fail("distrobox rm", 1);

        let err = ensure_sandbox(
            &SANDBOX,
            ExistingSandbox::Recreate,
            &FixedAnswer::new(false),
            &ctx,
            &runner,
        )
        .unwrap_err();
        assert!(matches!(err, SandboxError::SandboxRemoveFailed { .. }));
        assert!(!runner.called("distrobox create"));
    }

    #[test]
    fn test_list_failure() {
        let temp = create_temp_dir();
        let ctx = test_context(&temp);
        let runner = RecordingRunner::new();
        runner.fail("distrobox list", 125);

        let err = SANDBOX.exists(&ctx, &runner).unwrap_err();
        assert!(matches!(err, SandboxError::SandboxListFailed { .. }));
    }
}
