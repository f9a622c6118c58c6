//! Install operation
//!
//! Drives the provisioning workflow:
//! 1. Probe the host and check prerequisites
//! 2. Make sure the container tool is installed
//! 3. Create, reuse or recreate the sandbox
//! 4. Run the installation script inside the sandbox
//! 5. Export the application to the host launcher
//!
//! Every stage is fatal on failure. Nothing is rolled back except the
//! temporary install script, which is always removed.

use tracing::info;

use crate::cli::InstallArgs;
use crate::config::Settings;
use crate::error::{self, Result};
use crate::export;
use crate::host::{self, HostEnvironment, PackageManagerKind, RunContext};
use crate::runner::CommandRunner;
use crate::sandbox::{self, ExistingSandbox, Sandbox, SandboxAction, ToolOutcome};
use crate::script;
use crate::ui::Reporter;
use crate::ui::confirm::Prompter;

/// Configuration options for installation
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub policy: ExistingSandbox,
    pub dry_run: bool,
}

impl From<&InstallArgs> for InstallOptions {
    fn from(args: &InstallArgs) -> Self {
        let policy = if args.recreate {
            ExistingSandbox::Recreate
        } else if args.reuse {
            ExistingSandbox::Reuse
        } else {
            ExistingSandbox::Ask
        };
        Self {
            policy,
            dry_run: args.dry_run,
        }
    }
}

/// Workflow stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckPrereqs,
    EnsureTool,
    EnsureSandbox,
    RunInstallScript,
    ExportApp,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::CheckPrereqs,
        Stage::EnsureTool,
        Stage::EnsureSandbox,
        Stage::RunInstallScript,
        Stage::ExportApp,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Stage::CheckPrereqs => "Checking prerequisites",
            Stage::EnsureTool => "Ensuring container tool",
            Stage::EnsureSandbox => "Preparing sandbox",
            Stage::RunInstallScript => "Installing inside sandbox",
            Stage::ExportApp => "Exporting application",
        }
    }

    fn number(self) -> usize {
        Stage::ALL.iter().position(|s| *s == self).unwrap_or(0) + 1
    }
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSummary {
    pub tool: ToolOutcome,
    pub sandbox: SandboxAction,
}

/// Fail early on hosts the workflow cannot succeed on
pub fn check_prerequisites(env: &HostEnvironment, settings: &Settings) -> Result<()> {
    if env.has_container_tool {
        if !env.has_container_runtime {
            return Err(error::tool::no_backend(&settings.backend_candidates()));
        }
        return Ok(());
    }
    if env.package_manager == PackageManagerKind::Unknown {
        if !env.has_curl && !env.has_wget {
            return Err(error::prereq::no_fetch_tool(format!(
                "{} installer",
                settings.container_tool
            )));
        }
        if !env.has_posix_shell {
            return Err(error::prereq::missing(
                "POSIX shell (sh)",
                "The universal installer is a shell script; install dash or bash",
            ));
        }
    }
    Ok(())
}

/// High-level install operation
pub struct InstallOperation<'a> {
    settings: &'a Settings,
    ctx: &'a mut RunContext,
    runner: &'a dyn CommandRunner,
    prompter: &'a dyn Prompter,
    reporter: &'a dyn Reporter,
    options: InstallOptions,
}

impl<'a> InstallOperation<'a> {
    pub fn new(
        settings: &'a Settings,
        ctx: &'a mut RunContext,
        runner: &'a dyn CommandRunner,
        prompter: &'a dyn Prompter,
        reporter: &'a dyn Reporter,
        options: InstallOptions,
    ) -> Self {
        Self {
            settings,
            ctx,
            runner,
            prompter,
            reporter,
            options,
        }
    }

    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    fn begin(&self, stage: Stage) {
        info!(?stage, "entering stage");
        self.reporter
            .stage(stage.number(), Stage::ALL.len(), stage.title());
    }

    /// Probe the host; the first stage of every run, dry or not
    pub fn probe(&self) -> Result<HostEnvironment> {
        self.begin(Stage::CheckPrereqs);
        let env = host::probe(self.ctx, self.runner, self.settings);
        self.reporter.detail(&format!(
            "package manager: {}, shell: {}",
            env.package_manager, env.shell
        ));
        check_prerequisites(&env, self.settings)?;
        self.reporter.done("host is ready");
        Ok(env)
    }

    /// Human-readable list of what a real run would do on this host
    pub fn plan(&self, env: &HostEnvironment) -> Vec<String> {
        let s = self.settings;
        let tool_step = if env.has_container_tool {
            format!("{} is already installed", s.container_tool)
        } else if env.package_manager == PackageManagerKind::Unknown {
            format!(
                "Install {} to {} with its universal installer",
                s.container_tool, s.install_prefix
            )
        } else {
            format!(
                "Install {} and {} with {}",
                s.container_tool, s.container_backend, env.package_manager
            )
        };
        let sandbox_step = match self.options.policy {
            ExistingSandbox::Ask => format!(
                "Create sandbox '{}' from {} (ask before recreating an existing one)",
                s.sandbox_name, s.image
            ),
            ExistingSandbox::Reuse => format!(
                "Create sandbox '{}' from {} (reuse an existing one)",
                s.sandbox_name, s.image
            ),
            ExistingSandbox::Recreate => format!(
                "Create sandbox '{}' from {} (recreate an existing one)",
                s.sandbox_name, s.image
            ),
        };
        vec![
            tool_step,
            sandbox_step,
            format!("Install {} inside the sandbox", s.app_id),
            format!("Export {} to the host application menu", s.app_id),
        ]
    }

    /// Run the remaining stages after [`Self::probe`]
    pub fn execute(&mut self, env: &HostEnvironment) -> Result<InstallSummary> {
        let s = self.settings;

        self.begin(Stage::EnsureTool);
        let tool = sandbox::ensure_container_tool(env, s, self.ctx, self.runner)?;
        self.reporter.done(&match &tool {
            ToolOutcome::AlreadyInstalled => format!("{} already installed", s.container_tool),
            ToolOutcome::PackageManager(pm) => {
                format!("{} installed with {pm}", s.container_tool)
            }
            ToolOutcome::UserPrefix { bin_dir, profile } => format!(
                "{} installed to {} (PATH set in {})",
                s.container_tool,
                bin_dir.display(),
                profile.file().display()
            ),
        });

        self.begin(Stage::EnsureSandbox);
        let target = Sandbox {
            tool: &s.container_tool,
            name: &s.sandbox_name,
            image: &s.image,
        };
        let action = sandbox::ensure_sandbox(
            &target,
            self.options.policy,
            self.prompter,
            self.ctx,
            self.runner,
        )?;
        self.reporter
            .done(&format!("sandbox '{}' {}", s.sandbox_name, action.describe()));

        self.begin(Stage::RunInstallScript);
        script::install_in_sandbox(s, self.ctx, self.runner)?;
        self.reporter.done(&format!("{} installed", s.app_id));

        self.begin(Stage::ExportApp);
        export::export_app(
            &s.container_tool,
            &s.sandbox_name,
            &s.app_id,
            self.ctx,
            self.runner,
        )?;
        self.reporter.done(&format!("{} exported", s.app_id));

        info!(sandbox = %s.sandbox_name, app = %s.app_id, "installation complete");
        Ok(InstallSummary {
            tool,
            sandbox: action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SandboxError;
    use crate::test_fixtures::{
        FixedAnswer, RecordingRunner, create_temp_dir, fake_executable, listing_output,
        test_context,
    };
    use crate::ui::SilentReporter;

    fn run(
        ctx: &mut RunContext,
        runner: &RecordingRunner,
        prompter: &FixedAnswer,
        options: InstallOptions,
    ) -> Result<InstallSummary> {
        let settings = Settings::default();
        let mut op = InstallOperation::new(
            &settings,
            ctx,
            runner,
            prompter,
            &SilentReporter,
            options,
        );
        let env = op.probe()?;
        op.execute(&env)
    }

    #[test]
    fn test_apt_host_without_sandbox() {
        let temp = create_temp_dir();
        let mut ctx = test_context(&temp);
        let bin = ctx.search_path.dirs()[0].clone();
        for exe in ["apt-get", "sudo", "curl", "sh"] {
            fake_executable(&bin, exe);
        }
        let runner = RecordingRunner::new();
        runner.creates("sudo apt-get install", bin.join("distrobox"));
        runner.creates("sudo apt-get install", bin.join("podman"));
        runner.respond("distrobox list", listing_output(&[]));
        let prompter = FixedAnswer::new(false);

        let summary = run(&mut ctx, &runner, &prompter, InstallOptions::default()).unwrap();
        assert_eq!(summary.tool, ToolOutcome::PackageManager(PackageManagerKind::Apt));
        assert_eq!(summary.sandbox, SandboxAction::Created);

        let argvs = runner.argvs();
        assert_eq!(argvs.len(), 5);
        assert_eq!(argvs[0], "sudo apt-get install -y distrobox podman");
        assert_eq!(argvs[1], "distrobox list --no-color");
        assert_eq!(
            argvs[2],
            "distrobox create --name ubuntu-signal --image ubuntu:latest --yes"
        );
        assert!(argvs[3].starts_with("distrobox enter ubuntu-signal -- bash "));
        assert_eq!(
            argvs[4],
            "distrobox enter ubuntu-signal -- distrobox-export --app signal-desktop"
        );
        assert_eq!(prompter.times_asked(), 0);
    }

    #[test]
    fn test_existing_sandbox_declined_goes_straight_to_script() {
        let temp = create_temp_dir();
        let mut ctx = test_context(&temp);
        let bin = ctx.search_path.dirs()[0].clone();
        for exe in ["apt-get", "distrobox", "podman"] {
            fake_executable(&bin, exe);
        }
        let runner = RecordingRunner::new();
        runner.respond("distrobox list", listing_output(&["ubuntu-signal"]));
        let prompter = FixedAnswer::new(false);

        let summary = run(&mut ctx, &runner, &prompter, InstallOptions::default()).unwrap();
        assert_eq!(summary.tool, ToolOutcome::AlreadyInstalled);
        assert_eq!(summary.sandbox, SandboxAction::Reused);
        assert_eq!(prompter.times_asked(), 1);

        let argvs = runner.argvs();
        assert!(!runner.called("distrobox rm"));
        assert!(!runner.called("distrobox create"));
        assert_eq!(argvs[0], "distrobox list --no-color");
        assert!(argvs[1].starts_with("distrobox enter ubuntu-signal -- bash "));
    }

    #[test]
    fn test_unknown_manager_without_fetch_tool_stops_before_network() {
        let temp = create_temp_dir();
        let mut ctx = test_context(&temp);
        fake_executable(&ctx.search_path.dirs()[0].clone(), "sh");
        let runner = RecordingRunner::new();

        let err = run(
            &mut ctx,
            &runner,
            &FixedAnswer::new(false),
            InstallOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SandboxError::NoFetchTool { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_script_failure_skips_export() {
        let temp = create_temp_dir();
        let mut ctx = test_context(&temp);
        let bin = ctx.search_path.dirs()[0].clone();
        for exe in ["distrobox", "docker"] {
            fake_executable(&bin, exe);
        }
        let runner = RecordingRunner::new();
        runner.fail("distrobox enter ubuntu-signal -- bash", 100);

        let err = run(
            &mut ctx,
            &runner,
            &FixedAnswer::new(false),
            InstallOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SandboxError::ScriptFailed { .. }));
        assert!(!runner.called("distrobox enter ubuntu-signal -- distrobox-export"));
        assert_eq!(std::fs::read_dir(&ctx.temp_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_tool_without_backend_is_a_prerequisite_failure() {
        let temp = create_temp_dir();
        let mut ctx = test_context(&temp);
        fake_executable(&ctx.search_path.dirs()[0].clone(), "distrobox");
        let runner = RecordingRunner::new();

        let err = run(
            &mut ctx,
            &runner,
            &FixedAnswer::new(false),
            InstallOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SandboxError::NoContainerBackend { .. }));
    }

    #[test]
    fn test_plan_follows_host() {
        let temp = create_temp_dir();
        let mut ctx = test_context(&temp);
        let settings = Settings::default();
        let runner = RecordingRunner::new();
        let prompter = FixedAnswer::new(false);
        let op = InstallOperation::new(
            &settings,
            &mut ctx,
            &runner,
            &prompter,
            &SilentReporter,
            InstallOptions {
                policy: ExistingSandbox::Recreate,
                dry_run: true,
            },
        );
        let env = HostEnvironment {
            package_manager: PackageManagerKind::Unknown,
            shell: host::ShellKind::Fish,
            has_container_tool: false,
            has_container_runtime: true,
            has_curl: true,
            has_wget: false,
            has_sudo: false,
            has_posix_shell: true,
        };

        let plan = op.plan(&env);
        assert_eq!(plan.len(), 4);
        assert!(plan[0].contains("universal installer"));
        assert!(plan[1].contains("recreate"));
        assert!(op.options().dry_run);
    }

    #[test]
    fn test_stage_numbers() {
        assert_eq!(Stage::CheckPrereqs.number(), 1);
        assert_eq!(Stage::ExportApp.number(), 5);
    }
}
