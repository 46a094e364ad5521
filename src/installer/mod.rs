//! Install orchestration
//!
//! One descriptor in, one result out. The orchestrator builds an explicit
//! ordered plan (acquire, then environment, then each install step) and
//! executes it strictly sequentially, no retries, no backtracking.
//!
//! Failure policy is asymmetric by design: acquisition and environment
//! setup are load-bearing and halt the install, while individual install
//! steps are best-effort (real-world recipes are full of non-fatal
//! warnings), with the first failing index recorded. Descriptors are
//! processed one at a time; shared shell state and working directories
//! make concurrent installs unsafe without isolation this tool does not
//! provide.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::git::{self, UpdateOutcome};
use crate::manifest::ToolDescriptor;
use crate::runner::{CommandRunner, RunOutcome};
use crate::source::SourceKind;
use crate::workspace::Workspace;
use crate::workspace::metadata::ToolMetadata;

/// What a planned step does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Acquire,
    Environment,
    Run,
}

/// One entry of an install plan
#[derive(Debug, Clone)]
pub struct PlannedStep {
    pub kind: StepKind,
    pub title: String,
    /// Shell command for environment/run steps; acquire is native
    pub command: Option<String>,
}

/// Outcome of one executed step
#[derive(Debug, Clone)]
pub struct StepReport {
    pub title: String,
    pub succeeded: bool,
    pub output: String,
}

/// Outcome of one install attempt
#[derive(Debug, Clone)]
pub struct InstallResult {
    pub tool_name: String,
    pub succeeded: bool,
    pub message: String,
    pub install_path: Option<PathBuf>,
    /// Plan index of the first failing step, acquire being index 0
    pub failed_step_index: Option<usize>,
    pub steps: Vec<StepReport>,
}

/// Sequences acquire, environment setup, and install steps for one tool
pub struct InstallOrchestrator<'a> {
    workspace: &'a Workspace,
    settings: &'a Settings,
    runner: CommandRunner,
}

impl<'a> InstallOrchestrator<'a> {
    pub fn new(workspace: &'a Workspace, settings: &'a Settings, dry_run: bool) -> Self {
        Self {
            workspace,
            settings,
            runner: CommandRunner::new(dry_run),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.runner.is_dry_run()
    }

    /// Build the ordered plan for a descriptor.
    pub fn plan(&self, descriptor: &ToolDescriptor) -> Vec<PlannedStep> {
        let mut plan = Vec::new();

        match descriptor.source_kind {
            SourceKind::CodeHost | SourceKind::ModelHub => plan.push(PlannedStep {
                kind: StepKind::Acquire,
                title: "acquire source".to_string(),
                command: None,
            }),
            SourceKind::Custom => plan.push(PlannedStep {
                kind: StepKind::Acquire,
                title: "create tool folder".to_string(),
                command: None,
            }),
            SourceKind::PackageIndex => {}
        }

        if descriptor.needs_isolated_environment
            && self.workspace.tool_path(descriptor).is_some()
        {
            plan.push(PlannedStep {
                kind: StepKind::Environment,
                title: "create isolated environment".to_string(),
                command: Some(self.settings.venv_command()),
            });
        }

        if descriptor.source_kind == SourceKind::PackageIndex
            && descriptor.install_steps.is_empty()
        {
            let command = format!("{} {}", self.settings.pip_command(), descriptor.name);
            plan.push(PlannedStep {
                kind: StepKind::Run,
                title: command.clone(),
                command: Some(command),
            });
        }

        for step in &descriptor.install_steps {
            plan.push(PlannedStep {
                kind: StepKind::Run,
                title: step.clone(),
                command: Some(step.clone()),
            });
        }

        plan
    }

    /// Run the full install for one descriptor.
    pub fn install(&self, descriptor: &ToolDescriptor) -> InstallResult {
        let plan = self.plan(descriptor);
        let install_path = self.workspace.tool_path(descriptor);

        let mut reports = Vec::with_capacity(plan.len());
        let mut failed_step_index = None;
        let mut fatal: Option<String> = None;

        for (index, step) in plan.iter().enumerate() {
            let outcome = match step.kind {
                StepKind::Acquire => self.acquire(descriptor),
                StepKind::Environment | StepKind::Run => {
                    let cwd = install_path
                        .clone()
                        .unwrap_or_else(|| self.workspace.root.clone());
                    self.runner
                        .run(step.command.as_deref().unwrap_or_default(), &cwd)
                }
            };

            let succeeded = outcome.succeeded;
            reports.push(StepReport {
                title: step.title.clone(),
                succeeded,
                output: outcome.output.clone(),
            });

            if !succeeded {
                if failed_step_index.is_none() {
                    failed_step_index = Some(index);
                }
                match step.kind {
                    StepKind::Acquire | StepKind::Environment => {
                        fatal = Some(format!(
                            "{} failed: {}",
                            step.title,
                            first_line(&outcome.output)
                        ));
                        break;
                    }
                    StepKind::Run => {
                        debug!(tool = %descriptor.name, step = %step.title, "step failed, continuing");
                    }
                }
            }
        }

        let succeeded = fatal.is_none();
        let warnings = reports.iter().filter(|r| !r.succeeded).count();

        let message = match fatal {
            Some(message) => message,
            None => {
                let mut message = if self.is_dry_run() {
                    format!("dry run for {} complete", descriptor.display_name)
                } else {
                    format!("{} installed", descriptor.display_name)
                };
                if warnings > 0 {
                    message.push_str(&format!(
                        " ({} step{} reported errors)",
                        warnings,
                        if warnings == 1 { "" } else { "s" }
                    ));
                }
                message
            }
        };

        if succeeded && !self.is_dry_run() {
            if let Some(path) = install_path.as_deref() {
                if path.exists() {
                    if let Err(e) = ToolMetadata::from_descriptor(descriptor).save(path) {
                        warn!(tool = %descriptor.name, "could not write metadata: {}", e);
                    }
                }
            }
        }

        InstallResult {
            tool_name: descriptor.name.clone(),
            succeeded,
            message,
            install_path,
            failed_step_index,
            steps: reports,
        }
    }

    /// Materialize the tool's source on disk.
    ///
    /// Fetched kinds clone on first install and update in place afterwards;
    /// a present folder is never re-fetched or duplicated. Custom tools
    /// just get their folder.
    fn acquire(&self, descriptor: &ToolDescriptor) -> RunOutcome {
        match descriptor.source_kind {
            SourceKind::CodeHost | SourceKind::ModelHub => self.acquire_checkout(descriptor),
            SourceKind::Custom => self.ensure_folder(descriptor),
            // not planned for package-index tools
            SourceKind::PackageIndex => success("nothing to acquire"),
        }
    }

    fn acquire_checkout(&self, descriptor: &ToolDescriptor) -> RunOutcome {
        let Some(target) = self.workspace.tool_path(descriptor) else {
            return failure("no install folder for this source kind");
        };
        let Some(url) = descriptor.url.as_deref() else {
            return failure("descriptor has no url");
        };

        if target.exists() {
            if !git::is_checkout(&target) {
                return success(format!(
                    "{} already present, leaving as-is",
                    target.display()
                ));
            }
            if self.is_dry_run() {
                return success(format!("[DRY RUN] would update {}", target.display()));
            }
            return match git::update(&target) {
                Ok(UpdateOutcome::UpToDate) => success("already up to date"),
                Ok(UpdateOutcome::FastForwarded) => {
                    success(format!("updated {}", target.display()))
                }
                Err(e) => failure(e.to_string()),
            };
        }

        if self.is_dry_run() {
            return success(format!(
                "[DRY RUN] would clone {} into {}",
                url,
                target.display()
            ));
        }

        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return failure(format!("could not create {}: {}", parent.display(), e));
            }
        }

        match git::clone(url, &target) {
            Ok(_) => success(format!("cloned into {}", target.display())),
            Err(e) => failure(e.to_string()),
        }
    }

    fn ensure_folder(&self, descriptor: &ToolDescriptor) -> RunOutcome {
        let Some(target) = self.workspace.tool_path(descriptor) else {
            return failure("no install folder for this source kind");
        };

        if target.exists() {
            return success(format!("{} already present", target.display()));
        }
        if self.is_dry_run() {
            return success(format!("[DRY RUN] would create {}", target.display()));
        }
        match fs::create_dir_all(&target) {
            Ok(()) => success(format!("created {}", target.display())),
            Err(e) => failure(format!("could not create {}: {}", target.display(), e)),
        }
    }
}

fn success(output: impl Into<String>) -> RunOutcome {
    RunOutcome {
        succeeded: true,
        output: output.into(),
    }
}

fn failure(output: impl Into<String>) -> RunOutcome {
    RunOutcome {
        succeeded: false,
        output: output.into(),
    }
}

fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or("").trim()
}
