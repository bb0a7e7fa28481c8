//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{CheckArgs, Cli, Commands, EnvironmentArgs};
use crate::config::{load_config, FsddConfig};
use crate::error::Result;
use crate::requirements::{EnvironmentProbe, ProbeOptions};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// Configuration errors are returned as `Err`; a failed gate is a
    /// [`CommandResult::failure`].
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Combine config and command-line flags into probe options.
///
/// `--python` replaces the configured interpreter. `--site-packages`
/// directories are searched ahead of the configured ones.
pub fn resolve_probe_options(
    project_root: &Path,
    config: &FsddConfig,
    args: &EnvironmentArgs,
) -> ProbeOptions {
    let mut options = config.probe_options(project_root);
    if let Some(python) = &args.python {
        options.python = Some(python.clone());
    }
    if !args.site_packages.is_empty() {
        let mut dirs = args.site_packages.clone();
        dirs.append(&mut options.site_packages);
        options.site_packages = dirs;
    }
    options
}

/// Load configuration and probe the environment for a project.
pub fn probe_environment(project_root: &Path, args: &EnvironmentArgs) -> Result<EnvironmentProbe> {
    let config = load_config(project_root, args.config.as_deref())?;
    let options = resolve_probe_options(project_root, &config, args);
    tracing::debug!("Probe options: {:?}", options);
    Ok(EnvironmentProbe::run(&options))
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    environment: EnvironmentArgs,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, environment: EnvironmentArgs) -> Self {
        Self {
            project_root,
            environment,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, runs `check` with default arguments.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check(args)) => self.check(args.clone()).execute(ui),
            Some(Commands::Requirements(args)) => {
                super::requirements::RequirementsCommand::new(args.clone()).execute(ui)
            }
            Some(Commands::Env(args)) => super::env::EnvCommand::new(
                &self.project_root,
                self.environment.clone(),
                args.clone(),
            )
            .execute(ui),
            None => self.check(CheckArgs::default()).execute(ui),
        }
    }

    fn check(&self, args: CheckArgs) -> super::check::CheckCommand {
        super::check::CheckCommand::new(&self.project_root, self.environment.clone(), args)
    }
}
