//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fsdd - Dependency gate for the Free Spoken Digit Dataset loader.
#[derive(Debug, Parser)]
#[command(name = "fsdd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .fsdd/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Python interpreter used to discover site-packages
    #[arg(long, global = true)]
    pub python: Option<PathBuf>,

    /// Extra site-packages directory to search first (repeatable)
    #[arg(long = "site-packages", global = true, value_name = "DIR")]
    pub site_packages: Vec<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Environment options given on the command line.
    pub fn environment_args(&self) -> EnvironmentArgs {
        EnvironmentArgs {
            config: self.config.clone(),
            python: self.python.clone(),
            site_packages: self.site_packages.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the required packages are installed (default)
    Check(CheckArgs),

    /// List the declared requirements
    Requirements(RequirementsArgs),

    /// Show the discovered Python environment
    Env(EnvArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Report every requirement instead of stopping at the first failure
    #[arg(long)]
    pub all: bool,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `requirements` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RequirementsArgs {
    /// Print the requirements as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvArgs {
    /// Print the environment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Global flags that shape environment discovery.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentArgs {
    /// Single config file to load instead of the project's.
    pub config: Option<PathBuf>,
    /// Interpreter override.
    pub python: Option<PathBuf>,
    /// Directories searched ahead of the configured ones.
    pub site_packages: Vec<PathBuf>,
}
