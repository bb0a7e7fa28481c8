//! Command-line interface for fsdd.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, EnvArgs, EnvironmentArgs, RequirementsArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
