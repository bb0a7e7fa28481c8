//! Requirements command implementation.
//!
//! The `fsdd requirements` command lists the declared requirements without
//! touching the environment.

use crate::cli::args::RequirementsArgs;
use crate::error::Result;
use crate::requirements::REQUIREMENTS;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The requirements command implementation.
pub struct RequirementsCommand {
    args: RequirementsArgs,
}

impl RequirementsCommand {
    /// Create a new requirements command.
    pub fn new(args: RequirementsArgs) -> Self {
        Self { args }
    }
}

impl Command for RequirementsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.json {
            let body = serde_json::to_string_pretty(REQUIREMENTS).map_err(anyhow::Error::from)?;
            ui.raw(&body);
            return Ok(CommandResult::success());
        }

        ui.show_header("Requirements");
        for req in REQUIREMENTS {
            ui.message(&format!("  {} >={}", req.package_name, req.minimum_version));
            ui.show_hint(req.help_url);
        }
        Ok(CommandResult::success())
    }
}
