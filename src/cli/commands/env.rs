//! Env command implementation.
//!
//! The `fsdd env` command shows which interpreter and `site-packages`
//! directories the gate would use.

use std::path::{Path, PathBuf};

use crate::cli::args::{EnvArgs, EnvironmentArgs};
use crate::error::Result;
use crate::requirements::EnvironmentProbe;
use crate::ui::UserInterface;

use super::dispatcher::{probe_environment, Command, CommandResult};

/// The env command implementation.
pub struct EnvCommand {
    project_root: PathBuf,
    environment: EnvironmentArgs,
    args: EnvArgs,
}

impl EnvCommand {
    /// Create a new env command.
    pub fn new(project_root: &Path, environment: EnvironmentArgs, args: EnvArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            environment,
            args,
        }
    }

    /// Render a finished probe.
    pub fn show(&self, probe: &EnvironmentProbe, ui: &mut dyn UserInterface) -> Result<()> {
        if self.args.json {
            ui.raw(&serde_json::to_string_pretty(probe).map_err(anyhow::Error::from)?);
            return Ok(());
        }

        ui.show_header("Environment");
        match probe.interpreter() {
            Some(python) => ui.message(&format!("  Interpreter: {}", python.display())),
            None => ui.warning("No Python interpreter found"),
        }

        if probe.site_packages().is_empty() {
            ui.warning("No site-packages directories found");
            ui.show_hint("Pass --site-packages or set FSDD_SITE_PACKAGES");
            return Ok(());
        }

        ui.message("  Site packages:");
        for dir in probe.site_packages() {
            ui.message(&format!("    {} ({})", dir.path.display(), dir.source));
        }
        Ok(())
    }
}

impl Command for EnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let probe = probe_environment(&self.project_root, &self.environment)?;
        self.show(&probe, ui)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn command(json: bool) -> EnvCommand {
        EnvCommand::new(
            Path::new("/project"),
            EnvironmentArgs::default(),
            EnvArgs { json },
        )
    }

    #[test]
    fn lists_directories_with_source() {
        let temp = TempDir::new().unwrap();
        let probe = EnvironmentProbe::from_dirs(vec![temp.path().to_path_buf()]);
        let mut ui = MockUI::new();
        command(false).show(&probe, &mut ui).unwrap();

        let expected = format!("    {} (explicit)", temp.path().display());
        assert!(ui.messages().contains(&expected));
        assert!(ui.has_warning("No Python interpreter"));
    }

    #[test]
    fn empty_probe_gives_hint() {
        let mut ui = MockUI::new();
        command(false)
            .show(&EnvironmentProbe::default(), &mut ui)
            .unwrap();
        assert!(ui.has_warning("No site-packages"));
        assert!(ui.has_hint("--site-packages"));
    }

    #[test]
    fn json_shape() {
        let temp = TempDir::new().unwrap();
        let probe = EnvironmentProbe::from_dirs(vec![temp.path().to_path_buf()]);
        let mut ui = MockUI::new();
        command(true).show(&probe, &mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.raw_output()).unwrap();
        assert!(value["interpreter"].is_null());
        assert_eq!(value["site_packages"][0]["source"], "explicit");
    }
}
