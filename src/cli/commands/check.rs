//! Check command implementation.
//!
//! The `fsdd check` command runs the dependency gate against the discovered
//! environment. It is also what `fsdd` runs with no subcommand.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::{CheckArgs, EnvironmentArgs};
use crate::error::Result;
use crate::requirements::{audit, evaluate, PackageRegistry, RequirementReport, REQUIREMENTS};
use crate::ui::UserInterface;

use super::dispatcher::{probe_environment, Command, CommandResult};

/// Exit code for a failed gate.
pub const GATE_FAILURE_EXIT_CODE: u8 = 1;

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    environment: EnvironmentArgs,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, environment: EnvironmentArgs, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            environment,
            args,
        }
    }

    /// Check `registry` and report through `ui`.
    pub fn report<R>(&self, registry: &R, ui: &mut dyn UserInterface) -> Result<CommandResult>
    where
        R: PackageRegistry + ?Sized,
    {
        if self.args.json {
            return self.report_json(registry, ui);
        }
        if self.args.all {
            return Ok(self.report_all(registry, ui));
        }

        // Fail-fast in declaration order, like `ensure_dependencies`.
        let mut satisfied = Vec::with_capacity(REQUIREMENTS.len());
        for requirement in REQUIREMENTS {
            let report = RequirementReport {
                requirement: *requirement,
                status: evaluate(registry, requirement),
            };
            if report.status.is_satisfied() {
                satisfied.push(report);
            } else if let Err(e) = report.into_result() {
                tracing::debug!("Gate failed: {:?}", e);
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(GATE_FAILURE_EXIT_CODE));
            }
        }

        for report in &satisfied {
            ui.success(&describe(report));
        }
        ui.message("All dependencies satisfied.");
        Ok(CommandResult::success())
    }

    fn report_all<R>(&self, registry: &R, ui: &mut dyn UserInterface) -> CommandResult
    where
        R: PackageRegistry + ?Sized,
    {
        let mut failed = 0;
        for report in audit(registry, REQUIREMENTS) {
            if report.status.is_satisfied() {
                ui.success(&describe(&report));
            } else if let Err(e) = report.into_result() {
                failed += 1;
                ui.error(&e.to_string());
            }
        }

        if failed == 0 {
            ui.message("All dependencies satisfied.");
            CommandResult::success()
        } else {
            ui.warning(&format!(
                "{} of {} requirements not met",
                failed,
                REQUIREMENTS.len()
            ));
            CommandResult::failure(GATE_FAILURE_EXIT_CODE)
        }
    }

    fn report_json<R>(&self, registry: &R, ui: &mut dyn UserInterface) -> Result<CommandResult>
    where
        R: PackageRegistry + ?Sized,
    {
        let reports = audit(registry, REQUIREMENTS);
        let satisfied = reports.iter().all(|r| r.status.is_satisfied());
        let first_failure = reports
            .iter()
            .find(|r| !r.status.is_satisfied())
            .cloned();

        let body = json!({
            "satisfied": satisfied,
            "requirements": reports,
        });
        ui.raw(&serde_json::to_string_pretty(&body).map_err(anyhow::Error::from)?);

        match first_failure.map(RequirementReport::into_result) {
            Some(Err(e)) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(GATE_FAILURE_EXIT_CODE))
            }
            _ => Ok(CommandResult::success()),
        }
    }
}

fn describe(report: &RequirementReport) -> String {
    format!(
        "{} {} (>={})",
        report.requirement.package_name,
        report.status.installed().unwrap_or("?"),
        report.requirement.minimum_version
    )
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let probe = probe_environment(&self.project_root, &self.environment)?;

        if let Some(python) = probe.interpreter() {
            ui.detail(&format!("Interpreter: {}", python.display()));
        }
        if probe.site_packages().is_empty() {
            ui.detail("No site-packages directories found");
        }
        for dir in probe.site_packages() {
            ui.detail(&format!("Searching {} ({})", dir.path.display(), dir.source));
        }

        self.report(&probe.registry(), ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::StaticRegistry;
    use crate::ui::MockUI;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts metadata lookups on top of a static registry.
    struct CountingRegistry {
        inner: StaticRegistry,
        lookups: AtomicUsize,
    }

    impl PackageRegistry for CountingRegistry {
        fn resolve(&self, name: &str) -> bool {
            self.inner.resolve(name)
        }

        fn installed_version(&self, name: &str) -> Option<String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.installed_version(name)
        }
    }

    fn command(all: bool, json: bool) -> CheckCommand {
        CheckCommand::new(
            Path::new("/project"),
            EnvironmentArgs::default(),
            CheckArgs { all, json },
        )
    }

    fn healthy() -> StaticRegistry {
        StaticRegistry::new()
            .with_package("torch", "2.1.0")
            .with_package("torchaudio", "2.1.0")
    }

    #[test]
    fn passing_gate_lists_each_requirement() {
        let mut ui = MockUI::new();
        let result = command(false, false).report(&healthy(), &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_success("torch 2.1.0 (>=2.0)"));
        assert!(ui.has_success("torchaudio 2.1.0 (>=0.8)"));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn passing_gate_reads_each_package_once() {
        let registry = CountingRegistry {
            inner: healthy(),
            lookups: AtomicUsize::new(0),
        };
        let mut ui = MockUI::new();
        let result = command(false, false).report(&registry, &mut ui).unwrap();
        assert!(result.success);
        assert_eq!(registry.lookups.load(Ordering::SeqCst), REQUIREMENTS.len());
    }

    #[test]
    fn failing_gate_stops_reading_at_first_failure() {
        let registry = CountingRegistry {
            inner: StaticRegistry::new()
                .with_package("torch", "1.9")
                .with_package("torchaudio", "2.1.0"),
            lookups: AtomicUsize::new(0),
        };
        let mut ui = MockUI::new();
        command(false, false).report(&registry, &mut ui).unwrap();
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 1);
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn outdated_torch_fails_with_exit_one() {
        let registry = StaticRegistry::new()
            .with_package("torch", "1.9")
            .with_package("torchaudio", "0.9");
        let mut ui = MockUI::new();
        let result = command(false, false).report(&registry, &mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("got version 1.9"));
        assert!(ui.has_error(">=2.0"));
    }

    #[test]
    fn fail_fast_reports_only_first_failure() {
        let mut ui = MockUI::new();
        command(false, false)
            .report(&StaticRegistry::new(), &mut ui)
            .unwrap();
        assert_eq!(ui.errors().len(), 1);
        assert!(ui.has_error("'torch'"));
    }

    #[test]
    fn all_reports_every_failure() {
        let mut ui = MockUI::new();
        let result = command(true, false)
            .report(&StaticRegistry::new(), &mut ui)
            .unwrap();
        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.errors().len(), 2);
        assert!(ui.has_error("https://github.com/pytorch/audio"));
        assert!(ui.has_warning("2 of 2"));
    }

    #[test]
    fn all_mixed_shows_success_and_failure() {
        let registry = StaticRegistry::new().with_package("torch", "2.0");
        let mut ui = MockUI::new();
        command(true, false).report(&registry, &mut ui).unwrap();
        assert!(ui.has_success("torch 2.0"));
        assert!(ui.has_error("'torchaudio'"));
    }

    #[test]
    fn json_output_is_parseable() {
        let registry = StaticRegistry::new().with_package("torch", "2.0");
        let mut ui = MockUI::new();
        let result = command(false, true).report(&registry, &mut ui).unwrap();
        assert_eq!(result.exit_code, 1);

        let value: serde_json::Value = serde_json::from_str(&ui.raw_output()).unwrap();
        assert_eq!(value["satisfied"], false);
        assert_eq!(value["requirements"][0]["requirement"]["package_name"], "torch");
        assert_eq!(value["requirements"][0]["status"], "satisfied");
        assert_eq!(value["requirements"][1]["status"], "missing");
    }

    #[test]
    fn json_success_has_no_errors() {
        let mut ui = MockUI::new();
        let result = command(false, true).report(&healthy(), &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.errors().is_empty());
        assert!(ui.raw_output().contains("\"satisfied\": true"));
    }
}
