//! The dependency gate.
//!
//! Nothing that builds on the dataset classes may run until every declared
//! package is present and new enough. [`ensure_dependencies`] is that
//! precondition; callers run it before constructing anything that depends on
//! the tensor or audio library, and propagate its error unchanged.
//!
//! # Example
//!
//! ```
//! use fsdd::requirements::{ensure_dependencies, StaticRegistry};
//! use fsdd::FsddError;
//!
//! let registry = StaticRegistry::new()
//!     .with_package("torch", "2.1.0+cu118")
//!     .with_package("torchaudio", "2.1.0");
//! ensure_dependencies(&registry).unwrap();
//!
//! let outdated = StaticRegistry::new()
//!     .with_package("torch", "1.9")
//!     .with_package("torchaudio", "0.9");
//! let err = ensure_dependencies(&outdated).unwrap_err();
//! assert!(matches!(err, FsddError::IncompatibleVersion { .. }));
//! ```

use std::path::Path;

use super::probe::{query_interpreter, EnvironmentProbe};
use super::registry::PackageRegistry;
use super::requirement::{DependencyRequirement, REQUIREMENTS};
use super::status::{RequirementReport, RequirementStatus};
use super::version::Version;
use crate::config::load_config_with_env;
use crate::error::{FsddError, Result};

/// Evaluate one requirement against a registry.
///
/// Never fails; the outcome is carried in the returned status.
pub fn evaluate<R>(registry: &R, requirement: &DependencyRequirement) -> RequirementStatus
where
    R: PackageRegistry + ?Sized,
{
    let name = requirement.package_name;

    if !registry.resolve(name) {
        return RequirementStatus::Missing;
    }

    // Read from metadata, not from the package: not every package exposes
    // a reliable version attribute at runtime.
    let Some(installed) = registry.installed_version(name) else {
        tracing::debug!("'{}' resolves but has no version metadata", name);
        return RequirementStatus::Missing;
    };

    let minimum = match Version::parse(requirement.minimum_version) {
        Ok(v) => v,
        Err(e) => return invalid(requirement.minimum_version, e),
    };
    let parsed = match Version::parse(&installed) {
        Ok(v) => v,
        Err(e) => return invalid(&installed, e),
    };

    if parsed < minimum {
        RequirementStatus::Incompatible { installed }
    } else {
        RequirementStatus::Satisfied { installed }
    }
}

fn invalid(version: &str, err: FsddError) -> RequirementStatus {
    let reason = match err {
        FsddError::InvalidVersion { reason, .. } => reason,
        other => other.to_string(),
    };
    RequirementStatus::InvalidVersion {
        version: version.to_string(),
        reason,
    }
}

/// Check that a single requirement is met.
///
/// # Errors
///
/// - `MissingDependency` if the package cannot be resolved or has no metadata
/// - `IncompatibleVersion` if the installed version is below the minimum
/// - `InvalidVersion` if either version string cannot be parsed
pub fn check_requirement<R>(registry: &R, requirement: &DependencyRequirement) -> Result<()>
where
    R: PackageRegistry + ?Sized,
{
    let status = evaluate(registry, requirement);
    tracing::debug!("Requirement '{}': {:?}", requirement.package_name, status);
    RequirementReport {
        requirement: *requirement,
        status,
    }
    .into_result()
}

/// Check requirements in order, stopping at the first one that is not met.
pub fn check_requirements<R>(registry: &R, requirements: &[DependencyRequirement]) -> Result<()>
where
    R: PackageRegistry + ?Sized,
{
    for requirement in requirements {
        check_requirement(registry, requirement)?;
    }
    Ok(())
}

/// Run the gate over every declared requirement.
///
/// Call this before constructing dataset objects. It is read-only and may be
/// called any number of times.
pub fn ensure_dependencies<R>(registry: &R) -> Result<()>
where
    R: PackageRegistry + ?Sized,
{
    check_requirements(registry, REQUIREMENTS)
}

/// Run the gate against the environment discovered for a project.
///
/// Loads `.fsdd/config.yml` (if any) and environment overrides, probes for
/// `site-packages` directories, then runs [`ensure_dependencies`].
pub fn ensure_environment(project_root: &Path) -> Result<()> {
    ensure_environment_with_env(project_root, |key: &str| std::env::var(key))
}

/// [`ensure_environment`] with a custom env var lookup function.
///
/// The lookup serves both the config overrides and the probe (`VIRTUAL_ENV`,
/// `PATH`).
pub fn ensure_environment_with_env<F>(project_root: &Path, env_fn: F) -> Result<()>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let config = load_config_with_env(project_root, None, &env_fn)?;
    let probe =
        EnvironmentProbe::run_with(&config.probe_options(project_root), &env_fn, query_interpreter);
    ensure_dependencies(&probe.registry())
}

/// Evaluate every requirement without stopping, for reporting.
pub fn audit<R>(registry: &R, requirements: &[DependencyRequirement]) -> Vec<RequirementReport>
where
    R: PackageRegistry + ?Sized,
{
    requirements
        .iter()
        .map(|requirement| RequirementReport {
            requirement: *requirement,
            status: evaluate(registry, requirement),
        })
        .collect()
}
