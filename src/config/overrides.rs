//! Environment variable overrides.
//!
//! Applied after the config files are merged, so a shell or CI job can
//! point the gate at a different environment without editing YAML.

use crate::config::schema::FsddConfig;
use crate::error::{FsddError, Result};
use crate::requirements::probe::split_path_list;

/// Interpreter override.
pub const ENV_PYTHON: &str = "FSDD_PYTHON";

/// Site directory list override, using the platform path-list separator.
pub const ENV_SITE_PACKAGES: &str = "FSDD_SITE_PACKAGES";

/// Whether to query the interpreter (`1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`).
pub const ENV_PROBE_INTERPRETER: &str = "FSDD_PROBE_INTERPRETER";

/// Apply overrides from an env var lookup function.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut FsddConfig, env_fn: F) -> Result<()>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let var = |key: &str| env_fn(key).ok().filter(|v| !v.trim().is_empty());

    if let Some(python) = var(ENV_PYTHON) {
        tracing::debug!("{} overrides python: {}", ENV_PYTHON, python);
        config.python = Some(python.trim().into());
    }

    if let Some(dirs) = var(ENV_SITE_PACKAGES) {
        tracing::debug!("{} overrides site_packages: {}", ENV_SITE_PACKAGES, dirs);
        config.site_packages = split_path_list(&dirs);
    }

    if let Some(flag) = var(ENV_PROBE_INTERPRETER) {
        config.probe_interpreter = parse_flag(&flag).ok_or_else(|| {
            FsddError::ConfigValidationError {
                message: format!(
                    "{} must be a boolean (got '{}')",
                    ENV_PROBE_INTERPRETER, flag
                ),
            }
        })?;
    }

    Ok(())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
