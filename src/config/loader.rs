//! Configuration file discovery and loading.
//!
//! Config files are optional. Without any, the defaults apply and the probe
//! discovers everything on its own.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::config::merger::merge_configs;
use crate::config::overrides::apply_env_overrides;
use crate::config::schema::FsddConfig;
use crate::config::validator::validate;
use crate::error::{FsddError, Result};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".fsdd";

/// Paths to configuration files in merge order (later overrides earlier).
///
/// 1. Project config (`.fsdd/config.yml`)
/// 2. Local overrides (`.fsdd/config.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: .fsdd/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .fsdd/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(CONFIG_DIR);
        Self {
            project: existing(dir.join("config.yml")),
            project_local: existing(dir.join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.fsdd` directory first, then `.git` as a fallback.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load a config file as a raw YAML value.
///
/// An empty file is an empty mapping.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FsddError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FsddError::Io(e)
        }
    })?;

    let value: Value = serde_yaml::from_str(&content).map_err(|e| FsddError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(if value.is_null() {
        Value::Mapping(Default::default())
    } else {
        value
    })
}

fn from_value(value: Value, path: &Path) -> Result<FsddConfig> {
    serde_yaml::from_value(value).map_err(|e| FsddError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file without merging.
pub fn load_config_file(path: &Path) -> Result<FsddConfig> {
    from_value(load_config_value(path)?, path)
}

/// Load and merge the project's config files.
///
/// Returns the defaults when no config file exists.
pub fn load_merged_config(project_root: &Path) -> Result<FsddConfig> {
    let paths = ConfigPaths::discover(project_root);
    let existing = paths.all_existing();
    let Some(report_path) = existing.last() else {
        tracing::debug!("No config in {}, using defaults", project_root.display());
        return Ok(FsddConfig::default());
    };

    let values = existing
        .iter()
        .map(|path| load_config_value(path))
        .collect::<Result<Vec<_>>>()?;

    from_value(merge_configs(&values), report_path)
}

/// Load config with an optional path override, environment overrides and
/// validation.
///
/// If `config_override` is provided, only that file is loaded.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<FsddConfig> {
    load_config_with_env(project_root, config_override, |key: &str| std::env::var(key))
}

/// [`load_config`] with a custom env var lookup function.
pub fn load_config_with_env<F>(
    project_root: &Path,
    config_override: Option<&Path>,
    env_fn: F,
) -> Result<FsddConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let mut config = match config_override {
        Some(path) => load_config_file(path)?,
        None => load_merged_config(project_root)?,
    };
    apply_env_overrides(&mut config, env_fn)?;
    validate(&config)?;
    Ok(config)
}
