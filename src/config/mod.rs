//! Configuration loading, merging and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Environment variable overrides in [`overrides`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use fsdd::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".fsdd");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "probe_interpreter: false").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert!(!config.probe_interpreter);
//! ```
//!
//! # Configuration File Locations
//!
//! Merged in this order:
//! 1. Project config (`.fsdd/config.yml`)
//! 2. Local overrides (`.fsdd/config.local.yml`)
//!
//! `FSDD_PYTHON`, `FSDD_SITE_PACKAGES` and `FSDD_PROBE_INTERPRETER` then
//! override the merged values.

pub mod loader;
pub mod merger;
pub mod overrides;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_config_with_env,
    load_merged_config, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use overrides::{
    apply_env_overrides, ENV_PROBE_INTERPRETER, ENV_PYTHON, ENV_SITE_PACKAGES,
};
pub use schema::FsddConfig;
pub use validator::{validate, validate_config, ValidationError};
