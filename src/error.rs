//! Error types for fsdd operations.
//!
//! This module defines [`FsddError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The two gate failures ([`FsddError::MissingDependency`] and
//!   [`FsddError::IncompatibleVersion`]) are terminal and must reach the
//!   caller of [`crate::ensure_dependencies`] untouched
//! - Use `anyhow::Error` (via `FsddError::Other`) for unexpected errors
//! - Every message names what to fix and where to look

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fsdd operations.
#[derive(Debug, Error)]
pub enum FsddError {
    /// A required package could not be resolved, or has no metadata.
    #[error(
        "Could not find a valid installation of '{package}' (>={min_version}), which fsdd depends on.\n\
         Visit {help_url} for more instructions on installing this package."
    )]
    MissingDependency {
        package: String,
        min_version: String,
        help_url: String,
    },

    /// A required package is installed but older than the declared minimum.
    #[error(
        "Could not find a compatible installation of '{package}' (>={min_version}), which fsdd depends on - got version {installed}.\n\
         Visit {help_url} for more instructions on installing this package."
    )]
    IncompatibleVersion {
        package: String,
        min_version: String,
        installed: String,
        help_url: String,
    },

    /// A version string does not follow the package version scheme.
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The Python interpreter could not be queried for its site directories.
    #[error("Interpreter query failed ({command}): {message}")]
    InterpreterFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FsddError {
    /// Whether this error came from the dependency gate itself.
    pub fn is_gate_failure(&self) -> bool {
        matches!(
            self,
            FsddError::MissingDependency { .. } | FsddError::IncompatibleVersion { .. }
        )
    }

    /// Whether this error is a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FsddError::ConfigNotFound { .. }
                | FsddError::ConfigParseError { .. }
                | FsddError::ConfigValidationError { .. }
        )
    }
}

/// Result type alias for fsdd operations.
pub type Result<T> = std::result::Result<T, FsddError>;
