//! Configuration validation rules.
//!
//! - `python` must not be empty
//! - `site_packages` entries must not be empty

use crate::config::schema::FsddConfig;
use crate::error::{FsddError, Result};

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: &'static str,
    /// Human-readable error message
    pub message: String,
}

/// Collect every validation problem in a configuration.
pub fn validate_config(config: &FsddConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(python) = &config.python {
        if python.as_os_str().is_empty() {
            errors.push(ValidationError {
                rule: "empty-python",
                message: "'python' must not be empty".to_string(),
            });
        }
    }

    for (index, dir) in config.site_packages.iter().enumerate() {
        if dir.as_os_str().is_empty() {
            errors.push(ValidationError {
                rule: "empty-site-packages",
                message: format!("'site_packages[{}]' must not be empty", index),
            });
        }
    }

    errors
}

/// Validate a configuration, joining all problems into one error.
pub fn validate(config: &FsddConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
    Err(FsddError::ConfigValidationError {
        message: messages.join("; "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&FsddConfig::default()).is_ok());
    }

    #[test]
    fn empty_python_is_rejected() {
        let config = FsddConfig {
            python: Some(PathBuf::new()),
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "empty-python");
    }

    #[test]
    fn all_problems_are_reported() {
        let config = FsddConfig {
            python: Some(PathBuf::new()),
            site_packages: vec![PathBuf::from("ok"), PathBuf::new()],
            ..Default::default()
        };
        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'python'"));
        assert!(msg.contains("site_packages[1]"));
    }
}
