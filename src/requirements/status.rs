//! Requirement status types for reporting.
//!
//! The gate itself stops at the first failure. An audit evaluates every
//! requirement and records a [`RequirementStatus`] for each, so a report can
//! show the whole picture at once.

use serde::Serialize;

use super::requirement::DependencyRequirement;
use crate::error::{FsddError, Result};

/// The outcome of checking a single requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequirementStatus {
    /// Installed at or above the minimum.
    Satisfied { installed: String },

    /// Not resolvable, or resolvable without metadata.
    Missing,

    /// Installed, but older than the minimum.
    Incompatible { installed: String },

    /// A version string could not be parsed.
    InvalidVersion { version: String, reason: String },
}

impl RequirementStatus {
    /// Whether the requirement is met.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, RequirementStatus::Satisfied { .. })
    }

    /// The installed version, when one was read.
    pub fn installed(&self) -> Option<&str> {
        match self {
            RequirementStatus::Satisfied { installed }
            | RequirementStatus::Incompatible { installed } => Some(installed),
            _ => None,
        }
    }
}

/// A requirement together with its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementReport {
    pub requirement: DependencyRequirement,
    #[serde(flatten)]
    pub status: RequirementStatus,
}

impl RequirementReport {
    /// Convert to the gate's outcome: `Ok` when satisfied, the matching
    /// error otherwise.
    pub fn into_result(self) -> Result<()> {
        let req = self.requirement;
        match self.status {
            RequirementStatus::Satisfied { .. } => Ok(()),
            RequirementStatus::Missing => Err(FsddError::MissingDependency {
                package: req.package_name.to_string(),
                min_version: req.minimum_version.to_string(),
                help_url: req.help_url.to_string(),
            }),
            RequirementStatus::Incompatible { installed } => {
                Err(FsddError::IncompatibleVersion {
                    package: req.package_name.to_string(),
                    min_version: req.minimum_version.to_string(),
                    installed,
                    help_url: req.help_url.to_string(),
                })
            }
            RequirementStatus::InvalidVersion { version, reason } => {
                Err(FsddError::InvalidVersion { version, reason })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{TORCH, TORCHAUDIO};

    #[test]
    fn only_satisfied_is_satisfied() {
        assert!(RequirementStatus::Satisfied {
            installed: "2.0".into()
        }
        .is_satisfied());
        assert!(!RequirementStatus::Missing.is_satisfied());
        assert!(!RequirementStatus::Incompatible {
            installed: "1.9".into()
        }
        .is_satisfied());
        assert!(!RequirementStatus::InvalidVersion {
            version: "x".into(),
            reason: "bad".into()
        }
        .is_satisfied());
    }

    #[test]
    fn installed_version_is_exposed() {
        let status = RequirementStatus::Incompatible {
            installed: "1.9".into(),
        };
        assert_eq!(status.installed(), Some("1.9"));
        assert_eq!(RequirementStatus::Missing.installed(), None);
    }

    #[test]
    fn missing_converts_to_missing_dependency() {
        let report = RequirementReport {
            requirement: TORCHAUDIO,
            status: RequirementStatus::Missing,
        };
        match report.into_result() {
            Err(FsddError::MissingDependency {
                package, help_url, ..
            }) => {
                assert_eq!(package, "torchaudio");
                assert_eq!(help_url, TORCHAUDIO.help_url);
            }
            other => panic!("Expected MissingDependency, got {:?}", other),
        }
    }

    #[test]
    fn incompatible_converts_with_installed_version() {
        let report = RequirementReport {
            requirement: TORCH,
            status: RequirementStatus::Incompatible {
                installed: "1.9".into(),
            },
        };
        let err = report.into_result().unwrap_err();
        assert!(matches!(
            err,
            FsddError::IncompatibleVersion { ref installed, .. } if installed == "1.9"
        ));
    }

    #[test]
    fn serializes_flat_with_status_tag() {
        let report = RequirementReport {
            requirement: TORCH,
            status: RequirementStatus::Satisfied {
                installed: "2.1.0".into(),
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "satisfied");
        assert_eq!(json["installed"], "2.1.0");
        assert_eq!(json["requirement"]["package_name"], "torch");
        assert_eq!(json["requirement"]["minimum_version"], "2.0");
    }

    #[test]
    fn missing_serializes_without_installed() {
        let report = RequirementReport {
            requirement: TORCHAUDIO,
            status: RequirementStatus::Missing,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "missing");
        assert!(json.get("installed").is_none());
    }
}
