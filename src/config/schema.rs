//! Configuration schema.
//!
//! Maps `.fsdd/config.yml` onto [`FsddConfig`]. Only the discovery of the
//! Python environment is configurable; the declared requirements are not.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::requirements::ProbeOptions;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FsddConfig {
    /// Interpreter used to discover site directories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<PathBuf>,

    /// Directories searched before anything discovered, highest priority first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub site_packages: Vec<PathBuf>,

    /// Ask the interpreter for its site directories
    pub probe_interpreter: bool,
}

impl Default for FsddConfig {
    fn default() -> Self {
        Self {
            python: None,
            site_packages: Vec::new(),
            probe_interpreter: true,
        }
    }
}

impl FsddConfig {
    /// Build probe options, resolving relative directories against `project_root`.
    pub fn probe_options(&self, project_root: &Path) -> ProbeOptions {
        ProbeOptions {
            python: self.python.clone(),
            site_packages: self
                .site_packages
                .iter()
                .map(|dir| {
                    if dir.is_absolute() {
                        dir.clone()
                    } else {
                        project_root.join(dir)
                    }
                })
                .collect(),
            probe_interpreter: self.probe_interpreter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_probes_interpreter() {
        let config = FsddConfig::default();
        assert!(config.probe_interpreter);
        assert!(config.python.is_none());
        assert!(config.site_packages.is_empty());
    }

    #[test]
    fn empty_mapping_parses_to_default() {
        let config: FsddConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, FsddConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let yaml = r#"
python: /usr/bin/python3
site_packages:
  - venv/lib/python3.11/site-packages
  - /opt/site-packages
probe_interpreter: false
"#;
        let config: FsddConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.python, Some(PathBuf::from("/usr/bin/python3")));
        assert_eq!(config.site_packages.len(), 2);
        assert!(!config.probe_interpreter);
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: std::result::Result<FsddConfig, _> =
            serde_yaml::from_str("minimum_versions:\n  torch: '1.0'\n");
        assert!(result.is_err());
    }

    #[test]
    fn relative_dirs_resolve_against_project_root() {
        let config = FsddConfig {
            site_packages: vec![PathBuf::from("venv/site"), PathBuf::from("/abs/site")],
            ..Default::default()
        };
        let options = config.probe_options(Path::new("/project"));
        assert_eq!(
            options.site_packages,
            vec![PathBuf::from("/project/venv/site"), PathBuf::from("/abs/site")]
        );
        assert!(options.probe_interpreter);
    }

    #[test]
    fn serializes_without_empty_fields() {
        let yaml = serde_yaml::to_string(&FsddConfig::default()).unwrap();
        assert!(!yaml.contains("python:"));
        assert!(!yaml.contains("site_packages"));
        assert!(yaml.contains("probe_interpreter: true"));
    }
}
