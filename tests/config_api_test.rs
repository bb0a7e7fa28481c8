//! Integration tests for the configuration API.

use std::fs;
use std::path::PathBuf;

use fsdd::config::{load_config_with_env, load_merged_config, FsddConfig, CONFIG_DIR};
use fsdd::FsddError;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(CONFIG_DIR);
    fs::create_dir_all(&dir).unwrap();
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
    temp
}

fn no_env(_: &str) -> Result<String, std::env::VarError> {
    Err(std::env::VarError::NotPresent)
}

#[test]
fn full_config_round_trips_through_files() {
    let temp = project(&[(
        "config.yml",
        r#"
python: /usr/bin/python3
site_packages:
  - venv/lib/python3.11/site-packages
  - /opt/site
probe_interpreter: false
"#,
    )]);

    let config = load_merged_config(temp.path()).unwrap();
    assert_eq!(config.python, Some(PathBuf::from("/usr/bin/python3")));
    assert_eq!(config.site_packages.len(), 2);
    assert!(!config.probe_interpreter);

    let options = config.probe_options(temp.path());
    assert_eq!(
        options.site_packages[0],
        temp.path().join("venv/lib/python3.11/site-packages")
    );
    assert_eq!(options.site_packages[1], PathBuf::from("/opt/site"));
}

#[test]
fn local_null_removes_project_value() {
    let temp = project(&[
        ("config.yml", "python: /usr/bin/python3\n"),
        ("config.local.yml", "python: null\n"),
    ]);
    let config = load_merged_config(temp.path()).unwrap();
    assert_eq!(config, FsddConfig::default());
}

#[test]
fn env_site_packages_replace_config() {
    let temp = project(&[("config.yml", "site_packages: [from-file]\n")]);
    let config = load_config_with_env(temp.path(), None, |key| {
        if key == "FSDD_SITE_PACKAGES" {
            Ok("/from/env".to_string())
        } else {
            Err(std::env::VarError::NotPresent)
        }
    })
    .unwrap();
    assert_eq!(config.site_packages, vec![PathBuf::from("/from/env")]);
}

#[test]
fn empty_site_packages_entry_is_rejected() {
    let temp = project(&[("config.yml", "site_packages: ['']\n")]);
    let err = load_config_with_env(temp.path(), None, no_env).unwrap_err();
    assert!(matches!(err, FsddError::ConfigValidationError { .. }));
    assert!(err.is_config_error());
}
