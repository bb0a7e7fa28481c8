//! On-disk package registry.
//!
//! Looks packages up in Python `site-packages` directories the same way the
//! interpreter does: a package resolves when its module directory, source
//! file or compiled extension exists, and its version comes from the
//! `Version:` header of the distribution's `METADATA` (wheel installs) or
//! `PKG-INFO` (legacy egg installs).
//!
//! # Example
//!
//! ```no_run
//! use fsdd::requirements::{PackageRegistry, SitePackagesRegistry};
//! use std::path::PathBuf;
//!
//! let registry = SitePackagesRegistry::new(vec![PathBuf::from(
//!     "/opt/venv/lib/python3.11/site-packages",
//! )]);
//! if registry.resolve("torch") {
//!     println!("torch {:?}", registry.installed_version("torch"));
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::registry::PackageRegistry;

static VERSION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Version:[ \t]*(\S+)[ \t]*\r?$").expect("VERSION_HEADER must compile")
});

static NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("NAME_SEPARATORS must compile"));

/// Normalize a distribution name for comparison.
///
/// Lowercases and collapses runs of `-`, `_` and `.` to a single `-`, so
/// `Torch_Audio`, `torch.audio` and `torch-audio` compare equal.
pub fn normalize_name(name: &str) -> String {
    NAME_SEPARATORS
        .replace_all(&name.to_ascii_lowercase(), "-")
        .into_owned()
}

/// Extract the `Version:` header from a core metadata document.
///
/// Only the header block (up to the first blank line) is searched; the
/// long description that follows may contain anything.
pub fn parse_metadata_version(metadata: &str) -> Option<String> {
    let header = metadata
        .split("\n\n")
        .next()
        .and_then(|h| h.split("\r\n\r\n").next())
        .unwrap_or_default();
    VERSION_HEADER
        .captures(header)
        .map(|caps| caps[1].to_string())
}

/// Registry backed by an ordered list of `site-packages` directories.
#[derive(Debug, Clone, Default)]
pub struct SitePackagesRegistry {
    dirs: Vec<PathBuf>,
}

impl SitePackagesRegistry {
    /// Create a registry searching `dirs` in order.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// The directories searched, highest priority first.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Locate the directory a package resolves from.
    pub fn locate(&self, name: &str) -> Option<&Path> {
        let top = name.split('.').next().unwrap_or(name);
        if top.is_empty() {
            return None;
        }
        self.dirs
            .iter()
            .find(|dir| module_exists(dir, top))
            .map(PathBuf::as_path)
    }

    /// Locate the metadata file for a distribution.
    pub fn metadata_path(&self, name: &str) -> Option<PathBuf> {
        let wanted = normalize_name(name);
        self.dirs
            .iter()
            .find_map(|dir| find_metadata(dir, &wanted))
    }
}

impl PackageRegistry for SitePackagesRegistry {
    fn resolve(&self, name: &str) -> bool {
        let found = self.locate(name);
        tracing::debug!("Resolve '{}': {:?}", name, found);
        found.is_some()
    }

    fn installed_version(&self, name: &str) -> Option<String> {
        let path = self.metadata_path(name)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read metadata at {}: {}", path.display(), e);
                return None;
            }
        };
        let version = parse_metadata_version(&content);
        tracing::debug!("Metadata for '{}' at {}: {:?}", name, path.display(), version);
        version
    }
}

/// Whether `top` is importable from `dir`.
fn module_exists(dir: &Path, top: &str) -> bool {
    if dir.join(top).is_dir() || dir.join(format!("{}.py", top)).is_file() {
        return true;
    }

    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    let prefix = format!("{}.", top);
    entries.flatten().any(|entry| {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        file_name.starts_with(&prefix) && is_extension_module(&file_name)
    })
}

fn is_extension_module(file_name: &str) -> bool {
    file_name.ends_with(".so") || file_name.ends_with(".pyd")
}

/// Find the metadata file for a normalized distribution name in one directory.
///
/// `.dist-info` wins over `.egg-info` when both are present.
fn find_metadata(dir: &Path, wanted: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut egg_info = None;

    for entry in entries.flatten() {
        let path = entry.path();
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();

        if let Some(stem) = file_name.strip_suffix(".dist-info") {
            if distribution_matches(stem, wanted) {
                let metadata = path.join("METADATA");
                if metadata.is_file() {
                    return Some(metadata);
                }
            }
        } else if let Some(stem) = file_name.strip_suffix(".egg-info") {
            if egg_info.is_none() && distribution_matches(stem, wanted) {
                // Legacy installs write either a directory or a bare file.
                let metadata = if path.is_dir() {
                    path.join("PKG-INFO")
                } else {
                    path.clone()
                };
                if metadata.is_file() {
                    egg_info = Some(metadata);
                }
            }
        }
    }

    egg_info
}

/// Compare the name part of `<name>-<version>[-<tags>]` with `wanted`.
fn distribution_matches(stem: &str, wanted: &str) -> bool {
    let name = stem.split('-').next().unwrap_or(stem);
    normalize_name(name) == wanted
}
