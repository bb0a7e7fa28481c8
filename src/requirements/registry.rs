//! Package registry abstraction.
//!
//! The gate never looks at the environment directly. It asks a
//! [`PackageRegistry`] two questions: can this package be resolved, and what
//! version does its metadata report. Production code uses
//! [`SitePackagesRegistry`](super::SitePackagesRegistry); tests and dry runs
//! use [`StaticRegistry`].

use std::collections::HashMap;

/// Read-only view of the packages installed in an environment.
pub trait PackageRegistry: Send + Sync {
    /// Whether a package with this name can be located.
    fn resolve(&self, name: &str) -> bool;

    /// The installed version string as reported by package metadata.
    ///
    /// Returns `None` when the metadata is absent, even if the package
    /// resolves.
    fn installed_version(&self, name: &str) -> Option<String>;
}

impl<R: PackageRegistry + ?Sized> PackageRegistry for &R {
    fn resolve(&self, name: &str) -> bool {
        (**self).resolve(name)
    }

    fn installed_version(&self, name: &str) -> Option<String> {
        (**self).installed_version(name)
    }
}

impl<R: PackageRegistry + ?Sized> PackageRegistry for Box<R> {
    fn resolve(&self, name: &str) -> bool {
        (**self).resolve(name)
    }

    fn installed_version(&self, name: &str) -> Option<String> {
        (**self).installed_version(name)
    }
}

/// In-memory registry with a fixed set of packages.
///
/// # Example
///
/// ```
/// use fsdd::requirements::{PackageRegistry, StaticRegistry};
///
/// let registry = StaticRegistry::new()
///     .with_package("torch", "2.1.0")
///     .with_unversioned("torchaudio");
///
/// assert!(registry.resolve("torch"));
/// assert_eq!(registry.installed_version("torch").as_deref(), Some("2.1.0"));
/// assert!(registry.resolve("torchaudio"));
/// assert!(registry.installed_version("torchaudio").is_none());
/// assert!(!registry.resolve("numpy"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    packages: HashMap<String, Option<String>>,
}

impl StaticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package with a metadata version.
    pub fn with_package(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.packages.insert(name.into(), Some(version.into()));
        self
    }

    /// Add a package that resolves but carries no metadata.
    pub fn with_unversioned(mut self, name: impl Into<String>) -> Self {
        self.packages.insert(name.into(), None);
        self
    }

    /// Number of packages in the registry.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the registry holds no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageRegistry for StaticRegistry {
    fn resolve(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    fn installed_version(&self, name: &str) -> Option<String> {
        self.packages.get(name).cloned().flatten()
    }
}
