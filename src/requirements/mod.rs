//! Dependency gate and package discovery.
//!
//! The dataset classes depend on a tensor library and an audio library
//! installed in a Python environment. This module decides whether that
//! environment is good enough to proceed.
//!
//! # Modules
//!
//! - [`requirement`] - Declared requirements and their minimum versions
//! - [`version`] - Package version parsing and ordering
//! - [`registry`] - The [`PackageRegistry`] abstraction and an in-memory registry
//! - [`site_packages`] - Registry backed by `site-packages` directories
//! - [`probe`] - Discovery of the directories to search
//! - [`status`] - Per-requirement results for reporting
//! - [`gate`] - The gate itself

pub mod gate;
pub mod probe;
pub mod registry;
pub mod requirement;
pub mod site_packages;
pub mod status;
pub mod version;

pub use gate::{
    audit, check_requirement, check_requirements, ensure_dependencies, ensure_environment,
    ensure_environment_with_env, evaluate,
};
pub use probe::{EnvironmentProbe, ProbeOptions, SiteDir, SiteSource};
pub use registry::{PackageRegistry, StaticRegistry};
pub use requirement::{
    DependencyRequirement, MIN_TORCHAUDIO_VERSION, MIN_TORCH_VERSION, REQUIREMENTS, TORCH,
    TORCHAUDIO,
};
pub use site_packages::SitePackagesRegistry;
pub use status::{RequirementReport, RequirementStatus};
pub use version::Version;
