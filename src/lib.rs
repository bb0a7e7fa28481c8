//! fsdd - Dependency gate for the Free Spoken Digit Dataset loader.
//!
//! The dataset loader sits on top of a tensor library (`torch`) and an audio
//! library (`torchaudio`) installed in a Python environment. Before any
//! dataset object is built, [`ensure_dependencies`] verifies that both are
//! installed at or above their minimum versions and fails fast otherwise.
//!
//! # Modules
//!
//! - [`requirements`] - The gate, package registries and environment probe
//! - [`config`] - Configuration loading, merging and validation
//! - [`error`] - Error types and result aliases
//! - [`cli`] - Command-line interface and argument parsing
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use fsdd::requirements::StaticRegistry;
//! use fsdd::{ensure_dependencies, FsddError};
//!
//! let registry = StaticRegistry::new()
//!     .with_package("torch", "1.9")
//!     .with_package("torchaudio", "0.9");
//!
//! let err = ensure_dependencies(&registry).unwrap_err();
//! assert!(matches!(err, FsddError::IncompatibleVersion { .. }));
//! assert!(err.to_string().contains("got version 1.9"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod requirements;
pub mod ui;

pub use error::{FsddError, Result};
pub use requirements::{
    check_requirement, check_requirements, ensure_dependencies, ensure_environment,
    DependencyRequirement, PackageRegistry, REQUIREMENTS,
};
