//! Declared package requirements.
//!
//! The dataset classes sit on top of a tensor library and an audio library.
//! Both are declared here as constants so tooling can read the required
//! versions without running the gate.

use serde::Serialize;

/// Minimum supported version of the tensor library.
pub const MIN_TORCH_VERSION: &str = "2.0";

/// Minimum supported version of the audio library.
pub const MIN_TORCHAUDIO_VERSION: &str = "0.8";

/// A package that must be installed, at or above a minimum version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DependencyRequirement {
    /// Importable package name (e.g., "torch").
    pub package_name: &'static str,
    /// Lowest acceptable installed version.
    pub minimum_version: &'static str,
    /// Installation instructions shown when the requirement is not met.
    pub help_url: &'static str,
}

impl DependencyRequirement {
    /// Declare a requirement.
    pub const fn new(
        package_name: &'static str,
        minimum_version: &'static str,
        help_url: &'static str,
    ) -> Self {
        Self {
            package_name,
            minimum_version,
            help_url,
        }
    }
}

/// The tensor library.
pub const TORCH: DependencyRequirement =
    DependencyRequirement::new("torch", MIN_TORCH_VERSION, "https://pytorch.org/");

/// The audio library.
pub const TORCHAUDIO: DependencyRequirement = DependencyRequirement::new(
    "torchaudio",
    MIN_TORCHAUDIO_VERSION,
    "https://github.com/pytorch/audio",
);

/// Every requirement, in the order the gate checks them.
pub const REQUIREMENTS: &[DependencyRequirement] = &[TORCH, TORCHAUDIO];
