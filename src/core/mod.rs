//! Core data types for release builds.

pub mod arch;
pub mod artifact;
pub mod config;
pub mod errors;
pub mod layout;
pub mod version;

pub use arch::{Architecture, BuildType, SubProject};
pub use artifact::ArtifactCategory;
pub use config::{BuildConfiguration, ReleaseArgs, SigningConfig, Stage, StageSet};
pub use errors::{ReleaseError, ValidationError};
pub use layout::BuildRootLayout;
pub use version::Version;
