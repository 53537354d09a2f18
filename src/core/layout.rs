//! On-disk layout of a build root.
//!
//! ```text
//! hone_<version>_<debug|release>
//!   build_files/<arch>      executables and driver images
//!   debug_symbols/<arch>    PDB files for drivers and executables
//!   installers/             finished installers
//!   temp/installer/<arch>   installer staging area, wiped every package run
//! ```

use std::path::{Path, PathBuf};

use crate::core::arch::Architecture;
use crate::core::artifact::ArtifactCategory;

/// Paths inside a build root. Nothing here touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRootLayout {
    root: PathBuf,
}

impl BuildRootLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        BuildRootLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staging directory for a category of artifacts.
    pub fn artifact_dir(&self, category: ArtifactCategory, arch: Architecture) -> PathBuf {
        self.root.join(category.subdir()).join(arch.tag())
    }

    pub fn build_files(&self, arch: Architecture) -> PathBuf {
        self.artifact_dir(ArtifactCategory::Executable, arch)
    }

    pub fn debug_symbols(&self, arch: Architecture) -> PathBuf {
        self.artifact_dir(ArtifactCategory::DebugSymbol, arch)
    }

    pub fn installers(&self) -> PathBuf {
        self.root.join("installers")
    }

    pub fn installer_staging(&self) -> PathBuf {
        self.root.join("temp").join("installer")
    }

    pub fn installer_staging_arch(&self, arch: Architecture) -> PathBuf {
        self.installer_staging().join(arch.tag())
    }
}
