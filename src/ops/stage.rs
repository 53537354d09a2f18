//! Artifact staging.
//!
//! All copies here are best effort with respect to matching: a category with
//! no files in the source directory copies nothing and succeeds. Failures of
//! the copies themselves are fatal.

use std::path::{Path, PathBuf};

use crate::core::artifact::ArtifactCategory;
use crate::core::errors::ReleaseError;
use crate::util::fs;

pub use crate::util::fs::{copy_all, copy_file, reset_directory};

type Result<T> = std::result::Result<T, ReleaseError>;

/// Copy every file of `category` from `src_dir` into `dst_dir`.
pub fn copy_category(
    category: ArtifactCategory,
    src_dir: &Path,
    dst_dir: &Path,
) -> Result<Vec<PathBuf>> {
    if !src_dir.is_dir() {
        tracing::debug!("no {} output in {}", category.extension(), src_dir.display());
    }
    fs::copy_matching(&category.pattern(src_dir), dst_dir, |p| category.excludes(p))
}

/// Copy `*.exe` files.
pub fn copy_executables(src_dir: &Path, dst_dir: &Path) -> Result<Vec<PathBuf>> {
    copy_category(ArtifactCategory::Executable, src_dir, dst_dir)
}

/// Copy `*.sys` files.
pub fn copy_driver_images(src_dir: &Path, dst_dir: &Path) -> Result<Vec<PathBuf>> {
    copy_category(ArtifactCategory::DriverImage, src_dir, dst_dir)
}

/// Copy `*.pdb` files, leaving out the compiler's `vc90.pdb`.
pub fn copy_debug_symbols(src_dir: &Path, dst_dir: &Path) -> Result<Vec<PathBuf>> {
    copy_category(ArtifactCategory::DebugSymbol, src_dir, dst_dir)
}
