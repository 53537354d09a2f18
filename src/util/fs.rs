//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;

use crate::core::errors::ReleaseError;

type Result<T> = std::result::Result<T, ReleaseError>;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(ReleaseError::fs("create directory", path))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).map_err(ReleaseError::fs("write file", path))
}

/// Copy a single file into `dst_dir`, keeping its file name.
pub fn copy_file(src: &Path, dst_dir: &Path) -> Result<PathBuf> {
    let name = src.file_name().ok_or_else(|| ReleaseError::Filesystem {
        action: "copy",
        path: src.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let dst = dst_dir.join(name);
    copy_to(src, &dst)?;
    Ok(dst)
}

/// Copy a file to an explicit destination path.
pub fn copy_to(src: &Path, dst: &Path) -> Result<()> {
    tracing::debug!("   {}", src.display());
    fs::copy(src, dst).map_err(ReleaseError::fs("copy", src))?;
    Ok(())
}

/// Find regular files matching a glob pattern.
///
/// Unreadable entries are logged and skipped. No match is an empty list.
pub fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    let entries = glob(pattern).map_err(|source| ReleaseError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    Ok(results)
}

/// Copy every file matching `pattern` into `dst_dir`, skipping those `skip` rejects.
///
/// Copying nothing is a success: build output for an architecture may
/// legitimately lack some kinds of artifacts.
pub fn copy_matching(
    pattern: &str,
    dst_dir: &Path,
    skip: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for src in glob_files(pattern)? {
        if skip(&src) {
            continue;
        }
        copied.push(copy_file(&src, dst_dir)?);
    }
    Ok(copied)
}

/// Copy every regular file directly inside `src_dir` (non-recursive).
pub fn copy_all(src_dir: &Path, dst_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Path::new(&glob::Pattern::escape(&src_dir.to_string_lossy()))
        .join("*")
        .to_string_lossy()
        .into_owned();
    copy_matching(&pattern, dst_dir, |_| false)
}

/// Empty a directory in place, or create it if missing.
///
/// The directory itself is never removed, so handles and shells sitting in
/// it stay valid. Calling this twice leaves the same empty directory.
pub fn reset_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return fs::create_dir_all(path).map_err(ReleaseError::fs("create directory", path));
    }

    let entries = fs::read_dir(path).map_err(ReleaseError::fs("read directory", path))?;
    for entry in entries {
        let entry = entry.map_err(ReleaseError::fs("read directory", path))?;
        let entry_path = entry.path();
        let ty = entry
            .file_type()
            .map_err(ReleaseError::fs("inspect", &entry_path))?;

        if ty.is_dir() {
            fs::remove_dir_all(&entry_path)
                .map_err(ReleaseError::fs("remove directory", &entry_path))?;
        } else {
            fs::remove_file(&entry_path).map_err(ReleaseError::fs("remove file", &entry_path))?;
        }
    }
    Ok(())
}
