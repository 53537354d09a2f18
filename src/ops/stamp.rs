//! Generation of the `version.h` header consumed by the driver resources.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::core::errors::ReleaseError;
use crate::core::version::Version;
use crate::util::fs;

/// Header file name, written into the script directory.
pub const VERSION_HEADER: &str = "version.h";

/// Render the header for `version`, stamped with `generated_at`.
pub fn render_header(version: &Version, generated_at: NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str("// -=-=-=-=-=- DO NOT EDIT THIS FILE! -=-=-=-=-=-\n");
    out.push_str("//\n");
    out.push_str("// Hone product version information.\n");
    out.push_str(&format!(
        "// Automatically generated by hone-build on {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str("//\n\n");
    out.push_str(&format!("#define HONE_PRODUCTVERSION      {}\n", version.numeric_list()));
    out.push_str(&format!("#define HONE_PRODUCTVERSION_STR  \"{}\"\n", version));
    out
}

/// Write `<script_dir>/version.h`, replacing any previous copy.
pub fn write_version_header(script_dir: &Path, version: &Version) -> Result<PathBuf, ReleaseError> {
    let path = script_dir.join(VERSION_HEADER);
    tracing::info!("Creating version file {}", path.display());
    fs::write_string(&path, &render_header(version, Local::now().naive_local()))?;
    Ok(path)
}
