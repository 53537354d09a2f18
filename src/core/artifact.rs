//! Artifact categories collected from build output.

use std::path::Path;

use glob::Pattern;

/// Debug symbols produced by the compiler itself, not worth shipping.
pub const EXCLUDED_SYMBOL_SUFFIX: &str = "vc90.pdb";

/// Kind of file produced by the external build tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactCategory {
    Executable,
    DriverImage,
    DebugSymbol,
}

impl ArtifactCategory {
    /// File extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactCategory::Executable => "exe",
            ArtifactCategory::DriverImage => "sys",
            ArtifactCategory::DebugSymbol => "pdb",
        }
    }

    /// Build root subdirectory this category is staged into.
    pub fn subdir(&self) -> &'static str {
        match self {
            ArtifactCategory::Executable | ArtifactCategory::DriverImage => "build_files",
            ArtifactCategory::DebugSymbol => "debug_symbols",
        }
    }

    /// Glob pattern matching this category directly inside `dir`.
    pub fn pattern(&self, dir: &Path) -> String {
        let escaped = Pattern::escape(&dir.to_string_lossy());
        Path::new(&escaped)
            .join(format!("*.{}", self.extension()))
            .to_string_lossy()
            .into_owned()
    }

    /// Whether a matched file should still be skipped.
    pub fn excludes(&self, path: &Path) -> bool {
        match self {
            ArtifactCategory::DebugSymbol => path
                .file_name()
                .map(|name| name.to_string_lossy().ends_with(EXCLUDED_SYMBOL_SUFFIX))
                .unwrap_or(false),
            _ => false,
        }
    }
}
