//! Snapshot of the environment the release tools are discovered from.

use std::path::{Path, PathBuf};

use crate::util::process::find_executable;

/// Environment variables naming Program Files directories, in search order.
pub const PROGRAM_FILES_VARS: [&str; 2] = ["ProgramFiles", "ProgramFiles(x86)"];

/// Variable pointing at the Windows Driver Kit root.
pub const WDK_PATH_VAR: &str = "WDKPATH";

/// Installer compiler location relative to a Program Files directory.
pub const INSTALLER_COMPILER_SUBPATH: [&str; 2] = ["Inno Setup 5", "iscc.exe"];

/// Installer compiler name looked up on `PATH` as a last resort.
pub const INSTALLER_COMPILER_NAME: &str = "iscc";

/// What the validator needs to know about the host.
///
/// Captured once so validation itself stays a pure function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolEnvironment {
    /// Program Files directories, in search order.
    pub program_files: Vec<PathBuf>,
    /// Windows Driver Kit root, if set.
    pub wdk_path: Option<PathBuf>,
    /// Installer compiler found on `PATH`, if any.
    pub installer_compiler_on_path: Option<PathBuf>,
}

impl ToolEnvironment {
    /// Read the real process environment.
    pub fn from_env() -> Self {
        let program_files = PROGRAM_FILES_VARS
            .iter()
            .filter_map(|var| std::env::var_os(var))
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .collect();

        ToolEnvironment {
            program_files,
            wdk_path: std::env::var_os(WDK_PATH_VAR).map(PathBuf::from),
            installer_compiler_on_path: find_executable(INSTALLER_COMPILER_NAME),
        }
    }

    /// First installer compiler that exists on disk.
    pub fn find_installer_compiler(&self) -> Option<PathBuf> {
        self.program_files
            .iter()
            .map(|dir| installer_compiler_in(dir))
            .find(|candidate| candidate.is_file())
            .or_else(|| self.installer_compiler_on_path.clone())
    }

    /// Signing tool shipped with the driver kit.
    pub fn sign_tool(&self) -> Option<PathBuf> {
        self.wdk_path
            .as_ref()
            .map(|wdk| wdk.join("bin").join("x86").join("signtool"))
    }
}

fn installer_compiler_in(program_files: &Path) -> PathBuf {
    INSTALLER_COMPILER_SUBPATH
        .iter()
        .fold(program_files.to_path_buf(), |path, part| path.join(part))
}
