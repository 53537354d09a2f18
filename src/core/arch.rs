//! Target architectures.

use std::fmt;
use std::path::{Path, PathBuf};

/// Build flavour passed to the architecture build helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    /// Checked (debug) build.
    Checked,
    /// Free (release) build.
    Free,
}

impl BuildType {
    pub fn from_debug(debug: bool) -> Self {
        if debug {
            BuildType::Checked
        } else {
            BuildType::Free
        }
    }

    /// Tag understood by the WDK build environment.
    pub fn tag(&self) -> &'static str {
        match self {
            BuildType::Checked => "chk",
            BuildType::Free => "fre",
        }
    }

    /// Suffix used in build root directory names.
    pub fn profile(&self) -> &'static str {
        match self {
            BuildType::Checked => "debug",
            BuildType::Free => "release",
        }
    }
}

/// Sub-projects whose output gets collected after each architecture build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubProject {
    /// The kernel-mode sensor driver.
    Sensor,
    /// The user-mode companion utility.
    Utility,
}

impl SubProject {
    pub const ALL: [SubProject; 2] = [SubProject::Sensor, SubProject::Utility];

    /// Directory name under the script directory.
    pub fn dir_name(&self) -> &'static str {
        match self {
            SubProject::Sensor => "hone",
            SubProject::Utility => "honeutil",
        }
    }
}

/// The closed set of architectures the product ships for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    X86,
    X64,
}

impl Architecture {
    /// Build order: 32-bit before 64-bit.
    pub const ALL: [Architecture; 2] = [Architecture::X86, Architecture::X64];

    /// Human label used in progress messages.
    pub fn label(&self) -> &'static str {
        match self {
            Architecture::X86 => "32-bit",
            Architecture::X64 => "64-bit",
        }
    }

    /// Short tag used for output directory names and as the build helper argument.
    pub fn tag(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "x64",
        }
    }

    /// WDK object directory architecture tag (`objfre_win7_<this>`).
    pub fn obj_tag(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "amd64",
        }
    }

    /// WDK output subdirectory inside the object directory.
    pub fn cpu_dir(&self) -> &'static str {
        match self {
            Architecture::X86 => "i386",
            Architecture::X64 => "amd64",
        }
    }

    /// Where the external build tool leaves a sub-project's binaries.
    ///
    /// The directory is not required to exist.
    pub fn output_dir(
        &self,
        script_dir: &Path,
        build_type: BuildType,
        project: SubProject,
    ) -> PathBuf {
        script_dir
            .join(project.dir_name())
            .join(format!("obj{}_win7_{}", build_type.tag(), self.obj_tag()))
            .join(self.cpu_dir())
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
