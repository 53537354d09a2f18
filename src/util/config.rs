//! Settings file support.
//!
//! An optional `hone-release.toml` next to the build scripts can override the
//! build helper name, the installer platform tag and the timestamp servers.
//! A missing file means defaults; a broken one is reported and ignored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the settings file inside the script directory.
pub const SETTINGS_FILE: &str = "hone-release.toml";

/// Public Authenticode timestamp authorities, tried in this order.
pub const DEFAULT_TIMESTAMP_SERVERS: [&str; 6] = [
    "http://timestamp.comodoca.com/authenticode",
    "http://timestamp.digicert.com",
    "http://timestamp.entrust.net/TSS/AuthenticodeTS",
    "http://timestamp.globalsign.com/scripts/timestamp.dll",
    "http://timestamp.verisign.com/scripts/timstamp.dll",
    "http://tsa.starfieldtech.com",
];

/// Release settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Build settings
    pub build: BuildSettings,

    /// Installer settings
    pub installer: InstallerSettings,

    /// Signing settings
    pub signing: SigningSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Script invoked once per architecture, relative to the script directory
    pub helper: PathBuf,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings {
            helper: PathBuf::from("build_helper.bat"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerSettings {
    /// Platform suffix of the installer file name
    pub platform_tag: String,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        InstallerSettings {
            platform_tag: "win7".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningSettings {
    /// Timestamp authority URLs in failover order
    pub timestamp_servers: Vec<String>,
}

impl Default for SigningSettings {
    fn default() -> Self {
        SigningSettings {
            timestamp_servers: DEFAULT_TIMESTAMP_SERVERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse settings file: {}", path.display()))
    }

    /// Load settings with fallback to defaults if the file doesn't exist or is invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load settings from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

/// Load the settings that live next to the build scripts.
pub fn load_settings(script_dir: &Path) -> Settings {
    Settings::load_or_default(&script_dir.join(SETTINGS_FILE))
}
