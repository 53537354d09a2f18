//! Product version numbers.
//!
//! The downstream version resource stores the major and minor components
//! in one byte each and the build component in two bytes, which is where
//! the bounds below come from.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Largest accepted major version.
pub const MAX_MAJOR: u32 = 255;

/// Largest accepted minor version.
pub const MAX_MINOR: u32 = 255;

/// Largest accepted build number.
pub const MAX_BUILD: u32 = 65535;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)(?:\.([0-9]+))?$").expect("version pattern is valid")
});

/// A validated `major.minor[.build]` version.
///
/// The text exactly as the operator typed it is kept alongside the numeric
/// components; it names the build root and ends up in the string defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    major: u32,
    minor: u32,
    build: Option<u32>,
    text: String,
}

impl Version {
    /// Parse and bounds-check a version string.
    ///
    /// Every violated bound is reported, not just the first one.
    pub fn parse(input: &str) -> Result<Version, Vec<String>> {
        let caps = VERSION_RE.captures(input).ok_or_else(|| {
            vec![format!(
                "Invalid version \"{}\": version format must be \"major.minor\" or \
                 \"major.minor.build\", where each version element is a number",
                input
            )]
        })?;

        let mut errors = Vec::new();
        let mut component = |idx: usize, max: u32, what: &str, limit: u64| -> Option<u32> {
            let raw = caps.get(idx)?.as_str();
            match raw.parse::<u32>() {
                Ok(value) if value <= max => Some(value),
                _ => {
                    errors.push(format!(
                        "Invalid version \"{}\": {} version number must be less than {}",
                        input, what, limit
                    ));
                    None
                }
            }
        };

        let major = component(1, MAX_MAJOR, "major", 256);
        let minor = component(2, MAX_MINOR, "minor", 256);
        let build = component(3, MAX_BUILD, "build", 65536);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Version {
            major: major.unwrap_or_default(),
            minor: minor.unwrap_or_default(),
            build,
            text: input.to_string(),
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Build number, `0` when the version was given as `major.minor`.
    pub fn build(&self) -> u32 {
        self.build.unwrap_or(0)
    }

    /// The version as typed on the command line.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Comma-joined numeric form used by resource scripts, e.g. `1,2,0`.
    pub fn numeric_list(&self) -> String {
        format!("{},{},{}", self.major, self.minor, self.build())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
