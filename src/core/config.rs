//! Run configuration and its validation.
//!
//! `BuildConfiguration::validate` turns raw command-line input into the one
//! immutable configuration every pipeline step reads. It checks every rule
//! and reports all violations together; nothing runs unless all pass.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::arch::BuildType;
use crate::core::errors::ValidationError;
use crate::core::layout::BuildRootLayout;
use crate::core::version::Version;
use crate::util::config::Settings;
use crate::util::env::{ToolEnvironment, WDK_PATH_VAR};

/// Product name used for build root directories.
pub const PRODUCT_DIR_NAME: &str = "hone";

/// Certificate password used when none is given.
pub const DEFAULT_CERT_PASSWORD: &str = "changeit";

/// A pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Build,
    Package,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Build => write!(f, "build"),
            Stage::Package => write!(f, "package"),
        }
    }
}

/// Which stages a run executes. The two flags are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageSet {
    pub build: bool,
    pub package: bool,
}

impl StageSet {
    pub const ALL: StageSet = StageSet {
        build: true,
        package: true,
    };

    /// Parse a stage token string such as `a`, `b`, `i` or `bi`.
    ///
    /// `a` selects every stage no matter what else is present.
    pub fn parse(spec: &str) -> Result<StageSet, String> {
        if !spec.chars().all(|c| matches!(c, 'a' | 'b' | 'i')) {
            return Err(format!("Invalid stage specification \"{}\"", spec));
        }
        Ok(StageSet::from_tokens(spec))
    }

    /// Interpret the known tokens, ignoring anything else.
    fn from_tokens(spec: &str) -> StageSet {
        if spec.contains('a') {
            return StageSet::ALL;
        }
        StageSet {
            build: spec.contains('b'),
            package: spec.contains('i'),
        }
    }

    pub fn contains(&self, stage: Stage) -> bool {
        match stage {
            Stage::Build => self.build,
            Stage::Package => self.package,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.build && !self.package
    }
}

/// Raw invocation parameters, as typed by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseArgs {
    /// Stage tokens from `[abi]*`
    pub stage: String,
    /// Output directory (defaults to the script directory)
    pub output: Option<PathBuf>,
    /// `major.minor[.build]`
    pub version: Option<String>,
    /// Build checked binaries
    pub debug: bool,
    /// Skip signing of drivers and installer
    pub no_sign: bool,
    /// Code-signing certificate
    pub cert_file: Option<PathBuf>,
    /// Code-signing certificate password
    pub cert_pass: String,
    /// Location of the build helper, installer sources and license files
    pub script_dir: PathBuf,
}

impl Default for ReleaseArgs {
    fn default() -> Self {
        ReleaseArgs {
            stage: "a".to_string(),
            output: None,
            version: None,
            debug: false,
            no_sign: false,
            cert_file: None,
            cert_pass: DEFAULT_CERT_PASSWORD.to_string(),
            script_dir: PathBuf::from("."),
        }
    }
}

/// Everything needed to sign a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningConfig {
    pub sign_tool: PathBuf,
    pub certificate: PathBuf,
    pub password: String,
}

/// Validated, immutable configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    version: Version,
    stages: StageSet,
    debug: bool,
    signing: Option<SigningConfig>,
    output_root: PathBuf,
    layout: BuildRootLayout,
    script_dir: PathBuf,
    installer_compiler: Option<PathBuf>,
    settings: Settings,
}

impl BuildConfiguration {
    /// Validate raw arguments against the host environment.
    pub fn validate(
        args: &ReleaseArgs,
        env: &ToolEnvironment,
        settings: Settings,
    ) -> Result<BuildConfiguration, ValidationError> {
        let mut errors = ValidationError::new();

        if let Err(problem) = StageSet::parse(&args.stage) {
            errors.push(problem);
        }
        let stages = StageSet::from_tokens(&args.stage);

        let mut installer_compiler = None;
        let mut sign_tool = None;
        if stages.package {
            installer_compiler = env.find_installer_compiler();
            if installer_compiler.is_none() {
                errors.push(
                    "Inno Setup 5 compiler not found.  Ensure Inno Setup 5 is installed \
                     to the standard Program Files location.",
                );
            }

            if !args.no_sign {
                sign_tool = env.sign_tool();
                if sign_tool.is_none() {
                    errors.push(format!("{} environment variable is undefined", WDK_PATH_VAR));
                }
                if args.cert_file.is_none() {
                    errors.push(
                        "Certificate file is required when building installer \
                         unless signing is disabled",
                    );
                }
                if settings.signing.timestamp_servers.is_empty() {
                    errors.push("No timestamp servers configured for signing");
                }
            }
        }

        let version = match args.version.as_deref() {
            None => {
                errors.push("Version required");
                None
            }
            Some(text) => match Version::parse(text) {
                Ok(version) => Some(version),
                Err(problems) => {
                    errors.extend(problems);
                    None
                }
            },
        };

        let script_dir = absolutize(&args.script_dir, "script", &mut errors);
        let output_root = match &args.output {
            Some(dir) => absolutize(dir, "output", &mut errors),
            None => script_dir.clone(),
        };

        let version = match version {
            Some(version) if errors.is_empty() => version,
            _ => return Err(errors),
        };

        let build_type = BuildType::from_debug(args.debug);
        let layout = BuildRootLayout::new(output_root.join(format!(
            "{}_{}_{}",
            PRODUCT_DIR_NAME,
            version,
            build_type.profile()
        )));

        let signing = match (sign_tool, &args.cert_file) {
            (Some(sign_tool), Some(certificate)) => Some(SigningConfig {
                sign_tool,
                certificate: absolutize(certificate, "certificate", &mut errors),
                password: args.cert_pass.clone(),
            }),
            _ => None,
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BuildConfiguration {
            version,
            stages,
            debug: args.debug,
            signing,
            output_root,
            layout,
            script_dir,
            installer_compiler,
            settings,
        })
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn stages(&self) -> StageSet {
        self.stages
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn build_type(&self) -> BuildType {
        BuildType::from_debug(self.debug)
    }

    /// Signing settings; `None` when signing is disabled or not needed.
    pub fn signing(&self) -> Option<&SigningConfig> {
        self.signing.as_ref()
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn build_root(&self) -> &Path {
        self.layout.root()
    }

    pub fn layout(&self) -> &BuildRootLayout {
        &self.layout
    }

    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }

    /// Installer compiler; resolved only when the package stage runs.
    pub fn installer_compiler(&self) -> Option<&Path> {
        self.installer_compiler.as_deref()
    }

    /// Build helper invoked once per architecture.
    pub fn build_helper(&self) -> PathBuf {
        self.script_dir.join(&self.settings.build.helper)
    }

    pub fn platform_tag(&self) -> &str {
        &self.settings.installer.platform_tag
    }

    pub fn timestamp_servers(&self) -> &[String] {
        &self.settings.signing.timestamp_servers
    }
}

fn absolutize(path: &Path, what: &str, errors: &mut ValidationError) -> PathBuf {
    match std::path::absolute(path) {
        Ok(abs) => abs,
        Err(e) => {
            errors.push(format!("Invalid {} directory \"{}\": {}", what, path.display(), e));
            path.to_path_buf()
        }
    }
}
