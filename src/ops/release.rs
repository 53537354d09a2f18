//! The release pipeline: build, then package.

use std::path::PathBuf;

use crate::core::config::{BuildConfiguration, Stage};
use crate::core::errors::ReleaseError;
use crate::ops::{arch_build, package, stamp};
use crate::util::fs;
use crate::util::process::ToolRunner;

/// What a successful run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Published installers, empty when the package stage did not run.
    pub installers: Vec<PathBuf>,
}

/// Run every selected stage in order.
///
/// The first failure aborts the run; nothing after it is attempted.
pub fn run(
    config: &BuildConfiguration,
    runner: &mut dyn ToolRunner,
) -> Result<ReleaseOutcome, ReleaseError> {
    let mut outcome = ReleaseOutcome::default();

    if config.stages().contains(Stage::Build) {
        tracing::info!("Build root: {}", config.build_root().display());
        fs::ensure_dir(config.build_root())?;
        stamp::write_version_header(config.script_dir(), config.version())?;
        arch_build::build_all(config, runner)?;
    }

    if config.stages().contains(Stage::Package) {
        outcome.installers = package::package(config, runner)?;
    }

    Ok(outcome)
}
