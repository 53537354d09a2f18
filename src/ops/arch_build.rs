//! Per-architecture driver builds.
//!
//! The build helper wraps the WDK build environment; it is run once for each
//! architecture and its object directories are then harvested into the build
//! root.

use std::path::Path;

use crate::core::arch::{Architecture, BuildType, SubProject};
use crate::core::config::BuildConfiguration;
use crate::core::errors::ReleaseError;
use crate::core::layout::BuildRootLayout;
use crate::ops::stage;
use crate::util::fs;
use crate::util::process::{run_checked, ProcessBuilder, ToolRunner};

const BUILD_HELPER_TOOL: &str = "Build helper";

/// Build every architecture in order, staging each one's output.
pub fn build_all(
    config: &BuildConfiguration,
    runner: &mut dyn ToolRunner,
) -> Result<(), ReleaseError> {
    for arch in Architecture::ALL {
        build_architecture(config, arch, runner)?;
        stage_architecture(config.script_dir(), config.build_type(), arch, config.layout())?;
    }
    Ok(())
}

/// Run the build helper for one architecture.
pub fn build_architecture(
    config: &BuildConfiguration,
    arch: Architecture,
    runner: &mut dyn ToolRunner,
) -> Result<(), ReleaseError> {
    tracing::info!("Building {} Hone version {}", arch.label(), config.version());

    let cmd = ProcessBuilder::new(config.build_helper())
        .arg(config.script_dir())
        .arg(config.build_type().tag())
        .arg(arch.tag());
    run_checked(runner, BUILD_HELPER_TOOL, &cmd)
}

/// Copy one architecture's build output into the build root.
pub fn stage_architecture(
    script_dir: &Path,
    build_type: BuildType,
    arch: Architecture,
    layout: &BuildRootLayout,
) -> Result<(), ReleaseError> {
    let build_files = layout.build_files(arch);
    let debug_symbols = layout.debug_symbols(arch);
    fs::ensure_dir(&build_files)?;
    fs::ensure_dir(&debug_symbols)?;

    tracing::info!(
        "Copying {} build files to {}",
        arch.label(),
        build_files.display()
    );
    for project in SubProject::ALL {
        let src = arch.output_dir(script_dir, build_type, project);
        stage::copy_executables(&src, &build_files)?;
        stage::copy_driver_images(&src, &build_files)?;
        stage::copy_debug_symbols(&src, &debug_symbols)?;
    }
    Ok(())
}
