//! Installer packaging.
//!
//! Assembles the installer staging directory from a finished build root,
//! optionally signs the drivers, compiles the Inno Setup script and copies
//! the resulting installer into `installers/`.

use std::path::{Path, PathBuf};

use crate::core::arch::Architecture;
use crate::core::config::BuildConfiguration;
use crate::core::errors::ReleaseError;
use crate::ops::{sign, stage};
use crate::util::fs;
use crate::util::process::{run_checked, ProcessBuilder, ToolRunner};

/// Installer sources, relative to the script directory.
pub const INSTALLER_SOURCE_DIR: &str = "installer";

/// Files shipped next to the installer sources.
pub const LICENSE_FILES: [&str; 2] = ["License.txt", "Readme.html"];

/// Inno Setup script compiled inside the staging directory.
pub const INSTALLER_SCRIPT: &str = "hone.iss";

/// Version configuration included by the installer script.
pub const INSTALLER_VERSION_FILE: &str = "version.ini";

/// Driver image signed for each architecture.
pub const DRIVER_IMAGE: &str = "hone.sys";

/// Where the compiler leaves its output, relative to the staging directory.
pub const COMPILER_OUTPUT: [&str; 2] = ["Output", "Hone.exe"];

const INSTALLER_COMPILER_TOOL: &str = "Inno Setup compilation";

/// Contents of `version.ini`.
pub fn render_installer_version(version: &str) -> String {
    format!("#define MyAppVersion \"{}\"\n", version)
}

/// File name of the published installer.
pub fn installer_file_name(version: &str, platform_tag: &str) -> String {
    format!("Hone-{}-{}.exe", version, platform_tag)
}

/// Build the installer and return the published installer paths.
pub fn package(
    config: &BuildConfiguration,
    runner: &mut dyn ToolRunner,
) -> Result<Vec<PathBuf>, ReleaseError> {
    let layout = config.layout();
    if !layout.root().is_dir() {
        return Err(ReleaseError::MissingBuildRoot {
            path: layout.root().to_path_buf(),
        });
    }

    let staging = layout.installer_staging();
    prepare_staging(config, &staging)?;

    if let Some(signing) = config.signing() {
        for arch in Architecture::ALL {
            let driver = layout.installer_staging_arch(arch).join(DRIVER_IMAGE);
            sign::sign_and_timestamp(runner, signing, config.timestamp_servers(), &driver)?;
        }
    }

    let installer = compile_installer(config, &staging, runner)?;

    if let Some(signing) = config.signing() {
        sign::sign_and_timestamp(runner, signing, config.timestamp_servers(), &installer)?;
    }

    Ok(vec![installer])
}

/// Reset the staging directory and fill it with everything the installer script expects.
fn prepare_staging(config: &BuildConfiguration, staging: &Path) -> Result<(), ReleaseError> {
    let layout = config.layout();
    tracing::info!("Preparing installer files in {}", staging.display());

    stage::reset_directory(staging)?;
    for arch in Architecture::ALL {
        let dst = layout.installer_staging_arch(arch);
        fs::ensure_dir(&dst)?;
        stage::copy_driver_images(&layout.build_files(arch), &dst)?;
    }
    // The utility is only shipped as a 32-bit executable.
    stage::copy_executables(&layout.build_files(Architecture::X86), staging)?;

    let script_dir = config.script_dir();
    stage::copy_all(&script_dir.join(INSTALLER_SOURCE_DIR), staging)?;
    for name in LICENSE_FILES {
        stage::copy_file(&script_dir.join(name), staging)?;
    }
    if let Some(signing) = config.signing() {
        stage::copy_file(&signing.certificate, staging)?;
    }

    fs::write_string(
        &staging.join(INSTALLER_VERSION_FILE),
        &render_installer_version(config.version().as_str()),
    )
}

/// Run the installer compiler and publish its output.
fn compile_installer(
    config: &BuildConfiguration,
    staging: &Path,
    runner: &mut dyn ToolRunner,
) -> Result<PathBuf, ReleaseError> {
    let compiler = config
        .installer_compiler()
        .ok_or(ReleaseError::MissingInstallerCompiler)?;

    tracing::info!("Building installer");
    let cmd = ProcessBuilder::new(compiler).arg(INSTALLER_SCRIPT).cwd(staging);
    run_checked(runner, INSTALLER_COMPILER_TOOL, &cmd)?;

    let installers = config.layout().installers();
    fs::ensure_dir(&installers)?;
    let output = COMPILER_OUTPUT.iter().fold(staging.to_path_buf(), |p, c| p.join(c));
    let name = installer_file_name(config.version().as_str(), config.platform_tag());
    let published = installers.join(name);
    fs::copy_to(&output, &published)?;
    tracing::info!("Installer written to {}", published.display());
    Ok(published)
}
