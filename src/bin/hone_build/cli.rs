//! CLI definitions using clap.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hone_build::core::config::DEFAULT_CERT_PASSWORD;
use hone_build::ReleaseArgs;

const LAYOUT_HELP: &str = "\
Output layout:
  <output>/hone_<version>_<release|debug>/
    build_files/x86/      32-bit drivers and utilities (*.sys, *.exe)
    build_files/x64/      64-bit drivers and utilities
    debug_symbols/x86/    32-bit debug symbols (*.pdb)
    debug_symbols/x64/    64-bit debug symbols
    installers/           Hone-<version>-<platform>.exe
    temp/installer/       installer staging area

Stages:
  a  build and package (default)
  b  build drivers and utilities
  i  package the installer from an existing build";

/// Build and package Hone driver releases
#[derive(Parser, Debug)]
#[command(name = "hone-build")]
#[command(author, version, about, long_about = None)]
#[command(after_help = LAYOUT_HELP)]
pub struct Cli {
    /// Stages to run, any of `a`, `b` and `i`
    #[arg(short = 's', long, value_name = "STAGE", default_value = "a")]
    pub stage: String,

    /// Output directory (defaults to the script directory)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Release version, `major.minor[.build]`
    #[arg(short = 'v', value_name = "VERSION")]
    pub release_version: Option<String>,

    /// Build checked (debug) binaries
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Do not sign drivers or the installer
    #[arg(short = 'n', long)]
    pub no_sign: bool,

    /// Code-signing certificate
    #[arg(short = 'c', long, value_name = "FILE")]
    pub cert_file: Option<PathBuf>,

    /// Code-signing certificate password
    #[arg(short = 'p', long, value_name = "PASSWORD", default_value = DEFAULT_CERT_PASSWORD)]
    pub cert_pass: String,

    /// Directory holding the build helper, installer sources and license files
    #[arg(long, env = "HONE_SCRIPT_DIR", value_name = "DIR")]
    pub script_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert into the library's raw arguments.
    pub fn into_release_args(self) -> Result<ReleaseArgs> {
        let script_dir = match self.script_dir {
            Some(dir) => dir,
            None => executable_dir()?,
        };

        Ok(ReleaseArgs {
            stage: self.stage,
            output: self.output,
            version: self.release_version,
            debug: self.debug,
            no_sign: self.no_sign,
            cert_file: self.cert_file,
            cert_pass: self.cert_pass,
            script_dir,
        })
    }
}

/// Directory containing the running executable.
fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the running executable")?;
    exe.parent()
        .map(PathBuf::from)
        .context("executable has no parent directory")
}
