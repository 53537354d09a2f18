//! hone-build CLI - release builds for the Hone driver

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use hone_build::util::config::load_settings;
use hone_build::util::diagnostic::emit;
use hone_build::{BuildConfiguration, ReleaseError, SystemRunner, ToolEnvironment};

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<ReleaseError>() {
            Some(err) => emit(&err.to_diagnostic(), use_color()),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; RUST_LOG takes precedence
    let default_filter = if cli.verbose {
        "hone_build=debug"
    } else {
        "hone_build=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let args = cli.into_release_args()?;
    let settings = load_settings(&args.script_dir);
    let config = BuildConfiguration::validate(&args, &ToolEnvironment::from_env(), settings)
        .map_err(ReleaseError::from)?;

    let outcome = hone_build::run(&config, &mut SystemRunner::new())?;

    println!("Build completed successfully!");
    for installer in &outcome.installers {
        println!("  {}", installer.display());
    }
    Ok(())
}

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}
