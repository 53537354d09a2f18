//! Authenticode signing and timestamping through `signtool`.

use std::path::Path;

use crate::core::config::SigningConfig;
use crate::core::errors::ReleaseError;
use crate::util::process::{run_checked, run_tool, ProcessBuilder, ToolRunner};

const SIGN_TOOL: &str = "Signing";
const TIMESTAMP_TOOL: &str = "Timestamping";

/// Sign `file` with the configured certificate.
pub fn sign(
    runner: &mut dyn ToolRunner,
    signing: &SigningConfig,
    file: &Path,
) -> Result<(), ReleaseError> {
    tracing::info!("Signing {}", file.display());
    let cmd = ProcessBuilder::new(&signing.sign_tool)
        .args(["sign", "/v", "/f"])
        .arg(&signing.certificate)
        .arg("/p")
        .secret_arg(&signing.password)
        .arg(file);
    run_checked(runner, SIGN_TOOL, &cmd)
}

/// Timestamp `file`, trying each server in order until one accepts.
///
/// A server that answers with a failure moves on to the next one. A sign
/// tool that cannot be launched at all fails immediately.
pub fn timestamp(
    runner: &mut dyn ToolRunner,
    signing: &SigningConfig,
    servers: &[String],
    file: &Path,
) -> Result<(), ReleaseError> {
    for server in servers {
        tracing::info!("Timestamping {} using {}", file.display(), server);
        let cmd = ProcessBuilder::new(&signing.sign_tool)
            .args(["timestamp", "/t", server.as_str()])
            .arg(file);

        let status = run_tool(runner, TIMESTAMP_TOOL, &cmd)?;
        if status.success() {
            return Ok(());
        }
        tracing::warn!("timestamp server {} failed with {}", server, status);
    }

    Err(ReleaseError::TimestampExhausted {
        file: file.to_path_buf(),
        servers: servers.to_vec(),
    })
}

/// Sign and then timestamp `file`.
pub fn sign_and_timestamp(
    runner: &mut dyn ToolRunner,
    signing: &SigningConfig,
    servers: &[String],
    file: &Path,
) -> Result<(), ReleaseError> {
    sign(runner, signing, file)?;
    timestamp(runner, signing, servers, file)
}
