//! Subprocess execution utilities.
//!
//! Every external tool (build helper, signtool, installer compiler) runs as a
//! blocking child process with inherited stdio, so its output streams straight
//! to the operator's terminal.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::errors::ReleaseError;

/// Shown in place of secret arguments.
const MASK: &str = "****";

#[derive(Debug, Clone)]
struct ProcessArg {
    value: OsString,
    secret: bool,
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<ProcessArg>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(ProcessArg {
            value: arg.as_ref().to_os_string(),
            secret: false,
        });
        self
    }

    /// Add an argument that is passed through but never displayed.
    pub fn secret_arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(ProcessArg {
            value: arg.as_ref().to_os_string(),
            secret: true,
        });
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the working directory, if one was set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args.iter().map(|a| &a.value));

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Display the command for logs and error messages, with secrets masked.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| {
            if a.secret {
                MASK.to_string()
            } else {
                a.value.to_string_lossy().into_owned()
            }
        }));
        parts.join(" ")
    }
}

/// How an external tool finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    code: Option<i32>,
}

impl ToolStatus {
    /// `None` means the process ended without an exit code (killed by a signal).
    pub fn from_code(code: Option<i32>) -> Self {
        ToolStatus { code }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "error code {}", code),
            None => write!(f, "no exit code"),
        }
    }
}

/// Runs external tools to completion.
pub trait ToolRunner {
    /// Run the command, blocking until it exits.
    ///
    /// An `Err` means the process could not be started at all.
    fn run(&mut self, cmd: &ProcessBuilder) -> io::Result<ToolStatus>;
}

/// Runs tools as real child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }
}

impl ToolRunner for SystemRunner {
    fn run(&mut self, cmd: &ProcessBuilder) -> io::Result<ToolStatus> {
        tracing::debug!("running `{}`", cmd.display_command());
        let status = cmd.build_command().status()?;
        Ok(ToolStatus::from_code(status.code()))
    }
}

/// Run a tool and return its status, failing only if it cannot be launched.
pub fn run_tool(
    runner: &mut dyn ToolRunner,
    tool: &str,
    cmd: &ProcessBuilder,
) -> Result<ToolStatus, ReleaseError> {
    runner.run(cmd).map_err(|source| ReleaseError::ToolLaunch {
        tool: tool.to_string(),
        command: cmd.display_command(),
        source,
    })
}

/// Run a tool and require a zero exit code.
pub fn run_checked(
    runner: &mut dyn ToolRunner,
    tool: &str,
    cmd: &ProcessBuilder,
) -> Result<(), ReleaseError> {
    let status = run_tool(runner, tool, cmd)?;
    if !status.success() {
        return Err(ReleaseError::ToolFailed {
            tool: tool.to_string(),
            command: cmd.display_command(),
            status,
        });
    }
    Ok(())
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
