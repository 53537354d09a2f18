//! Release pipeline error types and diagnostics.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::process::ToolStatus;

/// Every argument or environment problem found while validating a run.
///
/// Problems are kept in the order they were detected; rendering sorts them
/// so the operator always sees the same listing for the same input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    problems: Vec<String>,
}

impl ValidationError {
    pub fn new() -> Self {
        ValidationError::default()
    }

    pub fn push(&mut self, problem: impl Into<String>) {
        self.problems.push(problem.into());
    }

    pub fn extend(&mut self, problems: impl IntoIterator<Item = String>) {
        self.problems.extend(problems);
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Problems in detection order.
    pub fn problems(&self) -> &[String] {
        &self.problems
    }

    /// Problems in the order they are reported.
    pub fn sorted(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.problems.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }

    /// Whether any problem mentions `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.problems.iter().any(|p| p.contains(needle))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid arguments")?;
        for problem in self.sorted() {
            write!(f, "\n * {}", problem)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A fatal pipeline error.
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error(transparent)]
    Configuration(#[from] ValidationError),

    #[error("failed to launch {tool}")]
    ToolLaunch {
        tool: String,
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed with {status}")]
    ToolFailed {
        tool: String,
        command: String,
        status: ToolStatus,
    },

    #[error("Timestamping failed with all available servers")]
    TimestampExhausted { file: PathBuf, servers: Vec<String> },

    #[error("failed to {action} {}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid file pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Build root {} does not exist", .path.display())]
    MissingBuildRoot { path: PathBuf },

    #[error("Inno Setup 5 compiler not found")]
    MissingInstallerCompiler,
}

impl ReleaseError {
    /// Adapter for `map_err` on filesystem calls.
    pub fn fs(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> ReleaseError {
        let path = path.to_path_buf();
        move |source| ReleaseError::Filesystem {
            action,
            path,
            source,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ReleaseError::Configuration(err) => {
                let mut diag = Diagnostic::error("invalid arguments");
                for problem in err.sorted() {
                    diag = diag.with_context(problem);
                }
                if err.mentions("Certificate file is required") {
                    diag = diag.with_suggestion(suggestions::DISABLE_SIGNING);
                }
                diag
            }

            ReleaseError::ToolLaunch {
                command, source, ..
            } => Diagnostic::error(self.to_string())
                .with_context(format!("command: {}", command))
                .with_context(source.to_string()),

            ReleaseError::ToolFailed { command, .. } => Diagnostic::error(self.to_string())
                .with_context(format!("command: {}", command))
                .with_suggestion(suggestions::TOOL_OUTPUT),

            ReleaseError::TimestampExhausted { file, servers } => {
                let mut diag = Diagnostic::error(self.to_string()).with_location(file);
                for server in servers {
                    diag = diag.with_context(format!("tried {}", server));
                }
                diag.with_suggestion(suggestions::CHECK_NETWORK)
            }

            ReleaseError::Filesystem { source, .. } => {
                Diagnostic::error(self.to_string()).with_context(source.to_string())
            }

            ReleaseError::Pattern { source, .. } => {
                Diagnostic::error(self.to_string()).with_context(source.to_string())
            }

            ReleaseError::MissingBuildRoot { .. } => {
                Diagnostic::error(self.to_string()).with_suggestion(suggestions::REBUILD)
            }

            ReleaseError::MissingInstallerCompiler => {
                Diagnostic::error(self.to_string()).with_suggestion(suggestions::INSTALL_COMPILER)
            }
        }
    }
}
