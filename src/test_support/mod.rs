//! Test utilities and mocks for hone-build unit tests.
//!
//! Provides a scripted tool runner so pipeline steps can be exercised
//! without the driver kit, signtool or the installer compiler.
//!
//! # Example
//!
//! ```rust,ignore
//! use hone_build::test_support::{MockProcessOutput, MockRunner};
//!
//! #[test]
//! fn test_example() {
//!     let mut runner = MockRunner::new();
//!     runner.expect_contains("timestamp", MockProcessOutput::failure(1)).times(2);
//!     runner.set_default(MockProcessOutput::success());
//!
//!     // Hand `&mut runner` to the step under test...
//! }
//! ```

pub mod fixtures;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::util::process::{ProcessBuilder, ToolRunner, ToolStatus};

pub use fixtures::*;

/// Scripted outcome of a mocked process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProcessOutput {
    /// Exit code; `None` simulates termination without one.
    pub status: Option<i32>,
    /// Simulate a process that cannot be started.
    pub launch_error: bool,
}

impl MockProcessOutput {
    /// A process exiting with code 0.
    pub fn success() -> Self {
        MockProcessOutput {
            status: Some(0),
            launch_error: false,
        }
    }

    /// A process exiting with the given code.
    pub fn failure(status: i32) -> Self {
        MockProcessOutput {
            status: Some(status),
            launch_error: false,
        }
    }

    /// A program that does not exist.
    pub fn launch_error() -> Self {
        MockProcessOutput {
            status: None,
            launch_error: true,
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success()
    }
}

/// Pattern for matching commands in MockRunner.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match against commands.
    pub pattern: CommandPattern,
    /// Output to return when matched.
    pub output: MockProcessOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    /// Number of times this expectation has been used.
    pub used: usize,
    /// Files written when the expectation fires, like a real tool would.
    pub creates: Vec<(PathBuf, String)>,
}

impl CommandExpectation {
    /// Create a new expectation.
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
            creates: Vec::new(),
        }
    }

    /// Check if this expectation can still be used.
    pub fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

/// Handle for refining the expectation that was just added.
pub struct ExpectationBuilder<'a> {
    expectation: &'a mut CommandExpectation,
}

impl ExpectationBuilder<'_> {
    /// Limit how many times the expectation matches.
    pub fn times(self, n: usize) -> Self {
        self.expectation.times = Some(n);
        self
    }

    /// Write a file each time the expectation fires.
    pub fn creating(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.expectation.creates.push((path.into(), contents.into()));
        self
    }
}

/// Mock tool runner.
///
/// Records every command it is asked to run and answers from the first
/// matching, still-available expectation.
#[derive(Debug, Default)]
pub struct MockRunner {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
    call_dirs: Vec<Option<PathBuf>>,
    default_output: Option<MockProcessOutput>,
}

impl MockRunner {
    /// Create a new mock runner.
    pub fn new() -> Self {
        MockRunner::default()
    }

    fn push(
        &mut self,
        pattern: CommandPattern,
        output: MockProcessOutput,
    ) -> ExpectationBuilder<'_> {
        self.expectations.push(CommandExpectation::new(pattern, output));
        let last = self.expectations.len() - 1;
        ExpectationBuilder {
            expectation: &mut self.expectations[last],
        }
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> ExpectationBuilder<'_> {
        self.push(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(
        &mut self,
        prefix: &str,
        output: MockProcessOutput,
    ) -> ExpectationBuilder<'_> {
        self.push(CommandPattern::StartsWith(prefix.to_string()), output)
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(
        &mut self,
        substring: &str,
        output: MockProcessOutput,
    ) -> ExpectationBuilder<'_> {
        self.push(CommandPattern::Contains(substring.to_string()), output)
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&mut self, output: MockProcessOutput) -> &mut Self {
        self.default_output = Some(output);
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Working directory of each call, in call order.
    pub fn call_dirs(&self) -> &[Option<PathBuf>] {
        &self.call_dirs
    }

    /// Commands containing `needle`, in call order.
    pub fn calls_containing(&self, needle: &str) -> Vec<&str> {
        self.calls
            .iter()
            .filter(|c| c.contains(needle))
            .map(String::as_str)
            .collect()
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        for (i, exp) in self.expectations.iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} was used {} times, expected {}",
                        i,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl ToolRunner for MockRunner {
    fn run(&mut self, cmd: &ProcessBuilder) -> io::Result<ToolStatus> {
        let full_cmd = cmd.display_command();
        self.calls.push(full_cmd.clone());
        self.call_dirs.push(cmd.get_cwd().map(PathBuf::from));

        let matched = self
            .expectations
            .iter_mut()
            .find(|exp| exp.pattern.matches(&full_cmd) && exp.available());

        let output = match matched {
            Some(exp) => {
                exp.used += 1;
                for (path, contents) in &exp.creates {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, contents)?;
                }
                exp.output.clone()
            }
            None => match self.default_output {
                Some(ref default) => default.clone(),
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!("unexpected command: {}", full_cmd),
                    ))
                }
            },
        };

        if output.launch_error {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("program not found: {}", cmd.get_program().display()),
            ));
        }
        Ok(ToolStatus::from_code(output.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_expectations() {
        let mut runner = MockRunner::new();
        runner.expect("signtool sign a.sys", MockProcessOutput::success());
        runner.expect_contains("timestamp", MockProcessOutput::failure(1)).times(1);
        runner.set_default(MockProcessOutput::failure(9));

        let sign = ProcessBuilder::new("signtool").args(["sign", "a.sys"]);
        assert!(runner.run(&sign).unwrap().success());

        let ts = ProcessBuilder::new("signtool").args(["timestamp", "a.sys"]);
        assert_eq!(runner.run(&ts).unwrap().code(), Some(1));
        assert_eq!(runner.run(&ts).unwrap().code(), Some(9));

        assert_eq!(runner.calls().len(), 3);
        runner.verify().unwrap();
    }

    #[test]
    fn test_mock_runner_unexpected_command() {
        let mut runner = MockRunner::new();
        assert!(runner.run(&ProcessBuilder::new("iscc")).is_err());
        assert_eq!(runner.calls(), ["iscc"]);
    }

    #[test]
    fn test_mock_runner_creates_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("Output").join("Hone.exe");

        let mut runner = MockRunner::new();
        runner
            .expect_prefix("iscc", MockProcessOutput::success())
            .creating(&out, "installer");

        let cmd = ProcessBuilder::new("iscc").arg("hone.iss").cwd(tmp.path());
        runner.run(&cmd).unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "installer");
        assert_eq!(runner.call_dirs(), [Some(tmp.path().to_path_buf())]);
    }
}
