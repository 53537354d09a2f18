//! hone-build - release builds for the Hone driver
//!
//! This crate drives the WDK build helper for every architecture, collects
//! the drivers, utilities and symbols into a versioned build root, and
//! packages signed installers with Inno Setup.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for hone-build unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a scripted tool runner and on-disk fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildConfiguration, ReleaseArgs, ReleaseError, ValidationError, Version};
pub use ops::{run, ReleaseOutcome};
pub use util::{SystemRunner, ToolEnvironment, ToolRunner};
