//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod env;
pub mod fs;
pub mod process;

pub use config::Settings;
pub use diagnostic::Diagnostic;
pub use env::ToolEnvironment;
pub use process::{ProcessBuilder, SystemRunner, ToolRunner, ToolStatus};
