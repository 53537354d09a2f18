//! High-level operations.
//!
//! Each step of a release run lives in its own module; `release::run`
//! drives them in order.

pub mod arch_build;
pub mod package;
pub mod release;
pub mod sign;
pub mod stage;
pub mod stamp;

pub use arch_build::build_all;
pub use package::package;
pub use release::{run, ReleaseOutcome};
pub use sign::{sign, sign_and_timestamp, timestamp};
pub use stamp::{render_header, write_version_header};
