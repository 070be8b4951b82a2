//! Build domain module.
//!
//! Everything that knows about MSBuild lives here; the tools domain only
//! adapts it to MCP.
//!
//! - `locator.rs` - Finding the executable and validating overrides
//! - `solution.rs` - Project references from `.sln` files
//! - `runner.rs` - Command construction and process execution
//! - `context.rs` - Server-wide state (active executable path)
//! - `request.rs` - Build options, requests and results
//! - `error.rs` - Build failure taxonomy

mod context;
mod error;
pub mod locator;
mod request;
pub mod runner;
pub mod solution;

pub use context::{BuildContext, PathChange};
pub use error::BuildError;
pub use locator::{ExecutableLocator, LocateSource};
pub use request::{
    BuildOptions, BuildRequest, BuildResult, Configuration, Platform, TargetKind, Verbosity,
};
pub use runner::{BuildRunner, CommandSpec, ProcessLauncher, ProcessOutput, TokioLauncher};
pub use solution::ProjectReference;
