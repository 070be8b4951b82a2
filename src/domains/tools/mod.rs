//! Tools domain module.
//!
//! Tools are the functions MCP clients call. Each tool lives in its own file
//! under `definitions/` with a typed parameter struct, an `execute()` and a
//! `to_tool()` descriptor.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - `ToolKind` and the static tool listing
//! - `dispatcher.rs` - Argument parsing and routing for `tools/call`
//! - `error.rs` - Dispatch-level error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` and export it in `definitions/mod.rs`
//! 2. Add a `ToolKind` variant; the compiler then points at every match
//!    in `registry.rs` and `dispatcher.rs` that needs an arm

pub mod definitions;
mod dispatcher;
mod error;
mod registry;

pub use dispatcher::ToolDispatcher;
pub use error::ToolError;
pub use registry::{ToolKind, ToolRegistry};
