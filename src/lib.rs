//! Build MCP Server Library
//!
//! A Model Context Protocol (MCP) server that lets clients build .NET
//! solutions (`.sln`) and C# projects (`.csproj`) with MSBuild, inspect the
//! projects a solution declares, and choose which MSBuild executable is used.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **build**: MSBuild discovery, solution parsing and build execution
//!   - **tools**: MCP tool definitions, registry and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use build_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone()).await;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
