//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler. `ServerHandler` is
//! implemented by hand: `list_tools` serves the static registry and
//! `call_tool` goes through the [`ToolDispatcher`].

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    build::BuildContext,
    tools::{ToolDispatcher, ToolRegistry},
};

const INSTRUCTIONS: &str = "Builds .NET solutions and C# projects with MSBuild. \
Use build_solution or build_project to build, list_projects_in_solution to inspect a \
solution, get_build_info to see which MSBuild is used, and set_build_path to change it.";

/// The main MCP server handler.
///
/// Cloning is cheap; clones share the same build context.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Routes tool calls to their definitions.
    dispatcher: ToolDispatcher,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Resolves the MSBuild executable (configured path or locator search).
    pub async fn new(config: Config) -> Self {
        let context = Arc::new(BuildContext::from_config(&config.build).await);
        Self::with_context(config, context)
    }

    /// Create a server over an existing build context.
    pub fn with_context(config: Config, context: Arc<BuildContext>) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: ToolDispatcher::new(context),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The shared build context.
    pub fn context(&self) -> &Arc<BuildContext> {
        self.dispatcher.context()
    }

    async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatcher
            .call_tool(name, arguments)
            .await
            .map_err(McpError::from)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(&request.name, request.arguments).await
    }
}
