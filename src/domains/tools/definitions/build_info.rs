//! Build info tool definition.
//!
//! Reports the active MSBuild configuration and the executable's version.

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::{info, instrument, warn};

use super::common::success_result;
use crate::domains::build::BuildContext;

/// The tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetBuildInfoParams {}

/// Current build configuration
#[derive(Debug, Serialize, JsonSchema)]
struct BuildInfo {
    /// Active MSBuild path
    msbuild_path: String,
    /// Whether the path exists on disk (false for a bare command name)
    path_exists: bool,
    /// Build timeout in seconds, if one is configured
    timeout_secs: Option<u64>,
    /// Output of `msbuild /version`, when it could be obtained
    version: Option<String>,
}

const CAPABILITIES: &str = "\
• Build Visual Studio solutions (.sln)
• Build single project files (.csproj)
• Debug/Release configurations
• x86/x64/Any CPU platforms
• Configurable output verbosity
• Custom build targets (Build, Clean, Rebuild, ...)";

/// Build info tool - describes the current MSBuild setup.
pub struct GetBuildInfoTool;

impl GetBuildInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_build_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the current MSBuild configuration: executable path, whether it exists, and its version.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(_params: GetBuildInfoParams, context: &BuildContext) -> CallToolResult {
        info!("Build info tool called");

        let path = context.msbuild_path().await;
        let path_exists = tokio::fs::try_exists(&path).await.unwrap_or(false);
        let timeout_secs = context.runner().timeout().map(|t| t.as_secs());

        let mut report = format!(
            "MSBuild configuration\n\n\
             Current MSBuild path: {}\n\
             Path exists: {}\n\
             Build timeout: {}\n\n\
             Supported features:\n{}\n",
            path.display(),
            path_exists,
            timeout_secs.map_or_else(|| "none".to_string(), |s| format!("{s}s")),
            CAPABILITIES,
        );

        let version = match context.version().await {
            Ok(output) if output.exit_code == Some(0) => {
                let version = output.output.trim().to_string();
                let _ = write!(report, "\nMSBuild version:\n{version}\n");
                Some(version)
            }
            Ok(output) => {
                warn!("msbuild /version exited with {:?}", output.exit_code);
                let _ = write!(
                    report,
                    "\nCould not get version information:\n{}\n",
                    output.output.trim()
                );
                None
            }
            Err(e) => {
                warn!("msbuild /version failed: {}", e);
                let _ = write!(report, "\nError while getting version information: {e}\n");
                None
            }
        };

        let info = BuildInfo {
            msbuild_path: path.display().to_string(),
            path_exists,
            timeout_secs,
            version,
        };
        success_result(report, &info)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GetBuildInfoParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<BuildInfo>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }
}
