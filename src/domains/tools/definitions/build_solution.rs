//! Build solution tool definition.
//!
//! Builds a Visual Studio solution (`.sln`) with MSBuild.

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::build_outcome;
use crate::domains::build::{BuildContext, BuildOptions, BuildRequest, BuildResult, TargetKind};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the build solution tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuildSolutionParams {
    /// Path to the solution file (.sln). Absolute paths are recommended.
    pub solution_path: String,

    #[serde(flatten)]
    pub options: BuildOptions,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Build solution tool - compiles a `.sln` file.
pub struct BuildSolutionTool;

impl BuildSolutionTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "build_solution";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Build a Visual Studio solution file (.sln) with MSBuild. Returns the configuration, platform, targets, exit code and the full build output.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(solution = %params.solution_path))]
    pub async fn execute(params: BuildSolutionParams, context: &BuildContext) -> CallToolResult {
        info!("Build solution tool called for: {}", params.solution_path);

        let request = BuildRequest::new(TargetKind::Solution, params.solution_path, params.options);
        let outcome = context.build(&request).await;
        build_outcome(&request, outcome)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<BuildSolutionParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<BuildResult>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
