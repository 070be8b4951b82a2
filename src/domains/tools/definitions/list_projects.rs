//! List projects tool definition.
//!
//! Lists the C# projects referenced by a solution file.

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

use super::common::{error_result, success_result};
use crate::domains::build::solution::read_projects;
use crate::domains::build::{BuildError, ProjectReference, TargetKind};

/// Parameters for the list projects tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListProjectsParams {
    /// Path to the solution file (.sln). Absolute paths are recommended.
    pub solution_path: String,
}

/// Projects found in a solution
#[derive(Debug, Serialize, JsonSchema)]
struct SolutionProjects {
    /// Solution file name
    solution: String,
    /// Projects in declaration order
    projects: Vec<ProjectReference>,
}

/// List projects tool - enumerates projects declared in a `.sln` file.
pub struct ListProjectsTool;

impl ListProjectsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_projects_in_solution";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List all C# projects (.csproj) declared in a solution file, with their relative paths.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(solution = %params.solution_path))]
    pub async fn execute(params: ListProjectsParams) -> CallToolResult {
        info!("List projects tool called for: {}", params.solution_path);

        let path = Path::new(&params.solution_path);
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return error_result(&BuildError::FileNotFound {
                kind: TargetKind::Solution.label(),
                path: params.solution_path.clone(),
            });
        }

        let projects = match read_projects(path).await {
            Ok(projects) => projects,
            Err(e) => return error_result(&e),
        };

        let solution = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| params.solution_path.clone());

        let report = if projects.is_empty() {
            format!("Solution: {solution}\n\nNo C# projects found")
        } else {
            let lines: Vec<String> = projects
                .iter()
                .map(|p| format!("• {} ({})", p.name, p.path))
                .collect();
            format!("Solution: {solution}\n\nProjects:\n{}", lines.join("\n"))
        };
        info!("Found {} projects in {}", projects.len(), solution);

        success_result(report, &SolutionProjects { solution, projects })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ListProjectsParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<SolutionProjects>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }
}
