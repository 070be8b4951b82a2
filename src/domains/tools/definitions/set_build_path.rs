//! Set build path tool definition.
//!
//! Replaces the MSBuild executable used by builds that do not pass their own
//! `msbuild_path`.

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::common::{error_result, success_result};
use crate::domains::build::BuildContext;

/// Parameters for the set build path tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetBuildPathParams {
    /// Full path to MSBuild.exe.
    pub msbuild_path: String,
}

/// Result of a path change
#[derive(Debug, Serialize, JsonSchema)]
struct PathChangeResult {
    /// Path used before the change
    previous_path: String,
    /// Path used from now on
    new_path: String,
}

/// Set build path tool - validates and commits a new MSBuild path.
pub struct SetBuildPathTool;

impl SetBuildPathTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "set_build_path";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Set the path of MSBuild.exe used for builds. The path must exist and name the MSBuild executable; otherwise the current path is kept.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.msbuild_path))]
    pub async fn execute(params: SetBuildPathParams, context: &BuildContext) -> CallToolResult {
        info!("Set build path tool called: {}", params.msbuild_path);

        match context.set_msbuild_path(&params.msbuild_path).await {
            Ok(change) => {
                let result = PathChangeResult {
                    previous_path: change.previous.display().to_string(),
                    new_path: change.current.display().to_string(),
                };
                let report = format!(
                    "MSBuild path updated\nPrevious path: {}\nNew path: {}",
                    result.previous_path, result.new_path
                );
                success_result(report, &result)
            }
            Err(e) => error_result(&e),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<SetBuildPathParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<PathChangeResult>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::build::runner::tests::RecordingLauncher;
    use crate::domains::build::BuildRunner;
    use crate::domains::tools::definitions::common::text_of;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn context() -> BuildContext {
        BuildContext::new(
            PathBuf::from("msbuild"),
            BuildRunner::new(Arc::new(RecordingLauncher::succeeding()), None),
        )
    }

    #[tokio::test]
    async fn test_reports_previous_and_new_path() {
        let temp_dir = TempDir::new().unwrap();
        let exe = temp_dir.path().join("MSBuild.exe");
        std::fs::write(&exe, "").unwrap();
        let context = context();

        let params = SetBuildPathParams {
            msbuild_path: exe.to_string_lossy().into_owned(),
        };
        let result = SetBuildPathTool::execute(params, &context).await;

        assert_eq!(result.is_error, Some(false));
        let text = text_of(&result);
        assert!(text.contains("Previous path: msbuild"));
        assert!(text.contains(&format!("New path: {}", exe.display())));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["previous_path"], "msbuild");
    }

    #[tokio::test]
    async fn test_rejected_path_keeps_current() {
        let temp_dir = TempDir::new().unwrap();
        let not_msbuild = temp_dir.path().join("dotnet.exe");
        std::fs::write(&not_msbuild, "").unwrap();
        let context = context();

        let params = SetBuildPathParams {
            msbuild_path: not_msbuild.to_string_lossy().into_owned(),
        };
        let result = SetBuildPathTool::execute(params, &context).await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("not MSBuild.exe"));
        assert_eq!(context.msbuild_path().await, PathBuf::from("msbuild"));
    }
}
