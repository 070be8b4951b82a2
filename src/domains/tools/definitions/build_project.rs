//! Build project tool definition.
//!
//! Builds a single C# project (`.csproj`) with MSBuild.

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::build_outcome;
use crate::domains::build::{BuildContext, BuildOptions, BuildRequest, BuildResult, TargetKind};

/// Parameters for the build project tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuildProjectParams {
    /// Path to the project file (.csproj). Absolute paths are recommended.
    pub project_path: String,

    #[serde(flatten)]
    pub options: BuildOptions,
}

/// Build project tool - compiles a single `.csproj` file.
pub struct BuildProjectTool;

impl BuildProjectTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "build_project";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Build a single project file (.csproj) with MSBuild. Returns the configuration, platform, targets, exit code and the full build output.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project = %params.project_path))]
    pub async fn execute(params: BuildProjectParams, context: &BuildContext) -> CallToolResult {
        info!("Build project tool called for: {}", params.project_path);

        let request = BuildRequest::new(TargetKind::Project, params.project_path, params.options);
        let outcome = context.build(&request).await;
        build_outcome(&request, outcome)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<BuildProjectParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<BuildResult>().into()),
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
    use crate::domains::build::{BuildRunner, Verbosity};
    use crate::domains::tools::definitions::common::text_of;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn context(launcher: Arc<RecordingLauncher>) -> BuildContext {
        BuildContext::new(PathBuf::from("msbuild"), BuildRunner::new(launcher, None))
    }

    #[tokio::test]
    async fn test_solution_passed_to_project_tool_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let sln = temp_dir.path().join("App.sln");
        std::fs::write(&sln, "").unwrap();
        let launcher = Arc::new(RecordingLauncher::succeeding());
        let params = BuildProjectParams {
            project_path: sln.to_string_lossy().into_owned(),
            options: BuildOptions::default(),
        };

        let result = BuildProjectTool::execute(params, &context(launcher.clone())).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("Not a valid project file (expected .csproj)"));
        assert_eq!(launcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_forwards_options_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let csproj = temp_dir.path().join("Lib.csproj");
        std::fs::write(&csproj, "<Project />").unwrap();
        let launcher = Arc::new(RecordingLauncher::succeeding());
        let params: BuildProjectParams = serde_json::from_value(serde_json::json!({
            "project_path": csproj.to_string_lossy(),
            "configuration": "Release",
            "platform": "x86",
            "verbosity": "quiet",
            "targets": "Clean"
        }))
        .unwrap();
        assert_eq!(params.options.verbosity, Verbosity::Quiet);

        let result = BuildProjectTool::execute(params, &context(launcher.clone())).await;
        assert_eq!(result.is_error, Some(false));

        let specs = launcher.specs.lock().unwrap();
        assert_eq!(
            &specs[0].args[1..],
            &[
                "/p:Configuration=Release".to_string(),
                "/p:Platform=x86".to_string(),
                "/v:quiet".to_string(),
                "/t:Clean".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_unlaunchable_override_reports_executable_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let csproj = temp_dir.path().join("Lib.csproj");
        std::fs::write(&csproj, "").unwrap();
        let context = BuildContext::new(
            PathBuf::from("msbuild"),
            BuildRunner::new(Arc::new(crate::domains::build::TokioLauncher), None),
        );
        let params = BuildProjectParams {
            project_path: csproj.to_string_lossy().into_owned(),
            options: BuildOptions {
                msbuild_path: Some("/no/such/dir/MSBuild.exe".to_string()),
                ..BuildOptions::default()
            },
        };

        let result = BuildProjectTool::execute(params, &context).await;
        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result);
        assert!(text.contains("MSBuild executable not found: /no/such/dir/MSBuild.exe"));
        assert!(text.contains("set_build_path"));
    }
}
