//! Tool Dispatcher - routes tool calls to their handlers.
//!
//! Arguments are deserialized into the tool's typed parameters, which fills
//! in declared defaults and ignores unknown keys. Unknown tools and invalid
//! arguments are returned as [`ToolError`]; everything that goes wrong
//! inside a handler is already a `CallToolResult` with `is_error` set.

use rmcp::model::{CallToolResult, JsonObject};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::definitions::{
    BuildProjectTool, BuildSolutionTool, GetBuildInfoTool, ListProjectsTool, SetBuildPathTool,
};
use super::error::ToolError;
use super::registry::ToolKind;
use crate::domains::build::BuildContext;

/// Dispatches tool calls against a shared build context.
#[derive(Clone)]
pub struct ToolDispatcher {
    context: Arc<BuildContext>,
}

impl ToolDispatcher {
    /// Create a dispatcher over the given context.
    pub fn new(context: Arc<BuildContext>) -> Self {
        Self { context }
    }

    /// The shared build context.
    pub fn context(&self) -> &Arc<BuildContext> {
        &self.context
    }

    /// Call a tool by name.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        let Some(kind) = ToolKind::from_name(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };
        info!("Dispatching tool call: {}", name);

        let arguments = arguments.unwrap_or_default();
        let context = self.context.as_ref();

        let result = match kind {
            ToolKind::BuildSolution => {
                BuildSolutionTool::execute(parse(kind, arguments)?, context).await
            }
            ToolKind::BuildProject => {
                BuildProjectTool::execute(parse(kind, arguments)?, context).await
            }
            ToolKind::GetBuildInfo => {
                GetBuildInfoTool::execute(parse(kind, arguments)?, context).await
            }
            ToolKind::SetBuildPath => {
                SetBuildPathTool::execute(parse(kind, arguments)?, context).await
            }
            ToolKind::ListProjectsInSolution => {
                ListProjectsTool::execute(parse(kind, arguments)?).await
            }
        };

        Ok(result)
    }
}

fn parse<P: DeserializeOwned>(kind: ToolKind, arguments: JsonObject) -> Result<P, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments)).map_err(|e| {
        warn!("Invalid arguments for {}: {}", kind.name(), e);
        ToolError::invalid_arguments(kind.name(), e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::build::runner::tests::RecordingLauncher;
    use crate::domains::build::BuildRunner;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn dispatcher(launcher: Arc<RecordingLauncher>) -> ToolDispatcher {
        ToolDispatcher::new(Arc::new(BuildContext::new(
            PathBuf::from("msbuild"),
            BuildRunner::new(launcher, None),
        )))
    }

    fn args(value: serde_json::Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    #[tokio::test]
    async fn test_unknown_tool_propagates() {
        let dispatcher = dispatcher(Arc::new(RecordingLauncher::succeeding()));
        let err = dispatcher.call_tool("compile_everything", None).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref name) if name == "compile_everything"));
    }

    #[tokio::test]
    async fn test_missing_required_argument_fails_before_side_effects() {
        let launcher = Arc::new(RecordingLauncher::succeeding());
        let dispatcher = dispatcher(launcher.clone());

        let err = dispatcher
            .call_tool("build_solution", args(serde_json::json!({ "configuration": "Release" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { tool: "build_solution", .. }));
        assert_eq!(launcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_custom_configuration_and_platform_are_forwarded() {
        let temp_dir = TempDir::new().unwrap();
        let sln = temp_dir.path().join("App.sln");
        std::fs::write(&sln, "").unwrap();
        let launcher = Arc::new(RecordingLauncher::succeeding());
        let dispatcher = dispatcher(launcher.clone());

        let result = dispatcher
            .call_tool(
                "build_solution",
                args(serde_json::json!({
                    "solution_path": sln,
                    "configuration": "Staging",
                    "platform": "ARM64"
                })),
            )
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["configuration"], "Staging");
        assert_eq!(structured["platform"], "ARM64");

        let specs = launcher.specs.lock().unwrap();
        assert_eq!(specs[0].args[1], "/p:Configuration=Staging");
        assert_eq!(specs[0].args[2], "/p:Platform=ARM64");
    }

    #[tokio::test]
    async fn test_non_string_option_is_invalid_arguments() {
        let dispatcher = dispatcher(Arc::new(RecordingLauncher::succeeding()));
        let err = dispatcher
            .call_tool(
                "build_project",
                args(serde_json::json!({ "project_path": "a.csproj", "configuration": 3 })),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_domain_failure_is_a_result_not_an_error() {
        let launcher = Arc::new(RecordingLauncher::succeeding());
        let dispatcher = dispatcher(launcher.clone());

        let result = dispatcher
            .call_tool("build_solution", args(serde_json::json!({ "solution_path": "/missing.sln" })))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(launcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_defaults_applied_and_unknown_arguments_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let sln = temp_dir.path().join("App.sln");
        std::fs::write(&sln, "").unwrap();
        let launcher = Arc::new(RecordingLauncher::succeeding());
        let dispatcher = dispatcher(launcher.clone());

        let result = dispatcher
            .call_tool(
                "build_solution",
                args(serde_json::json!({ "solution_path": sln, "color": "blue" })),
            )
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));

        let specs = launcher.specs.lock().unwrap();
        assert_eq!(
            &specs[0].args[1..],
            &[
                "/p:Configuration=Debug".to_string(),
                "/p:Platform=x64".to_string(),
                "/v:normal".to_string(),
                "/t:Build".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_set_then_invalid_set_then_info() {
        let temp_dir = TempDir::new().unwrap();
        let exe = temp_dir.path().join("MSBuild.exe");
        std::fs::write(&exe, "").unwrap();
        let dispatcher = dispatcher(Arc::new(RecordingLauncher::succeeding()));

        let ok = dispatcher
            .call_tool("set_build_path", args(serde_json::json!({ "msbuild_path": exe })))
            .await
            .unwrap();
        assert_eq!(ok.is_error, Some(false));

        let rejected = dispatcher
            .call_tool(
                "set_build_path",
                args(serde_json::json!({ "msbuild_path": temp_dir.path().join("nope.exe") })),
            )
            .await
            .unwrap();
        assert_eq!(rejected.is_error, Some(true));

        let info = dispatcher.call_tool("get_build_info", None).await.unwrap();
        let structured = info.structured_content.unwrap();
        assert_eq!(structured["msbuild_path"], exe.display().to_string());
        assert_eq!(structured["path_exists"], true);
    }
}
