//! Result helpers shared by the tool definitions.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::warn;

use crate::domains::build::{BuildError, BuildRequest, BuildResult};

/// Successful result: text report plus structured content.
pub fn success_result<T: Serialize>(report: String, structured: &T) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(report)],
        structured_content: serde_json::to_value(structured).ok(),
        is_error: Some(false),
        meta: None,
    }
}

/// Error result for a build-domain failure.
pub fn error_result(error: &BuildError) -> CallToolResult {
    warn!("Tool failed ({}): {}", error.category(), error);
    CallToolResult::error(vec![Content::text(format!("Error: {}", error))])
}

/// Turn the outcome of a build into a tool result.
///
/// A build that ran is reported as a successful call even when MSBuild
/// failed; the report and `success` field carry the build status.
pub fn build_outcome(
    request: &BuildRequest,
    outcome: Result<BuildResult, BuildError>,
) -> CallToolResult {
    match outcome {
        Ok(result) => success_result(result.to_report(), &result),
        Err(error) => {
            warn!("Build of {} failed to run: {}", request.target, error);
            let options = &request.options;
            CallToolResult::error(vec![Content::text(format!(
                "MSBuild build could not run\n\n\
                 File: {}\n\
                 Configuration: {}\n\
                 Platform: {}\n\
                 Targets: {}\n\n\
                 Error: {}",
                request.target, options.configuration, options.platform, options.targets, error
            ))])
        }
    }
}

#[cfg(test)]
pub(crate) fn text_of(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}
