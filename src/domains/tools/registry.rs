//! Tool Registry - the static catalogue of available tools.
//!
//! [`ToolKind`] is the single source of truth: names, descriptors and the
//! dispatch table in `dispatcher.rs` all match on it, so adding a variant
//! without wiring it up is a compile error.

use rmcp::model::Tool;

use super::definitions::{
    BuildProjectTool, BuildSolutionTool, GetBuildInfoTool, ListProjectsTool, SetBuildPathTool,
};

/// Identity of every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    BuildSolution,
    BuildProject,
    GetBuildInfo,
    SetBuildPath,
    ListProjectsInSolution,
}

impl ToolKind {
    /// All tools, in listing order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::BuildSolution,
        ToolKind::BuildProject,
        ToolKind::GetBuildInfo,
        ToolKind::SetBuildPath,
        ToolKind::ListProjectsInSolution,
    ];

    /// Tool name as registered in MCP.
    pub fn name(self) -> &'static str {
        match self {
            Self::BuildSolution => BuildSolutionTool::NAME,
            Self::BuildProject => BuildProjectTool::NAME,
            Self::GetBuildInfo => GetBuildInfoTool::NAME,
            Self::SetBuildPath => SetBuildPathTool::NAME,
            Self::ListProjectsInSolution => ListProjectsTool::NAME,
        }
    }

    /// Look up a tool by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Descriptor (name, description, schemas) for this tool.
    pub fn descriptor(self) -> Tool {
        match self {
            Self::BuildSolution => BuildSolutionTool::to_tool(),
            Self::BuildProject => BuildProjectTool::to_tool(),
            Self::GetBuildInfo => GetBuildInfoTool::to_tool(),
            Self::SetBuildPath => SetBuildPathTool::to_tool(),
            Self::ListProjectsInSolution => ListProjectsTool::to_tool(),
        }
    }
}

/// Tool registry - lists all available tools.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        ToolKind::ALL.iter().map(|kind| kind.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        ToolKind::ALL.iter().map(|kind| kind.descriptor()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tool_names() {
        assert_eq!(
            ToolRegistry::tool_names(),
            vec![
                "build_solution",
                "build_project",
                "get_build_info",
                "set_build_path",
                "list_projects_in_solution",
            ]
        );
    }

    #[test]
    fn test_names_are_unique_and_round_trip() {
        let mut names = ToolRegistry::tool_names();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ToolKind::ALL.len());

        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("build-solution"), None);
    }

    #[test]
    fn test_descriptors_match_names() {
        for (tool, kind) in ToolRegistry::get_all_tools().iter().zip(ToolKind::ALL) {
            assert_eq!(tool.name, kind.name());
            assert!(tool.description.as_deref().is_some_and(|d| !d.is_empty()));
        }
    }

    #[test]
    fn test_listing_is_idempotent() {
        let first = serde_json::to_value(ToolRegistry::get_all_tools()).unwrap();
        let second = serde_json::to_value(ToolRegistry::get_all_tools()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_required_parameters() {
        let required = |kind: ToolKind| -> Vec<String> {
            kind.descriptor()
                .input_schema
                .get("required")
                .and_then(|v| v.as_array())
                .map(|values| {
                    values
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };

        assert_eq!(required(ToolKind::BuildSolution), vec!["solution_path"]);
        assert_eq!(required(ToolKind::BuildProject), vec!["project_path"]);
        assert_eq!(required(ToolKind::SetBuildPath), vec!["msbuild_path"]);
        assert_eq!(required(ToolKind::ListProjectsInSolution), vec!["solution_path"]);
        assert!(required(ToolKind::GetBuildInfo).is_empty());
    }
}
