//! Solution file parsing.
//!
//! Extracts C# project references from the `Project(...) = ...` declaration
//! lines of a Visual Studio solution file:
//!
//! ```text
//! Project("{FAE04EC0-...}") = "App", "src\App.csproj", "{5A1C...}"
//! ```
//!
//! Splitting such a line on `"` puts the project name at index 3 and the
//! relative path at index 5. Lines that do not fit that layout are skipped.

use schemars::JsonSchema;
use serde::Serialize;
use std::path::Path;

use super::error::BuildError;

const PROJECT_MARKER: &str = "Project(";
const PROJECT_EXTENSION: &str = ".csproj";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A project declared in a solution file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ProjectReference {
    /// Project name
    pub name: String,
    /// Path of the project file, relative to the solution
    pub path: String,
}

/// Parse project references out of solution text, in source order.
pub fn parse_projects(content: &str) -> Vec<ProjectReference> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| line.starts_with(PROJECT_MARKER) && line.contains(PROJECT_EXTENSION))
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('"').collect();
            (parts.len() >= 6).then(|| ProjectReference {
                name: parts[3].to_string(),
                path: parts[5].to_string(),
            })
        })
        .collect()
}

/// Decode solution bytes as UTF-8, ignoring a leading byte-order mark.
pub fn decode_solution(bytes: &[u8]) -> Result<&str, std::str::Utf8Error> {
    std::str::from_utf8(bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes))
}

/// Read a solution file from disk and parse its project references.
pub async fn read_projects(path: &Path) -> Result<Vec<ProjectReference>, BuildError> {
    let parse_failure = |reason: String| BuildError::ParseFailure {
        path: path.display().to_string(),
        reason,
    };

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| parse_failure(e.to_string()))?;
    let content = decode_solution(&bytes).map_err(|e| parse_failure(e.to_string()))?;

    Ok(parse_projects(content))
}
