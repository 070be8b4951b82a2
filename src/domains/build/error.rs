//! Build-specific error types.
//!
//! Every variant here is a build-domain failure: tool handlers turn it into an
//! error result for the client instead of propagating it to the transport.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating, running or inspecting a build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The target file (or a file the operation depends on) does not exist.
    #[error("The {kind} does not exist: {path}")]
    FileNotFound { kind: &'static str, path: String },

    /// The target exists but has the wrong file type for the operation.
    #[error("Not a valid {kind} (expected {extension}): {path}")]
    InvalidExtension {
        kind: &'static str,
        extension: &'static str,
        path: String,
    },

    /// The build executable could not be located or launched.
    #[error(
        "MSBuild executable not found: {path}\n\
         Check the path, or use the set_build_path tool to configure the correct one."
    )]
    ExecutableNotFound { path: PathBuf },

    /// Unexpected failure while spawning or talking to the build process.
    #[error("Error while running MSBuild: {0}")]
    ProcessExecution(String),

    /// The build exceeded the configured timeout and was killed.
    #[error("MSBuild timed out after {seconds}s and was terminated: {command}")]
    Timeout { seconds: u64, command: String },

    /// A path override was rejected; the previous path is still active.
    #[error("Invalid MSBuild path '{path}': {reason}")]
    InvalidPathArgument { path: String, reason: String },

    /// The solution file could not be read or decoded.
    #[error("Failed to read solution file {path}: {reason}")]
    ParseFailure { path: String, reason: String },
}

impl BuildError {
    /// Create a new "invalid path argument" error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPathArgument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "process execution" error.
    pub fn process(msg: impl Into<String>) -> Self {
        Self::ProcessExecution(msg.into())
    }

    /// Short machine-readable name of the failure category.
    pub fn category(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "file_not_found",
            Self::InvalidExtension { .. } => "invalid_extension",
            Self::ExecutableNotFound { .. } => "executable_not_found",
            Self::ProcessExecution(_) => "process_execution_error",
            Self::Timeout { .. } => "timeout",
            Self::InvalidPathArgument { .. } => "invalid_path_argument",
            Self::ParseFailure { .. } => "parse_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_not_found_suggests_override_tool() {
        let err = BuildError::ExecutableNotFound {
            path: PathBuf::from("C:/missing/MSBuild.exe"),
        };
        let msg = err.to_string();
        assert!(msg.contains("C:/missing/MSBuild.exe"));
        assert!(msg.contains("set_build_path"));
    }

    #[test]
    fn test_categories_are_distinct() {
        let errors = [
            BuildError::FileNotFound {
                kind: "solution file",
                path: "a".into(),
            },
            BuildError::InvalidExtension {
                kind: "solution file",
                extension: ".sln",
                path: "a".into(),
            },
            BuildError::ExecutableNotFound { path: "a".into() },
            BuildError::process("boom"),
            BuildError::Timeout {
                seconds: 1,
                command: "a".into(),
            },
            BuildError::invalid_path("a", "b"),
            BuildError::ParseFailure {
                path: "a".into(),
                reason: "b".into(),
            },
        ];
        let mut categories: Vec<_> = errors.iter().map(BuildError::category).collect();
        categories.sort_unstable();
        categories.dedup();
        assert_eq!(categories.len(), errors.len());
    }
}
