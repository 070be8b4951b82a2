//! Build request and result types.
//!
//! The option types advertise their usual values and defaults in the tool
//! schema but accept any string. Their meaning belongs to MSBuild; the
//! server only forwards them.

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A string MSBuild interprets. The usual values get variants and are
/// advertised in the tool schema; anything else is kept as written.
macro_rules! forwarded_value {
    (
        $(#[$meta:meta])*
        $name:ident (default $default:ident) {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Any other value, passed through unchanged.
            Other(String),
        }

        impl $name {
            /// Values listed in the tool schema.
            pub const KNOWN: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(value) => value,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(value) => value,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl JsonSchema for $name {
            fn inline_schema() -> bool {
                true
            }

            fn schema_name() -> Cow<'static, str> {
                stringify!($name).into()
            }

            fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
                json_schema!({
                    "type": "string",
                    "enum": Self::KNOWN,
                })
            }
        }
    };
}

forwarded_value! {
    /// Build configuration forwarded as `/p:Configuration=`.
    Configuration (default Debug) {
        Debug => "Debug",
        Release => "Release",
    }
}

forwarded_value! {
    /// Target platform forwarded as `/p:Platform=`.
    Platform (default X64) {
        X86 => "x86",
        X64 => "x64",
        AnyCpu => "Any CPU",
    }
}

forwarded_value! {
    /// MSBuild logger verbosity forwarded as `/v:`.
    Verbosity (default Normal) {
        Quiet => "quiet",
        Minimal => "minimal",
        Normal => "normal",
        Detailed => "detailed",
        Diagnostic => "diagnostic",
    }
}

fn default_targets() -> String {
    "Build".to_string()
}

/// Options shared by the solution and project build tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct BuildOptions {
    /// Build configuration. Values other than Debug/Release are passed to MSBuild as given.
    #[serde(default)]
    pub configuration: Configuration,

    /// Target platform. Values other than the listed ones are passed to MSBuild as given.
    #[serde(default)]
    pub platform: Platform,

    /// Path to MSBuild.exe (optional, overrides the configured path for this build only).
    pub msbuild_path: Option<String>,

    /// Output verbosity.
    #[serde(default)]
    pub verbosity: Verbosity,

    /// Build targets (e.g. Build, Clean, Rebuild).
    #[serde(default = "default_targets")]
    pub targets: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            configuration: Configuration::default(),
            platform: Platform::default(),
            msbuild_path: None,
            verbosity: Verbosity::default(),
            targets: default_targets(),
        }
    }
}

/// Which kind of file a build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Solution,
    Project,
}

impl TargetKind {
    /// Required file extension, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Solution => ".sln",
            Self::Project => ".csproj",
        }
    }

    /// Human-readable name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Solution => "solution file",
            Self::Project => "project file",
        }
    }
}

/// A single build invocation, assembled per tool call.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub kind: TargetKind,
    pub target: String,
    pub options: BuildOptions,
}

impl BuildRequest {
    pub fn new(kind: TargetKind, target: impl Into<String>, options: BuildOptions) -> Self {
        Self {
            kind,
            target: target.into(),
            options,
        }
    }
}

/// Outcome of a build whose process ran to completion.
///
/// A nonzero exit code is still a `BuildResult`; only failures to validate or
/// to run the process at all are errors.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct BuildResult {
    /// Absolute path of the built file
    pub target: String,
    pub configuration: Configuration,
    pub platform: Platform,
    pub targets: String,
    /// Process exit code, absent when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// True when the exit code is 0
    pub success: bool,
    /// Merged stdout/stderr of the build
    pub output: String,
}

impl BuildResult {
    /// Human-readable report. Field order is part of the tool contract.
    pub fn to_report(&self) -> String {
        let status = if self.success {
            "Build succeeded"
        } else {
            "Build FAILED"
        };
        let exit_code = match self.exit_code {
            Some(code) => code.to_string(),
            None => "none (terminated by signal)".to_string(),
        };
        let rule = "-".repeat(80);
        // The closing rule starts on its own line; the output itself is untouched
        let separator = if self.output.is_empty() || self.output.ends_with('\n') {
            ""
        } else {
            "\n"
        };

        format!(
            "MSBuild build result\n\n\
             File: {}\n\
             Configuration: {}\n\
             Platform: {}\n\
             Targets: {}\n\
             Status: {}\n\
             Exit code: {}\n\n\
             Build output:\n{rule}\n{}{separator}{rule}\n",
            self.target,
            self.configuration,
            self.platform,
            self.targets,
            status,
            exit_code,
            self.output,
        )
    }
}
