//! MSBuild executable discovery and override validation.

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

use super::error::BuildError;

/// Bare command name, resolved through `PATH` when the process is spawned.
pub const DEFAULT_COMMAND: &str = "msbuild";

/// Filename suffix accepted by [`validate_executable`], compared case-insensitively.
pub const EXECUTABLE_SUFFIX: &str = "msbuild.exe";

/// Well-known Visual Studio install locations, newest first.
const WELL_KNOWN_PATHS: &[&str] = &[
    r"C:\Program Files\Microsoft Visual Studio\2022\Enterprise\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files\Microsoft Visual Studio\2022\Professional\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files\Microsoft Visual Studio\2022\Community\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files\Microsoft Visual Studio\2022\BuildTools\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files\Microsoft Visual Studio\2019\Enterprise\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files\Microsoft Visual Studio\2019\Professional\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files\Microsoft Visual Studio\2019\Community\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files (x86)\Microsoft Visual Studio\2019\Enterprise\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files (x86)\Microsoft Visual Studio\2019\Professional\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files (x86)\Microsoft Visual Studio\2019\Community\MSBuild\Current\Bin\MSBuild.exe",
    r"C:\Program Files (x86)\Microsoft Visual Studio\2019\BuildTools\MSBuild\Current\Bin\MSBuild.exe",
];

/// How the executable path was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateSource {
    /// Found at one of the well-known install paths.
    WellKnownPath,
    /// Returned by `where`/`which`.
    CommandSearch,
    /// Nothing found; using the bare command name.
    Fallback,
}

/// Searches for the MSBuild executable.
#[derive(Debug, Clone)]
pub struct ExecutableLocator {
    candidates: Vec<PathBuf>,
    search_command: Option<String>,
}

impl Default for ExecutableLocator {
    fn default() -> Self {
        let search = if cfg!(windows) { "where" } else { "which" };
        Self {
            candidates: WELL_KNOWN_PATHS.iter().map(PathBuf::from).collect(),
            search_command: Some(search.to_string()),
        }
    }
}

impl ExecutableLocator {
    /// Create a locator with explicit candidates and search command.
    ///
    /// `search_command` is invoked as `<search_command> msbuild`; `None`
    /// disables the command search step.
    pub fn new(candidates: Vec<PathBuf>, search_command: Option<String>) -> Self {
        Self {
            candidates,
            search_command,
        }
    }

    /// Find the executable: first existing candidate, then command search,
    /// then the bare command name.
    pub async fn locate(&self) -> (PathBuf, LocateSource) {
        if let Some(found) = self.candidates.iter().find(|p| p.exists()) {
            info!("Found MSBuild at well-known path: {}", found.display());
            return (found.clone(), LocateSource::WellKnownPath);
        }

        if let Some(found) = self.search_path().await {
            info!("Found MSBuild via command search: {}", found.display());
            return (found, LocateSource::CommandSearch);
        }

        info!(
            "MSBuild not found, falling back to '{}' on PATH",
            DEFAULT_COMMAND
        );
        (PathBuf::from(DEFAULT_COMMAND), LocateSource::Fallback)
    }

    async fn search_path(&self) -> Option<PathBuf> {
        let command = self.search_command.as_deref()?;
        let output = match Command::new(command)
            .arg(DEFAULT_COMMAND)
            .kill_on_drop(true)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                debug!("Command search '{}' failed to run: {}", command, e);
                return None;
            }
        };
        if !output.status.success() {
            debug!("Command search '{}' exited with {}", command, output.status);
            return None;
        }

        first_line(&String::from_utf8_lossy(&output.stdout)).map(PathBuf::from)
    }
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Check that `candidate` exists and is named like the MSBuild executable.
///
/// Any name ending in `msbuild.exe` is accepted. A bare `msbuild` (Mono and
/// .NET SDK installs outside Windows) must also be a regular file, since
/// those installs ship a directory of the same name next to the launcher.
pub fn validate_executable(candidate: &str) -> Result<PathBuf, BuildError> {
    let path = Path::new(candidate);

    if !path.exists() {
        return Err(BuildError::invalid_path(candidate, "path does not exist"));
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let accepted = file_name.ends_with(EXECUTABLE_SUFFIX)
        || (file_name == DEFAULT_COMMAND && path.is_file());
    if !accepted {
        return Err(BuildError::invalid_path(
            candidate,
            "file is not MSBuild.exe",
        ));
    }

    Ok(path.to_path_buf())
}
