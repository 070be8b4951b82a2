//! Shared build state for the lifetime of the server.
//!
//! The active MSBuild path sits behind a `RwLock`. Builds take a snapshot of it
//! when they start, so a concurrent `set_build_path` affects later builds
//! only.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::error::BuildError;
use super::locator::{ExecutableLocator, validate_executable};
use super::request::{BuildRequest, BuildResult};
use super::runner::{BuildRunner, CommandSpec, ProcessOutput, TokioLauncher};
use crate::core::config::BuildConfig;

/// Previous and new executable path after a successful override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathChange {
    pub previous: PathBuf,
    pub current: PathBuf,
}

/// Server-wide build context handed to every tool handler.
pub struct BuildContext {
    msbuild_path: RwLock<PathBuf>,
    runner: BuildRunner,
}

impl BuildContext {
    /// Create a context with an explicit executable path and runner.
    pub fn new(msbuild_path: PathBuf, runner: BuildRunner) -> Self {
        Self {
            msbuild_path: RwLock::new(msbuild_path),
            runner,
        }
    }

    /// Create the production context: configured path if set, otherwise the
    /// locator's search result.
    pub async fn from_config(config: &BuildConfig) -> Self {
        let msbuild_path = match &config.msbuild_path {
            Some(path) => {
                info!("Using MSBuild path from configuration: {}", path.display());
                path.clone()
            }
            None => ExecutableLocator::default().locate().await.0,
        };

        Self::new(
            msbuild_path,
            BuildRunner::new(Arc::new(TokioLauncher), config.timeout()),
        )
    }

    /// Currently configured executable path.
    pub async fn msbuild_path(&self) -> PathBuf {
        self.msbuild_path.read().await.clone()
    }

    /// Replace the executable path after validating the candidate.
    ///
    /// On error the previous path stays active.
    pub async fn set_msbuild_path(&self, candidate: &str) -> Result<PathChange, BuildError> {
        let current = validate_executable(candidate).inspect_err(|e| {
            warn!("Rejected MSBuild path override: {}", e);
        })?;

        let previous = std::mem::replace(&mut *self.msbuild_path.write().await, current.clone());
        info!(
            "MSBuild path updated: {} -> {}",
            previous.display(),
            current.display()
        );

        Ok(PathChange { previous, current })
    }

    /// Run a build with the request's override or the configured path.
    pub async fn build(&self, request: &BuildRequest) -> Result<BuildResult, BuildError> {
        let executable = match request.options.msbuild_path.as_deref() {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => self.msbuild_path().await,
        };
        self.runner.build(&executable, request).await
    }

    /// Run `<msbuild> /version` with the configured path.
    pub async fn version(&self) -> Result<ProcessOutput, BuildError> {
        let spec = CommandSpec {
            program: self.msbuild_path().await,
            args: vec!["/version".to_string()],
            working_dir: None,
        };
        self.runner.execute(&spec).await
    }

    pub fn runner(&self) -> &BuildRunner {
        &self.runner
    }
}
