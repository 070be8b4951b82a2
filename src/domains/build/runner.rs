//! Build execution engine.
//!
//! Turns a [`BuildRequest`] into an MSBuild command line, runs it through a
//! [`ProcessLauncher`] and classifies the outcome:
//!
//! ```text
//! <msbuild> <absolute-target> /p:Configuration=<c> /p:Platform=<p> /v:<v> /t:<t>
//! ```
//!
//! Target validation happens before anything is spawned. A nonzero exit
//! code is a normal [`BuildResult`]; only failures to run the process are
//! [`BuildError`]s.

use async_trait::async_trait;
use futures::{Stream, StreamExt, stream};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::pin::pin;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use super::error::BuildError;
use super::request::{BuildRequest, BuildResult, TargetKind};

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Working directory; `None` inherits the server's.
    pub working_dir: Option<PathBuf>,
}

impl CommandSpec {
    /// Command line for logging.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// stdout and stderr merged in arrival order.
    pub output: String,
}

/// Spawns external processes and waits for them to finish.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    async fn launch(&self, spec: &CommandSpec) -> io::Result<ProcessOutput>;
}

/// Production launcher backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioLauncher;

#[async_trait]
impl ProcessLauncher for TokioLauncher {
    async fn launch(&self, spec: &CommandSpec) -> io::Result<ProcessOutput> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &spec.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("child stderr was not captured"))?;

        let mut merged = pin!(stream::select(lines(stdout), lines(stderr)));
        let mut output = Vec::new();
        while let Some(line) = merged.next().await {
            output.extend_from_slice(&line?);
        }

        let status = child.wait().await?;
        Ok(ProcessOutput {
            exit_code: status.code(),
            output: String::from_utf8_lossy(&output).into_owned(),
        })
    }
}

/// Raw lines (newline included) read from a child pipe.
fn lines<R>(reader: R) -> impl Stream<Item = io::Result<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    stream::try_unfold(BufReader::new(reader), |mut reader| async move {
        let mut line = Vec::new();
        let read = reader.read_until(b'\n', &mut line).await?;
        Ok::<_, io::Error>((read > 0).then_some((line, reader)))
    })
}

/// Check that the target exists and has the extension the operation expects.
pub fn validate_target(target: &str, kind: TargetKind) -> Result<(), BuildError> {
    if !Path::new(target).exists() {
        return Err(BuildError::FileNotFound {
            kind: kind.label(),
            path: target.to_string(),
        });
    }

    if !target.ends_with(kind.extension()) {
        return Err(BuildError::InvalidExtension {
            kind: kind.label(),
            extension: kind.extension(),
            path: target.to_string(),
        });
    }

    Ok(())
}

/// MSBuild arguments, in their fixed order.
pub fn build_arguments(absolute_target: &Path, request: &BuildRequest) -> Vec<String> {
    let options = &request.options;
    vec![
        absolute_target.display().to_string(),
        format!("/p:Configuration={}", options.configuration),
        format!("/p:Platform={}", options.platform),
        format!("/v:{}", options.verbosity),
        format!("/t:{}", options.targets),
    ]
}

/// Resolve the target to an absolute path and assemble the command, run
/// from the target's directory.
pub fn build_command(executable: &Path, request: &BuildRequest) -> io::Result<CommandSpec> {
    let absolute = normalize(&std::path::absolute(&request.target)?);
    let working_dir = match absolute.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };

    Ok(CommandSpec {
        program: executable.to_path_buf(),
        args: build_arguments(&absolute, request),
        working_dir: Some(working_dir),
    })
}

/// Drop `.` and fold `..` into its parent, without touching the filesystem.
/// `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Runs MSBuild through a launcher, with an optional timeout.
#[derive(Clone)]
pub struct BuildRunner {
    launcher: Arc<dyn ProcessLauncher>,
    timeout: Option<Duration>,
}

impl BuildRunner {
    pub fn new(launcher: Arc<dyn ProcessLauncher>, timeout: Option<Duration>) -> Self {
        Self { launcher, timeout }
    }

    /// Configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Validate the request, run MSBuild and collect the result.
    pub async fn build(
        &self,
        executable: &Path,
        request: &BuildRequest,
    ) -> Result<BuildResult, BuildError> {
        validate_target(&request.target, request.kind)?;

        let spec = build_command(executable, request)
            .map_err(|e| BuildError::process(format!("cannot resolve target path: {e}")))?;
        let target = spec.args.first().cloned().unwrap_or_default();

        info!("Executing: {}", spec.command_line());
        let output = self.execute(&spec).await?;
        info!("MSBuild finished for {} with exit code {:?}", target, output.exit_code);

        let options = &request.options;
        Ok(BuildResult {
            target,
            configuration: options.configuration.clone(),
            platform: options.platform.clone(),
            targets: options.targets.clone(),
            success: output.exit_code == Some(0),
            exit_code: output.exit_code,
            output: output.output,
        })
    }

    /// Run an arbitrary command, mapping launch failures to [`BuildError`].
    pub async fn execute(&self, spec: &CommandSpec) -> Result<ProcessOutput, BuildError> {
        let launch = self.launcher.launch(spec);

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, launch).await.map_err(|_| {
                warn!("Command timed out after {:?}: {}", limit, spec.command_line());
                BuildError::Timeout {
                    seconds: limit.as_secs(),
                    command: spec.command_line(),
                }
            })?,
            None => launch.await,
        };

        result.map_err(|e| {
            warn!("Failed to run {}: {}", spec.program.display(), e);
            if e.kind() == io::ErrorKind::NotFound {
                BuildError::ExecutableNotFound {
                    path: spec.program.clone(),
                }
            } else {
                BuildError::process(e.to_string())
            }
        })
    }
}
