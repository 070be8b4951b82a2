//! Server configuration.
//!
//! Everything is read from `MCP_*` environment variables at startup; a `.env`
//! file in the working directory is loaded first when present.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use super::transport::TransportConfig;

/// Top-level configuration, one section per concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub transport: TransportConfig,
    pub build: BuildConfig,
}

/// Identity reported in the MCP `initialize` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base level for the tracing filter; `RUST_LOG` directives refine it.
    pub level: String,
}

/// How MSBuild is found and run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Executable to start with. When unset, the locator searches the
    /// Visual Studio install locations and then the `PATH`.
    pub msbuild_path: Option<PathBuf>,

    /// Kill a build that runs longer than this many seconds.
    /// Unset means builds may run indefinitely.
    pub timeout_secs: Option<u64>,
}

impl BuildConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let msbuild_path = lookup("MCP_MSBUILD_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        if let Some(path) = &msbuild_path {
            info!("MSBuild path set from environment: {}", path.display());
        }

        let timeout_secs = lookup("MCP_BUILD_TIMEOUT_SECS").and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(0) => {
                    warn!("MCP_BUILD_TIMEOUT_SECS is 0; builds will not time out");
                    None
                }
                Ok(secs) => Some(secs),
                Err(e) => {
                    warn!("Ignoring MCP_BUILD_TIMEOUT_SECS={:?}: {}", raw, e);
                    None
                }
            }
        });

        Self {
            msbuild_path,
            timeout_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "build-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl Config {
    /// Load `.env` (if any), then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source, starting
    /// from the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            server: ServerConfig {
                name: lookup("MCP_SERVER_NAME").unwrap_or(defaults.server.name),
                version: defaults.server.version,
            },
            logging: LoggingConfig {
                level: lookup("MCP_LOG_LEVEL").unwrap_or(defaults.logging.level),
            },
            transport: TransportConfig::from_lookup(&lookup),
            build: BuildConfig::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Serializes tests that touch the process environment
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn from_vars(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[]);
        assert_eq!(config.server.name, "build-mcp-server");
        assert_eq!(config.server.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.logging.level, "info");
        assert!(config.build.msbuild_path.is_none());
        assert!(config.build.timeout().is_none());
    }

    #[test]
    fn test_build_settings() {
        let config = from_vars(&[
            ("MCP_SERVER_NAME", "ci-builder"),
            ("MCP_MSBUILD_PATH", "/opt/msbuild/MSBuild.exe"),
            ("MCP_BUILD_TIMEOUT_SECS", "600"),
        ]);
        assert_eq!(config.server.name, "ci-builder");
        assert_eq!(
            config.build.msbuild_path,
            Some(PathBuf::from("/opt/msbuild/MSBuild.exe"))
        );
        assert_eq!(config.build.timeout(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_unusable_values_are_ignored() {
        for timeout in ["ten minutes", "0", "-5"] {
            let config = from_vars(&[("MCP_BUILD_TIMEOUT_SECS", timeout)]);
            assert!(config.build.timeout_secs.is_none(), "{timeout}");
        }

        let config = from_vars(&[("MCP_MSBUILD_PATH", "  ")]);
        assert!(config.build.msbuild_path.is_none());
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_BUILD_TIMEOUT_SECS", "45");
        }
        let config = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_BUILD_TIMEOUT_SECS");
        }
        assert_eq!(config.build.timeout_secs, Some(45));
    }
}
