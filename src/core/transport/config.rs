//! Transport selection.
//!
//! Which variants exist depends on the enabled cargo features; `stdio` is the
//! default when it is compiled in.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tcp")]
const DEFAULT_TCP_HOST: &str = "127.0.0.1";

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 3000;

/// How the server talks to its client(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// One session over the process's stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// One session per accepted TCP connection.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),
}

/// Listener address for the TCP transport.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpConfig {
    #[serde(default = "TcpConfig::default_host")]
    pub host: String,
    pub port: u16,
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    fn default_host() -> String {
        DEFAULT_TCP_HOST.to_string()
    }

    /// `host:port` string for binding and logging.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: DEFAULT_TCP_PORT,
        }
    }
}

#[cfg(not(any(feature = "stdio", feature = "tcp")))]
compile_error!("Enable at least one transport feature: stdio or tcp");

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        return Self::Stdio;

        #[cfg(not(feature = "stdio"))]
        return Self::Tcp(TcpConfig::default());
    }
}

impl TransportConfig {
    /// Read `MCP_TRANSPORT`, `MCP_TCP_HOST` and `MCP_TCP_PORT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the transport from an arbitrary variable source.
    ///
    /// Unknown or not-compiled-in transport names fall back to the default;
    /// an unparseable port falls back to the default port.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let selected = lookup("MCP_TRANSPORT")
            .map(|name| name.trim().to_ascii_lowercase())
            .unwrap_or_default();

        #[cfg(feature = "tcp")]
        if selected == "tcp" {
            let defaults = TcpConfig::default();
            return Self::Tcp(TcpConfig {
                host: lookup("MCP_TCP_HOST").unwrap_or(defaults.host),
                port: lookup("MCP_TCP_PORT")
                    .and_then(|port| port.trim().parse().ok())
                    .unwrap_or(defaults.port),
            });
        }

        if !selected.is_empty() && selected != "stdio" {
            tracing::warn!("Unsupported MCP_TRANSPORT '{}', using default", selected);
        }
        Self::default()
    }

    /// Short description for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}", cfg.address()),
        }
    }
}
