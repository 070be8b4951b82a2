//! TCP transport: newline-delimited JSON-RPC, one MCP session per connection.
//!
//! Sessions are clones of the same [`McpServer`], so an executable path set
//! through one connection applies to builds requested through any other.

use rmcp::ServiceExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tracing::{Instrument, info, info_span, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Pause after a failed `accept` before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accept loop for the TCP transport.
pub struct TcpTransport {
    config: TcpConfig,
    sessions: AtomicU64,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self {
            config,
            sessions: AtomicU64::new(0),
        }
    }

    /// Bind and serve until the process exits. Only binding can fail.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|e| TransportError::bind(&address, e))?;
        info!("Ready - listening on {} (JSON-RPC over TCP)", address);

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            let id = self.sessions.fetch_add(1, Ordering::Relaxed) + 1;
            let span = info_span!("session", id, %peer);
            tokio::spawn(serve_session(server.clone(), stream).instrument(span));
        }
    }
}

async fn serve_session(server: McpServer, stream: TcpStream) {
    if let Err(e) = stream.set_nodelay(true) {
        warn!("Failed to set TCP_NODELAY: {}", e);
    }

    let running = match server.serve(stream).await {
        Ok(running) => running,
        Err(e) => {
            warn!("Session initialization failed: {}", e);
            return;
        }
    };
    info!("Session started");

    match running.waiting().await {
        Ok(_) => info!("Session ended"),
        Err(e) => warn!("Session aborted: {}", e),
    }
}
