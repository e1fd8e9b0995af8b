//! TCP listener and accept loop for the fixture server.
//!
//! Binds once at startup (failing fast if the address is unavailable),
//! then accepts connections forever, spawning one independent session
//! task per connection.

use crate::config::{Config, TransportType};
use crate::transport;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Server instance
pub struct Server {
    listener: TcpListener,
    transport: TransportType,
    interval: Duration,
}

impl Server {
    /// Bind the listening socket.
    ///
    /// A bind failure is fatal and reported before any connection can
    /// be accepted; there is no retry.
    pub async fn bind(config: &Config) -> Result<Self, ServerError> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind(addr.clone(), e))?;

        info!(address = %addr, "Server listening");

        Ok(Server {
            listener,
            transport: config.transport,
            interval: Duration::from_secs(config.interval),
        })
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until a fatal listener error.
    ///
    /// Each accepted connection is handed to its own task; a session
    /// ending (peer close, send failure) never affects the listener or
    /// any other session. Transient accept failures are logged and
    /// skipped; anything else terminates the loop.
    pub async fn run(self) -> Result<(), ServerError> {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    debug!(peer = %peer, "New connection");

                    let interval = self.interval;
                    match self.transport {
                        TransportType::Ws => {
                            tokio::spawn(transport::ws::handle_connection(stream, peer, interval));
                        }
                        TransportType::Line => {
                            tokio::spawn(transport::line::handle_connection(
                                stream, peer, interval,
                            ));
                        }
                    }
                }
                Err(e) if is_transient(&e) => {
                    warn!(error = %e, "Failed to accept connection");
                }
                Err(e) => return Err(ServerError::Accept(e)),
            }
        }
    }
}

/// Per-attempt accept failures that leave the listener usable.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}

/// Listener-level errors
#[derive(Debug)]
pub enum ServerError {
    /// The listening socket could not be bound at startup
    Bind(String, io::Error),
    /// The listener failed while accepting
    Accept(io::Error),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Bind(addr, e) => write!(f, "Failed to bind '{addr}': {e}"),
            ServerError::Accept(e) => write!(f, "Listener failed: {e}"),
        }
    }
}

impl std::error::Error for ServerError {}
