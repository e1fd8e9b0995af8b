//! tickspout: a periodic-emission fixture server
//!
//! Accepts connections and streams timed text payloads at each one: a
//! single start marker immediately, then one tick marker per interval
//! until the peer disconnects. Built to exercise a streaming client's
//! framing and cadence handling, not to be a production service.
//!
//! Features:
//! - WebSocket or newline-delimited TCP transport
//! - Fixed emission cadence with a fresh random token per payload
//! - One independent task per connection, no shared session state
//! - Configuration via CLI arguments or TOML file

mod config;
mod payload;
mod server;
mod session;
mod transport;

use config::Config;
use server::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(
        host = %config.host,
        port = config.port,
        transport = ?config.transport,
        interval_secs = config.interval,
        "Starting tickspout server"
    );

    let server = Server::bind(&config).await?;

    // Serve until the listener dies or the process is told to stop.
    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
