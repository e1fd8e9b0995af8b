//! Line transport handler.

use crate::session::{self, Channel};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::debug;

/// Newline-delimited text channel over a split TCP stream.
struct LineChannel {
    reader: OwnedReadHalf,
    writer: OwnedWriteHalf,
}

impl Channel for LineChannel {
    async fn send(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await
    }

    async fn closed(&mut self) {
        // Inbound bytes are discarded unread. EOF or a read error means
        // the peer is gone.
        let mut buf = [0u8; 1024];
        loop {
            match self.reader.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }
        }
    }
}

/// Handle a raw TCP connection: run the emission loop, one payload per line.
pub async fn handle_connection(stream: TcpStream, peer: SocketAddr, interval: Duration) {
    let (reader, writer) = stream.into_split();
    let mut channel = LineChannel { reader, writer };
    let end = session::run(&mut channel, interval).await;
    debug!(peer = %peer, ticks = end.ticks_sent, reason = ?end.reason, "Session ended");
}
