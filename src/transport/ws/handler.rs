//! WebSocket transport handler.

use crate::session::{self, Channel};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use tracing::debug;

/// Text-frame channel over an upgraded WebSocket stream.
struct WsChannel {
    ws: WebSocketStream<TcpStream>,
}

impl Channel for WsChannel {
    async fn send(&mut self, text: &str) -> io::Result<()> {
        use futures_util::SinkExt;

        self.ws
            .send(Message::text(text))
            .await
            .map_err(io::Error::other)
    }

    async fn closed(&mut self) {
        use futures_util::StreamExt;

        // Inbound frames are discarded unread. A Close frame, a read
        // error, or stream end means the peer is gone.
        while let Some(frame) = self.ws.next().await {
            match frame {
                Ok(Message::Close(_)) | Err(_) => return,
                Ok(_) => {}
            }
        }
    }
}

/// Handle a WebSocket connection: upgrade, then run the emission loop.
///
/// A failed handshake ends the session before any payload is sent;
/// it is logged and never surfaced to the listener.
pub async fn handle_connection(stream: TcpStream, peer: SocketAddr, interval: Duration) {
    let ws = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            debug!(peer = %peer, error = %e, "WebSocket handshake failed");
            return;
        }
    };

    let mut channel = WsChannel { ws };
    let end = session::run(&mut channel, interval).await;
    debug!(peer = %peer, ticks = end.ticks_sent, reason = ?end.reason, "Session ended");
}
