//! WebSocket transport.
//!
//! Serves the emission stream as WebSocket text frames:
//! - Client connects and upgrades via the standard handshake
//! - Server sends `{start:<token>}` immediately, then `{end:<token>}`
//!   per interval
//! - Inbound frames are discarded unread; a Close frame or broken
//!   stream ends the session
//!
//! ## Use Cases
//!
//! 1. **Client framing tests**: Exercise a WebSocket client's handling
//!    of server-initiated text messages on a long-lived connection.
//!
//! 2. **Cadence tests**: Verify a client observes the fixed emission
//!    interval without the server ever waiting on it.

pub mod handler;

pub use handler::handle_connection;
