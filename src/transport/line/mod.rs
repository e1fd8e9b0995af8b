//! Line transport.
//!
//! The transport-agnostic rendition of the emission stream: one payload
//! per line of UTF-8 text over a raw TCP connection, no handshake.
//!
//! ```text
//! {start:Vv4V1JV}\n
//! {end:k9}\n
//! {end:PqXw02Lm}\n
//! ```
//!
//! Useful for exercising clients that frame on newlines, and for poking
//! at the fixture with nothing more than `nc`.

pub mod handler;

pub use handler::handle_connection;
