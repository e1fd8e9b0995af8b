//! Transport implementations.
//!
//! Each transport adapts one kind of accepted connection into the
//! text-message channel the session loop emits over.
//!
//! - `ws`: WebSocket text frames (the default)
//! - `line`: newline-delimited text over raw TCP

pub mod line;
pub mod ws;
