//! Start and tick payload construction.
//!
//! Each session sends exactly one start payload followed by tick payloads.
//! The wire shape is a brace-delimited marker plus a short random token:
//!
//! ```text
//! {start:Vv4V1JV}
//! {end:k9}
//! {end:PqXw02Lm}
//! ```
//!
//! The marker is fixed per payload kind so an observing client can always
//! tell a start from a tick; the token is freshly drawn per payload and
//! carries no meaning beyond giving each message distinct content.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

/// Token length bounds, inclusive.
const TOKEN_MIN_LEN: usize = 1;
const TOKEN_MAX_LEN: usize = 10;

/// Which kind of payload a message is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Sent exactly once, immediately after the session is established
    Start,
    /// Sent once per interval for the rest of the session
    Tick,
}

impl PayloadKind {
    /// The fixed wire marker for this kind.
    pub fn marker(self) -> &'static str {
        match self {
            PayloadKind::Start => "start",
            PayloadKind::Tick => "end",
        }
    }
}

/// One outbound text message, generated at send time and never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    kind: PayloadKind,
    token: String,
}

impl Payload {
    /// Construct a start payload with a fresh token.
    pub fn start() -> Self {
        Payload {
            kind: PayloadKind::Start,
            token: random_token(),
        }
    }

    /// Construct a tick payload with a fresh token.
    pub fn tick() -> Self {
        Payload {
            kind: PayloadKind::Tick,
            token: random_token(),
        }
    }

    pub fn kind(&self) -> PayloadKind {
        self.kind
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}:{}}}", self.kind.marker(), self.token)
    }
}

/// Draw a short printable token.
///
/// Cosmetic only: no uniqueness guarantee, not security-relevant.
fn random_token() -> String {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(TOKEN_MIN_LEN..=TOKEN_MAX_LEN);
    (&mut rng)
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
