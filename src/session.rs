//! Per-connection emission loop.
//!
//! Every accepted connection runs one session: a start payload is sent
//! immediately, then one tick payload per interval until the peer goes
//! away or a send fails. Sessions own their connection exclusively and
//! share no state, so a dead peer never disturbs the listener or any
//! other session.

use crate::payload::Payload;
use std::io;
use std::time::Duration;
use tokio::time;

/// An ordered, reliable text-message channel to one connected peer.
///
/// Implemented by each transport. `send` delivers one message; `closed`
/// resolves once the peer has gone away, so a session can tear down
/// promptly instead of waiting for the next send to hit a dead socket.
pub trait Channel {
    async fn send(&mut self, text: &str) -> io::Result<()>;
    async fn closed(&mut self);
}

/// Why a session ended
#[derive(Debug)]
pub enum CloseReason {
    /// The peer disconnected between sends
    PeerClosed,
    /// A send hit a dead or erroring connection
    SendFailed(io::Error),
}

/// Summary of a finished session, for the handler to log
#[derive(Debug)]
pub struct SessionEnd {
    pub ticks_sent: u64,
    pub reason: CloseReason,
}

/// Run the emission loop over an established channel.
///
/// Sends exactly one start payload, then a fresh tick payload per
/// interval. The interval is anchored to the period: it is not adjusted
/// for time spent sending. The loop has no exit other than peer
/// departure or send failure, both of which are ordinary terminations.
pub async fn run<C: Channel>(channel: &mut C, interval: Duration) -> SessionEnd {
    if let Err(e) = channel.send(&Payload::start().to_string()).await {
        return SessionEnd {
            ticks_sent: 0,
            reason: CloseReason::SendFailed(e),
        };
    }

    let mut ticker = time::interval(interval);
    ticker.tick().await; // the first tick completes immediately

    let mut ticks_sent = 0;
    loop {
        let peer_gone = tokio::select! {
            _ = ticker.tick() => false,
            _ = channel.closed() => true,
        };

        if peer_gone {
            return SessionEnd {
                ticks_sent,
                reason: CloseReason::PeerClosed,
            };
        }

        if let Err(e) = channel.send(&Payload::tick().to_string()).await {
            return SessionEnd {
                ticks_sent,
                reason: CloseReason::SendFailed(e),
            };
        }
        ticks_sent += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    const INTERVAL: Duration = Duration::from_secs(5);

    /// Scriptable channel: records sends, can fail a given send attempt,
    /// can report the peer gone after a given number of delivered sends.
    struct MockChannel {
        sent: Vec<(Instant, String)>,
        attempts: usize,
        fail_on: Option<usize>,
        close_after: Option<usize>,
    }

    impl MockChannel {
        fn new() -> Self {
            MockChannel {
                sent: Vec::new(),
                attempts: 0,
                fail_on: None,
                close_after: None,
            }
        }
    }

    impl Channel for MockChannel {
        async fn send(&mut self, text: &str) -> io::Result<()> {
            let attempt = self.attempts;
            self.attempts += 1;
            if self.fail_on == Some(attempt) {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            self.sent.push((Instant::now(), text.to_string()));
            Ok(())
        }

        async fn closed(&mut self) {
            match self.close_after {
                Some(n) if self.sent.len() >= n => {}
                _ => std::future::pending::<()>().await,
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_precedes_ticks() {
        let mut channel = MockChannel::new();
        channel.close_after = Some(4);

        let end = run(&mut channel, INTERVAL).await;

        assert!(matches!(end.reason, CloseReason::PeerClosed));
        assert_eq!(end.ticks_sent, 3);
        assert!(channel.sent[0].1.starts_with("{start:"));
        for (_, text) in &channel.sent[1..] {
            assert!(text.starts_with("{end:"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_cadence() {
        let mut channel = MockChannel::new();
        channel.close_after = Some(4);

        run(&mut channel, INTERVAL).await;

        // First tick one interval after the start, then one per interval.
        for pair in channel.sent.windows(2) {
            assert_eq!(pair[1].0 - pair[0].0, INTERVAL);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_send_failure_terminates() {
        let mut channel = MockChannel::new();
        channel.fail_on = Some(0);

        let end = run(&mut channel, INTERVAL).await;

        assert!(matches!(end.reason, CloseReason::SendFailed(_)));
        assert_eq!(end.ticks_sent, 0);
        assert!(channel.sent.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_send_failure_terminates() {
        let mut channel = MockChannel::new();
        channel.fail_on = Some(3);

        let end = run(&mut channel, INTERVAL).await;

        assert!(matches!(end.reason, CloseReason::SendFailed(_)));
        assert_eq!(end.ticks_sent, 2);
        // No further send attempts after the failure
        assert_eq!(channel.attempts, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_peer_close_terminates_promptly() {
        let mut channel = MockChannel::new();
        channel.close_after = Some(1); // gone right after the start payload

        let before = Instant::now();
        let end = run(&mut channel, INTERVAL).await;

        assert!(matches!(end.reason, CloseReason::PeerClosed));
        assert_eq!(end.ticks_sent, 0);
        // Teardown does not wait out the tick timer
        assert!(before.elapsed() < INTERVAL);
    }
}
