//! Request sequencing for debounced lookups.
//!
//! Every keystroke issues a new [`Ticket`]. Timers and lookups carry the ticket
//! they were started with, and their outcome is only applied while that ticket
//! is still the latest one issued by the [`QueryTracker`].

use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct QueryTracker {
    latest: u64,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh ticket, superseding every ticket handed out before.
    pub fn issue(&mut self) -> Ticket {
        self.latest = self.latest.wrapping_add(1);
        Ticket(self.latest)
    }

    /// Supersedes outstanding tickets without handing out a new one.
    pub fn invalidate(&mut self) {
        self.latest = self.latest.wrapping_add(1);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// Resolves with the same ticket once `delay` has passed.
pub async fn debounce(ticket: Ticket, delay: Duration) -> Ticket {
    tokio::time::sleep(delay).await;
    ticket
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let mut tracker = QueryTracker::new();

        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn invalidate_supersedes_outstanding_ticket() {
        let mut tracker = QueryTracker::new();

        let ticket = tracker.issue();
        tracker.invalidate();

        assert!(!tracker.is_current(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_returns_ticket_after_delay() {
        let mut tracker = QueryTracker::new();
        let ticket = tracker.issue();

        let started = tokio::time::Instant::now();
        let resolved = debounce(ticket, DEFAULT_DEBOUNCE).await;

        assert_eq!(resolved, ticket);
        assert!(started.elapsed() >= DEFAULT_DEBOUNCE);
    }
}
