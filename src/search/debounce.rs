//! Single-timer debouncer.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Owns at most one pending timer.
///
/// Arming aborts the timer currently owned and hands out a new ticket.
/// A fired ticket is only honored if it is still the latest armed one,
/// which also covers a fire event that was already queued when the
/// timer got replaced.
pub struct Debouncer {
    delay: Duration,
    ticket: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ticket: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Takes effect on the next `arm`.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Start a timer that calls `fire(ticket)` after the delay, replacing
    /// any pending one. Must be called from within a tokio runtime.
    pub fn arm<F>(&mut self, fire: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();
        self.ticket += 1;
        let ticket = self.ticket;
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(ticket);
        }));
        ticket
    }

    /// Drop the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Consume a fired ticket. Returns false for stale or cancelled tickets.
    pub fn accept(&mut self, ticket: u64) -> bool {
        if self.pending.is_some() && ticket == self.ticket {
            self.pending = None;
            return true;
        }
        false
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
