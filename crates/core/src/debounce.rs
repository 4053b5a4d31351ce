//! Trailing-edge debounce driven by the caller's clock.
//!
//! Time is passed in as a [`Duration`] since any fixed origin, so the same
//! type works with `Instant` in the terminal and `Date.now()` in the browser.

use std::time::Duration;

/// Quiet period before a typed query is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Identifies one scheduled payload. Stale tokens cancel nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelToken(u64);

#[derive(Debug)]
struct Pending<T> {
    token: CancelToken,
    deadline: Duration,
    payload: T,
}

/// Holds at most one pending payload. Scheduling again replaces it and
/// restarts the window.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    next_token: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            next_token: 0,
            pending: None,
        }
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    pub fn schedule(&mut self, now: Duration, payload: T) -> CancelToken {
        let token = CancelToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.pending = Some(Pending {
            token,
            deadline: now + self.window,
            payload,
        });
        token
    }

    /// Cancels the pending payload if `token` still refers to it.
    pub fn cancel(&mut self, token: CancelToken) -> bool {
        if self.pending.as_ref().is_some_and(|p| p.token == token) {
            self.pending = None;
            return true;
        }
        false
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Remaining quiet time, or `None` when nothing is scheduled.
    pub fn time_until_due(&self, now: Duration) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.deadline.saturating_sub(now))
    }

    /// Returns the payload once its window has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }
        self.pending.take().map(|pending| pending.payload)
    }

    /// Takes the pending payload without waiting.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.payload)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_after_quiet_window() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule(ms(0), "moses");

        assert_eq!(debouncer.poll(ms(299)), None);
        assert_eq!(debouncer.poll(ms(300)), Some("moses"));
        assert_eq!(debouncer.poll(ms(900)), None);
    }

    #[test]
    fn newer_input_replaces_pending() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule(ms(0), "mo");
        debouncer.schedule(ms(200), "mos");

        assert_eq!(debouncer.poll(ms(350)), None);
        assert_eq!(debouncer.poll(ms(500)), Some("mos"));
    }

    #[test]
    fn stale_token_cannot_cancel() {
        let mut debouncer = Debouncer::default();
        let first = debouncer.schedule(ms(0), 1);
        let second = debouncer.schedule(ms(10), 2);

        assert!(!debouncer.cancel(first));
        assert!(debouncer.is_pending());
        assert!(debouncer.cancel(second));
        assert_eq!(debouncer.poll(ms(1_000)), None);
    }

    #[test]
    fn reports_remaining_time() {
        let mut debouncer = Debouncer::new(ms(100));
        assert_eq!(debouncer.time_until_due(ms(0)), None);

        debouncer.schedule(ms(50), ());
        assert_eq!(debouncer.time_until_due(ms(100)), Some(ms(50)));
        assert_eq!(debouncer.time_until_due(ms(500)), Some(Duration::ZERO));
    }

    #[test]
    fn flush_skips_the_wait() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule(ms(0), "noah");

        assert_eq!(debouncer.flush(), Some("noah"));
        assert!(!debouncer.is_pending());
    }
}
