// ── Debounced input commit ──
//
// "Commit after quiet period" policy for rapidly changing input such as
// the search box. The clock is passed in on every call, so tests drive
// time with constructed `Instant`s instead of wall-clock sleeps. The
// delay only affects WHEN a value commits, never what it is.

use std::time::{Duration, Instant};

/// Default quiet period before a pending value commits.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the most recent input value until it has been stable for the
/// configured delay, then releases it exactly once via [`poll`](Self::poll).
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new input value at time `now`, restarting the quiet period.
    pub fn input(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Commit the pending value if it has been quiet for the full delay.
    ///
    /// Call this on every UI tick. Returns `Some` at most once per input.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, since)) if now.duration_since(*since) >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop any pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn commits_after_quiet_period() {
        let mut d = Debouncer::new(DELAY);
        let t0 = Instant::now();

        d.input("acme", t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(100)), None);
        assert_eq!(d.poll(t0 + DELAY), Some("acme"));
    }

    #[test]
    fn new_input_restarts_the_quiet_period() {
        let mut d = Debouncer::new(DELAY);
        let t0 = Instant::now();

        d.input("ac", t0);
        d.input("acme", t0 + Duration::from_millis(200));

        // 300ms after the FIRST input, but only 100ms after the second.
        assert_eq!(d.poll(t0 + Duration::from_millis(300)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(500)), Some("acme"));
    }

    #[test]
    fn commits_at_most_once_per_input() {
        let mut d = Debouncer::new(DELAY);
        let t0 = Instant::now();

        d.input("acme", t0);
        assert_eq!(d.poll(t0 + DELAY), Some("acme"));
        assert_eq!(d.poll(t0 + DELAY * 2), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_pending_value() {
        let mut d = Debouncer::new(DELAY);
        let t0 = Instant::now();

        d.input("acme", t0);
        d.cancel();
        assert_eq!(d.poll(t0 + DELAY), None);
    }
}
