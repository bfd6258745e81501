use std::time::{Duration, Instant};

/// How the dashboard recovers after the socket closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReconnectPolicy {
    /// Wait a fixed `delay`, then throw away all session state and start
    /// over with a fresh connection.
    Reload { delay: Duration },
    /// Reconnect in place, keeping buffers.  The delay grows by `factor`
    /// on every consecutive failure, capped at `max`, and resets once a
    /// sample arrives.
    Backoff {
        initial: Duration,
        max:     Duration,
        factor:  f64,
    },
}

impl ReconnectPolicy {
    pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(5_000);

    /// Delay before reconnect number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match *self {
            Self::Reload { delay } => delay,
            Self::Backoff { initial, max, factor } => {
                let factor = factor.max(1.0);
                let scaled = initial.as_secs_f64() * factor.powi(attempt.min(64) as i32);
                if !scaled.is_finite() || scaled >= max.as_secs_f64() {
                    max
                } else {
                    Duration::from_secs_f64(scaled)
                }
            }
        }
    }

    /// Whether recovering discards buffers and quality state.
    pub fn resets_session(&self) -> bool {
        matches!(self, Self::Reload { .. })
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::Reload { delay: Self::DEFAULT_RELOAD_DELAY }
    }
}

/// One-shot deadline driven by an externally supplied clock.
///
/// Nothing here sleeps: callers pass `now` to every query, which keeps the
/// timer deterministic under test.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconnectTimer {
    due: Option<Instant>,
}

impl ReconnectTimer {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.due.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.due.is_some_and(|due| now >= due)
    }

    /// Disarm and return `true` if the deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.due = None;
            true
        } else {
            false
        }
    }

    /// Time left until the deadline, if armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_delay_is_fixed() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(5_000));
        assert_eq!(policy.delay_for(9), Duration::from_millis(5_000));
        assert!(policy.resets_session());
    }

    #[test]
    fn backoff_grows_and_caps() {
        let policy = ReconnectPolicy::Backoff {
            initial: Duration::from_millis(500),
            max:     Duration::from_secs(4),
            factor:  2.0,
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for(1_000), Duration::from_secs(4));
        assert!(!policy.resets_session());
    }

    #[test]
    fn timer_fires_only_at_deadline() {
        let t0 = Instant::now();
        let mut timer = ReconnectTimer::default();
        assert!(!timer.fire(t0));

        timer.schedule(t0, Duration::from_millis(5_000));
        assert!(!timer.fire(t0 + Duration::from_millis(4_999)));
        assert_eq!(timer.remaining(t0 + Duration::from_millis(4_000)), Some(Duration::from_millis(1_000)));
        assert!(timer.fire(t0 + Duration::from_millis(5_000)));
        assert!(!timer.is_scheduled());
        assert!(!timer.fire(t0 + Duration::from_millis(6_000)));
    }
}
