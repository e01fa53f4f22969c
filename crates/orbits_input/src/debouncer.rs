//! Cool-down gate for slide advances

use std::time::Duration;

/// Default minimum time between two accepted advances
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(2000);

/// Accepts at most one advance per cool-down window
///
/// Times are monotonic offsets from application start. The first advance is
/// always accepted.
#[derive(Debug, Clone)]
pub struct Debouncer {
    cooldown: Duration,
    last_accept: Option<Duration>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl Debouncer {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accept: None,
        }
    }

    /// Accept an advance at `now` if the cool-down has elapsed
    ///
    /// On acceptance the timestamp moves to `now`; a rejection leaves it
    /// untouched.
    pub fn try_accept(&mut self, now: Duration) -> bool {
        let ready = match self.last_accept {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.cooldown,
        };
        if ready {
            self.last_accept = Some(now);
        }
        ready
    }

    /// Time remaining before the next advance can be accepted
    pub fn remaining(&self, now: Duration) -> Duration {
        match self.last_accept {
            None => Duration::ZERO,
            Some(last) => self.cooldown.saturating_sub(now.saturating_sub(last)),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn last_accept(&self) -> Option<Duration> {
        self.last_accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_first_gesture_accepted() {
        let mut gate = Debouncer::default();
        assert!(gate.try_accept(ms(0)));
        assert_eq!(gate.last_accept(), Some(ms(0)));
    }

    #[test]
    fn test_within_cooldown_rejected() {
        let mut gate = Debouncer::default();
        assert!(gate.try_accept(ms(0)));
        assert!(!gate.try_accept(ms(500)));
        assert!(!gate.try_accept(ms(1999)));
        // Rejections do not extend the window
        assert_eq!(gate.last_accept(), Some(ms(0)));
        assert!(gate.try_accept(ms(2000)));
    }

    #[test]
    fn test_at_most_one_accept_per_window() {
        let mut gate = Debouncer::default();
        let accepted = (0..10_000u64)
            .step_by(100)
            .filter(|&t| gate.try_accept(ms(t)))
            .count();
        assert_eq!(accepted, 5);
    }

    #[test]
    fn test_remaining() {
        let mut gate = Debouncer::new(ms(1000));
        assert_eq!(gate.remaining(ms(0)), Duration::ZERO);
        gate.try_accept(ms(100));
        assert_eq!(gate.remaining(ms(400)), ms(700));
        assert_eq!(gate.remaining(ms(5000)), Duration::ZERO);
        assert_eq!(gate.cooldown(), ms(1000));
    }
}
