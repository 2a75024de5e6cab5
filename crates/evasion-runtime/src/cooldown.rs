#![forbid(unsafe_code)]

//! Motion lock: a debounce flag with a deferred unlock.
//!
//! A relocation engages the lock synchronously; it is released once the
//! cooldown window has elapsed. The window is fixed and not tied to how long
//! the host's move animation actually runs. Triggers that arrive while the
//! lock is held are dropped, not queued.
//!
//! The unlock is a deadline compared against host-supplied [`Instant`]s, so
//! there is no timer thread and no callback to cancel on teardown.
//!
//! # Invariants
//!
//! 1. `engage` never extends a lock that is still held.
//! 2. Once `now >= deadline`, the lock reads as released even before
//!    [`MotionLock::poll`] clears it.

use std::time::Duration;

use web_time::Instant;

/// Default cooldown window.
pub const MOTION_DEFAULT_COOLDOWN: Duration = Duration::from_millis(300);

/// Debounce flag owned by a single controller.
#[derive(Debug, Clone)]
pub struct MotionLock {
    cooldown: Duration,
    held_until: Option<Instant>,
    engagements: u64,
}

impl Default for MotionLock {
    fn default() -> Self {
        Self::new(MOTION_DEFAULT_COOLDOWN)
    }
}

impl MotionLock {
    /// Create a released lock with the given cooldown window.
    #[must_use]
    pub const fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            held_until: None,
            engagements: 0,
        }
    }

    /// The cooldown window.
    #[inline]
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether the lock is held at `now`.
    #[inline]
    #[must_use]
    pub fn is_held(&self, now: Instant) -> bool {
        self.held_until.is_some_and(|until| now < until)
    }

    /// When the current hold expires, if any.
    #[inline]
    #[must_use]
    pub fn release_deadline(&self) -> Option<Instant> {
        self.held_until
    }

    /// Total number of successful engagements.
    #[inline]
    #[must_use]
    pub const fn engagements(&self) -> u64 {
        self.engagements
    }

    /// Engage the lock for one cooldown window starting at `now`.
    ///
    /// Returns `false` (and leaves the deadline untouched) if the lock is
    /// still held.
    pub fn engage(&mut self, now: Instant) -> bool {
        if self.is_held(now) {
            return false;
        }
        self.held_until = Some(now + self.cooldown);
        self.engagements = self.engagements.saturating_add(1);
        tracing::trace!(
            cooldown_ms = self.cooldown.as_millis() as u64,
            "motion lock engaged"
        );
        true
    }

    /// Clear an expired hold.
    ///
    /// Returns `true` if this call performed the release. Hosts may call this
    /// on every tick; it is a no-op while the lock is held or already clear.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.held_until {
            Some(until) if now >= until => {
                self.held_until = None;
                tracing::trace!("motion lock released");
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn new_lock_is_released() {
        let lock = MotionLock::default();
        assert!(!lock.is_held(Instant::now()));
        assert_eq!(lock.cooldown(), ms(300));
        assert_eq!(lock.release_deadline(), None);
        assert_eq!(lock.engagements(), 0);
    }

    #[test]
    fn engage_holds_for_cooldown() {
        let t0 = Instant::now();
        let mut lock = MotionLock::new(ms(300));
        assert!(lock.engage(t0));
        assert!(lock.is_held(t0));
        assert!(lock.is_held(t0 + ms(299)));
        assert!(!lock.is_held(t0 + ms(300)));
        assert_eq!(lock.release_deadline(), Some(t0 + ms(300)));
    }

    #[test]
    fn engage_while_held_is_rejected_without_extending() {
        let t0 = Instant::now();
        let mut lock = MotionLock::new(ms(300));
        assert!(lock.engage(t0));
        assert!(!lock.engage(t0 + ms(100)));
        assert_eq!(lock.release_deadline(), Some(t0 + ms(300)));
        assert_eq!(lock.engagements(), 1);
    }

    #[test]
    fn engage_after_expiry_rearms() {
        let t0 = Instant::now();
        let mut lock = MotionLock::new(ms(300));
        assert!(lock.engage(t0));
        assert!(lock.engage(t0 + ms(300)));
        assert_eq!(lock.release_deadline(), Some(t0 + ms(600)));
        assert_eq!(lock.engagements(), 2);
    }

    #[test]
    fn poll_releases_only_after_deadline() {
        let t0 = Instant::now();
        let mut lock = MotionLock::new(ms(300));
        lock.engage(t0);
        assert!(!lock.poll(t0 + ms(150)));
        assert!(lock.release_deadline().is_some());
        assert!(lock.poll(t0 + ms(301)));
        assert_eq!(lock.release_deadline(), None);
        assert!(!lock.poll(t0 + ms(400)));
    }

    #[test]
    fn zero_cooldown_never_holds() {
        let t0 = Instant::now();
        let mut lock = MotionLock::new(Duration::ZERO);
        assert!(lock.engage(t0));
        assert!(!lock.is_held(t0));
        assert!(lock.engage(t0));
    }
}
