//! Countdown timers for cooperative tick-driven sequences
//!
//! Long-running behaviours (attack cooldowns, hit-stun, fades, wave pacing)
//! are expressed as explicit state advanced by `tick(dt)` on a single
//! logical thread, never as blocking waits.

use serde::{Deserialize, Serialize};

/// A countdown that is armed with a duration and ticked down to zero
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// A countdown that is already expired
    pub const fn ready() -> Self {
        Self { remaining: 0.0 }
    }

    /// A countdown armed with `duration` seconds
    pub fn armed(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    /// Re-arm with `duration` seconds
    pub fn arm(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Force expiry
    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Advance by `dt`; returns true if the countdown expired on this tick
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }

    /// Whether the countdown has expired
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds left
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expiry() {
        let mut cd = Countdown::armed(0.5);
        assert!(!cd.is_ready());
        assert!(!cd.tick(0.3));
        assert!(cd.tick(0.3));
        assert!(cd.is_ready());
        // Expired countdowns report the edge only once
        assert!(!cd.tick(0.3));
    }

    #[test]
    fn test_ready_constructor() {
        let cd = Countdown::ready();
        assert!(cd.is_ready());
        assert_eq!(cd.remaining(), 0.0);
    }

    #[test]
    fn test_rearm() {
        let mut cd = Countdown::armed(0.1);
        cd.tick(1.0);
        cd.arm(0.2);
        assert!(!cd.is_ready());
    }
}
