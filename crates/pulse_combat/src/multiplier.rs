//! Player damage multiplier
//!
//! A single float, deliberately last-write-wins: later `set` calls replace
//! the value instead of stacking. Contrast with the additive source-keyed
//! max-HP modifiers in [`crate::health`].

use serde::{Deserialize, Serialize};

/// Damage multiplier applied to the player's base damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageMultiplier {
    value: f32,
}

impl DamageMultiplier {
    /// Neutral multiplier (×1)
    pub const fn new() -> Self {
        Self { value: 1.0 }
    }

    /// Replace the multiplier (last write wins), clamped ≥ 0
    pub fn set(&mut self, mult: f32) {
        self.value = mult.max(0.0);
    }

    /// Reset to ×1 regardless of history
    pub fn reset(&mut self) {
        self.value = 1.0;
    }

    /// Compound by `factor`, clamped ≥ 0
    pub fn multiply(&mut self, factor: f32) {
        self.value = (self.value * factor).max(0.0);
    }

    /// Current multiplier value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Effective damage for `base`: `round(base × mult)`, floored at 1
    pub fn scaled(&self, base: i32) -> i32 {
        ((base as f32 * self.value).round() as i32).max(1)
    }
}

impl Default for DamageMultiplier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut m = DamageMultiplier::new();
        m.set(2.0);
        m.set(3.0);
        assert_eq!(m.value(), 3.0);
    }

    #[test]
    fn test_reset_ignores_history() {
        let mut m = DamageMultiplier::new();
        m.set(5.0);
        m.multiply(0.5);
        m.reset();
        assert_eq!(m.value(), 1.0);
    }

    #[test]
    fn test_multiply_clamped_non_negative() {
        let mut m = DamageMultiplier::new();
        m.multiply(-4.0);
        assert_eq!(m.value(), 0.0);
    }

    #[test]
    fn test_scaled_floor_one() {
        let mut m = DamageMultiplier::new();
        m.set(0.0);
        assert_eq!(m.scaled(10), 1);
        m.set(2.0);
        assert_eq!(m.scaled(3), 6);
        m.set(1.4);
        assert_eq!(m.scaled(1), 1);
    }
}
