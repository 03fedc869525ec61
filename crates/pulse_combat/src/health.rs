//! Health components for the player and enemies

use pulse_core::math::Vec2;
use pulse_core::timer::Countdown;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Duration of the post-hit sprite flicker (visual only)
const FLICKER_DURATION: f32 = 0.2;

/// Events emitted by player health mutations
#[derive(Debug, Clone, PartialEq)]
pub enum HealthEvent {
    /// Current or max HP changed
    Changed { current: i32, max: i32 },
    /// Damage was applied
    DamageTaken { amount: i32, from: Vec2 },
    /// Healing was applied
    Healed { amount: i32 },
    /// Invulnerability window opened
    InvulnerabilityStarted { duration: f32 },
    /// The player died
    Died,
}

/// Player health: base max plus named additive modifiers
///
/// Effective max HP = base + sum of all modifier values; current HP is
/// always clamped into `[0, effective max]` after any change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerHealth {
    base_max: i32,
    current: i32,
    /// Source id -> additive bonus. Keys unique, insertion order irrelevant.
    modifiers: HashMap<String, i32>,
    /// Seconds of invulnerability after a successful hit
    pub invuln_duration: f32,
    #[serde(skip)]
    invuln: Countdown,
    #[serde(skip)]
    flicker: Countdown,
    dead: bool,
}

impl PlayerHealth {
    pub fn new(base_max: i32, invuln_duration: f32) -> Self {
        let base_max = base_max.max(1);
        Self {
            base_max,
            current: base_max,
            modifiers: HashMap::new(),
            invuln_duration,
            invuln: Countdown::ready(),
            flicker: Countdown::ready(),
            dead: false,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max_hp(&self) -> i32 {
        self.base_max + self.modifiers.values().sum::<i32>()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_invulnerable(&self) -> bool {
        !self.invuln.is_ready()
    }

    /// Whether the post-hit flicker side effect is active
    pub fn is_flickering(&self) -> bool {
        !self.flicker.is_ready()
    }

    /// Apply `damage` (floored at 1) from a source at `from`
    ///
    /// No-ops while dead or inside the invulnerability window.
    pub fn take_damage(&mut self, damage: i32, from: Vec2) -> Vec<HealthEvent> {
        if self.dead || self.is_invulnerable() {
            return Vec::new();
        }
        let amount = damage.max(1);
        self.current = (self.current - amount).clamp(0, self.max_hp());
        self.flicker.arm(FLICKER_DURATION);

        let mut events = vec![
            HealthEvent::DamageTaken { amount, from },
            self.changed_event(),
        ];
        if self.current == 0 {
            self.dead = true;
            events.push(HealthEvent::Died);
        } else {
            self.invuln.arm(self.invuln_duration);
            events.push(HealthEvent::InvulnerabilityStarted {
                duration: self.invuln_duration,
            });
        }
        events
    }

    /// Heal up to the effective max
    pub fn heal(&mut self, amount: i32) -> Vec<HealthEvent> {
        if self.dead || amount <= 0 {
            return Vec::new();
        }
        let before = self.current;
        self.current = (self.current + amount).min(self.max_hp());
        if self.current == before {
            return Vec::new();
        }
        vec![
            HealthEvent::Healed {
                amount: self.current - before,
            },
            self.changed_event(),
        ]
    }

    /// Register (or overwrite) an additive max-HP bonus under `source`
    ///
    /// `heal_to_new_max` lifts current HP to the new maximum; otherwise
    /// current HP is only re-clamped.
    pub fn add_max_hp_modifier(
        &mut self,
        source: &str,
        bonus: i32,
        heal_to_new_max: bool,
    ) -> Vec<HealthEvent> {
        self.modifiers.insert(source.to_string(), bonus);
        let new_max = self.max_hp();
        if heal_to_new_max {
            self.current = new_max;
        } else {
            self.current = self.current.clamp(0, new_max);
        }
        vec![self.changed_event()]
    }

    /// Remove the bonus registered under `source`; current HP is re-clamped
    pub fn remove_max_hp_modifier(&mut self, source: &str) -> Vec<HealthEvent> {
        if self.modifiers.remove(source).is_none() {
            return Vec::new();
        }
        self.current = self.current.clamp(0, self.max_hp());
        vec![self.changed_event()]
    }

    /// Tick invulnerability and flicker timers
    pub fn update(&mut self, dt: f32) {
        self.invuln.tick(dt);
        self.flicker.tick(dt);
    }

    fn changed_event(&self) -> HealthEvent {
        HealthEvent::Changed {
            current: self.current,
            max: self.max_hp(),
        }
    }
}

/// Minimal enemy health pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyVitals {
    max: i32,
    current: i32,
}

impl EnemyVitals {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { max, current: max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Apply `damage` (floored at 1); returns true if this hit was lethal
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if self.current <= 0 {
            return false;
        }
        self.current -= damage.max(1);
        self.current <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_restores_previous_max() {
        let mut hp = PlayerHealth::new(5, 0.6);
        let before = hp.max_hp();

        hp.add_max_hp_modifier("emotion_happy", 2, true);
        assert_eq!(hp.max_hp(), 7);
        assert_eq!(hp.current(), 7);

        hp.remove_max_hp_modifier("emotion_happy");
        assert_eq!(hp.max_hp(), before);
        assert_eq!(hp.current(), before); // re-clamped into [0, max]
    }

    #[test]
    fn test_current_always_within_bounds() {
        let mut hp = PlayerHealth::new(5, 0.6);
        hp.add_max_hp_modifier("a", 3, true);
        hp.take_damage(1, Vec2::ZERO);
        hp.update(1.0);
        hp.remove_max_hp_modifier("a");
        assert!(hp.current() >= 0 && hp.current() <= hp.max_hp());
    }

    #[test]
    fn test_invulnerability_window_blocks() {
        let mut hp = PlayerHealth::new(5, 0.6);
        let events = hp.take_damage(1, Vec2::ZERO);
        assert!(events.contains(&HealthEvent::InvulnerabilityStarted { duration: 0.6 }));
        assert_eq!(hp.current(), 4);

        // Second hit inside the window is suppressed
        assert!(hp.take_damage(1, Vec2::ZERO).is_empty());
        assert_eq!(hp.current(), 4);

        hp.update(0.7);
        hp.take_damage(1, Vec2::ZERO);
        assert_eq!(hp.current(), 3);
    }

    #[test]
    fn test_damage_floor_one() {
        let mut hp = PlayerHealth::new(5, 0.0);
        hp.take_damage(0, Vec2::ZERO);
        assert_eq!(hp.current(), 4);
    }

    #[test]
    fn test_death_latch() {
        let mut hp = PlayerHealth::new(1, 0.6);
        let events = hp.take_damage(3, Vec2::ZERO);
        assert!(events.contains(&HealthEvent::Died));
        assert!(hp.is_dead());
        assert!(hp.take_damage(1, Vec2::ZERO).is_empty());
        assert!(hp.heal(5).is_empty());
    }

    #[test]
    fn test_overwrite_same_source_does_not_stack() {
        let mut hp = PlayerHealth::new(5, 0.6);
        hp.add_max_hp_modifier("k", 2, false);
        hp.add_max_hp_modifier("k", 2, false);
        assert_eq!(hp.max_hp(), 7);
    }

    #[test]
    fn test_enemy_vitals() {
        let mut v = EnemyVitals::new(3);
        assert!(!v.take_damage(1));
        assert!(v.take_damage(5));
        assert!(!v.is_alive());
        assert!(!v.take_damage(1));
    }
}
