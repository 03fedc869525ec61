//! Overlap-to-damage resolution
//!
//! Converts a hit frame's volume overlap into health mutation on the
//! opposing side. The at-most-once-per-attack guarantee is owned by the
//! attacker's state machine (its hit flag), not by these functions: a
//! single call here resolves every qualifying target exactly once.

use crate::health::{HealthEvent, PlayerHealth};
use crate::multiplier::DamageMultiplier;
use crate::volume::{HitBox, HitCircle};
use pulse_core::id::EntityId;
use pulse_core::math::Vec2;

/// A resolved enemy hit frame: volume, damage, and knockback origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub volume: HitBox,
    pub damage: i32,
    /// Attacker position, used for knockback direction
    pub origin: Vec2,
}

/// Result of applying a hit to a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOutcome {
    pub damage: i32,
    pub died: bool,
}

/// Something the player's attacks can damage
pub trait HitTarget {
    fn target_id(&self) -> EntityId;
    /// Point tested against the attack volume
    fn hit_point(&self) -> Vec2;
    /// Apply damage from a source at `from` (drives knockback direction)
    fn take_hit(&mut self, damage: i32, from: Vec2) -> HitOutcome;
}

/// Combat resolution outcomes
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    EnemyDamaged {
        id: EntityId,
        amount: i32,
        died: bool,
    },
    PlayerDamaged {
        amount: i32,
        died: bool,
    },
}

/// Resolve a player hit frame against every target overlapping `volume`
///
/// Damage is `round(base × multiplier)`, floored at 1, applied to each
/// qualifying target once. `attacker_pos` feeds knockback.
pub fn resolve_player_attack(
    volume: &HitCircle,
    attacker_pos: Vec2,
    base_damage: i32,
    multiplier: &DamageMultiplier,
    targets: &mut [&mut dyn HitTarget],
) -> Vec<CombatEvent> {
    let damage = multiplier.scaled(base_damage);
    let mut events = Vec::new();
    for target in targets.iter_mut() {
        if !volume.contains(target.hit_point()) {
            continue;
        }
        let outcome = target.take_hit(damage, attacker_pos);
        events.push(CombatEvent::EnemyDamaged {
            id: target.target_id(),
            amount: outcome.damage,
            died: outcome.died,
        });
    }
    events
}

/// Resolve an enemy strike against the player
///
/// Applies fixed damage if the player overlaps the strike volume and the
/// invulnerability window is closed; a successful hit opens the window
/// (handled inside [`PlayerHealth`]).
pub fn resolve_enemy_attack(
    strike: &Strike,
    player_pos: Vec2,
    player: &mut PlayerHealth,
) -> Option<CombatEvent> {
    if !strike.volume.contains(player_pos) {
        return None;
    }
    let events = player.take_damage(strike.damage, strike.origin);
    let amount = events.iter().find_map(|e| match e {
        HealthEvent::DamageTaken { amount, .. } => Some(*amount),
        _ => None,
    })?;
    Some(CombatEvent::PlayerDamaged {
        amount,
        died: player.is_dead(),
    })
}

/// Knockback impulse away from `from`: horizontal sign away from the
/// attacker, lifted by `angle_deg` above the horizon
pub fn knockback_impulse(target_pos: Vec2, from: Vec2, power: f32, angle_deg: f32) -> Vec2 {
    let sign = if target_pos.x >= from.x { 1.0 } else { -1.0 };
    let rad = angle_deg.to_radians();
    Vec2::new(sign * rad.cos(), rad.sin()).normalize() * power
}
