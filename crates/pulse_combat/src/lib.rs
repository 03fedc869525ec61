//! # pulse_combat - Combat Resolution
//!
//! Health mutation between player and enemies:
//! - Player health with source-keyed max-HP modifiers and i-frames
//! - A single last-write-wins damage multiplier
//! - Hit volumes and overlap-to-damage resolution

pub mod health;
pub mod multiplier;
pub mod resolve;
pub mod volume;

pub mod prelude {
    pub use crate::health::{EnemyVitals, HealthEvent, PlayerHealth};
    pub use crate::multiplier::DamageMultiplier;
    pub use crate::resolve::{
        resolve_enemy_attack, resolve_player_attack, CombatEvent, HitOutcome, HitTarget, Strike,
    };
    pub use crate::volume::{HitBox, HitCircle};
}

pub use prelude::*;
