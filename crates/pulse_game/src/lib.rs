//! # pulse_game - Composition Root
//!
//! Ties the emotion feed, effect mapping, enemy AI, combat, HUD, music
//! and ambient layers into one [`world::GameWorld`] with a fixed tick
//! order, plus the JSON configuration covering every tunable.

pub mod anim;
pub mod config;
pub mod world;

pub mod prelude {
    pub use crate::anim::{AnimEvent, AnimPhase, AnimationTimeline, AttackTiming};
    pub use crate::config::{ConfigError, EffectsConfig, GameConfig, PlayerConfig};
    pub use crate::world::{GameWorld, WorldEvent};
}

pub use prelude::*;
