//! # pulse_ai - Enemy Behaviour
//!
//! Per-enemy finite state machines and the orchestration around them:
//! - Patrol/chase/attack/hit-stun/death controller with
//!   animation-event-gated hit resolution
//! - One-shot comfort agent sequences layered on top of an enemy
//! - Wave spawner with live-count backpressure
//!
//! Everything runs on a single logical thread; long waits are explicit
//! phase + countdown state advanced by `update(dt)`.

pub mod comfort;
pub mod enemy;
pub mod spawner;
pub mod terrain;

pub mod prelude {
    pub use crate::comfort::{ComfortAgent, ComfortConfig, ComfortEvent, ComfortPhase};
    pub use crate::enemy::{AttackAnim, Enemy, EnemyConfig, EnemyEvent, EnemyPhase};
    pub use crate::spawner::{
        SpawnRequest, SpawnerConfig, WaveConfig, WaveSpawner,
    };
    pub use crate::terrain::{StripTerrain, TerrainProbe};
}

pub use prelude::*;
