//! # pulse_effects - Emotion-to-Gameplay Mapping
//!
//! One effect per emotion label, each behind a shared confidence gate:
//! - Excited: doubled player damage
//! - Happy: +2 max HP, healed to the new maximum
//! - Anxious: one random world lever forced ON (one-shot)
//! - Sad: the nearest enemy walks over to comfort the player
//! - Calm: calm playlist crossfade, rain, persistent icon
//!
//! Effects mutate their collaborators (health, multiplier, HUD, levers,
//! music, rain) directly; anything that needs world-level orchestration
//! (spawning a comfort sequence) is returned as a request instead.

pub mod anxious;
pub mod calm;
pub mod excited;
pub mod gate;
pub mod happy;
pub mod sad;

pub mod prelude {
    pub use crate::anxious::{AnxiousConfig, AnxiousEffect};
    pub use crate::calm::{CalmConfig, CalmEffect};
    pub use crate::excited::{ExcitedConfig, ExcitedEffect};
    pub use crate::gate::{EffectGate, GateDecision, DEFAULT_CONFIDENCE_THRESHOLD};
    pub use crate::happy::{HappyConfig, HappyEffect};
    pub use crate::sad::{
        ComfortLineProvider, ComfortRequest, SadConfig, SadEffect, StaticLineProvider,
    };
}

pub use prelude::*;
