//! # pulse_core - Pulse Core Primitives
//!
//! Shared building blocks for the Pulse gameplay crates:
//! - Entity identifiers
//! - 2D math
//! - Countdown timers for cooperative, tick-driven sequences

pub mod id;
pub mod math;
pub mod timer;

pub mod prelude {
    pub use crate::id::{EntityId, EntityIdGen};
    pub use crate::math::{horizontal_distance, Vec2};
    pub use crate::timer::Countdown;
}

pub use prelude::*;
