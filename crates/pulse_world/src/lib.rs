//! # pulse_world - World State Objects
//!
//! Puzzle levers and the ambient rain effect the emotion layer drives.

pub mod ambient;
pub mod lever;

pub mod prelude {
    pub use crate::ambient::{RainConfig, RainEffect};
    pub use crate::lever::{Lever, LeverBank, LeverEvent};
}

pub use prelude::*;
