//! # pulse_hud - Status Icon Board
//!
//! The HUD collaborator surface the gameplay core talks to. Rendering is
//! not owned here; the board tracks which status icons are visible, their
//! cooldown fill, and expiry.

pub mod status;

pub mod prelude {
    pub use crate::status::{NullHud, StatusBoard, StatusDisplay, StatusIcon};
}

pub use prelude::*;
