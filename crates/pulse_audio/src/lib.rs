//! # pulse_audio - Music Direction
//!
//! Gain-level music state for the emotion layer: a shuffled playlist and a
//! two-channel crossfade director. Actual sample playback is owned by the
//! engine integration; this crate decides which track is audible at which
//! gain on every tick.

pub mod crossfade;
pub mod playlist;

pub mod prelude {
    pub use crate::crossfade::{MusicConfig, MusicDirector};
    pub use crate::playlist::Playlist;
}

pub use prelude::*;
