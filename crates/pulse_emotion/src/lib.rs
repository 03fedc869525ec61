//! # pulse_emotion - Emotion Signal Stream
//!
//! Process-wide single-producer/multi-consumer stream of classified emotion
//! events. The upstream classifier (wearable sensors + backend model) is an
//! external collaborator; this crate only defines the subscribable stream,
//! a scripted stand-in feed, and the wire payloads exchanged with the
//! backend.
//!
//! Consumers gate on "changed since last seen" themselves; the bus makes
//! no deduplication guarantee.

pub mod bus;
pub mod event;
pub mod feed;
pub mod wire;

pub mod prelude {
    pub use crate::bus::{EmotionBus, EmotionReceiver, EmotionSource};
    pub use crate::event::{EmotionEvent, EmotionLabel};
    pub use crate::feed::{ScriptedFeed, ScriptedFeedConfig};
    pub use crate::wire::{ClassifierResponse, FeatureSample, FeatureWindowRequest};
}

pub use prelude::*;
