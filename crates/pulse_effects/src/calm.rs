//! Calm: ambient shift to the calm playlist, rain, and a persistent icon
//!
//! Re-entry advances the playlist, so a long calm stretch rotates through
//! the pool instead of looping one track. Exit crossfades back to the
//! default track, or fades to silence when none is configured.

use crate::gate::{EffectGate, GateDecision};
use pulse_audio::crossfade::MusicDirector;
use pulse_audio::playlist::Playlist;
use pulse_emotion::event::{EmotionEvent, EmotionLabel};
use pulse_hud::status::StatusDisplay;
use pulse_world::ambient::RainEffect;
use serde::{Deserialize, Serialize};

const STATUS_ID: &str = "calm_status";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalmConfig {
    pub icon: String,
    /// Track restored on exit; `None` fades to silence instead
    pub default_track: Option<String>,
}

impl Default for CalmConfig {
    fn default() -> Self {
        Self {
            icon: "icons/calm".to_string(),
            default_track: Some("default_bgm".to_string()),
        }
    }
}

pub struct CalmEffect {
    config: CalmConfig,
    gate: EffectGate,
}

impl CalmEffect {
    pub fn new(config: CalmConfig) -> Self {
        Self {
            config,
            gate: EffectGate::new(EmotionLabel::Calm),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.gate.is_applied()
    }

    pub fn handle(
        &mut self,
        event: &EmotionEvent,
        music: &mut MusicDirector,
        playlist: &mut Playlist,
        rain: &mut RainEffect,
        hud: &mut dyn StatusDisplay,
    ) {
        match self.gate.decide(event) {
            GateDecision::Enter => {
                hud.show_status(STATUS_ID, &self.config.icon, 0.0);
                rain.set_raining(true);
                if let Some(track) = playlist.next() {
                    music.crossfade_to(track);
                }
            }
            GateDecision::Reenter => {
                if let Some(track) = playlist.next() {
                    music.crossfade_to(track);
                }
            }
            GateDecision::Exit => {
                hud.clear_status(STATUS_ID);
                rain.set_raining(false);
                match &self.config.default_track {
                    Some(track) => music.crossfade_to(track),
                    None => music.fade_out(),
                }
            }
            GateDecision::Ignore => {}
        }
    }
}

impl Default for CalmEffect {
    fn default() -> Self {
        Self::new(CalmConfig::default())
    }
}
