//! Anxious: force one random world lever ON
//!
//! A one-shot world nudge rather than a held buff: the lever stays on
//! after the emotion fades, and a non-passing event does not revert
//! anything. Re-entry while applied does not flip another lever.

use crate::gate::{EffectGate, GateDecision};
use pulse_emotion::event::{EmotionEvent, EmotionLabel};
use pulse_hud::status::StatusDisplay;
use pulse_world::lever::{LeverBank, LeverEvent};
use rand::Rng;
use serde::{Deserialize, Serialize};

const STATUS_ID: &str = "anxious";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnxiousConfig {
    pub icon: String,
    /// Icon lifetime; expires on its own, no explicit clear
    pub icon_duration: f32,
}

impl Default for AnxiousConfig {
    fn default() -> Self {
        Self {
            icon: "icons/anxious".to_string(),
            icon_duration: 3.0,
        }
    }
}

pub struct AnxiousEffect {
    config: AnxiousConfig,
    gate: EffectGate,
}

impl AnxiousEffect {
    pub fn new(config: AnxiousConfig) -> Self {
        Self {
            config,
            gate: EffectGate::new(EmotionLabel::Anxious),
        }
    }

    pub fn handle(
        &mut self,
        event: &EmotionEvent,
        levers: &mut LeverBank,
        rng: &mut impl Rng,
        hud: &mut dyn StatusDisplay,
    ) -> Option<LeverEvent> {
        match self.gate.decide(event) {
            GateDecision::Enter => {
                hud.show_status(STATUS_ID, &self.config.icon, self.config.icon_duration);
                let flipped = levers.force_random_on(rng);
                if flipped.is_none() {
                    log::debug!("anxious effect found no lever to flip");
                }
                flipped
            }
            GateDecision::Reenter | GateDecision::Exit | GateDecision::Ignore => None,
        }
    }
}

impl Default for AnxiousEffect {
    fn default() -> Self {
        Self::new(AnxiousConfig::default())
    }
}
