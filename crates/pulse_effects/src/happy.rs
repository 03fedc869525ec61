//! Happy: +2 max HP while the emotion holds, healing to the new maximum
//! or by a flat amount depending on configuration

use crate::gate::{EffectGate, GateDecision};
use pulse_combat::health::{HealthEvent, PlayerHealth};
use pulse_emotion::event::{EmotionEvent, EmotionLabel};
use pulse_hud::status::StatusDisplay;
use serde::{Deserialize, Serialize};

const STATUS_ID: &str = "happy";
/// Modifier key registered on the player's health
const MODIFIER_SOURCE: &str = "emotion_happy";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HappyConfig {
    pub bonus_hp: i32,
    /// Heal to the raised maximum on entry; otherwise heal `flat_heal`
    pub heal_to_new_max: bool,
    /// Flat heal applied on entry when `heal_to_new_max` is off
    pub flat_heal: i32,
    pub icon: String,
}

impl Default for HappyConfig {
    fn default() -> Self {
        Self {
            bonus_hp: 2,
            heal_to_new_max: true,
            flat_heal: 2,
            icon: "icons/happy".to_string(),
        }
    }
}

pub struct HappyEffect {
    config: HappyConfig,
    gate: EffectGate,
}

impl HappyEffect {
    pub fn new(config: HappyConfig) -> Self {
        Self {
            config,
            gate: EffectGate::new(EmotionLabel::Happy),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.gate.is_applied()
    }

    pub fn handle(
        &mut self,
        event: &EmotionEvent,
        health: &mut PlayerHealth,
        hud: &mut dyn StatusDisplay,
    ) -> Vec<HealthEvent> {
        match self.gate.decide(event) {
            GateDecision::Enter => {
                hud.show_status(STATUS_ID, &self.config.icon, 0.0);
                let mut events = health.add_max_hp_modifier(
                    MODIFIER_SOURCE,
                    self.config.bonus_hp,
                    self.config.heal_to_new_max,
                );
                if !self.config.heal_to_new_max && self.config.flat_heal > 0 {
                    events.extend(health.heal(self.config.flat_heal));
                }
                events
            }
            GateDecision::Exit => {
                hud.clear_status(STATUS_ID);
                health.remove_max_hp_modifier(MODIFIER_SOURCE)
            }
            // Already at the raised max; nothing to re-apply
            GateDecision::Reenter | GateDecision::Ignore => Vec::new(),
        }
    }
}

impl Default for HappyEffect {
    fn default() -> Self {
        Self::new(HappyConfig::default())
    }
}
