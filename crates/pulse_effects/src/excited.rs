//! Excited: double player damage while the emotion holds
//!
//! The HUD icon is timed, not persistent; while the buff is applied the
//! effect re-shows it before expiry so the radial fill keeps pulsing.

use crate::gate::{EffectGate, GateDecision};
use pulse_combat::multiplier::DamageMultiplier;
use pulse_core::timer::Countdown;
use pulse_emotion::event::{EmotionEvent, EmotionLabel};
use pulse_hud::status::StatusDisplay;
use serde::{Deserialize, Serialize};

const STATUS_ID: &str = "excited_buff";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcitedConfig {
    /// Damage multiplier while applied
    pub multiplier: f32,
    pub icon: String,
    /// Lifetime of each icon pulse
    pub icon_duration: f32,
    /// Fraction of the icon lifetime after which it is re-shown
    pub refresh_fraction: f32,
}

impl Default for ExcitedConfig {
    fn default() -> Self {
        Self {
            multiplier: 2.0,
            icon: "icons/excited".to_string(),
            icon_duration: 1.5,
            refresh_fraction: 0.6,
        }
    }
}

pub struct ExcitedEffect {
    config: ExcitedConfig,
    gate: EffectGate,
    refresh: Countdown,
}

impl ExcitedEffect {
    pub fn new(config: ExcitedConfig) -> Self {
        Self {
            config,
            gate: EffectGate::new(EmotionLabel::Excited),
            refresh: Countdown::ready(),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.gate.is_applied()
    }

    pub fn handle(
        &mut self,
        event: &EmotionEvent,
        multiplier: &mut DamageMultiplier,
        hud: &mut dyn StatusDisplay,
    ) {
        match self.gate.decide(event) {
            GateDecision::Enter | GateDecision::Reenter => {
                // set() is last-write-wins, so re-applying is idempotent
                multiplier.set(self.config.multiplier);
                self.show_icon(hud);
            }
            GateDecision::Exit => {
                log::debug!("excited buff reverted");
                multiplier.reset();
                hud.clear_status(STATUS_ID);
                self.refresh.clear();
            }
            GateDecision::Ignore => {}
        }
    }

    /// Keep the timed icon alive while the buff is applied
    pub fn update(&mut self, dt: f32, hud: &mut dyn StatusDisplay) {
        if self.gate.is_applied() && self.refresh.tick(dt) {
            self.show_icon(hud);
        }
    }

    fn show_icon(&mut self, hud: &mut dyn StatusDisplay) {
        hud.show_status(STATUS_ID, &self.config.icon, self.config.icon_duration);
        self.refresh
            .arm(self.config.icon_duration * self.config.refresh_fraction);
    }
}

impl Default for ExcitedEffect {
    fn default() -> Self {
        Self::new(ExcitedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_hud::status::StatusBoard;

    fn ev(label: EmotionLabel, confidence: f32) -> EmotionEvent {
        EmotionEvent::new(label, confidence)
    }

    #[test]
    fn test_enter_sets_multiplier_and_exit_resets() {
        let mut fx = ExcitedEffect::default();
        let mut mult = DamageMultiplier::new();
        let mut hud = StatusBoard::new();

        fx.handle(&ev(EmotionLabel::Excited, 0.9), &mut mult, &mut hud);
        assert_eq!(mult.value(), 2.0);
        assert!(hud.get("excited_buff").is_some());

        fx.handle(&ev(EmotionLabel::Calm, 0.9), &mut mult, &mut hud);
        assert_eq!(mult.value(), 1.0);
        assert!(hud.get("excited_buff").is_none());
    }

    #[test]
    fn test_icon_refreshes_while_applied() {
        let mut fx = ExcitedEffect::default();
        let mut mult = DamageMultiplier::new();
        let mut hud = StatusBoard::new();
        fx.handle(&ev(EmotionLabel::Excited, 0.9), &mut mult, &mut hud);

        // Tick past several icon lifetimes; the effect keeps it shown.
        for _ in 0..40 {
            fx.update(0.1, &mut hud);
            hud.update(0.1);
        }
        assert!(hud.get("excited_buff").is_some());
    }

    #[test]
    fn test_icon_expires_after_exit() {
        let mut fx = ExcitedEffect::default();
        let mut mult = DamageMultiplier::new();
        let mut hud = StatusBoard::new();
        fx.handle(&ev(EmotionLabel::Excited, 0.9), &mut mult, &mut hud);
        fx.handle(&ev(EmotionLabel::Excited, 0.2), &mut mult, &mut hud);

        fx.update(2.0, &mut hud);
        hud.update(2.0);
        assert!(hud.get("excited_buff").is_none());
    }

    #[test]
    fn test_low_confidence_never_applies() {
        let mut fx = ExcitedEffect::default();
        let mut mult = DamageMultiplier::new();
        let mut hud = StatusBoard::new();
        fx.handle(&ev(EmotionLabel::Excited, 0.5), &mut mult, &mut hud);
        assert_eq!(mult.value(), 1.0);
        assert!(!fx.is_applied());
    }
}
