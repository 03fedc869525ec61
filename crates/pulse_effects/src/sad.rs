//! Sad: send the nearest enemy over to comfort the player
//!
//! Picks a comfort line and a target enemy; the behaviour itself (walk,
//! speak, fade) lives in the AI layer. Candidates outside the search
//! radius are ignored; within it the closest by horizontal distance wins.

use crate::gate::{EffectGate, GateDecision};
use pulse_core::id::EntityId;
use pulse_core::math::Vec2;
use pulse_emotion::event::{EmotionEvent, EmotionLabel};
use pulse_hud::status::StatusDisplay;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const STATUS_ID: &str = "sad";

/// Source of comfort lines
pub trait ComfortLineProvider {
    fn line(&mut self, rng: &mut dyn rand::RngCore) -> String;
}

/// Fixed line pool; falls back to an ellipsis when empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticLineProvider {
    pub lines: Vec<String>,
}

impl Default for StaticLineProvider {
    fn default() -> Self {
        Self {
            lines: vec![
                "hey, it's okay.".to_string(),
                "take a breath. i'm here.".to_string(),
                "you're doing better than you think.".to_string(),
                "one step at a time.".to_string(),
            ],
        }
    }
}

impl ComfortLineProvider for StaticLineProvider {
    fn line(&mut self, rng: &mut dyn rand::RngCore) -> String {
        self.lines
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| "...".to_string())
    }
}

/// A comfort sequence the world should start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComfortRequest {
    pub enemy: EntityId,
    pub line: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SadConfig {
    /// Euclidean search radius around the player
    pub radius: f32,
    pub icon: String,
}

impl Default for SadConfig {
    fn default() -> Self {
        Self {
            radius: 12.0,
            icon: "icons/sad".to_string(),
        }
    }
}

pub struct SadEffect {
    config: SadConfig,
    gate: EffectGate,
    provider: Box<dyn ComfortLineProvider>,
}

impl SadEffect {
    pub fn new(config: SadConfig, provider: Box<dyn ComfortLineProvider>) -> Self {
        Self {
            config,
            gate: EffectGate::new(EmotionLabel::Sad),
            provider,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.gate.is_applied()
    }

    /// `candidates` are living, un-suspended enemies and their positions
    pub fn handle(
        &mut self,
        event: &EmotionEvent,
        player_pos: Vec2,
        candidates: &[(EntityId, Vec2)],
        rng: &mut impl Rng,
        hud: &mut dyn StatusDisplay,
    ) -> Option<ComfortRequest> {
        match self.gate.decide(event) {
            GateDecision::Enter => {
                hud.show_status(STATUS_ID, &self.config.icon, 0.0);
                let enemy = self.pick_target(player_pos, candidates)?;
                let line = self.provider.line(rng);
                log::debug!("comfort request for enemy {enemy}: {line:?}");
                Some(ComfortRequest { enemy, line })
            }
            GateDecision::Exit => {
                hud.clear_status(STATUS_ID);
                None
            }
            // A running comfort sequence is terminal; re-entry starts nothing
            GateDecision::Reenter | GateDecision::Ignore => None,
        }
    }

    /// Nearest by horizontal distance among candidates within the radius
    fn pick_target(&self, player_pos: Vec2, candidates: &[(EntityId, Vec2)]) -> Option<EntityId> {
        candidates
            .iter()
            .filter(|(_, pos)| pos.distance(player_pos) <= self.config.radius)
            .min_by(|(_, a), (_, b)| {
                let da = (a.x - player_pos.x).abs();
                let db = (b.x - player_pos.x).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(id, _)| *id)
    }
}

impl Default for SadEffect {
    fn default() -> Self {
        Self::new(SadConfig::default(), Box::<StaticLineProvider>::default())
    }
}
