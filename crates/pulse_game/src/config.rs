//! Game configuration
//!
//! One JSON document covering every tunable; each section falls back to
//! its component default when omitted.

use pulse_ai::comfort::ComfortConfig;
use pulse_ai::enemy::EnemyConfig;
use pulse_ai::spawner::SpawnerConfig;
use pulse_audio::crossfade::MusicConfig;
use pulse_effects::anxious::AnxiousConfig;
use pulse_effects::calm::CalmConfig;
use pulse_effects::excited::ExcitedConfig;
use pulse_effects::happy::HappyConfig;
use pulse_effects::sad::SadConfig;
use pulse_emotion::feed::ScriptedFeedConfig;
use pulse_world::ambient::RainConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub base_max_hp: i32,
    /// Invulnerability window after a hit
    pub invuln_duration: f32,
    /// Melee reach
    pub attack_radius: f32,
    pub attack_damage: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_max_hp: 5,
            invuln_duration: 0.6,
            attack_radius: 0.9,
            attack_damage: 1,
        }
    }
}

/// Per-emotion effect tunables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectsConfig {
    #[serde(default)]
    pub excited: ExcitedConfig,
    #[serde(default)]
    pub happy: HappyConfig,
    #[serde(default)]
    pub anxious: AnxiousConfig,
    #[serde(default)]
    pub sad: SadConfig,
    #[serde(default)]
    pub calm: CalmConfig,
}

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub enemy: EnemyConfig,
    #[serde(default)]
    pub comfort: ComfortConfig,
    /// No spawner means enemies are placed by hand
    #[serde(default)]
    pub spawner: Option<SpawnerConfig>,
    #[serde(default)]
    pub feed: ScriptedFeedConfig,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub rain: RainConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
    /// Track pool rotated through while calm
    #[serde(default = "default_calm_playlist")]
    pub calm_playlist: Vec<String>,
}

fn default_calm_playlist() -> Vec<String> {
    vec!["calm_1".to_string(), "calm_2".to_string()]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            comfort: ComfortConfig::default(),
            spawner: None,
            feed: ScriptedFeedConfig::default(),
            music: MusicConfig::default(),
            rain: RainConfig::default(),
            effects: EffectsConfig::default(),
            calm_playlist: default_calm_playlist(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let cfg = GameConfig::from_json("{}").unwrap();
        assert_eq!(cfg.player.base_max_hp, 5);
        assert_eq!(cfg.enemy.aggro_range, 6.0);
        assert!(cfg.spawner.is_none());
    }

    #[test]
    fn test_partial_override() {
        let cfg = GameConfig::from_json(
            r#"{
                "player": { "base_max_hp": 9, "invuln_duration": 0.6,
                            "attack_radius": 0.9, "attack_damage": 2 },
                "calm_playlist": ["drift"]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.player.base_max_hp, 9);
        assert_eq!(cfg.calm_playlist, ["drift"]);
        // Untouched sections keep their defaults
        assert_eq!(cfg.enemy.walk_speed, 1.6);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            GameConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
