//! Comfort agent sequence
//!
//! A one-shot behaviour layered onto a living enemy: suspend its combat
//! AI, walk it toward the player with a decelerating approach, speak a
//! comfort line through a typewriter bubble, hold, fade out and remove
//! the enemy. The sequence is terminal; it never returns the enemy to
//! combat.

use crate::enemy::Enemy;
use pulse_core::math::{clamp01, lerp, Vec2};
use pulse_core::timer::Countdown;
use serde::{Deserialize, Serialize};

/// Tuning for the comfort sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComfortConfig {
    /// Horizontal distance at which the approach stops
    pub approach_distance: f32,
    /// Distance below which the approach decelerates
    pub slow_down_distance: f32,
    /// Cruise speed of the approach
    pub move_speed: f32,
    /// Hard cap on approach speed
    pub max_speed: f32,
    /// Floor of the decelerating approach
    pub min_approach_speed: f32,
    /// Pause between stopping and speaking
    pub idle_transition_time: f32,
    /// How long the fully revealed line stays up
    pub hold_seconds: f32,
    /// Extra padding after the hold
    pub post_hold_pad: f32,
    /// Typewriter reveal rate
    pub chars_per_second: f32,
    /// Fade-out length before removal
    pub fade_duration: f32,
    /// Suppress player-vs-body contact damage while approaching
    pub suppress_player_collision: bool,
}

impl Default for ComfortConfig {
    fn default() -> Self {
        Self {
            approach_distance: 1.5,
            slow_down_distance: 3.0,
            move_speed: 2.8,
            max_speed: 3.5,
            min_approach_speed: 0.5,
            idle_transition_time: 0.5,
            hold_seconds: 3.0,
            post_hold_pad: 0.5,
            chars_per_second: 12.0,
            fade_duration: 0.8,
            suppress_player_collision: true,
        }
    }
}

/// Where the sequence currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComfortPhase {
    Approaching,
    Stopped,
    Speaking,
    FadingOut,
    Removed,
}

/// Events surfaced from [`ComfortAgent::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComfortEvent {
    /// The fade completed; remove the enemy from the world
    Finished,
}

/// Drives one enemy through the comfort sequence
pub struct ComfortAgent {
    config: ComfortConfig,
    phase: ComfortPhase,
    line: String,
    /// Fractional characters revealed so far
    reveal: f32,
    /// Armed once the line is fully revealed
    hold: Countdown,
    hold_started: bool,
    settle: Countdown,
    fade: Countdown,
    /// Target we walk toward; refreshed while the player exists
    last_known_player: Vec2,
}

impl ComfortAgent {
    /// Start the sequence: suspends the enemy's combat AI immediately
    pub fn begin(config: ComfortConfig, line: String, player_pos: Vec2, enemy: &mut Enemy) -> Self {
        enemy.ai_suspended = true;
        enemy.vel = Vec2::ZERO;
        if config.suppress_player_collision {
            enemy.player_collision_suppressed = true;
        }
        log::debug!("comfort agent begins for enemy {}", enemy.id());
        Self {
            config,
            phase: ComfortPhase::Approaching,
            line,
            reveal: 0.0,
            hold: Countdown::ready(),
            hold_started: false,
            settle: Countdown::ready(),
            fade: Countdown::ready(),
            last_known_player: player_pos,
        }
    }

    pub fn phase(&self) -> ComfortPhase {
        self.phase
    }

    /// Portion of the line currently visible in the bubble
    pub fn visible_text(&self) -> &str {
        let count = (self.reveal as usize).min(self.line.chars().count());
        match self.line.char_indices().nth(count) {
            Some((idx, _)) => &self.line[..idx],
            None => &self.line,
        }
    }

    /// Advance the sequence; the agent owns the enemy's movement while
    /// it runs. A vanished player leaves the agent walking to the last
    /// known position.
    pub fn update(
        &mut self,
        enemy: &mut Enemy,
        player_pos: Option<Vec2>,
        dt: f32,
    ) -> Option<ComfortEvent> {
        if let Some(p) = player_pos {
            self.last_known_player = p;
        }
        match self.phase {
            ComfortPhase::Approaching => self.approach(enemy, dt),
            ComfortPhase::Stopped => {
                if self.settle.tick(dt) {
                    self.phase = ComfortPhase::Speaking;
                }
            }
            ComfortPhase::Speaking => {
                let total = self.line.chars().count() as f32;
                if self.reveal < total {
                    self.reveal = (self.reveal + self.config.chars_per_second * dt).min(total);
                }
                if self.reveal >= total && !self.hold_started {
                    self.hold_started = true;
                    self.hold
                        .arm(self.config.hold_seconds + self.config.post_hold_pad);
                }
                if self.hold_started && self.hold.tick(dt) {
                    self.phase = ComfortPhase::FadingOut;
                    enemy.collision_enabled = false;
                    self.fade.arm(self.config.fade_duration);
                }
            }
            ComfortPhase::FadingOut => {
                let done = self.fade.tick(dt);
                enemy.opacity =
                    clamp01(self.fade.remaining() / self.config.fade_duration.max(1e-4));
                if done {
                    enemy.opacity = 0.0;
                    self.phase = ComfortPhase::Removed;
                    return Some(ComfortEvent::Finished);
                }
            }
            ComfortPhase::Removed => {}
        }
        None
    }

    fn approach(&mut self, enemy: &mut Enemy, dt: f32) {
        let target = self.last_known_player;
        let dist = (target.x - enemy.pos.x).abs();
        if dist <= self.config.approach_distance {
            enemy.vel = Vec2::ZERO;
            // Contact damage comes back once the walk is over.
            enemy.player_collision_suppressed = false;
            self.settle.arm(self.config.idle_transition_time);
            self.phase = ComfortPhase::Stopped;
            return;
        }
        let dir = if target.x >= enemy.pos.x { 1.0 } else { -1.0 };
        let speed = if dist < self.config.slow_down_distance {
            lerp(
                self.config.min_approach_speed,
                self.config.move_speed,
                clamp01(dist / self.config.slow_down_distance),
            )
        } else {
            self.config.move_speed
        };
        let speed = speed.min(self.config.max_speed);
        enemy.vel.x = dir * speed;
        enemy.pos.x += enemy.vel.x * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{Enemy, EnemyConfig, EnemyPhase};
    use pulse_core::id::EntityId;

    fn enemy_at(x: f32) -> Enemy {
        Enemy::new(EntityId::from_raw(9), EnemyConfig::default(), Vec2::new(x, 0.0))
    }

    fn run(agent: &mut ComfortAgent, enemy: &mut Enemy, player: Option<Vec2>, seconds: f32) -> bool {
        let mut left = seconds;
        let mut finished = false;
        while left > 0.0 {
            let dt = left.min(0.02);
            if agent.update(enemy, player, dt) == Some(ComfortEvent::Finished) {
                finished = true;
            }
            left -= dt;
        }
        finished
    }

    #[test]
    fn test_begin_suspends_combat_ai() {
        let mut e = enemy_at(0.0);
        let _a = ComfortAgent::begin(
            ComfortConfig::default(),
            "hey".into(),
            Vec2::new(5.0, 0.0),
            &mut e,
        );
        assert!(e.ai_suspended);
        assert!(e.player_collision_suppressed);
    }

    #[test]
    fn test_approach_stops_at_distance_and_restores_collision() {
        let mut e = enemy_at(0.0);
        let player = Vec2::new(6.0, 0.0);
        let mut a = ComfortAgent::begin(ComfortConfig::default(), "hey".into(), player, &mut e);

        run(&mut a, &mut e, Some(player), 5.0);
        assert!(matches!(
            a.phase(),
            ComfortPhase::Stopped | ComfortPhase::Speaking
        ));
        assert!((player.x - e.pos.x).abs() <= 1.5 + 0.1);
        assert!(!e.player_collision_suppressed);
    }

    #[test]
    fn test_vanished_player_uses_last_known_position() {
        let mut e = enemy_at(0.0);
        let player = Vec2::new(4.0, 0.0);
        let mut a = ComfortAgent::begin(ComfortConfig::default(), "hey".into(), player, &mut e);

        run(&mut a, &mut e, Some(player), 0.5);
        // Player gone; agent keeps walking toward where it last saw them.
        run(&mut a, &mut e, None, 5.0);
        assert_ne!(a.phase(), ComfortPhase::Approaching);
        assert!((player.x - e.pos.x).abs() <= 1.5 + 0.1);
    }

    #[test]
    fn test_typewriter_reveals_incrementally() {
        let mut e = enemy_at(0.0);
        let player = Vec2::new(1.0, 0.0); // already in range
        let mut a = ComfortAgent::begin(ComfortConfig::default(), "take a breath".into(), player, &mut e);

        run(&mut a, &mut e, Some(player), 0.6); // stop + settle
        assert_eq!(a.phase(), ComfortPhase::Speaking);
        run(&mut a, &mut e, Some(player), 0.25);
        let partial = a.visible_text().len();
        assert!(partial > 0 && partial < "take a breath".len());
        run(&mut a, &mut e, Some(player), 2.0);
        assert_eq!(a.visible_text(), "take a breath");
    }

    #[test]
    fn test_sequence_is_terminal() {
        let mut e = enemy_at(0.0);
        let player = Vec2::new(1.0, 0.0);
        let mut a = ComfortAgent::begin(ComfortConfig::default(), "hi".into(), player, &mut e);

        // Approach + settle + reveal + hold(3.5) + fade(0.8)
        let finished = run(&mut a, &mut e, Some(player), 6.0);
        assert!(finished);
        assert_eq!(a.phase(), ComfortPhase::Removed);
        assert_eq!(e.opacity, 0.0);
        assert!(!e.collision_enabled);
        // Combat AI never resumes.
        assert!(e.ai_suspended);
        assert_eq!(e.phase(), EnemyPhase::Patrol);
    }
}
