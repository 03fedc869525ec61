//! Wave spawner
//!
//! Emits spawn requests in configured waves, paced by timers and capped
//! by the number of live enemies it has spawned. The spawner never
//! instantiates anything itself: the world fulfils each [`SpawnRequest`]
//! and reports the resulting entity back through [`WaveSpawner::track`],
//! and removals through [`WaveSpawner::notify_removed`] (with
//! [`WaveSpawner::retain_live`] as a poll fallback for entities removed
//! without a notification).

use pulse_core::id::EntityId;
use pulse_core::math::Vec2;
use pulse_core::timer::Countdown;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One wave of spawns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveConfig {
    pub name: String,
    /// How many enemies this wave spawns
    pub count: u32,
    /// Seconds between spawns within the wave
    pub spawn_interval: f32,
    /// Delay before the wave's first spawn
    pub start_delay: f32,
    /// Archetype pool; empty falls back to the spawner default
    pub prefabs: Vec<String>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            name: "wave".to_string(),
            count: 3,
            spawn_interval: 1.0,
            start_delay: 0.0,
            prefabs: Vec::new(),
        }
    }
}

/// Spawner tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerConfig {
    /// Archetype used when a wave has no pool of its own
    pub default_prefab: String,
    /// Spawn positions used round-robin; empty spawns at the spawner
    pub spawn_points: Vec<Vec2>,
    /// Spawner position: activation anchor and spawn fallback
    pub position: Vec2,
    pub waves: Vec<WaveConfig>,
    /// Live spawns above this count pause further spawning
    pub max_alive: usize,
    pub time_between_waves: f32,
    /// Require the wave's spawns to all die before the between-wave delay
    pub wait_for_clear: bool,
    /// Restart from the first wave after the last
    pub loop_waves: bool,
    /// Player distance beyond which the spawner suspends entirely
    pub activate_radius: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            default_prefab: "enemy".to_string(),
            spawn_points: Vec::new(),
            position: Vec2::ZERO,
            waves: vec![WaveConfig::default()],
            max_alive: 3,
            time_between_waves: 2.0,
            wait_for_clear: false,
            loop_waves: false,
            activate_radius: 999.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpawnerPhase {
    StartDelay,
    Spawning,
    WaitClear,
    BetweenWaves,
    Finished,
}

/// A spawn for the world to fulfil
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub prefab: String,
    pub position: Vec2,
}

/// Timer-paced wave spawner with live-count backpressure
pub struct WaveSpawner {
    config: SpawnerConfig,
    phase: SpawnerPhase,
    wave_index: usize,
    spawned_this_wave: u32,
    /// Next spawn is due when this expires; starts ready at wave entry
    interval: Countdown,
    timer: Countdown,
    spawn_cursor: usize,
    live: HashSet<EntityId>,
    running: bool,
}

impl WaveSpawner {
    pub fn new(config: SpawnerConfig) -> Self {
        let mut s = Self {
            config,
            phase: SpawnerPhase::Finished,
            wave_index: 0,
            spawned_this_wave: 0,
            interval: Countdown::ready(),
            timer: Countdown::ready(),
            spawn_cursor: 0,
            live: HashSet::new(),
            running: false,
        };
        s.begin();
        s
    }

    /// (Re)start from the first wave
    pub fn begin(&mut self) {
        if self.config.waves.is_empty() {
            self.phase = SpawnerPhase::Finished;
            self.running = false;
            return;
        }
        self.running = true;
        self.enter_wave(0);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SpawnerPhase::Finished
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn current_wave(&self) -> Option<&WaveConfig> {
        self.config.waves.get(self.wave_index)
    }

    /// Register a fulfilled spawn as live
    pub fn track(&mut self, id: EntityId) {
        self.live.insert(id);
    }

    /// Report a tracked entity's removal; duplicate or unknown ids are fine
    pub fn notify_removed(&mut self, id: EntityId) {
        self.live.remove(&id);
    }

    /// Poll fallback: drop tracked entities `still_alive` rejects
    pub fn retain_live(&mut self, mut still_alive: impl FnMut(EntityId) -> bool) {
        self.live.retain(|&id| still_alive(id));
    }

    /// Advance the spawner; returned requests are for the caller to fulfil
    /// this tick. A player outside the activation radius suspends all
    /// progress; a missing player leaves the spawner active.
    pub fn update(
        &mut self,
        player_pos: Option<Vec2>,
        rng: &mut impl Rng,
        dt: f32,
    ) -> Vec<SpawnRequest> {
        if !self.running || self.phase == SpawnerPhase::Finished {
            return Vec::new();
        }
        if let Some(p) = player_pos {
            if p.distance(self.config.position) > self.config.activate_radius {
                return Vec::new();
            }
        }

        let mut requests = Vec::new();
        match self.phase {
            SpawnerPhase::StartDelay => {
                if self.timer.tick(dt) {
                    self.phase = SpawnerPhase::Spawning;
                }
            }
            SpawnerPhase::Spawning => {
                self.interval.tick(dt);
                // Backpressure: hold the next spawn until a slot frees up.
                if self.interval.is_ready() && self.live.len() < self.config.max_alive {
                    requests.push(self.spawn(rng));
                    self.spawned_this_wave += 1;
                    if self.spawned_this_wave >= self.config.waves[self.wave_index].count {
                        self.finish_wave();
                    } else {
                        self.interval
                            .arm(self.config.waves[self.wave_index].spawn_interval);
                    }
                }
            }
            SpawnerPhase::WaitClear => {
                if self.live.is_empty() {
                    self.enter_between_waves();
                }
            }
            SpawnerPhase::BetweenWaves => {
                if self.timer.tick(dt) {
                    self.advance_wave();
                }
            }
            SpawnerPhase::Finished => {}
        }
        requests
    }

    fn spawn(&mut self, rng: &mut impl Rng) -> SpawnRequest {
        let wave = &self.config.waves[self.wave_index];
        let prefab = wave
            .prefabs
            .choose(rng)
            .unwrap_or(&self.config.default_prefab)
            .clone();
        let position = if self.config.spawn_points.is_empty() {
            self.config.position
        } else {
            let p = self.config.spawn_points[self.spawn_cursor % self.config.spawn_points.len()];
            self.spawn_cursor += 1;
            p
        };
        log::debug!(
            "spawner emits {prefab} at ({:.1}, {:.1}) for wave {}",
            position.x,
            position.y,
            wave.name
        );
        SpawnRequest { prefab, position }
    }

    fn enter_wave(&mut self, index: usize) {
        self.wave_index = index;
        self.spawned_this_wave = 0;
        self.spawn_cursor = 0;
        self.interval.clear();
        let delay = self.config.waves[index].start_delay;
        if delay > 0.0 {
            self.phase = SpawnerPhase::StartDelay;
            self.timer.arm(delay);
        } else {
            self.phase = SpawnerPhase::Spawning;
        }
    }

    fn finish_wave(&mut self) {
        if self.config.wait_for_clear {
            self.phase = SpawnerPhase::WaitClear;
        } else {
            self.enter_between_waves();
        }
    }

    fn enter_between_waves(&mut self) {
        if self.config.time_between_waves > 0.0 {
            self.phase = SpawnerPhase::BetweenWaves;
            self.timer.arm(self.config.time_between_waves);
        } else {
            self.advance_wave();
        }
    }

    fn advance_wave(&mut self) {
        let next = self.wave_index + 1;
        if next < self.config.waves.len() {
            self.enter_wave(next);
        } else if self.config.loop_waves {
            self.enter_wave(0);
        } else {
            self.phase = SpawnerPhase::Finished;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn run(s: &mut WaveSpawner, rng: &mut StdRng, seconds: f32) -> Vec<SpawnRequest> {
        let mut out = Vec::new();
        let mut left = seconds;
        while left > 0.0 {
            let dt = left.min(0.05);
            out.extend(s.update(None, rng, dt));
            left -= dt;
        }
        out
    }

    fn config(waves: Vec<WaveConfig>) -> SpawnerConfig {
        SpawnerConfig {
            waves,
            ..SpawnerConfig::default()
        }
    }

    #[test]
    fn test_wave_spawns_count_at_interval() {
        let mut s = WaveSpawner::new(config(vec![WaveConfig {
            count: 3,
            spawn_interval: 1.0,
            ..WaveConfig::default()
        }]));
        let mut r = rng();

        let first = s.update(None, &mut r, 0.05);
        assert_eq!(first.len(), 1);
        s.track(EntityId::from_raw(1));

        let rest = run(&mut s, &mut r, 2.1);
        assert_eq!(rest.len(), 2);
        assert!(s.is_finished() || s.live_count() > 0); // between-waves or done
    }

    #[test]
    fn test_max_alive_backpressure() {
        let mut s = WaveSpawner::new(config(vec![WaveConfig {
            count: 5,
            spawn_interval: 0.1,
            ..WaveConfig::default()
        }]));
        let mut r = rng();

        let mut next_id = 1u64;
        let mut spawned = 0;
        for _ in 0..40 {
            for _req in s.update(None, &mut r, 0.05) {
                s.track(EntityId::from_raw(next_id));
                next_id += 1;
                spawned += 1;
            }
        }
        // Cap of 3 holds the 4th spawn back.
        assert_eq!(spawned, 3);

        // One removal frees exactly one slot.
        s.notify_removed(EntityId::from_raw(1));
        let more = s.update(None, &mut r, 0.05);
        assert_eq!(more.len(), 1);
        s.track(EntityId::from_raw(next_id));
        assert!(run(&mut s, &mut r, 1.0).is_empty());
    }

    #[test]
    fn test_notify_removed_idempotent() {
        let mut s = WaveSpawner::new(config(vec![WaveConfig::default()]));
        s.track(EntityId::from_raw(1));
        s.track(EntityId::from_raw(2));
        s.notify_removed(EntityId::from_raw(1));
        s.notify_removed(EntityId::from_raw(1));
        s.notify_removed(EntityId::from_raw(99));
        assert_eq!(s.live_count(), 1);
    }

    #[test]
    fn test_retain_live_poll_fallback() {
        let mut s = WaveSpawner::new(config(vec![WaveConfig::default()]));
        s.track(EntityId::from_raw(1));
        s.track(EntityId::from_raw(2));
        s.retain_live(|id| id == EntityId::from_raw(2));
        assert_eq!(s.live_count(), 1);
    }

    #[test]
    fn test_activation_radius_suspends() {
        let mut cfg = config(vec![WaveConfig::default()]);
        cfg.activate_radius = 10.0;
        let mut s = WaveSpawner::new(cfg);
        let mut r = rng();

        let far = Some(Vec2::new(50.0, 0.0));
        assert!(s.update(far, &mut r, 1.0).is_empty());
        // Timers held while suspended; entering range resumes.
        let near = Some(Vec2::new(3.0, 0.0));
        assert_eq!(s.update(near, &mut r, 0.05).len(), 1);
    }

    #[test]
    fn test_waves_progress_with_start_delay() {
        let mut s = WaveSpawner::new(config(vec![
            WaveConfig {
                name: "first".into(),
                count: 1,
                ..WaveConfig::default()
            },
            WaveConfig {
                name: "second".into(),
                count: 1,
                start_delay: 0.5,
                prefabs: vec!["brute".into()],
                ..WaveConfig::default()
            },
        ]));
        let mut r = rng();

        let first = run(&mut s, &mut r, 0.1);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].prefab, "enemy");

        // time_between_waves (2.0) + start_delay (0.5)
        let second = run(&mut s, &mut r, 2.6);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].prefab, "brute");
        let none = run(&mut s, &mut r, 5.0);
        assert!(none.is_empty());
        assert!(s.is_finished());
    }

    #[test]
    fn test_loop_waves_restart() {
        let mut cfg = config(vec![WaveConfig {
            count: 1,
            ..WaveConfig::default()
        }]);
        cfg.loop_waves = true;
        let mut s = WaveSpawner::new(cfg);
        let mut r = rng();

        let spawns = run(&mut s, &mut r, 4.2);
        assert!(spawns.len() >= 2);
        assert!(!s.is_finished());
    }

    #[test]
    fn test_round_robin_spawn_points() {
        let mut cfg = config(vec![WaveConfig {
            count: 3,
            spawn_interval: 0.1,
            ..WaveConfig::default()
        }]);
        cfg.spawn_points = vec![Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)];
        let mut s = WaveSpawner::new(cfg);
        let mut r = rng();

        let spawns = run(&mut s, &mut r, 1.0);
        assert_eq!(spawns.len(), 3);
        assert_eq!(spawns[0].position, Vec2::new(-1.0, 0.0));
        assert_eq!(spawns[1].position, Vec2::new(1.0, 0.0));
        assert_eq!(spawns[2].position, Vec2::new(-1.0, 0.0));
    }
}
