//! World composition and tick order
//!
//! Owns every subsystem and advances them in a fixed order each tick:
//! feed, emotion effects, spawner, enemies, animation callbacks, comfort
//! agents, removals, then the ambient timers (health, HUD, music, rain).
//! Everything runs on the caller's thread; a tick never blocks.

use crate::anim::{AnimPhase, AnimationTimeline};
use crate::config::GameConfig;
use pulse_ai::comfort::{ComfortAgent, ComfortEvent};
use pulse_ai::enemy::{Enemy, EnemyEvent};
use pulse_ai::spawner::WaveSpawner;
use pulse_ai::terrain::StripTerrain;
use pulse_combat::health::{HealthEvent, PlayerHealth};
use pulse_combat::multiplier::DamageMultiplier;
use pulse_combat::resolve::{
    resolve_enemy_attack, resolve_player_attack, CombatEvent, HitTarget,
};
use pulse_combat::volume::HitCircle;
use pulse_core::id::{EntityId, EntityIdGen};
use pulse_core::math::Vec2;
use pulse_effects::anxious::AnxiousEffect;
use pulse_effects::calm::CalmEffect;
use pulse_effects::excited::ExcitedEffect;
use pulse_effects::happy::HappyEffect;
use pulse_effects::sad::SadEffect;
use pulse_emotion::bus::{EmotionReceiver, EmotionSource};
use pulse_emotion::event::EmotionEvent;
use pulse_emotion::feed::ScriptedFeed;
use pulse_hud::status::StatusBoard;
use pulse_audio::crossfade::MusicDirector;
use pulse_audio::playlist::Playlist;
use pulse_world::ambient::RainEffect;
use pulse_world::lever::{LeverBank, LeverEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Everything observable that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    Emotion(EmotionEvent),
    Combat(CombatEvent),
    Health(HealthEvent),
    Lever(LeverEvent),
    ComfortStarted { enemy: EntityId },
    EnemySpawned { enemy: EntityId },
    EnemyRemoved { enemy: EntityId },
}

/// The whole game state
pub struct GameWorld {
    config: GameConfig,
    rng: StdRng,
    ids: EntityIdGen,

    feed: ScriptedFeed,
    rx: EmotionReceiver,

    player_pos: Vec2,
    player_health: PlayerHealth,
    multiplier: DamageMultiplier,

    hud: StatusBoard,
    levers: LeverBank,
    music: MusicDirector,
    playlist: Playlist,
    rain: RainEffect,

    excited: ExcitedEffect,
    happy: HappyEffect,
    anxious: AnxiousEffect,
    sad: SadEffect,
    calm: CalmEffect,

    enemies: Vec<Enemy>,
    comforts: Vec<(EntityId, ComfortAgent)>,
    spawner: Option<WaveSpawner>,
    timeline: AnimationTimeline,
    terrain: StripTerrain,
}

impl GameWorld {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut feed = ScriptedFeed::new(config.feed.clone());
        let rx = feed.subscribe();
        let player_health =
            PlayerHealth::new(config.player.base_max_hp, config.player.invuln_duration);
        let mut music = MusicDirector::new(config.music.clone());
        if let Some(track) = &config.effects.calm.default_track {
            music.play_immediate(track);
        }
        let mut playlist = Playlist::new(config.calm_playlist.clone());
        playlist.shuffle(&mut rng);
        let spawner = config.spawner.clone().map(WaveSpawner::new);

        Self {
            rng,
            ids: EntityIdGen::new(),
            feed,
            rx,
            player_pos: Vec2::ZERO,
            player_health,
            multiplier: DamageMultiplier::new(),
            hud: StatusBoard::new(),
            levers: LeverBank::new(),
            music,
            playlist,
            rain: RainEffect::new(config.rain.clone()),
            excited: ExcitedEffect::new(config.effects.excited.clone()),
            happy: HappyEffect::new(config.effects.happy.clone()),
            anxious: AnxiousEffect::new(config.effects.anxious.clone()),
            sad: SadEffect::new(
                config.effects.sad.clone(),
                Box::<pulse_effects::sad::StaticLineProvider>::default(),
            ),
            calm: CalmEffect::new(config.effects.calm.clone()),
            enemies: Vec::new(),
            comforts: Vec::new(),
            spawner,
            timeline: AnimationTimeline::new(),
            terrain: StripTerrain::unbounded(),
            config,
        }
    }

    pub fn set_terrain(&mut self, terrain: StripTerrain) {
        self.terrain = terrain;
    }

    pub fn set_player_pos(&mut self, pos: Vec2) {
        self.player_pos = pos;
    }

    pub fn player_pos(&self) -> Vec2 {
        self.player_pos
    }

    pub fn player_health(&self) -> &PlayerHealth {
        &self.player_health
    }

    pub fn damage_multiplier(&self) -> &DamageMultiplier {
        &self.multiplier
    }

    pub fn hud(&self) -> &StatusBoard {
        &self.hud
    }

    pub fn levers_mut(&mut self) -> &mut LeverBank {
        &mut self.levers
    }

    pub fn music(&self) -> &MusicDirector {
        &self.music
    }

    pub fn rain(&self) -> &RainEffect {
        &self.rain
    }

    pub fn feed_mut(&mut self) -> &mut ScriptedFeed {
        &mut self.feed
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    pub fn comfort_for(&self, enemy: EntityId) -> Option<&ComfortAgent> {
        self.comforts
            .iter()
            .find(|(id, _)| *id == enemy)
            .map(|(_, a)| a)
    }

    /// Place an enemy by hand (levels without a spawner)
    pub fn spawn_enemy(&mut self, pos: Vec2) -> EntityId {
        let id = self.ids.next();
        self.enemies
            .push(Enemy::new(id, self.config.enemy.clone(), pos));
        id
    }

    /// Resolve a player melee swing centered on the player
    pub fn player_attack(&mut self) -> Vec<CombatEvent> {
        if self.player_health.is_dead() {
            return Vec::new();
        }
        let volume = HitCircle::new(self.player_pos, self.config.player.attack_radius);
        let comforted = self.comforted_ids();
        let mut targets: Vec<&mut dyn HitTarget> = self
            .enemies
            .iter_mut()
            .filter(|e| !e.is_dead() && e.collision_enabled && !comforted.contains(&e.id()))
            .map(|e| e as &mut dyn HitTarget)
            .collect();
        let events = resolve_player_attack(
            &volume,
            self.player_pos,
            self.config.player.attack_damage,
            &self.multiplier,
            &mut targets,
        );
        drop(targets);
        // A landed hit interrupts whatever swing the enemy had going.
        for event in &events {
            if let CombatEvent::EnemyDamaged { id, .. } = event {
                self.timeline.cancel(*id);
            }
        }
        events
    }

    /// Advance the world by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Vec<WorldEvent> {
        let mut out = Vec::new();

        self.feed.update(dt);
        for event in self.rx.drain() {
            self.apply_emotion(event, &mut out);
        }

        self.run_spawner(dt, &mut out);

        let player = if self.player_health.is_dead() {
            None
        } else {
            Some(self.player_pos)
        };

        let mut removals: Vec<EntityId> = Vec::new();
        let comforted = self.comforted_ids();
        for enemy in &mut self.enemies {
            if comforted.contains(&enemy.id()) {
                continue;
            }
            for event in enemy.update(player, &self.terrain, &mut self.rng, dt) {
                match event {
                    EnemyEvent::AttackStarted { anim } => {
                        self.timeline.start(enemy.id(), anim);
                    }
                    EnemyEvent::Despawned => removals.push(enemy.id()),
                }
            }
        }

        for callback in self.timeline.update(dt) {
            let Some(enemy) = self.enemies.iter_mut().find(|e| e.id() == callback.enemy)
            else {
                continue;
            };
            match callback.phase {
                AnimPhase::Begin => enemy.on_attack_begin(),
                AnimPhase::Hit => {
                    if let Some(strike) = enemy.on_attack_hit() {
                        if let Some(event) =
                            resolve_enemy_attack(&strike, self.player_pos, &mut self.player_health)
                        {
                            out.push(WorldEvent::Combat(event));
                        }
                    }
                }
                AnimPhase::End => enemy.on_attack_end(),
            }
        }

        for i in 0..self.comforts.len() {
            let (id, agent) = &mut self.comforts[i];
            let Some(enemy) = self.enemies.iter_mut().find(|e| e.id() == *id) else {
                continue;
            };
            if agent.update(enemy, player, dt) == Some(ComfortEvent::Finished) {
                removals.push(*id);
            }
        }

        for id in removals {
            self.enemies.retain(|e| e.id() != id);
            self.comforts.retain(|(cid, _)| *cid != id);
            self.timeline.cancel(id);
            if let Some(spawner) = &mut self.spawner {
                spawner.notify_removed(id);
            }
            out.push(WorldEvent::EnemyRemoved { enemy: id });
        }

        self.player_health.update(dt);
        self.excited.update(dt, &mut self.hud);
        self.hud.update(dt);
        self.music.update(dt);
        self.rain.update(dt);

        out
    }

    fn apply_emotion(&mut self, event: EmotionEvent, out: &mut Vec<WorldEvent>) {
        out.push(WorldEvent::Emotion(event));

        self.excited
            .handle(&event, &mut self.multiplier, &mut self.hud);
        for health_event in self
            .happy
            .handle(&event, &mut self.player_health, &mut self.hud)
        {
            out.push(WorldEvent::Health(health_event));
        }
        if let Some(lever_event) =
            self.anxious
                .handle(&event, &mut self.levers, &mut self.rng, &mut self.hud)
        {
            out.push(WorldEvent::Lever(lever_event));
        }

        let comforted = self.comforted_ids();
        let candidates: Vec<(EntityId, Vec2)> = self
            .enemies
            .iter()
            .filter(|e| !e.is_dead() && !comforted.contains(&e.id()))
            .map(|e| (e.id(), e.pos))
            .collect();
        if let Some(request) = self.sad.handle(
            &event,
            self.player_pos,
            &candidates,
            &mut self.rng,
            &mut self.hud,
        ) {
            if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id() == request.enemy) {
                self.timeline.cancel(request.enemy);
                let agent = ComfortAgent::begin(
                    self.config.comfort.clone(),
                    request.line,
                    self.player_pos,
                    enemy,
                );
                self.comforts.push((request.enemy, agent));
                out.push(WorldEvent::ComfortStarted {
                    enemy: request.enemy,
                });
            }
        }

        self.calm.handle(
            &event,
            &mut self.music,
            &mut self.playlist,
            &mut self.rain,
            &mut self.hud,
        );
    }

    fn run_spawner(&mut self, dt: f32, out: &mut Vec<WorldEvent>) {
        let requests = match &mut self.spawner {
            Some(spawner) => {
                // Poll fallback in case a removal notification was missed.
                let enemies = &self.enemies;
                spawner.retain_live(|id| enemies.iter().any(|e| e.id() == id));
                spawner.update(Some(self.player_pos), &mut self.rng, dt)
            }
            None => Vec::new(),
        };
        for request in requests {
            let id = self.ids.next();
            log::debug!("fulfilling spawn of {} as enemy {id}", request.prefab);
            self.enemies
                .push(Enemy::new(id, self.config.enemy.clone(), request.position));
            if let Some(spawner) = &mut self.spawner {
                spawner.track(id);
            }
            out.push(WorldEvent::EnemySpawned { enemy: id });
        }
    }

    fn comforted_ids(&self) -> HashSet<EntityId> {
        self.comforts.iter().map(|(id, _)| *id).collect()
    }
}
