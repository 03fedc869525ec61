//! Ground enemy controller
//!
//! A per-enemy finite state machine: patrol until the player comes within
//! aggro range, chase, attack through animation events, flinch into
//! hit-stun when damaged, die and despawn after a grace period.
//!
//! The attack is gated on animation callbacks: [`Enemy::on_attack_begin`],
//! [`Enemy::on_attack_hit`] and [`Enemy::on_attack_end`] are driven by the
//! animation layer. The hit frame resolves at most once per attack (the
//! hit flag), and the state machine stays in [`EnemyPhase::Attacking`]
//! until the end callback arrives. There is deliberately no timeout: an
//! animation that never signals its end leaves the enemy standing in
//! place, which is visible and diagnosable rather than silently masked.

use crate::terrain::TerrainProbe;
use pulse_combat::health::EnemyVitals;
use pulse_combat::resolve::{knockback_impulse, HitOutcome, HitTarget, Strike};
use pulse_combat::volume::HitBox;
use pulse_core::id::EntityId;
use pulse_core::math::Vec2;
use pulse_core::timer::Countdown;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tuning for one enemy archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Patrol speed
    pub walk_speed: f32,
    /// Chase speed
    pub run_speed: f32,
    /// Horizontal distance at which chasing begins (boundary included)
    pub aggro_range: f32,
    /// Pause before flipping at a patrol edge
    pub idle_turn_wait: f32,
    /// Minimum time between two flips
    pub turn_cooldown: f32,
    /// Ground probe: horizontal lead ahead of the feet
    pub ground_probe_ahead: f32,
    /// Ground probe: drop below the lead point
    pub ground_probe_down: f32,
    /// Ground probe radius
    pub ground_probe_radius: f32,
    /// Wall probe distance
    pub wall_probe_dist: f32,
    /// Seconds between attacks, measured from attack end
    pub attack_cooldown: f32,
    pub attack_damage: i32,
    /// Attack volume, full width x full height
    pub attack_box_size: Vec2,
    /// Attack volume center, relative to the enemy, mirrored by facing
    pub attack_box_offset: Vec2,
    /// Hit-stun length after taking damage
    pub hit_stun: f32,
    /// Knockback impulse magnitude applied on hurt
    pub knockback_power: f32,
    /// Knockback lift above the horizon, degrees
    pub knockback_angle_deg: f32,
    /// Post-knockback cap on upward velocity
    pub max_upward_velocity: f32,
    /// Hurt flash length (visual only)
    pub flash_time: f32,
    /// Number of hurt flashes
    pub flash_count: u32,
    /// Corpse lifetime before despawn
    pub despawn_delay: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    pub max_hp: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.6,
            run_speed: 3.2,
            aggro_range: 6.0,
            idle_turn_wait: 0.2,
            turn_cooldown: 0.25,
            ground_probe_ahead: 0.28,
            ground_probe_down: 0.25,
            ground_probe_radius: 0.08,
            wall_probe_dist: 0.14,
            attack_cooldown: 1.2,
            attack_damage: 1,
            attack_box_size: Vec2::new(1.2, 1.4),
            attack_box_offset: Vec2::new(0.7, 0.2),
            hit_stun: 0.22,
            knockback_power: 7.0,
            knockback_angle_deg: 35.0,
            max_upward_velocity: 12.0,
            flash_time: 0.1,
            flash_count: 2,
            despawn_delay: 2.0,
            gravity: 20.0,
            max_hp: 3,
        }
    }
}

/// Behaviour phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    Patrol,
    Chasing,
    Attacking,
    HitStun,
    Dead,
}

/// Which of the two attack animations plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackAnim {
    Primary,
    Secondary,
}

/// Events surfaced to the world during [`Enemy::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyEvent {
    /// An attack wind-up started; the animation layer owns it from here
    AttackStarted { anim: AttackAnim },
    /// The despawn grace elapsed; remove this enemy
    Despawned,
}

/// One ground enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    id: EntityId,
    pub config: EnemyConfig,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rest height; the enemy never sinks below it
    ground_y: f32,
    facing_right: bool,
    phase: EnemyPhase,
    vitals: EnemyVitals,
    /// Attack animation in flight (begin seen, end not yet)
    attack_anim_playing: bool,
    /// Hit frame already resolved for the current attack
    attack_did_hit: bool,
    attack_cooldown: Countdown,
    turn_cooldown: Countdown,
    /// Armed while pausing at a patrol edge before the flip
    turn_wait: Option<Countdown>,
    stun: Countdown,
    flash: Countdown,
    despawn: Countdown,
    /// External controller (comfort agent) owns movement and decisions
    pub ai_suspended: bool,
    /// Body collider toggle; off once dead or fading
    pub collision_enabled: bool,
    /// Player-vs-body contact suppressed (comfort approach)
    pub player_collision_suppressed: bool,
    /// Render alpha, written by fade-out sequences
    pub opacity: f32,
}

impl Enemy {
    pub fn new(id: EntityId, config: EnemyConfig, pos: Vec2) -> Self {
        let vitals = EnemyVitals::new(config.max_hp);
        Self {
            id,
            config,
            pos,
            vel: Vec2::ZERO,
            ground_y: pos.y,
            facing_right: true,
            phase: EnemyPhase::Patrol,
            vitals,
            attack_anim_playing: false,
            attack_did_hit: false,
            attack_cooldown: Countdown::ready(),
            turn_cooldown: Countdown::ready(),
            turn_wait: None,
            stun: Countdown::ready(),
            flash: Countdown::ready(),
            despawn: Countdown::ready(),
            ai_suspended: false,
            collision_enabled: true,
            player_collision_suppressed: false,
            opacity: 1.0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn phase(&self) -> EnemyPhase {
        self.phase
    }

    pub fn vitals(&self) -> &EnemyVitals {
        &self.vitals
    }

    pub fn is_dead(&self) -> bool {
        self.phase == EnemyPhase::Dead
    }

    /// Facing as a sign: +1 right, -1 left
    pub fn face_sign(&self) -> f32 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }

    /// Whether the hurt flash is active (visual only)
    pub fn is_flashing(&self) -> bool {
        !self.flash.is_ready()
    }

    /// Advance the state machine by `dt`
    ///
    /// `player_pos` is `None` when no player exists; the enemy then
    /// patrols indefinitely. Returned events are for the caller to act on
    /// this tick.
    pub fn update(
        &mut self,
        player_pos: Option<Vec2>,
        terrain: &dyn TerrainProbe,
        rng: &mut impl Rng,
        dt: f32,
    ) -> Vec<EnemyEvent> {
        let mut events = Vec::new();
        self.flash.tick(dt);

        if self.phase == EnemyPhase::Dead {
            if self.despawn.tick(dt) {
                events.push(EnemyEvent::Despawned);
            }
            return events;
        }

        // A comfort agent (or similar controller) drives this body.
        if self.ai_suspended {
            return events;
        }

        self.attack_cooldown.tick(dt);
        self.turn_cooldown.tick(dt);

        // Aggro is a pure horizontal distance test, boundary inclusive.
        let chasing = match player_pos {
            Some(p) => (p.x - self.pos.x).abs() <= self.config.aggro_range,
            None => false,
        };

        if self.phase == EnemyPhase::HitStun {
            if self.stun.tick(dt) {
                self.phase = if chasing {
                    EnemyPhase::Chasing
                } else {
                    EnemyPhase::Patrol
                };
            }
            // Knockback momentum carries through the stun.
            self.integrate(dt);
            return events;
        }

        if self.phase == EnemyPhase::Attacking {
            self.vel.x = 0.0;
            if !self.attack_anim_playing {
                self.attack_cooldown.arm(self.config.attack_cooldown);
                self.phase = if chasing {
                    EnemyPhase::Chasing
                } else {
                    EnemyPhase::Patrol
                };
            } else {
                // Waiting on the end callback; no timeout.
                self.integrate(dt);
                return events;
            }
        }

        self.phase = if chasing {
            EnemyPhase::Chasing
        } else {
            EnemyPhase::Patrol
        };

        if let Some(p) = player_pos {
            if chasing {
                self.facing_right = p.x >= self.pos.x;
            }
            if chasing && self.attack_cooldown.is_ready() && self.player_in_reach(p) {
                self.begin_attack(rng, &mut events);
                self.integrate(dt);
                return events;
            }
        }

        match self.phase {
            EnemyPhase::Chasing => {
                let p = player_pos.unwrap_or(self.pos);
                let dir = if p.x >= self.pos.x { 1.0 } else { -1.0 };
                self.vel.x = dir * self.config.run_speed;
            }
            EnemyPhase::Patrol => self.patrol(terrain, dt),
            _ => {}
        }

        self.integrate(dt);
        events
    }

    fn patrol(&mut self, terrain: &dyn TerrainProbe, dt: f32) {
        if let Some(wait) = &mut self.turn_wait {
            self.vel.x = 0.0;
            if wait.tick(dt) {
                self.turn_wait = None;
                self.flip();
            }
            return;
        }
        if self.turn_cooldown.is_ready() && self.edge_or_wall_ahead(terrain) {
            // Pause briefly at the edge, then flip.
            self.vel.x = 0.0;
            self.turn_wait = Some(Countdown::armed(self.config.idle_turn_wait));
            return;
        }
        self.vel.x = self.face_sign() * self.config.walk_speed;
    }

    fn edge_or_wall_ahead(&self, terrain: &dyn TerrainProbe) -> bool {
        let sign = self.face_sign();
        let lead = Vec2::new(self.pos.x + sign * self.config.ground_probe_ahead, self.pos.y);
        let probe = Vec2::new(lead.x, lead.y - self.config.ground_probe_down);
        let no_ground = !terrain.has_ground(probe, self.config.ground_probe_radius);
        let wall = terrain.wall_ahead(self.pos, sign, self.config.wall_probe_dist);
        no_ground || wall
    }

    fn flip(&mut self) {
        self.facing_right = !self.facing_right;
        self.vel.x = 0.0;
        self.turn_cooldown.arm(self.config.turn_cooldown);
    }

    /// Whether the player sits inside the attack pre-check volume
    ///
    /// The pre-check spans from the enemy's center to the far edge of the
    /// attack box, so a player standing flush against the body still
    /// triggers the attack even though the hit frame may whiff.
    fn player_in_reach(&self, player_pos: Vec2) -> bool {
        let half_w = self.config.attack_box_size.x * 0.5;
        let extent = self.config.attack_box_offset.x + half_w;
        let precheck = HitBox::forward(
            self.pos,
            Vec2::new(extent * 0.5, self.config.attack_box_offset.y),
            Vec2::new(extent, self.config.attack_box_size.y),
            self.face_sign(),
        );
        precheck.contains(player_pos)
    }

    fn attack_volume(&self) -> HitBox {
        HitBox::forward(
            self.pos,
            self.config.attack_box_offset,
            self.config.attack_box_size,
            self.face_sign(),
        )
    }

    fn begin_attack(&mut self, rng: &mut impl Rng, events: &mut Vec<EnemyEvent>) {
        self.phase = EnemyPhase::Attacking;
        self.attack_did_hit = false;
        self.attack_anim_playing = true;
        self.vel.x = 0.0;
        let anim = if rng.gen_bool(0.5) {
            AttackAnim::Primary
        } else {
            AttackAnim::Secondary
        };
        log::debug!("enemy {} attacks with {:?}", self.id, anim);
        events.push(EnemyEvent::AttackStarted { anim });
    }

    /// Animation callback: attack wind-up frame
    pub fn on_attack_begin(&mut self) {
        self.attack_did_hit = false;
    }

    /// Animation callback: hit frame
    ///
    /// Returns the strike to resolve against the player, or `None` if this
    /// attack already hit or the enemy died mid-swing. At most one strike
    /// per attack.
    pub fn on_attack_hit(&mut self) -> Option<Strike> {
        if self.attack_did_hit || self.is_dead() {
            return None;
        }
        self.attack_did_hit = true;
        Some(Strike {
            volume: self.attack_volume(),
            damage: self.config.attack_damage,
            origin: self.pos,
        })
    }

    /// Animation callback: attack animation finished
    pub fn on_attack_end(&mut self) {
        self.attack_anim_playing = false;
    }

    /// Force death: stop, drop the collider, start the despawn grace
    pub fn kill(&mut self) {
        if self.phase == EnemyPhase::Dead {
            return;
        }
        log::debug!("enemy {} died", self.id);
        self.phase = EnemyPhase::Dead;
        self.vel = Vec2::ZERO;
        self.attack_anim_playing = false;
        self.collision_enabled = false;
        self.despawn.arm(self.config.despawn_delay);
    }

    fn integrate(&mut self, dt: f32) {
        self.vel.y -= self.config.gravity * dt;
        self.pos = self.pos + self.vel * dt;
        if self.pos.y <= self.ground_y {
            self.pos.y = self.ground_y;
            self.vel.y = 0.0;
        }
    }
}

impl HitTarget for Enemy {
    fn target_id(&self) -> EntityId {
        self.id
    }

    fn hit_point(&self) -> Vec2 {
        self.pos
    }

    /// Apply damage: flinch into hit-stun with knockback, or die
    ///
    /// An interrupted attack is cancelled; the enemy never transitions
    /// from hit-stun back into the same swing.
    fn take_hit(&mut self, damage: i32, from: Vec2) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome {
                damage: 0,
                died: false,
            };
        }
        let lethal = self.vitals.take_damage(damage);

        self.phase = EnemyPhase::HitStun;
        self.attack_anim_playing = false;
        self.turn_wait = None;
        self.stun.arm(self.config.hit_stun);
        self.flash
            .arm(self.config.flash_time * 2.0 * self.config.flash_count as f32);

        if self.vel.y > 0.0 {
            self.vel.y = 0.0;
        }
        let impulse = knockback_impulse(
            self.pos,
            from,
            self.config.knockback_power,
            self.config.knockback_angle_deg,
        );
        self.vel = self.vel + impulse;
        if self.vel.y > self.config.max_upward_velocity {
            self.vel.y = self.config.max_upward_velocity;
        }

        if lethal {
            self.kill();
        }
        HitOutcome {
            damage,
            died: lethal,
        }
    }
}
