//! Attack animation timeline
//!
//! Stands in for the animator: schedules the begin/hit/end callbacks of a
//! playing attack clip at fixed offsets. A clip whose end offset is `None`
//! never fires its end callback, which leaves the owning enemy parked in
//! its attack phase, the same observable stall a misconfigured clip
//! produces, kept visible on purpose.

use pulse_ai::enemy::AttackAnim;
use pulse_core::id::EntityId;
use serde::{Deserialize, Serialize};

/// Callback offsets of one attack clip, seconds from clip start
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttackTiming {
    pub begin: f32,
    pub hit: f32,
    /// `None` = the clip never reports its end
    pub end: Option<f32>,
}

impl AttackTiming {
    pub fn for_anim(anim: AttackAnim) -> Self {
        match anim {
            AttackAnim::Primary => Self {
                begin: 0.1,
                hit: 0.35,
                end: Some(0.6),
            },
            AttackAnim::Secondary => Self {
                begin: 0.1,
                hit: 0.4,
                end: Some(0.7),
            },
        }
    }
}

/// Which callback fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimPhase {
    Begin,
    Hit,
    End,
}

/// A fired callback for the world to route to its enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimEvent {
    pub enemy: EntityId,
    pub phase: AnimPhase,
}

#[derive(Debug, Clone)]
struct Play {
    enemy: EntityId,
    timing: AttackTiming,
    elapsed: f32,
    begin_fired: bool,
    hit_fired: bool,
}

/// All attack clips currently playing
#[derive(Debug, Default)]
pub struct AnimationTimeline {
    plays: Vec<Play>,
}

impl AnimationTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `anim` for `enemy`, replacing any clip it already plays
    pub fn start(&mut self, enemy: EntityId, anim: AttackAnim) {
        self.start_with(enemy, AttackTiming::for_anim(anim));
    }

    pub fn start_with(&mut self, enemy: EntityId, timing: AttackTiming) {
        self.cancel(enemy);
        self.plays.push(Play {
            enemy,
            timing,
            elapsed: 0.0,
            begin_fired: false,
            hit_fired: false,
        });
    }

    /// Drop `enemy`'s clip without firing its remaining callbacks
    pub fn cancel(&mut self, enemy: EntityId) {
        self.plays.retain(|p| p.enemy != enemy);
    }

    pub fn is_playing(&self, enemy: EntityId) -> bool {
        self.plays.iter().any(|p| p.enemy == enemy)
    }

    /// Advance all clips; fired callbacks come back in clip order
    pub fn update(&mut self, dt: f32) -> Vec<AnimEvent> {
        let mut fired = Vec::new();
        for play in &mut self.plays {
            play.elapsed += dt;
            if !play.begin_fired && play.elapsed >= play.timing.begin {
                play.begin_fired = true;
                fired.push(AnimEvent {
                    enemy: play.enemy,
                    phase: AnimPhase::Begin,
                });
            }
            if !play.hit_fired && play.elapsed >= play.timing.hit {
                play.hit_fired = true;
                fired.push(AnimEvent {
                    enemy: play.enemy,
                    phase: AnimPhase::Hit,
                });
            }
            if let Some(end) = play.timing.end {
                if play.elapsed >= end {
                    fired.push(AnimEvent {
                        enemy: play.enemy,
                        phase: AnimPhase::End,
                    });
                }
            }
        }
        self.plays
            .retain(|p| p.timing.end.map_or(true, |end| p.elapsed < end));
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> EntityId {
        EntityId::from_raw(raw)
    }

    #[test]
    fn test_callbacks_fire_in_order() {
        let mut tl = AnimationTimeline::new();
        tl.start(id(1), AttackAnim::Primary);

        let mut phases = Vec::new();
        for _ in 0..70 {
            phases.extend(tl.update(0.01).into_iter().map(|e| e.phase));
        }
        assert_eq!(phases, [AnimPhase::Begin, AnimPhase::Hit, AnimPhase::End]);
        assert!(!tl.is_playing(id(1)));
    }

    #[test]
    fn test_cancel_suppresses_remaining_callbacks() {
        let mut tl = AnimationTimeline::new();
        tl.start(id(1), AttackAnim::Primary);
        tl.update(0.15); // begin fired
        tl.cancel(id(1));
        assert!(tl.update(1.0).is_empty());
    }

    #[test]
    fn test_missing_end_never_completes() {
        let mut tl = AnimationTimeline::new();
        tl.start_with(
            id(1),
            AttackTiming {
                begin: 0.1,
                hit: 0.3,
                end: None,
            },
        );
        let fired = tl.update(10.0);
        assert_eq!(fired.len(), 2);
        // The clip is stuck; only a cancel clears it.
        assert!(tl.is_playing(id(1)));
        assert!(tl.update(10.0).is_empty());
    }

    #[test]
    fn test_restart_replaces_clip() {
        let mut tl = AnimationTimeline::new();
        tl.start(id(1), AttackAnim::Primary);
        tl.update(0.2);
        tl.start(id(1), AttackAnim::Secondary);
        // Begin fires again for the fresh clip
        let fired = tl.update(0.15);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].phase, AnimPhase::Begin);
    }
}
