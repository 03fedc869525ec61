//! Puzzle levers
//!
//! Levers are world-trigger collaborators: the core flips their state and
//! broadcasts the toggle; what a lever opens (doors, portals) is wired by
//! the level, not here.

use pulse_core::id::EntityId;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A lever toggle that actually changed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeverEvent {
    pub id: EntityId,
    pub is_on: bool,
}

/// A two-state world lever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lever {
    pub id: EntityId,
    is_on: bool,
}

impl Lever {
    pub fn new(id: EntityId) -> Self {
        Self { id, is_on: false }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Set the state; returns an event only if the state changed
    pub fn set_state(&mut self, on: bool) -> Option<LeverEvent> {
        if self.is_on == on {
            return None;
        }
        self.is_on = on;
        log::debug!("lever {} set to {}", self.id, if on { "ON" } else { "OFF" });
        Some(LeverEvent {
            id: self.id,
            is_on: on,
        })
    }

    pub fn toggle(&mut self) -> Option<LeverEvent> {
        self.set_state(!self.is_on)
    }
}

/// All lever instances currently present in the level
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LeverBank {
    levers: Vec<Lever>,
}

impl LeverBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, lever: Lever) {
        self.levers.push(lever);
    }

    pub fn remove(&mut self, id: EntityId) {
        self.levers.retain(|l| l.id != id);
    }

    pub fn get(&self, id: EntityId) -> Option<&Lever> {
        self.levers.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.levers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levers.is_empty()
    }

    /// Force one uniformly random lever to ON
    ///
    /// Returns the toggle event, or `None` if the bank is empty or the
    /// chosen lever was already on.
    pub fn force_random_on<R: Rng>(&mut self, rng: &mut R) -> Option<LeverEvent> {
        self.levers.choose_mut(rng)?.set_state(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank(n: u64) -> LeverBank {
        let mut bank = LeverBank::new();
        for i in 0..n {
            bank.add(Lever::new(EntityId::from_raw(i)));
        }
        bank
    }

    #[test]
    fn test_set_state_reports_change_only() {
        let mut lever = Lever::new(EntityId::from_raw(1));
        assert!(lever.set_state(true).is_some());
        assert!(lever.set_state(true).is_none());
        assert!(lever.set_state(false).is_some());
    }

    #[test]
    fn test_force_random_on_turns_one_on() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bank = bank(4);
        let event = bank.force_random_on(&mut rng).unwrap();
        assert!(event.is_on);
        let on_count = (0..4)
            .filter(|i| bank.get(EntityId::from_raw(*i)).unwrap().is_on())
            .count();
        assert_eq!(on_count, 1);
    }

    #[test]
    fn test_force_random_on_empty_bank() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bank = LeverBank::new();
        assert!(bank.force_random_on(&mut rng).is_none());
    }
}
