//! Confidence gate shared by every emotion effect
//!
//! Each effect owns one gate bound to its label. An event passes when the
//! label matches and confidence clears the threshold; any event that does
//! not pass while the effect is applied reverts it. Passing again while
//! applied is surfaced separately so effects can choose whether re-entry
//! retriggers anything.

use pulse_emotion::event::{EmotionEvent, EmotionLabel};
use serde::{Deserialize, Serialize};

/// Default classifier confidence required to act on an event
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.65;

/// What an event means for a gated effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Effect was off and should apply
    Enter,
    /// Effect is applied and the event passes again
    Reenter,
    /// Effect is applied and the event does not pass; revert
    Exit,
    /// Effect is off and stays off
    Ignore,
}

/// Label + threshold gate with applied-state tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectGate {
    pub label: EmotionLabel,
    pub threshold: f32,
    applied: bool,
}

impl EffectGate {
    pub fn new(label: EmotionLabel) -> Self {
        Self {
            label,
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            applied: false,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Classify `event` and update the applied flag
    pub fn decide(&mut self, event: &EmotionEvent) -> GateDecision {
        let passes = event.label == self.label && event.confidence >= self.threshold;
        match (passes, self.applied) {
            (true, false) => {
                self.applied = true;
                GateDecision::Enter
            }
            (true, true) => GateDecision::Reenter,
            (false, true) => {
                self.applied = false;
                GateDecision::Exit
            }
            (false, false) => GateDecision::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(label: EmotionLabel, confidence: f32) -> EmotionEvent {
        EmotionEvent::new(label, confidence)
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        let mut gate = EffectGate::new(EmotionLabel::Excited);
        assert_eq!(gate.decide(&ev(EmotionLabel::Excited, 0.65)), GateDecision::Enter);
    }

    #[test]
    fn test_low_confidence_ignored_when_off() {
        let mut gate = EffectGate::new(EmotionLabel::Excited);
        assert_eq!(gate.decide(&ev(EmotionLabel::Excited, 0.64)), GateDecision::Ignore);
        assert!(!gate.is_applied());
    }

    #[test]
    fn test_any_non_passing_event_reverts() {
        let mut gate = EffectGate::new(EmotionLabel::Excited);
        gate.decide(&ev(EmotionLabel::Excited, 0.9));
        assert!(gate.is_applied());

        // A different label exits
        assert_eq!(gate.decide(&ev(EmotionLabel::Calm, 0.9)), GateDecision::Exit);
        assert!(!gate.is_applied());

        // A matching but under-threshold event also exits
        gate.decide(&ev(EmotionLabel::Excited, 0.9));
        assert_eq!(gate.decide(&ev(EmotionLabel::Excited, 0.3)), GateDecision::Exit);
    }

    #[test]
    fn test_reentry_reported_separately() {
        let mut gate = EffectGate::new(EmotionLabel::Sad);
        gate.decide(&ev(EmotionLabel::Sad, 0.8));
        assert_eq!(gate.decide(&ev(EmotionLabel::Sad, 0.7)), GateDecision::Reenter);
        assert!(gate.is_applied());
    }
}
