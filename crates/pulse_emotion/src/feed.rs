//! Scripted stand-in for the live classifier feed
//!
//! Holds the most recent `(label, confidence)` reading and re-publishes it
//! on a fixed cadence, the way the live pipeline pushes its latest `/latest`
//! poll result into the game every few seconds. Also supports immediate
//! manual emits for debugging and tests.

use crate::bus::{EmotionBus, EmotionReceiver, EmotionSource};
use crate::event::{EmotionEvent, EmotionLabel};
use pulse_core::timer::Countdown;
use serde::{Deserialize, Serialize};

/// Feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedFeedConfig {
    /// Seconds between automatic re-emits of the latest reading
    pub emit_interval: f32,
    /// Confidence used when a manual emit does not supply one
    pub default_confidence: f32,
    /// Label emitted once on startup, if any
    pub start_label: Option<EmotionLabel>,
}

impl Default for ScriptedFeedConfig {
    fn default() -> Self {
        Self {
            emit_interval: 10.0,
            default_confidence: 0.9,
            start_label: Some(EmotionLabel::Calm),
        }
    }
}

/// Scripted emotion feed driving an [`EmotionBus`]
pub struct ScriptedFeed {
    config: ScriptedFeedConfig,
    bus: EmotionBus,
    latest: Option<EmotionEvent>,
    interval: Countdown,
    started: bool,
}

impl ScriptedFeed {
    pub fn new(config: ScriptedFeedConfig) -> Self {
        let interval = Countdown::armed(config.emit_interval);
        Self {
            config,
            bus: EmotionBus::new(),
            latest: None,
            interval,
            started: false,
        }
    }

    /// Record the newest classifier reading without emitting it
    ///
    /// Unparseable labels never reach consumers; the caller drops them
    /// before this point.
    pub fn set_reading(&mut self, label: EmotionLabel, confidence: f32) {
        self.latest = Some(EmotionEvent::new(label, confidence));
    }

    /// Emit a label immediately, outside the automatic cadence
    pub fn emit(&mut self, label: EmotionLabel, confidence: Option<f32>) {
        let event =
            EmotionEvent::new(label, confidence.unwrap_or(self.config.default_confidence));
        log::debug!("emotion feed: {} ({:.2})", event.label, event.confidence);
        self.latest = Some(event);
        self.bus.publish(event);
    }

    /// Advance the feed; emits the start label on the first tick and the
    /// latest reading whenever the cadence interval elapses
    pub fn update(&mut self, dt: f32) {
        if !self.started {
            self.started = true;
            if let Some(label) = self.config.start_label {
                self.emit(label, None);
            }
        }
        if self.interval.tick(dt) {
            self.interval.arm(self.config.emit_interval);
            if let Some(event) = self.latest {
                self.bus.publish(event);
            }
        }
    }
}

impl EmotionSource for ScriptedFeed {
    fn subscribe(&mut self) -> EmotionReceiver {
        self.bus.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> ScriptedFeedConfig {
        ScriptedFeedConfig {
            emit_interval: 1.0,
            default_confidence: 0.9,
            start_label: None,
        }
    }

    #[test]
    fn test_start_label_emitted_once() {
        let mut feed = ScriptedFeed::new(ScriptedFeedConfig::default());
        let rx = feed.subscribe();

        feed.update(0.1);
        feed.update(0.1);

        let got = rx.drain();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].label, EmotionLabel::Calm);
    }

    #[test]
    fn test_cadence_reemits_latest() {
        let mut feed = ScriptedFeed::new(quiet_config());
        let rx = feed.subscribe();

        feed.set_reading(EmotionLabel::Anxious, 0.8);
        feed.update(0.5);
        assert_eq!(rx.pending(), 0);
        feed.update(0.6);
        let got = rx.drain();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].label, EmotionLabel::Anxious);
    }

    #[test]
    fn test_no_reading_no_event() {
        let mut feed = ScriptedFeed::new(quiet_config());
        let rx = feed.subscribe();
        feed.update(5.0);
        // Absence of events is not an error condition
        assert_eq!(rx.pending(), 0);
    }

    #[test]
    fn test_manual_emit_uses_default_confidence() {
        let mut feed = ScriptedFeed::new(quiet_config());
        let rx = feed.subscribe();
        feed.emit(EmotionLabel::Sad, None);
        assert_eq!(rx.poll().unwrap().confidence, 0.9);
    }
}
