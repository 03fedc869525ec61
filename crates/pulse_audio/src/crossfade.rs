//! Two-channel crossfade director
//!
//! Two alternating output channels: starting a crossfade fades the active
//! channel's gain to zero and the standby channel's gain from zero to the
//! target over a fixed duration, then swaps which channel is active. A new
//! request cancels the fade in flight and restarts from the current gain
//! levels; requests are never queued.

use pulse_core::math::{clamp01, lerp};
use serde::{Deserialize, Serialize};

/// Music fade configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    /// Crossfade length in seconds
    pub fade_duration: f32,
    /// Gain a fully faded-in channel settles at
    pub target_volume: f32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            fade_duration: 1.5,
            target_volume: 0.65,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Channel {
    track: Option<String>,
    gain: f32,
    playing: bool,
}

#[derive(Debug, Clone, Copy)]
enum Fade {
    /// Active fades out while standby fades in, then the channels swap
    Cross { elapsed: f32, from_gain: f32 },
    /// Active fades to silence, no replacement
    Out { elapsed: f32, from_gain: f32 },
}

/// Crossfading music state
pub struct MusicDirector {
    config: MusicConfig,
    channels: [Channel; 2],
    active: usize,
    fade: Option<Fade>,
}

impl MusicDirector {
    pub fn new(config: MusicConfig) -> Self {
        Self {
            config,
            channels: [Channel::default(), Channel::default()],
            active: 0,
            fade: None,
        }
    }

    /// Track currently considered active, if any
    pub fn active_track(&self) -> Option<&str> {
        self.channels[self.active].track.as_deref()
    }

    /// Gain of the active channel
    pub fn active_gain(&self) -> f32 {
        self.channels[self.active].gain
    }

    /// Gain of the standby channel
    pub fn standby_gain(&self) -> f32 {
        self.channels[1 - self.active].gain
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Start a track at full target gain with no fade
    pub fn play_immediate(&mut self, track: &str) {
        self.fade = None;
        let standby = 1 - self.active;
        self.channels[standby] = Channel::default();
        self.channels[self.active] = Channel {
            track: Some(track.to_string()),
            gain: self.config.target_volume,
            playing: true,
        };
    }

    /// Crossfade to `track`
    ///
    /// No-op if the active channel already plays that track. Cancels any
    /// fade in flight: the active channel continues down from its current
    /// gain, the standby channel restarts the new track from silence.
    pub fn crossfade_to(&mut self, track: &str) {
        if self.channels[self.active].playing
            && self.channels[self.active].track.as_deref() == Some(track)
        {
            return;
        }
        log::debug!("crossfade to {track}");
        let from_gain = self.channels[self.active].gain;
        let standby = 1 - self.active;
        self.channels[standby] = Channel {
            track: Some(track.to_string()),
            gain: 0.0,
            playing: true,
        };
        self.fade = Some(Fade::Cross {
            elapsed: 0.0,
            from_gain,
        });
    }

    /// Fade the active channel to silence (used when there is no default
    /// track to return to)
    pub fn fade_out(&mut self) {
        let from_gain = self.channels[self.active].gain;
        self.channels[1 - self.active] = Channel::default();
        self.fade = Some(Fade::Out {
            elapsed: 0.0,
            from_gain,
        });
    }

    /// Advance the fade in flight
    pub fn update(&mut self, dt: f32) {
        let duration = self.config.fade_duration.max(0.01);
        let standby = 1 - self.active;
        match &mut self.fade {
            Some(Fade::Cross { elapsed, from_gain }) => {
                *elapsed += dt;
                let k = clamp01(*elapsed / duration);
                self.channels[self.active].gain = lerp(*from_gain, 0.0, k);
                self.channels[standby].gain = lerp(0.0, self.config.target_volume, k);
                if k >= 1.0 {
                    self.channels[self.active].playing = false;
                    self.channels[self.active].gain = 0.0;
                    self.active = standby;
                    self.fade = None;
                }
            }
            Some(Fade::Out { elapsed, from_gain }) => {
                *elapsed += dt;
                let k = clamp01(*elapsed / duration);
                self.channels[self.active].gain = lerp(*from_gain, 0.0, k);
                if k >= 1.0 {
                    self.channels[self.active].playing = false;
                    self.fade = None;
                }
            }
            None => {}
        }
    }
}

impl Default for MusicDirector {
    fn default() -> Self {
        Self::new(MusicConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn director() -> MusicDirector {
        let mut d = MusicDirector::default();
        d.play_immediate("default_bgm");
        d
    }

    #[test]
    fn test_crossfade_completes_and_swaps() {
        let mut d = director();
        d.crossfade_to("calm_1");
        d.update(1.5);
        assert_eq!(d.active_track(), Some("calm_1"));
        assert!((d.active_gain() - 0.65).abs() < 1e-5);
        assert_eq!(d.standby_gain(), 0.0);
        assert!(!d.is_fading());
    }

    #[test]
    fn test_same_track_request_is_noop() {
        let mut d = director();
        d.crossfade_to("default_bgm");
        assert!(!d.is_fading());
    }

    #[test]
    fn test_interrupting_crossfade_restarts_from_current_gain() {
        let mut d = director();
        d.crossfade_to("calm_1");
        d.update(0.75); // halfway: active ~0.325
        let partial = d.active_gain();
        assert!(partial > 0.0 && partial < 0.65);

        d.crossfade_to("calm_2");
        // New fade continues down from the partial gain
        d.update(0.75);
        assert!(d.active_gain() < partial);
        d.update(0.75);
        assert_eq!(d.active_track(), Some("calm_2"));
        assert!((d.active_gain() - 0.65).abs() < 1e-5);
    }

    #[test]
    fn test_fade_out_reaches_silence() {
        let mut d = director();
        d.fade_out();
        d.update(2.0);
        assert_eq!(d.active_gain(), 0.0);
        assert!(!d.is_fading());
    }
}
