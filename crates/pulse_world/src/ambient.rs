//! Ambient rain effect
//!
//! The emotion layer ramps the rain emission rate in and out; particle
//! rendering itself lives in the engine integration. A new ramp request
//! cancels the one in flight and continues from the current rate.

use pulse_core::math::{clamp01, lerp};
use serde::{Deserialize, Serialize};

/// Rain ramp configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainConfig {
    /// Particle emission rate when fully on (particles/second)
    pub target_rate: f32,
    /// Ramp-in duration (seconds)
    pub fade_in: f32,
    /// Ramp-out duration (seconds)
    pub fade_out: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            target_rate: 80.0,
            fade_in: 0.4,
            fade_out: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Ramp {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

/// Rain emission state
#[derive(Debug, Clone)]
pub struct RainEffect {
    config: RainConfig,
    rate: f32,
    ramp: Option<Ramp>,
}

impl RainEffect {
    pub fn new(config: RainConfig) -> Self {
        Self {
            config,
            rate: 0.0,
            ramp: None,
        }
    }

    /// Current emission rate
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Whether any rain is falling or ramping
    pub fn is_active(&self) -> bool {
        self.rate > 0.0 || self.ramp.map_or(false, |r| r.to > 0.0)
    }

    /// Ramp toward on/off; restarts from the current rate
    pub fn set_raining(&mut self, on: bool) {
        let (to, duration) = if on {
            (self.config.target_rate, self.config.fade_in.max(0.01))
        } else {
            (0.0, self.config.fade_out.max(0.01))
        };
        self.ramp = Some(Ramp {
            from: self.rate,
            to,
            elapsed: 0.0,
            duration,
        });
    }

    /// Advance the active ramp
    pub fn update(&mut self, dt: f32) {
        if let Some(ramp) = &mut self.ramp {
            ramp.elapsed += dt;
            let k = clamp01(ramp.elapsed / ramp.duration);
            self.rate = lerp(ramp.from, ramp.to, k);
            if k >= 1.0 {
                self.ramp = None;
            }
        }
    }
}

impl Default for RainEffect {
    fn default() -> Self {
        Self::new(RainConfig::default())
    }
}
