//! Wire payloads exchanged with the backend classifier
//!
//! The HTTP transport itself lives outside the gameplay core; these types
//! document the contract and give integrators ready-made serde definitions.

use serde::{Deserialize, Serialize};

/// One second of aggregated sensor features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSample {
    #[serde(rename = "HR_mean")]
    pub hr_mean: f32,
    #[serde(rename = "HR_slope")]
    pub hr_slope: f32,
    #[serde(rename = "ACC_rms")]
    pub acc_rms: f32,
    #[serde(rename = "ACC_energy")]
    pub acc_energy: f32,
    #[serde(rename = "ACC_zcr")]
    pub acc_zcr: f32,
}

/// Classification request: a 12-second sliding feature window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWindowRequest {
    /// Sender timestamp (unix seconds)
    pub ts: f64,
    /// Exactly 12 per-second samples, oldest first
    pub feature_window: Vec<FeatureSample>,
    /// Upstream confidence in the sensor data; opaque to the core
    pub quality_hint: f32,
}

/// Classifier response, also served by the `/latest` poll endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResponse {
    pub label: String,
    pub confidence: f32,
    pub quality: f32,
    pub ts: f64,
}
