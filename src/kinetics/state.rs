use serde::{Deserialize, Serialize};

/// The evolving state of one simulation run
///
/// `fi` and `fa` are fractions in `[0, 1]`; multiply by 100 for percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Simulated seconds since the start of the run
    pub elapsed_seconds: u64,
    /// Inspired fraction
    pub fi: f64,
    /// Alveolar fraction
    pub fa: f64,
    /// Set once, on the first step where FA reaches the MAC threshold
    pub time_to_mac_minutes: Option<f64>,
    pub is_running: bool,
}

impl SimulationState {
    /// A fresh run: time zero, no agent in the circuit, not running
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_minutes(&self) -> f64 {
        self.elapsed_seconds as f64 / 60.0
    }

    /// FA as a multiple of `age_adjusted_mac`; `None` when the MAC is not positive
    pub fn mac_multiple(&self, age_adjusted_mac: f64) -> Option<f64> {
        if age_adjusted_mac > 0.0 {
            Some(self.fa * 100.0 / age_adjusted_mac)
        } else {
            None
        }
    }
}

/// One point of the uptake curve, emitted by every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "time_min")]
    pub time_minutes: f64,
    #[serde(rename = "fi_pct")]
    pub fi_percent: f64,
    #[serde(rename = "fa_pct")]
    pub fa_percent: f64,
}
