use serde::{Deserialize, Serialize};

/// Empirical constants of the uptake model
///
/// None of these is physically calibrated. They are exposed so that a caller
/// can experiment with them; the defaults reproduce the reference behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticsConstants {
    /// First-order smoothing gain pulling FI toward its target each step (default: 0.1)
    pub fi_gain: f64,
    /// Fresh gas flow at which the circuit stops diluting the vaporizer output, L/min (default: 5.0)
    pub reference_fresh_gas_flow: f64,
    /// Multiplier on the alveolar rate while N₂O is co-administered (default: 1.25)
    pub n2o_multiplier: f64,
    /// How long after the start of a run the N₂O multiplier applies, seconds (default: 120)
    pub n2o_window_seconds: u64,
    /// Fraction of age-adjusted MAC that counts as "MAC reached" (default: 0.995)
    pub mac_threshold: f64,
}

impl Default for KineticsConstants {
    fn default() -> Self {
        Self {
            fi_gain: 0.1,
            reference_fresh_gas_flow: 5.0,
            n2o_multiplier: 1.25,
            n2o_window_seconds: 120,
            mac_threshold: 0.995,
        }
    }
}

impl KineticsConstants {
    pub fn with_fi_gain(mut self, gain: f64) -> Self {
        self.fi_gain = gain;
        self
    }

    pub fn with_reference_fresh_gas_flow(mut self, litres_per_minute: f64) -> Self {
        self.reference_fresh_gas_flow = litres_per_minute;
        self
    }

    pub fn with_n2o_multiplier(mut self, multiplier: f64) -> Self {
        self.n2o_multiplier = multiplier;
        self
    }

    pub fn with_n2o_window_seconds(mut self, seconds: u64) -> Self {
        self.n2o_window_seconds = seconds;
        self
    }

    pub fn with_mac_threshold(mut self, threshold: f64) -> Self {
        self.mac_threshold = threshold;
        self
    }
}
