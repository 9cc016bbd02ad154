use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::data_error::ControlError;

/// Fresh gas flow restored on reset, in L/min
pub const DEFAULT_FRESH_GAS_FLOW: f64 = 2.0;

/// Anesthesia machine settings
///
/// These may be changed at any time, including while a run is stepping; the
/// engine reads the latest values on every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlSettings {
    /// Vaporizer dial, percent (0..=agent max)
    pub vaporizer_percent: f64,
    /// Fresh gas flow, L/min (>= 0)
    pub fresh_gas_flow: f64,
    /// Nitrous oxide in the carrier gas, percent (0..=100)
    pub n2o_percent: f64,
}

impl ControlSettings {
    pub fn new(vaporizer_percent: f64, fresh_gas_flow: f64, n2o_percent: f64) -> Self {
        Self {
            vaporizer_percent,
            fresh_gas_flow,
            n2o_percent,
        }
    }

    /// Reset defaults: vaporizer at the agent's base MAC, 2 L/min, no N₂O
    pub fn for_agent(agent: &Agent) -> Self {
        Self::new(agent.mac_base(), DEFAULT_FRESH_GAS_FLOW, 0.0)
    }

    pub fn with_vaporizer(mut self, percent: f64) -> Self {
        self.vaporizer_percent = percent;
        self
    }

    pub fn with_fresh_gas_flow(mut self, litres_per_minute: f64) -> Self {
        self.fresh_gas_flow = litres_per_minute;
        self
    }

    pub fn with_n2o(mut self, percent: f64) -> Self {
        self.n2o_percent = percent;
        self
    }

    /// Check every setting against its declared range for `agent`
    pub fn validate(&self, agent: &Agent) -> Result<(), ControlError> {
        check_range(
            "vaporizer_percent",
            self.vaporizer_percent,
            0.0,
            agent.max_vaporizer_setting(),
        )?;
        check_range("fresh_gas_flow", self.fresh_gas_flow, 0.0, f64::INFINITY)?;
        check_range("n2o_percent", self.n2o_percent, 0.0, 100.0)?;
        Ok(())
    }

    /// Bring every setting into its range for `agent`; non-finite values become 0
    pub fn clamped(&self, agent: &Agent) -> Self {
        Self {
            vaporizer_percent: clamp_finite(
                self.vaporizer_percent,
                0.0,
                agent.max_vaporizer_setting(),
            ),
            fresh_gas_flow: clamp_finite(self.fresh_gas_flow, 0.0, f64::INFINITY),
            n2o_percent: clamp_finite(self.n2o_percent, 0.0, 100.0),
        }
    }
}

fn check_range(param: &'static str, value: f64, min: f64, max: f64) -> Result<(), ControlError> {
    if value.is_nan() || value < min || value > max {
        return Err(ControlError::OutOfRange {
            param,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::agent::AgentTable;

    fn sevoflurane() -> &'static Agent {
        AgentTable::builtin().get("Sevoflurane").unwrap()
    }

    #[test]
    fn defaults_follow_agent_base_mac() {
        let controls = ControlSettings::for_agent(sevoflurane());
        assert_eq!(controls.vaporizer_percent, 2.0);
        assert_eq!(controls.fresh_gas_flow, 2.0);
        assert_eq!(controls.n2o_percent, 0.0);
        assert!(controls.validate(sevoflurane()).is_ok());
    }

    #[test]
    fn vaporizer_above_agent_max_is_rejected() {
        let controls = ControlSettings::for_agent(sevoflurane()).with_vaporizer(9.0);
        let err = controls.validate(sevoflurane()).unwrap_err();
        assert_eq!(
            err,
            ControlError::OutOfRange {
                param: "vaporizer_percent",
                value: 9.0,
                min: 0.0,
                max: 8.0
            }
        );
    }

    #[test]
    fn negative_flow_and_excess_n2o_are_rejected() {
        let agent = sevoflurane();
        assert!(ControlSettings::new(2.0, -0.1, 0.0).validate(agent).is_err());
        assert!(ControlSettings::new(2.0, 1.0, 100.5).validate(agent).is_err());
        assert!(ControlSettings::new(f64::NAN, 1.0, 0.0).validate(agent).is_err());
    }

    #[test]
    fn clamping_brings_settings_into_range() {
        let agent = sevoflurane();
        let controls = ControlSettings::new(12.0, -3.0, f64::NAN).clamped(agent);
        assert_eq!(controls, ControlSettings::new(8.0, 0.0, 0.0));
        assert!(controls.validate(agent).is_ok());
    }
}
