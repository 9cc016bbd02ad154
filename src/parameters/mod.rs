//! Parameter model: age-adjusted MAC and weight-scaled physiology
//!
//! Everything here is a pure function of an [`Agent`] and a [`PatientProfile`].
//! [`DerivedParameters`] is a cache of those results; it is rebuilt whenever
//! either input changes and is never persisted on its own.
//!
//! ```rust
//! use inhalsol::prelude::*;
//!
//! let agent = AgentTable::builtin().get("Sevoflurane").unwrap();
//! let derived = DerivedParameters::derive(agent, &PatientProfile::years(30.0, 70.0)).unwrap();
//! assert!((derived.cardiac_output() - 4.9).abs() < 1e-12);
//! ```

mod error;
mod hemodynamics;
mod mac;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{Agent, PatientProfile};

pub use error::ParameterError;
pub use hemodynamics::{derive_hemodynamics, AgeBracket, Hemodynamics};
pub use mac::{
    derive_age_adjusted_mac, INFANT_MAC_FACTOR, MAC_DECAY_PER_YEAR, MAC_REFERENCE_AGE,
};

/// Reject negative or non-finite ages instead of coercing them to zero
pub fn validate_age_years(age_years: f64) -> Result<f64, ParameterError> {
    if age_years.is_finite() && age_years >= 0.0 {
        Ok(age_years)
    } else {
        Err(ParameterError::InvalidAge { age: age_years })
    }
}

/// Physiologic parameters the kinetics engine reads on every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedParameters {
    age_adjusted_mac: f64,
    hemodynamics: Hemodynamics,
    cardiac_output: f64,
    alveolar_ventilation: f64,
}

impl DerivedParameters {
    /// Derive MAC, cardiac output and alveolar ventilation for a patient on an agent
    pub fn derive(agent: &Agent, patient: &PatientProfile) -> Result<Self, ParameterError> {
        let age_years = validate_age_years(patient.age_years())?;
        let weight_kg = patient
            .weight_kg
            .ok_or(ParameterError::InvalidWeight { weight: None })?;
        let hemodynamics = derive_hemodynamics(age_years, weight_kg)?;

        Ok(Self {
            age_adjusted_mac: derive_age_adjusted_mac(agent, age_years),
            cardiac_output: hemodynamics.cardiac_output,
            alveolar_ventilation: hemodynamics.alveolar_ventilation,
            hemodynamics,
        })
    }

    /// Replace the weight-derived cardiac output with a manual value (L/min)
    pub fn with_cardiac_output_override(mut self, value: f64) -> Result<Self, ParameterError> {
        self.cardiac_output = positive_override("cardiac_output", value)?;
        Ok(self)
    }

    /// Replace the weight-derived alveolar ventilation with a manual value (L/min)
    pub fn with_alveolar_ventilation_override(
        mut self,
        value: f64,
    ) -> Result<Self, ParameterError> {
        self.alveolar_ventilation = positive_override("alveolar_ventilation", value)?;
        Ok(self)
    }

    /// Age-adjusted MAC, percent
    pub fn age_adjusted_mac(&self) -> f64 {
        self.age_adjusted_mac
    }

    /// Cardiac output in effect, L/min
    pub fn cardiac_output(&self) -> f64 {
        self.cardiac_output
    }

    /// Alveolar ventilation in effect, L/min
    pub fn alveolar_ventilation(&self) -> f64 {
        self.alveolar_ventilation
    }

    /// The weight-based values, before any manual override
    pub fn hemodynamics(&self) -> &Hemodynamics {
        &self.hemodynamics
    }

    pub fn is_overridden(&self) -> bool {
        self.cardiac_output != self.hemodynamics.cardiac_output
            || self.alveolar_ventilation != self.hemodynamics.alveolar_ventilation
    }
}

fn positive_override(param: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::InvalidOverride { param, value })
    }
}

impl fmt::Display for DerivedParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.hemodynamics;
        writeln!(f, "MAC (age): {:.2}%", self.age_adjusted_mac)?;
        if self.cardiac_output == h.cardiac_output {
            writeln!(
                f,
                "CO: {}kg * {}mL/kg/min = {:.1} L/min",
                h.weight_kg,
                h.bracket.cardiac_output_rate(),
                self.cardiac_output
            )?;
        } else {
            writeln!(f, "CO: {:.1} L/min (manual)", self.cardiac_output)?;
        }
        if self.alveolar_ventilation == h.alveolar_ventilation {
            write!(
                f,
                "VA: {}kg * {}mL/kg/min = {:.1} L/min",
                h.weight_kg,
                h.bracket.alveolar_ventilation_rate(),
                self.alveolar_ventilation
            )
        } else {
            write!(f, "VA: {:.1} L/min (manual)", self.alveolar_ventilation)
        }
    }
}
