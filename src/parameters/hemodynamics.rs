//! Weight-based scaling of cardiac output and alveolar ventilation

use serde::{Deserialize, Serialize};

use super::ParameterError;

/// Age bracket selecting the per-kilogram flow rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBracket {
    /// Under one year
    Infant,
    /// One year up to (excluding) twelve
    Child,
    /// Twelve years and older
    Adult,
}

impl AgeBracket {
    pub fn from_age_years(age_years: f64) -> Self {
        if age_years < 1.0 {
            AgeBracket::Infant
        } else if age_years < 12.0 {
            AgeBracket::Child
        } else {
            AgeBracket::Adult
        }
    }

    /// Cardiac output rate in mL/kg/min
    pub fn cardiac_output_rate(&self) -> f64 {
        match self {
            AgeBracket::Infant => 120.0,
            AgeBracket::Child => 100.0,
            AgeBracket::Adult => 70.0,
        }
    }

    /// Alveolar ventilation rate in mL/kg/min
    pub fn alveolar_ventilation_rate(&self) -> f64 {
        match self {
            AgeBracket::Infant => 80.0,
            AgeBracket::Child => 70.0,
            AgeBracket::Adult => 60.0,
        }
    }
}

/// Cardiac output and alveolar ventilation derived from body weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hemodynamics {
    pub bracket: AgeBracket,
    pub weight_kg: f64,
    /// L/min
    pub cardiac_output: f64,
    /// L/min
    pub alveolar_ventilation: f64,
}

/// Scale the bracket's mL/kg/min rates by body weight, giving L/min
pub fn derive_hemodynamics(age_years: f64, weight_kg: f64) -> Result<Hemodynamics, ParameterError> {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(ParameterError::InvalidWeight {
            weight: Some(weight_kg),
        });
    }
    let bracket = AgeBracket::from_age_years(age_years);
    Ok(Hemodynamics {
        bracket,
        weight_kg,
        cardiac_output: weight_kg * bracket.cardiac_output_rate() / 1000.0,
        alveolar_ventilation: weight_kg * bracket.alveolar_ventilation_rate() / 1000.0,
    })
}
