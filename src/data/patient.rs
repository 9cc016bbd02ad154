use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit in which a patient's age is entered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    #[default]
    Years,
    Months,
    Days,
}

impl AgeUnit {
    /// Number of units in one year
    fn per_year(&self) -> f64 {
        match self {
            AgeUnit::Years => 1.0,
            AgeUnit::Months => 12.0,
            AgeUnit::Days => 365.0,
        }
    }
}

impl fmt::Display for AgeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeUnit::Years => write!(f, "years"),
            AgeUnit::Months => write!(f, "months"),
            AgeUnit::Days => write!(f, "days"),
        }
    }
}

/// Patient inputs to the parameter model
///
/// The profile stores raw caller input; it is validated when physiologic
/// parameters are derived from it (see [`crate::parameters::DerivedParameters::derive`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub age_value: f64,
    pub age_unit: AgeUnit,
    /// Body weight in kg; `None` while the caller has not entered one
    pub weight_kg: Option<f64>,
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            age_value: 30.0,
            age_unit: AgeUnit::Years,
            weight_kg: Some(70.0),
        }
    }
}

impl PatientProfile {
    pub fn new(age_value: f64, age_unit: AgeUnit, weight_kg: f64) -> Self {
        Self {
            age_value,
            age_unit,
            weight_kg: Some(weight_kg),
        }
    }

    pub fn years(age: f64, weight_kg: f64) -> Self {
        Self::new(age, AgeUnit::Years, weight_kg)
    }

    pub fn months(age: f64, weight_kg: f64) -> Self {
        Self::new(age, AgeUnit::Months, weight_kg)
    }

    pub fn days(age: f64, weight_kg: f64) -> Self {
        Self::new(age, AgeUnit::Days, weight_kg)
    }

    /// Age normalised to years (months / 12, days / 365)
    pub fn age_years(&self) -> f64 {
        self.age_value / self.age_unit.per_year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn age_is_normalised_to_years() {
        assert_eq!(PatientProfile::years(30.0, 70.0).age_years(), 30.0);
        assert_eq!(PatientProfile::months(6.0, 7.0).age_years(), 0.5);
        assert_relative_eq!(PatientProfile::days(73.0, 4.0).age_years(), 0.2);
    }

    #[test]
    fn default_profile_is_reference_adult() {
        let patient = PatientProfile::default();
        assert_eq!(patient.age_years(), 30.0);
        assert_eq!(patient.weight_kg, Some(70.0));
    }

    #[test]
    fn age_unit_serializes_lowercase() {
        let json = serde_json::to_string(&AgeUnit::Months).unwrap();
        assert_eq!(json, "\"months\"");
    }
}
