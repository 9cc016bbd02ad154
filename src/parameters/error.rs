use thiserror::Error;

/// Errors raised while deriving physiologic parameters from patient inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Weight is missing, not a number, or not positive
    #[error("Invalid weight: {weight:?} kg, a positive body weight is required")]
    InvalidWeight { weight: Option<f64> },

    /// Age is negative or not a number
    #[error("Invalid age: {age} years, age must be a finite value >= 0")]
    InvalidAge { age: f64 },

    /// A manual cardiac output or ventilation value is not positive
    #[error("Invalid override: {param} = {value}, must be > 0")]
    InvalidOverride { param: &'static str, value: f64 },
}
