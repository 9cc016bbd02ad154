use thiserror::Error;

use crate::data::data_error::{AgentError, ControlError};
use crate::parameters::ParameterError;

#[derive(Error, Debug)]
pub enum InhalsolError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Control(#[from] ControlError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
