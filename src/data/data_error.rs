//! Error types for the static input data of a simulation
//!
//! [`AgentError`] covers agent lookup and agent table loading, [`ControlError`]
//! covers machine settings outside their declared range. Both are configuration
//! errors: they are raised when the caller commits an input, never mid-run.

use thiserror::Error;

/// Errors arising from agent lookup or agent table construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// No agent with this name exists in the table
    #[error("Unknown anesthetic agent: {name}")]
    UnknownAgent {
        /// The name that was looked up
        name: String,
    },

    /// Two agents in one table share a name
    #[error("Duplicate anesthetic agent: {name}")]
    DuplicateAgent {
        /// The repeated name
        name: String,
    },

    /// An agent record carries a value that makes the model meaningless
    #[error("Invalid data for agent {name}: {reason}")]
    InvalidAgentData {
        /// The offending agent
        name: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Errors arising from control settings outside their range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("{param} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        param: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
