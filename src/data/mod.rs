//! Simulation inputs: the agent catalogue, the patient and the machine settings
//!
//! These are the values a caller commits before or during a run. Physiologic
//! parameters derived from them live in [`crate::parameters`].

pub mod agent;
pub mod controls;
pub mod data_error;
pub mod patient;

pub use agent::{Agent, AgentTable, DEFAULT_AGENT};
pub use controls::{ControlSettings, DEFAULT_FRESH_GAS_FLOW};
pub use data_error::{AgentError, ControlError};
pub use patient::{AgeUnit, PatientProfile};
