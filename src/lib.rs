//! Uptake kinetics of inhaled anesthetic agents
//!
//! `inhalsol` simulates how the inspired (FI) and alveolar (FA) fractions of a
//! volatile anesthetic evolve for a given patient, agent and machine setting.
//! It is a single-compartment, didactic model, not clinical decision support.
//!
//! The crate is organised bottom-up:
//!
//! - [`data`]: the agent catalogue, patient profile and machine controls
//! - [`parameters`]: age-adjusted MAC, cardiac output, alveolar ventilation
//! - [`kinetics`]: the pure per-step integration rule
//! - [`simulation`]: a session object with the run lifecycle
//! - [`scheduler`]: a wall-clock ticker for a shared session
//! - [`scenario`] and [`export`]: batch runs and serialisation of results

pub mod data;
pub mod error;
pub mod export;
pub mod kinetics;
pub mod parameters;
pub mod scenario;
pub mod scheduler;
pub mod simulation;

pub use crate::data::*;
pub use crate::kinetics::{step, Kpis, Sample, SimulationState};
pub use crate::parameters::{derive_age_adjusted_mac, derive_hemodynamics, DerivedParameters};
pub use crate::simulation::{Simulation, SimulationOptions};
pub use error::InhalsolError;

pub mod prelude {
    pub use crate::data::{
        AgeUnit, Agent, AgentTable, ControlSettings, PatientProfile, DEFAULT_AGENT,
    };
    pub use crate::error::InhalsolError;
    pub use crate::export::RunReport;
    pub use crate::kinetics::{step, KineticsConstants, Kpis, Sample, SimulationState, StepInput};
    pub use crate::parameters::{
        derive_age_adjusted_mac, derive_hemodynamics, AgeBracket, DerivedParameters,
        Hemodynamics, ParameterError,
    };
    pub use crate::scenario::{compare_agents, run_scenarios, Scenario};
    pub use crate::scheduler::{CancelToken, Scheduler, SchedulerExit, SharedSimulation};
    pub use crate::simulation::{Readout, RunStatus, Simulation, SimulationOptions, Trajectory};
}
