//! One-shot runs and parallel batches
//!
//! A [`Scenario`] is a complete, self-contained run description. Scenarios
//! share nothing, so a batch is evaluated in parallel with rayon.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::{AgentTable, ControlSettings, PatientProfile};
use crate::error::InhalsolError;
use crate::export::RunReport;
use crate::simulation::{Simulation, SimulationOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub agent: String,
    pub patient: PatientProfile,
    /// `None` uses the agent's reset defaults
    #[serde(default)]
    pub controls: Option<ControlSettings>,
    #[serde(default)]
    pub options: SimulationOptions,
}

impl Scenario {
    pub fn new(agent: impl Into<String>, patient: PatientProfile) -> Self {
        Self {
            agent: agent.into(),
            patient,
            controls: None,
            options: SimulationOptions::default(),
        }
    }

    pub fn with_controls(mut self, controls: ControlSettings) -> Self {
        self.controls = Some(controls);
        self
    }

    pub fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }

    /// Run to completion against `agents`
    pub fn run(&self, agents: &AgentTable) -> Result<RunReport, InhalsolError> {
        let mut simulation = Simulation::with_agent_table(agents.clone(), self.options)?;
        simulation.select_agent(&self.agent)?;
        simulation.set_patient(self.patient)?;
        let controls = match self.controls {
            Some(controls) => controls,
            None => ControlSettings::for_agent(simulation.agent()),
        };
        simulation.set_controls(controls)?;
        simulation.run_to_completion()?;
        RunReport::from_simulation(&simulation)
    }
}

/// Run every scenario in parallel; results keep the input order
pub fn run_scenarios(
    scenarios: &[Scenario],
    agents: &AgentTable,
) -> Vec<Result<RunReport, InhalsolError>> {
    tracing::debug!("Running {} scenarios", scenarios.len());
    scenarios.par_iter().map(|s| s.run(agents)).collect()
}

/// Run the same patient on every agent in the table, each at its default settings
pub fn compare_agents(
    patient: PatientProfile,
    options: SimulationOptions,
    agents: &AgentTable,
) -> Vec<Result<RunReport, InhalsolError>> {
    let scenarios: Vec<Scenario> = agents
        .names()
        .map(|name| Scenario::new(name, patient).with_options(options))
        .collect();
    run_scenarios(&scenarios, agents)
}
