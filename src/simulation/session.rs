use serde::{Deserialize, Serialize};

use super::{SimulationOptions, Trajectory};
use crate::data::{Agent, AgentError, AgentTable, ControlSettings, PatientProfile, DEFAULT_AGENT};
use crate::error::InhalsolError;
use crate::kinetics::{step, Kpis, Sample, SimulationState, StepInput};
use crate::parameters::{
    derive_age_adjusted_mac, validate_age_years, DerivedParameters, ParameterError,
};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Never started since the last reset
    #[default]
    Idle,
    Running,
    /// Stopped by the caller; resuming continues from the same state
    Paused,
    /// Stopped at the configured duration
    Completed,
}

/// Instantaneous values for a live display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub fi_percent: f64,
    pub fa_percent: f64,
    /// FA as a multiple of age-adjusted MAC, `None` without valid parameters
    pub mac_multiple: Option<f64>,
}

/// One simulation session: inputs, derived parameters, run state and trajectory
///
/// Inputs may be changed between ticks, also while running; a change takes effect
/// on the next step. Agent or patient changes recompute [`DerivedParameters`]
/// immediately. While a run is in progress, changes that would invalidate the
/// derived parameters are rejected and the previous inputs are kept.
#[derive(Debug, Clone)]
pub struct Simulation {
    agents: AgentTable,
    options: SimulationOptions,
    agent: Agent,
    patient: PatientProfile,
    controls: ControlSettings,
    derived: Result<DerivedParameters, ParameterError>,
    state: SimulationState,
    status: RunStatus,
    trajectory: Trajectory,
}

impl Simulation {
    /// A session over the built-in agents, in its reset state
    pub fn new(options: SimulationOptions) -> Result<Self, InhalsolError> {
        Self::with_agent_table(AgentTable::builtin().clone(), options)
    }

    /// A session over a custom agent table
    ///
    /// The default agent is Sevoflurane when the table has it, otherwise the
    /// first entry.
    pub fn with_agent_table(
        agents: AgentTable,
        options: SimulationOptions,
    ) -> Result<Self, InhalsolError> {
        let agent = default_agent(&agents)?.clone();
        let patient = PatientProfile::default();
        let controls = ControlSettings::for_agent(&agent);
        let derived = DerivedParameters::derive(&agent, &patient);
        let mut simulation = Simulation {
            agents,
            options,
            agent,
            patient,
            controls,
            derived,
            state: SimulationState::new(),
            status: RunStatus::Idle,
            trajectory: Trajectory::new(),
        };
        simulation.reset()?;
        Ok(simulation)
    }

    /// Stop the run and restore every input to its documented default
    ///
    /// Agent Sevoflurane, 30 years, 70 kg, vaporizer at the agent's base MAC,
    /// 2 L/min fresh gas, no N₂O. The duration and other options are kept.
    pub fn reset(&mut self) -> Result<(), InhalsolError> {
        self.agent = default_agent(&self.agents)?.clone();
        self.patient = PatientProfile::default();
        self.controls = ControlSettings::for_agent(&self.agent);
        self.state = SimulationState::new();
        self.status = RunStatus::Idle;
        self.trajectory.clear();
        self.recompute();
        tracing::info!("Simulation reset ({})", self.agent.name());
        Ok(())
    }

    fn recompute(&mut self) {
        self.derived = DerivedParameters::derive(&self.agent, &self.patient);
        match &self.derived {
            Ok(derived) => tracing::debug!(
                "Derived parameters for {}: MAC {:.2}%, CO {:.2} L/min, VA {:.2} L/min",
                self.agent.name(),
                derived.age_adjusted_mac(),
                derived.cardiac_output(),
                derived.alveolar_ventilation()
            ),
            Err(e) => tracing::debug!("Derived parameters unavailable: {}", e),
        }
    }

    /// Select an agent by name
    ///
    /// An unknown name is rejected and leaves the current agent in place. The
    /// vaporizer is clamped to the new agent's maximum.
    pub fn select_agent(&mut self, name: &str) -> Result<(), InhalsolError> {
        let agent = self.agents.get(name)?.clone();
        if self.is_running() {
            DerivedParameters::derive(&agent, &self.patient)?;
        }
        self.agent = agent;
        let clamped = self.controls.clamped(&self.agent);
        if clamped != self.controls {
            tracing::warn!(
                "Vaporizer setting {:.1}% clamped to {:.1}% for {}",
                self.controls.vaporizer_percent,
                clamped.vaporizer_percent,
                self.agent.name()
            );
            self.controls = clamped;
        }
        self.recompute();
        Ok(())
    }

    /// Replace the patient and recompute derived parameters
    ///
    /// While idle an invalid patient is stored (and the error returned) so the
    /// caller can keep editing; [`start`](Self::start) refuses to run until it
    /// is fixed. While running an invalid patient is rejected.
    pub fn set_patient(&mut self, patient: PatientProfile) -> Result<(), ParameterError> {
        if self.is_running() {
            if let Err(e) = DerivedParameters::derive(&self.agent, &patient) {
                tracing::warn!("Rejected patient change while running: {}", e);
                return Err(e);
            }
        }
        self.patient = patient;
        self.recompute();
        self.derived.as_ref().map(|_| ()).map_err(|e| e.clone())
    }

    /// Replace the machine settings after checking them against the current agent
    pub fn set_controls(&mut self, controls: ControlSettings) -> Result<(), InhalsolError> {
        controls.validate(&self.agent)?;
        self.controls = controls;
        Ok(())
    }

    /// Manually set cardiac output (L/min) until the next recomputation
    pub fn set_cardiac_output(&mut self, value: f64) -> Result<(), ParameterError> {
        let derived = self.derived.clone()?.with_cardiac_output_override(value)?;
        self.derived = Ok(derived);
        Ok(())
    }

    /// Manually set alveolar ventilation (L/min) until the next recomputation
    pub fn set_alveolar_ventilation(&mut self, value: f64) -> Result<(), ParameterError> {
        let derived = self
            .derived
            .clone()?
            .with_alveolar_ventilation_override(value)?;
        self.derived = Ok(derived);
        Ok(())
    }

    pub fn set_duration_minutes(&mut self, minutes: u32) {
        self.options.duration_minutes = minutes;
    }

    /// Begin or resume the run
    ///
    /// Fails when the derived parameters are invalid. Starting a completed run
    /// is a no-op.
    pub fn start(&mut self) -> Result<(), InhalsolError> {
        match self.status {
            RunStatus::Running => return Ok(()),
            RunStatus::Completed => {
                tracing::info!("Run already completed; reset to start a new one");
                return Ok(());
            }
            RunStatus::Idle | RunStatus::Paused => {}
        }
        self.derived.clone()?;
        self.controls.validate(&self.agent)?;
        if self.options.duration_minutes == 0 {
            tracing::warn!("Simulation duration is zero; the run will produce no samples");
        }
        tracing::info!(
            "{} simulation at {:.2} min of {} min ({})",
            if self.status == RunStatus::Paused {
                "Resuming"
            } else {
                "Starting"
            },
            self.state.elapsed_minutes(),
            self.options.duration_minutes,
            self.agent.name()
        );
        self.status = RunStatus::Running;
        self.state.is_running = true;
        Ok(())
    }

    /// Pause a running simulation and report the KPIs at this point
    pub fn pause(&mut self) -> Option<Kpis> {
        if self.status != RunStatus::Running {
            return None;
        }
        self.status = RunStatus::Paused;
        self.state.is_running = false;
        tracing::info!("Simulation paused at {:.2} min", self.state.elapsed_minutes());
        self.kpis()
    }

    /// Apply one scheduler tick
    ///
    /// Each of the `steps_per_tick` steps first checks the configured duration;
    /// once it is reached the run completes and no further step is applied.
    /// Returns the samples emitted by this tick.
    pub fn tick(&mut self) -> &[Sample] {
        let start = self.trajectory.len();
        if self.status == RunStatus::Running {
            for _ in 0..self.options.steps_per_tick.max(1) {
                if self.state.elapsed_seconds >= self.options.duration_seconds() {
                    self.complete();
                    break;
                }
                // Invalid inputs are rejected while running, so this only guards misuse.
                if self.derived.is_err() {
                    self.pause();
                    break;
                }
                let Ok(derived) = &self.derived else {
                    break;
                };
                let input = StepInput {
                    agent: &self.agent,
                    controls: &self.controls,
                    derived,
                };
                let (next, sample) = step(
                    &self.state,
                    &input,
                    &self.options.kinetics,
                    self.options.step_seconds.max(1),
                );
                self.state = next;
                self.trajectory.push(sample);
            }
        }
        &self.trajectory.samples()[start..]
    }

    fn complete(&mut self) {
        self.status = RunStatus::Completed;
        self.state.is_running = false;
        match self.kpis() {
            Some(kpis) => tracing::info!(
                "Simulation completed after {} min: FA {:.2}%, time to MAC {}",
                self.options.duration_minutes,
                kpis.fa_final_percent,
                kpis.time_to_mac_minutes
                    .map(|t| format!("{:.1} min", t))
                    .unwrap_or_else(|| "N/A".to_string())
            ),
            None => tracing::info!("Simulation completed"),
        }
    }

    /// Start (or resume) and tick until the configured duration is reached
    pub fn run_to_completion(&mut self) -> Result<Kpis, InhalsolError> {
        self.start()?;
        while self.status == RunStatus::Running {
            self.tick();
        }
        Ok(self.derived.clone().map(|d| Kpis::snapshot(&self.state, &d))?)
    }

    pub fn agents(&self) -> &AgentTable {
        &self.agents
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn patient(&self) -> &PatientProfile {
        &self.patient
    }

    pub fn controls(&self) -> &ControlSettings {
        &self.controls
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// The derived parameters, or the error that prevents deriving them
    pub fn derived(&self) -> Result<&DerivedParameters, ParameterError> {
        self.derived.as_ref().map_err(|e| e.clone())
    }

    /// Age-adjusted MAC for the current agent and patient age
    ///
    /// Needs only a valid age, so it stays available while the weight is
    /// missing and the full [`DerivedParameters`] cannot be built.
    pub fn age_adjusted_mac(&self) -> Result<f64, ParameterError> {
        let age_years = validate_age_years(self.patient.age_years())?;
        Ok(derive_age_adjusted_mac(&self.agent, age_years))
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn kpis(&self) -> Option<Kpis> {
        self.derived
            .as_ref()
            .ok()
            .map(|derived| Kpis::snapshot(&self.state, derived))
    }

    pub fn readout(&self) -> Readout {
        Readout {
            fi_percent: self.state.fi * 100.0,
            fa_percent: self.state.fa * 100.0,
            mac_multiple: self
                .derived
                .as_ref()
                .ok()
                .and_then(|d| self.state.mac_multiple(d.age_adjusted_mac())),
        }
    }
}

fn default_agent(agents: &AgentTable) -> Result<&Agent, AgentError> {
    agents
        .get(DEFAULT_AGENT)
        .or_else(|e| agents.iter().next().ok_or(e))
}
