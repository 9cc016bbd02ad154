//! Run reports and trajectory export
//!
//! Rendering is left to the caller. This module only serialises what a run
//! produced: the sample sequence as CSV (`time_min,fi_pct,fa_pct`) and a full
//! [`RunReport`] as JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{ControlSettings, PatientProfile};
use crate::error::InhalsolError;
use crate::kinetics::{Kpis, Sample};
use crate::parameters::DerivedParameters;
use crate::simulation::{Simulation, SimulationOptions, Trajectory};

/// Everything needed to reproduce and inspect one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub agent: String,
    pub patient: PatientProfile,
    /// Control settings at the end of the run
    pub controls: ControlSettings,
    pub derived: DerivedParameters,
    pub options: SimulationOptions,
    pub kpis: Kpis,
    pub trajectory: Trajectory,
}

impl RunReport {
    /// Capture the current state of a simulation
    ///
    /// Fails when the simulation has no valid derived parameters.
    pub fn from_simulation(simulation: &Simulation) -> Result<Self, InhalsolError> {
        let derived = *simulation.derived()?;
        Ok(Self {
            agent: simulation.agent().name().to_string(),
            patient: *simulation.patient(),
            controls: *simulation.controls(),
            derived,
            options: *simulation.options(),
            kpis: Kpis::snapshot(simulation.state(), &derived),
            trajectory: simulation.trajectory().clone(),
        })
    }

    pub fn to_json(&self) -> Result<String, InhalsolError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, InhalsolError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), InhalsolError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), InhalsolError> {
        write_samples_csv(self.trajectory.samples(), File::create(path)?)
    }
}

/// Write samples as CSV with a `time_min,fi_pct,fa_pct` header
pub fn write_samples_csv<W: Write>(samples: &[Sample], writer: W) -> Result<(), InhalsolError> {
    let mut csv = csv::Writer::from_writer(writer);
    for sample in samples {
        csv.serialize(sample)?;
    }
    csv.flush()?;
    Ok(())
}

/// Read samples written by [`write_samples_csv`]
pub fn read_samples_csv<R: std::io::Read>(reader: R) -> Result<Vec<Sample>, InhalsolError> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut samples = Vec::new();
    for record in csv.deserialize::<Sample>() {
        samples.push(record?);
    }
    Ok(samples)
}
