use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InhalsolError;
use crate::kinetics::KineticsConstants;

/// Run configuration for a [`Simulation`](super::Simulation)
///
/// Simulated time and wall-clock time are independent: every tick advances
/// `steps_per_tick × step_seconds` of simulated time, and ticks are spaced
/// `tick_interval_ms` apart by the [`Scheduler`](crate::scheduler::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// Total simulated time (default: 10 minutes)
    pub duration_minutes: u32,
    /// Simulated seconds per step (default: 1)
    pub step_seconds: u32,
    /// Wall-clock spacing between ticks (default: 100 ms)
    pub tick_interval_ms: u64,
    /// Steps applied per tick (default: 1)
    pub steps_per_tick: u32,
    pub kinetics: KineticsConstants,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            duration_minutes: 10,
            step_seconds: 1,
            tick_interval_ms: 100,
            steps_per_tick: 1,
            kinetics: KineticsConstants::default(),
        }
    }
}

impl SimulationOptions {
    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, InhalsolError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InhalsolError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Set the simulated step; zero is raised to one second
    pub fn with_step_seconds(mut self, seconds: u32) -> Self {
        self.step_seconds = seconds.max(1);
        self
    }

    pub fn with_tick_interval_ms(mut self, millis: u64) -> Self {
        self.tick_interval_ms = millis;
        self
    }

    /// Set the steps per tick; zero is raised to one
    pub fn with_steps_per_tick(mut self, steps: u32) -> Self {
        self.steps_per_tick = steps.max(1);
        self
    }

    pub fn with_kinetics(mut self, kinetics: KineticsConstants) -> Self {
        self.kinetics = kinetics;
        self
    }

    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
