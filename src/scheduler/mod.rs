//! Wall-clock driver for a shared [`Simulation`]
//!
//! The scheduler ticks a simulation at a fixed cadence on the calling thread
//! (or a thread it spawns). The simulation sits behind one mutex and each tick
//! runs under a single lock, so other threads can adjust controls, pause or
//! reset between ticks but never observe a half-applied step.
//!
//! Cancelling is a matter of stopping the loop: set the [`CancelToken`] or
//! pause the simulation from another thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::InhalsolError;
use crate::kinetics::Sample;
use crate::simulation::{RunStatus, Simulation, SimulationOptions};

/// A simulation shared between the scheduler and its callers
pub type SharedSimulation = Arc<Mutex<Simulation>>;

pub fn shared(simulation: Simulation) -> SharedSimulation {
    Arc::new(Mutex::new(simulation))
}

/// Lock a shared simulation
///
/// A panic in another holder cannot leave a step half-applied, so a poisoned
/// lock is recovered rather than propagated.
pub fn lock(simulation: &SharedSimulation) -> MutexGuard<'_, Simulation> {
    simulation
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Cooperative stop signal for a running [`Scheduler`]
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Why a scheduler loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerExit {
    /// The simulation reached its configured duration
    Completed,
    /// The simulation was paused or reset by another holder
    Stopped,
    /// The cancel token was set; the simulation has been paused
    Cancelled,
}

/// Ticks a [`SharedSimulation`] at a fixed wall-clock interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    tick_interval: Duration,
}

impl Scheduler {
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    pub fn from_options(options: &SimulationOptions) -> Self {
        Self::new(options.tick_interval())
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Start the simulation and tick it until it completes, stops or is cancelled
    ///
    /// `on_tick` runs under the lock after every tick with the samples that
    /// tick emitted.
    pub fn run<F>(
        &self,
        simulation: &SharedSimulation,
        cancel: &CancelToken,
        mut on_tick: F,
    ) -> Result<SchedulerExit, InhalsolError>
    where
        F: FnMut(&Simulation, &[Sample]),
    {
        lock(simulation).start()?;
        loop {
            {
                let mut sim = lock(simulation);
                if cancel.is_cancelled() {
                    sim.pause();
                    tracing::debug!("Scheduler cancelled");
                    return Ok(SchedulerExit::Cancelled);
                }
                match sim.status() {
                    RunStatus::Running => {}
                    RunStatus::Completed => return Ok(SchedulerExit::Completed),
                    RunStatus::Idle | RunStatus::Paused => return Ok(SchedulerExit::Stopped),
                }
                let start = sim.trajectory().len();
                sim.tick();
                let emitted = &sim.trajectory().samples()[start..];
                on_tick(&*sim, emitted);
            }
            if !self.tick_interval.is_zero() {
                std::thread::sleep(self.tick_interval);
            }
        }
    }

    /// Run the loop on a new thread
    pub fn spawn(
        self,
        simulation: SharedSimulation,
        cancel: CancelToken,
    ) -> JoinHandle<Result<SchedulerExit, InhalsolError>> {
        std::thread::spawn(move || self.run(&simulation, &cancel, |_, _| {}))
    }
}
