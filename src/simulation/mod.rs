//! Simulation sessions
//!
//! A [`Simulation`] ties the inputs ([`crate::data`]), the derived parameters
//! ([`crate::parameters`]) and the kinetics state ([`crate::kinetics`]) together
//! and implements the run lifecycle:
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running --duration--> Completed
//!   ^                                                                            |
//!   +------------------------------------reset-----------------------------------+
//! ```
//!
//! The session does not schedule itself. Call [`Simulation::tick`] from your own
//! loop, use [`Simulation::run_to_completion`], or hand it to a
//! [`Scheduler`](crate::scheduler::Scheduler).
//!
//! ```rust
//! use inhalsol::prelude::*;
//!
//! let mut sim = Simulation::new(SimulationOptions::default().with_duration_minutes(5)).unwrap();
//! sim.select_agent("Desflurane").unwrap();
//! sim.set_controls(ControlSettings::new(12.0, 6.0, 0.0)).unwrap();
//! let kpis = sim.run_to_completion().unwrap();
//! assert_eq!(sim.trajectory().len(), 300);
//! assert!(kpis.time_to_mac_minutes.is_some());
//! ```

mod options;
mod session;
mod trajectory;

pub use options::SimulationOptions;
pub use session::{Readout, RunStatus, Simulation};
pub use trajectory::Trajectory;
