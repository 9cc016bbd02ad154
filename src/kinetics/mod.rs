//! Single-compartment uptake kinetics
//!
//! The model tracks two fractions:
//!
//! | Symbol | Meaning |
//! |--------|---------|
//! | FI | inspired fraction, first-order smoothed toward `vaporizer × min(1, FGF / 5)` |
//! | FA | alveolar fraction, a one-pole follower of FI at rate `(VA / CO) / λ` per minute |
//!
//! Each call to [`step`] advances a [`SimulationState`] by a fixed quantum of
//! simulated time and emits one [`Sample`]. The state is a plain value owned by
//! the caller; nothing in this module holds hidden state.
//!
//! This is a didactic approximation: there are no tissue groups and no
//! elimination.

mod constants;
mod kpi;
mod state;
mod step;

pub use constants::KineticsConstants;
pub use kpi::Kpis;
pub use state::{Sample, SimulationState};
pub use step::{alveolar_rate, fresh_gas_factor, mac_reached, step, target_fi, StepInput};
