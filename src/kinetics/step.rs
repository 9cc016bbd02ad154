//! The per-step integration rule
//!
//! All functions here are pure: the caller owns the [`SimulationState`] and
//! receives a new one from [`step`].

use crate::data::{Agent, ControlSettings};
use crate::parameters::DerivedParameters;

use super::{KineticsConstants, Sample, SimulationState};

/// Everything a step reads besides the state itself
///
/// Values are borrowed fresh for every step so that live changes to the
/// controls or the patient take effect on the next step.
#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    pub agent: &'a Agent,
    pub controls: &'a ControlSettings,
    pub derived: &'a DerivedParameters,
}

/// Fraction of the vaporizer output reaching the patient at a given fresh gas flow
#[inline]
pub fn fresh_gas_factor(fresh_gas_flow: f64, constants: &KineticsConstants) -> f64 {
    if constants.reference_fresh_gas_flow <= 0.0 {
        return 1.0;
    }
    (fresh_gas_flow / constants.reference_fresh_gas_flow).clamp(0.0, 1.0)
}

/// The inspired fraction FI is moving toward
#[inline]
pub fn target_fi(controls: &ControlSettings, constants: &KineticsConstants) -> f64 {
    (controls.vaporizer_percent / 100.0) * fresh_gas_factor(controls.fresh_gas_flow, constants)
}

/// Per-minute rate at which FA approaches FI
///
/// `(VA / CO) / λ`, multiplied by the N₂O factor during the first
/// `n2o_window_seconds` of a run when N₂O is flowing.
pub fn alveolar_rate(
    agent: &Agent,
    derived: &DerivedParameters,
    controls: &ControlSettings,
    elapsed_seconds: u64,
    constants: &KineticsConstants,
) -> f64 {
    let mut rate = (derived.alveolar_ventilation() / derived.cardiac_output())
        / agent.blood_gas_partition_coefficient();
    if controls.n2o_percent > 0.0 && elapsed_seconds < constants.n2o_window_seconds {
        rate *= constants.n2o_multiplier;
    }
    rate
}

/// Whether `fa` counts as having reached MAC, compared at three-decimal precision
#[inline]
pub fn mac_reached(fa: f64, age_adjusted_mac: f64, constants: &KineticsConstants) -> bool {
    if age_adjusted_mac <= 0.0 {
        return false;
    }
    let ratio = fa * 100.0 / age_adjusted_mac;
    (ratio * 1000.0).round() >= (constants.mac_threshold * 1000.0).round()
}

/// Advance the model by `dt_seconds` of simulated time
///
/// Returns the new state and the sample for this step. The sample is stamped
/// with the time *before* the clock advances, so the first step of a run
/// emits `t = 0`.
///
/// FA moves by `(fi - fa) * rate * dt / 60`. The product is not capped, so an
/// extreme manual CO/VA override or a long step can overshoot FI; only FI and
/// FA themselves are clamped to `[0, 1]`.
pub fn step(
    state: &SimulationState,
    input: &StepInput<'_>,
    constants: &KineticsConstants,
    dt_seconds: u32,
) -> (SimulationState, Sample) {
    let mut next = *state;

    let target = target_fi(input.controls, constants);
    next.fi = (state.fi + (target - state.fi) * constants.fi_gain).clamp(0.0, 1.0);

    let rate = alveolar_rate(
        input.agent,
        input.derived,
        input.controls,
        state.elapsed_seconds,
        constants,
    );
    let coefficient = rate * (dt_seconds as f64 / 60.0);
    next.fa = (state.fa + (next.fi - state.fa) * coefficient).clamp(0.0, 1.0);

    let mac = input.derived.age_adjusted_mac();
    if next.time_to_mac_minutes.is_none() && mac_reached(next.fa, mac, constants) {
        let minutes = state.elapsed_minutes();
        tracing::debug!(
            "FA reached {:.1}% of age-adjusted MAC at {:.2} min",
            constants.mac_threshold * 100.0,
            minutes
        );
        next.time_to_mac_minutes = Some(minutes);
    }

    let sample = Sample {
        time_minutes: state.elapsed_minutes(),
        fi_percent: next.fi * 100.0,
        fa_percent: next.fa * 100.0,
    };
    tracing::trace!(
        t = sample.time_minutes,
        fi = sample.fi_percent,
        fa = sample.fa_percent,
        "step"
    );

    next.elapsed_seconds = state.elapsed_seconds + u64::from(dt_seconds);
    (next, sample)
}
