use approx::assert_relative_eq;
use inhalsol::prelude::*;

const REL_TOL: f64 = 1e-12;

fn reference_session(n2o: f64) -> Simulation {
    let mut sim = Simulation::new(SimulationOptions::default().with_duration_minutes(10))
        .expect("default session");
    sim.select_agent("Sevoflurane").expect("built-in agent");
    sim.set_patient(PatientProfile::years(30.0, 70.0))
        .expect("valid patient");
    sim.set_controls(ControlSettings::new(2.0, 2.0, n2o))
        .expect("controls in range");
    sim
}

#[test]
fn reference_adult_on_sevoflurane() {
    let mut sim = reference_session(0.0);
    let derived = *sim.derived().expect("derived parameters");
    assert_relative_eq!(
        derived.age_adjusted_mac(),
        2.0 * 10f64.powf(-0.00269 * (30.0 - 40.0)),
        max_relative = REL_TOL
    );
    assert_relative_eq!(derived.cardiac_output(), 4.9, max_relative = REL_TOL);
    assert_relative_eq!(derived.alveolar_ventilation(), 4.2, max_relative = REL_TOL);

    sim.start().unwrap();
    let first = sim.tick().to_vec();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].time_minutes, 0.0);
    assert_relative_eq!(sim.state().fi, 0.02 * (2.0 / 5.0) * 0.1, max_relative = REL_TOL);

    let kpis = sim.run_to_completion().unwrap();
    assert_eq!(sim.trajectory().len(), 600);
    assert_eq!(sim.state().elapsed_seconds, 600);
    // 2 % dialled at 2 L/min only reaches 0.8 % inspired, well below MAC.
    assert_eq!(kpis.time_to_mac_minutes, None);
    assert!(kpis.fa_final_percent < 0.8);
    assert!(kpis.fa_final_percent > 0.7);

    let last = sim.trajectory().last().unwrap();
    assert_relative_eq!(last.time_minutes, 599.0 / 60.0, max_relative = REL_TOL);
}

#[test]
fn nitrous_oxide_speeds_up_the_first_two_minutes() {
    let mut plain = reference_session(0.0);
    let mut with_n2o = reference_session(50.0);
    plain.start().unwrap();
    with_n2o.start().unwrap();

    plain.tick();
    with_n2o.tick();
    assert!(with_n2o.state().fa > plain.state().fa);
    assert_eq!(with_n2o.state().fi, plain.state().fi);

    let plain_kpis = plain.run_to_completion().unwrap();
    let n2o_kpis = with_n2o.run_to_completion().unwrap();
    assert!(n2o_kpis.fa_final_percent >= plain_kpis.fa_final_percent);
}

#[test]
fn time_to_mac_is_reported_for_high_settings() {
    let mut sim = Simulation::new(SimulationOptions::default().with_duration_minutes(15)).unwrap();
    sim.set_controls(ControlSettings::new(8.0, 6.0, 0.0)).unwrap();
    let kpis = sim.run_to_completion().unwrap();

    let t = kpis.time_to_mac_minutes.expect("MAC reached with 8 % at 6 L/min");
    let mac = kpis.age_adjusted_mac_percent;
    let index = (t * 60.0).round() as usize;
    let samples = sim.trajectory().samples();
    assert!(samples[index].fa_percent / mac >= 0.9945);
    assert!(samples[index - 1].fa_percent / mac < 0.9955);
}

#[test]
fn infant_derivation_from_months() {
    let mut sim = Simulation::new(SimulationOptions::default()).unwrap();
    sim.select_agent("desflurane").unwrap();
    sim.set_patient(PatientProfile::months(6.0, 5.0)).unwrap();
    let derived = sim.derived().unwrap();
    assert_eq!(derived.age_adjusted_mac(), 9.0);
    assert_relative_eq!(derived.cardiac_output(), 0.6, max_relative = REL_TOL);
    assert_relative_eq!(derived.alveolar_ventilation(), 0.4, max_relative = REL_TOL);
}

#[test]
fn reset_restores_defaults() {
    let mut sim = reference_session(50.0);
    sim.select_agent("Isoflurane").unwrap();
    sim.run_to_completion().unwrap();

    sim.reset().unwrap();
    let first = (*sim.state(), *sim.controls(), *sim.patient(), *sim.derived().unwrap());
    sim.reset().unwrap();
    let second = (*sim.state(), *sim.controls(), *sim.patient(), *sim.derived().unwrap());
    assert_eq!(first, second);
    assert_eq!(sim.agent().name(), DEFAULT_AGENT);
    assert_eq!(sim.controls(), &ControlSettings::new(2.0, 2.0, 0.0));
    assert_eq!(sim.patient(), &PatientProfile::years(30.0, 70.0));
    assert_eq!(sim.state(), &SimulationState::new());
    assert_eq!(sim.status(), RunStatus::Idle);
}

#[test]
fn pure_step_is_deterministic() {
    let agent = AgentTable::builtin().get("Halothane").unwrap();
    let derived = DerivedParameters::derive(agent, &PatientProfile::years(8.0, 25.0)).unwrap();
    let controls = ControlSettings::new(3.0, 1.0, 70.0);
    let input = StepInput {
        agent,
        controls: &controls,
        derived: &derived,
    };
    let constants = KineticsConstants::default();

    let state = SimulationState::new();
    let (a, sample_a) = step(&state, &input, &constants, 1);
    let (b, sample_b) = step(&state, &input, &constants, 1);
    assert_eq!(a, b);
    assert_eq!(sample_a, sample_b);
    assert_eq!(state, SimulationState::new());
}
