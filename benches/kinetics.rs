use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use inhalsol::prelude::*;
use std::hint::black_box;

fn bench_single_step(c: &mut Criterion) {
    let agent = AgentTable::builtin().get("Sevoflurane").unwrap();
    let derived = DerivedParameters::derive(agent, &PatientProfile::default()).unwrap();
    let controls = ControlSettings::new(8.0, 6.0, 50.0);
    let input = StepInput {
        agent,
        controls: &controls,
        derived: &derived,
    };
    let constants = KineticsConstants::default();
    let state = SimulationState::new();

    c.bench_function("kinetics_step", |b| {
        b.iter(|| step(black_box(&state), black_box(&input), &constants, 1));
    });
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_run");
    for minutes in [10u32, 60, 240] {
        group.bench_with_input(BenchmarkId::from_parameter(minutes), &minutes, |b, &m| {
            b.iter(|| {
                let mut sim =
                    Simulation::new(SimulationOptions::default().with_duration_minutes(m))
                        .unwrap();
                black_box(sim.run_to_completion().unwrap());
            });
        });
    }
    group.finish();
}

fn bench_compare_agents(c: &mut Criterion) {
    let options = SimulationOptions::default().with_duration_minutes(30);
    c.bench_function("compare_agents_30min", |b| {
        b.iter(|| {
            black_box(compare_agents(
                PatientProfile::default(),
                options,
                AgentTable::builtin(),
            ))
        });
    });
}

criterion_group!(
    benches,
    bench_single_step,
    bench_full_run,
    bench_compare_agents
);
criterion_main!(benches);
