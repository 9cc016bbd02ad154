//! Inhaled anesthetic uptake example
//!
//! Run with: `cargo run --example uptake [output.csv]`
//!
//! Set `RUST_LOG=debug` for parameter and MAC events.

use inhalsol::export::write_samples_csv;
use inhalsol::prelude::*;
use inhalsol::scheduler::{lock, shared};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    println!("=== inhalsol uptake example ===\n");

    // Adult on sevoflurane, 8 % at 6 L/min with 50 % N₂O, 10 simulated minutes.
    // Ten steps per tick and a 10 ms tick run the whole curve in under a second.
    let options = SimulationOptions::default()
        .with_duration_minutes(10)
        .with_steps_per_tick(10)
        .with_tick_interval_ms(10);
    let mut simulation = Simulation::new(options)?;
    simulation.set_patient(PatientProfile::years(45.0, 82.0))?;
    simulation.set_controls(ControlSettings::new(8.0, 6.0, 50.0))?;
    println!("{}\n", simulation.derived()?);

    let simulation = shared(simulation);
    let scheduler = Scheduler::from_options(&options);
    let exit = scheduler.run(&simulation, &CancelToken::new(), |sim, samples| {
        if let Some(sample) = samples.last() {
            if sim.state().elapsed_seconds % 60 == 0 {
                println!(
                    "t = {:>4.1} min  FI = {:>5.2} %  FA = {:>5.2} %",
                    sample.time_minutes, sample.fi_percent, sample.fa_percent
                );
            }
        }
    })?;
    println!("\nScheduler exit: {:?}", exit);

    let sim = lock(&simulation);
    if let Some(kpis) = sim.kpis() {
        println!("{}\n", kpis);
    }

    if let Some(path) = std::env::args().nth(1) {
        write_samples_csv(sim.trajectory().samples(), std::fs::File::create(&path)?)?;
        println!("Trajectory written to {}\n", path);
    }
    drop(sim);

    println!("--- Agent comparison (default settings, 20 min) ---\n");
    let comparison = compare_agents(
        PatientProfile::years(45.0, 82.0),
        SimulationOptions::default()
            .with_duration_minutes(20)
            .with_tick_interval_ms(0),
        AgentTable::builtin(),
    );
    for report in comparison {
        let report = report?;
        let last = report.trajectory.last().copied();
        println!(
            "{:<12} MAC(age) {:>5.2} %  FA/FI at 20 min {:>4.2}",
            report.agent,
            report.kpis.age_adjusted_mac_percent,
            last.map(|s| s.fa_percent / s.fi_percent).unwrap_or(0.0)
        );
    }

    Ok(())
}
