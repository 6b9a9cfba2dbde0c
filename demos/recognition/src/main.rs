//! recognition — demo run of the ddm trial simulator.
//!
//! Simulates a recognition-memory experiment: a speeded old/new decision
//! (the diffusion walk) followed by a delayed source judgment (the
//! signal-detection stage) for two item conditions, targets and lures.
//! Writes one CSV table per condition plus a `params.json` sidecar so a
//! run can be reproduced exactly.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde_json::json;

use ddm_core::{DiffusionParams, set_seed};
use ddm_output::{CsvWriter, RunSummary, write_run};
use ddm_sim::{SimOptions, Simulation};

// ── Constants ─────────────────────────────────────────────────────────────────

const TRIALS_PER_CONDITION: usize = 100_000;
const SEED:                 u64   = 42;
const OUT_DIR:              &str  = "output/recognition";

// ── Conditions ────────────────────────────────────────────────────────────────

/// Targets: studied items, strong positive drift toward "old".
fn target_params() -> DiffusionParams {
    DiffusionParams {
        a:   1.0,
        v:   1.2,
        t0:  0.3,
        z:   0.5,
        sv:  0.8,
        st0: 0.05,
        ..Default::default()
    }
}

/// Lures: unstudied items, drift toward "new".
fn lure_params() -> DiffusionParams {
    DiffusionParams {
        a:   1.0,
        v:   -1.0,
        t0:  0.3,
        z:   0.5,
        sv:  0.8,
        st0: 0.05,
        ..Default::default()
    }
}

// ── Per-condition run ─────────────────────────────────────────────────────────

fn run_condition(name: &str, params: DiffusionParams) -> Result<(RunSummary, f64, usize)> {
    let sim = Simulation::new(params, SimOptions::default())?;
    let workers = sim.effective_workers();

    let t0 = Instant::now();
    let table = sim.run(TRIALS_PER_CONDITION)?;
    let elapsed = t0.elapsed().as_secs_f64();

    let dir = format!("{OUT_DIR}/{name}");
    fs::create_dir_all(&dir)?;
    let mut writer = CsvWriter::new(Path::new(&dir))?;
    let summary = write_run(&mut writer, &table)?;

    let sidecar = json!({
        "condition": name,
        "n_trials":  TRIALS_PER_CONDITION,
        "seed":      SEED,
        "dt":        sim.options().dt,
        "workers":   workers,
        "params":    serde_json::to_value(sim.params())?,
    });
    fs::write(
        format!("{dir}/params.json"),
        serde_json::to_string_pretty(&sidecar)?,
    )?;

    Ok((summary, elapsed, workers))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== recognition — ddm trial simulator ===");
    println!("Trials per condition: {TRIALS_PER_CONDITION}  |  Seed: {SEED}");
    println!();

    set_seed(SEED);

    let conditions = [("targets", target_params()), ("lures", lure_params())];

    println!(
        "{:<10} {:>9} {:>9} {:>9} {:>10} {:>10} {:>9}",
        "Condition", "Trials", "MeanRT", "MinRT", "Speeded%", "Delayed%", "Time(s)"
    );
    println!("{}", "-".repeat(72));

    let mut workers = 0;
    for (name, params) in conditions {
        let (summary, elapsed, w) = run_condition(name, params)?;
        workers = w;
        println!(
            "{:<10} {:>9} {:>9.3} {:>9.3} {:>10.1} {:>10.1} {:>9.3}",
            name,
            summary.n_trials,
            summary.mean_rt,
            summary.min_rt,
            summary.speeded_fraction * 100.0,
            summary.delayed_fraction * 100.0,
            elapsed,
        );
    }

    println!();
    println!("Workers: {workers}  |  Output: {OUT_DIR}/<condition>/");
    println!("  trials.csv, run_summary.csv, params.json per condition");

    Ok(())
}
