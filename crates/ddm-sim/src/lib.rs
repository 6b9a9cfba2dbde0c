//! `ddm-sim` — the trial pipeline for the ddm simulator.
//!
//! # Per-trial pipeline
//!
//! ```text
//! for trial in 0..n_trials:
//!   ① Sample    — draw this trial's drift rate, absolute starting point,
//!                 and non-decision time from the normalized distributions.
//!   ② Integrate — random-walk the evidence from the starting point in
//!                 dt-sized steps until it crosses 0 or `a`.
//!   ③ Classify  — speeded response from the boundary hit; delayed response
//!                 from the drift rate against the matching criterion.
//!   ④ Record    — rt = ndt + steps * dt, plus the two binary responses.
//! ```
//!
//! Runs are serial by default.  With the `parallel` feature the trial range
//! is split into contiguous partitions, each owning an independent RNG
//! stream derived from the run seed, so a run is bit-reproducible for a
//! fixed seed and worker count no matter how Rayon schedules the chunks.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Adds `Simulation::run_parallel`; `run` uses it when the   |
//! |            | effective worker count exceeds 1.                         |
//! | `serde`    | Adds serde derives to options and rows.                   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ddm_core::DiffusionParams;
//! use ddm_sim::{SimOptions, Simulation};
//!
//! let params = DiffusionParams { v: 1.2, ..Default::default() };
//! let sim = Simulation::new(params, SimOptions::default())?;
//! let table = sim.run(10_000)?;
//! println!("mean rt = {}", table.rows().iter().map(|r| r.rt).sum::<f64>()
//!     / table.len() as f64);
//! ```

pub mod dists;
pub mod engine;
pub mod error;
pub mod sdt;
pub mod table;
pub mod walk;

#[cfg(test)]
mod tests;

pub use dists::{TrialDists, TrialDraw};
pub use engine::{DEFAULT_DT, SimOptions, Simulation, simulate};
pub use error::{SimError, SimResult};
pub use sdt::delayed_response;
pub use table::{TrialRow, TrialTable};
pub use walk::{Boundary, RandomWalk, WalkOutcome, WalkState};
