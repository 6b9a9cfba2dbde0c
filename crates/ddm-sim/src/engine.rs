//! The `Simulation` runner: serial and partitioned-parallel execution.

use ddm_core::{DiffusionParams, TrialRng, global_seed};

use crate::dists::TrialDists;
use crate::sdt::delayed_response;
use crate::table::{TrialRow, TrialTable};
use crate::walk::{Boundary, RandomWalk};
use crate::{SimError, SimResult};

/// Default integration timestep in seconds.
pub const DEFAULT_DT: f64 = 0.001;

// ── SimOptions ────────────────────────────────────────────────────────────────

/// Run settings orthogonal to the model parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimOptions {
    /// Integration timestep in seconds.  Must be positive and finite.
    pub dt: f64,

    /// Partition count for parallel runs.  `None` uses all logical cores;
    /// `Some(0)` is treated as a request for a safe default and falls back
    /// to a single worker instead of failing the run.
    pub workers: Option<usize>,

    /// Run seed override.  `None` reads the process-wide seed (see
    /// [`ddm_core::set_seed`]) when the run starts.
    pub seed: Option<u64>,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt:      DEFAULT_DT,
            workers: None,
            seed:    None,
        }
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// A validated, ready-to-run simulation.
///
/// Construction validates the parameters and normalizes them into sampling
/// distributions exactly once; `run` can then be called any number of times
/// and, with an unchanged seed, reproduces the same table each time.
///
/// Row `i` of the output always holds trial `i`.  Parallel runs split the
/// trial range into contiguous chunks; chunk `p` draws from its own stream
/// derived from the run seed and partition index `p`, and writes only its
/// own rows, so the result is independent of thread scheduling.
pub struct Simulation {
    params:  DiffusionParams,
    dists:   TrialDists,
    options: SimOptions,
}

impl Simulation {
    // ── Public API ────────────────────────────────────────────────────────

    /// Validate `params` and `options` and normalize the distributions.
    pub fn new(params: DiffusionParams, options: SimOptions) -> SimResult<Self> {
        let dists = TrialDists::new(&params, options.dt)?;
        Ok(Self {
            params,
            dists,
            options,
        })
    }

    /// Run `n_trials` trials with the configured strategy.
    ///
    /// Dispatches to [`Self::run_parallel`] when the crate was built with
    /// the `parallel` feature and the effective worker count exceeds 1;
    /// otherwise runs serially.  Blocks until every trial is finished.
    pub fn run(&self, n_trials: usize) -> SimResult<TrialTable> {
        #[cfg(feature = "parallel")]
        {
            if self.effective_workers() > 1 {
                return self.run_parallel(n_trials);
            }
        }
        self.run_serial(n_trials)
    }

    /// Run every trial on the calling thread, in index order, drawing from
    /// partition stream 0.
    pub fn run_serial(&self, n_trials: usize) -> SimResult<TrialTable> {
        if n_trials == 0 {
            return Err(SimError::EmptyRun);
        }
        let mut rows = vec![TrialRow::default(); n_trials];
        let mut rng = TrialRng::new(self.run_seed(), 0);
        self.fill_partition(&mut rows, &mut rng);
        Ok(TrialTable::from_rows(rows))
    }

    /// Run trials across `effective_workers()` contiguous partitions on
    /// Rayon's thread pool.
    ///
    /// Partition `p` covers rows `[p * chunk, (p + 1) * chunk)` and owns the
    /// stream derived from `(seed, p)`, so the draws depend on the partition
    /// layout, never on which OS thread executes a chunk.  A single
    /// partition covering everything is exactly a serial run.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&self, n_trials: usize) -> SimResult<TrialTable> {
        use rayon::prelude::*;

        if n_trials == 0 {
            return Err(SimError::EmptyRun);
        }
        let workers = self.effective_workers();
        if workers <= 1 {
            return self.run_serial(n_trials);
        }

        let seed = self.run_seed();
        let chunk = n_trials.div_ceil(workers);
        let mut rows = vec![TrialRow::default(); n_trials];
        rows.par_chunks_mut(chunk)
            .enumerate()
            .for_each(|(partition, chunk_rows)| {
                let mut rng = TrialRng::new(seed, partition);
                self.fill_partition(chunk_rows, &mut rng);
            });
        Ok(TrialTable::from_rows(rows))
    }

    /// Worker count after applying defaults and the zero-override fallback.
    pub fn effective_workers(&self) -> usize {
        let requested = match self.options.workers {
            Some(w) => w,
            None    => default_workers(),
        };
        requested.max(1)
    }

    /// The model parameters this run was built from.
    #[inline]
    pub fn params(&self) -> &DiffusionParams {
        &self.params
    }

    /// The run settings this run was built from.
    #[inline]
    pub fn options(&self) -> &SimOptions {
        &self.options
    }

    // ── Trial execution ───────────────────────────────────────────────────

    /// Seed for this run: the explicit override, or the process-wide seed
    /// read at call time.
    fn run_seed(&self) -> u64 {
        self.options.seed.unwrap_or_else(global_seed)
    }

    /// Fill one partition's rows in index order from its stream.
    fn fill_partition(&self, rows: &mut [TrialRow], rng: &mut TrialRng) {
        for row in rows {
            *row = self.run_trial(rng);
        }
    }

    /// Sample → integrate → classify one trial.
    fn run_trial(&self, rng: &mut TrialRng) -> TrialRow {
        let draw = self.dists.sample_trial(rng);
        let walk = RandomWalk::new(
            draw.start,
            self.params.a,
            draw.drift_per_step,
            self.dists.noise_sd(),
        );
        let outcome = walk.run(rng);
        TrialRow {
            rt:           draw.ndt + outcome.steps as f64 * self.dists.dt(),
            speeded_resp: outcome.boundary == Boundary::Upper,
            delayed_resp: delayed_response(outcome.boundary, draw.evidence, self.params.crit),
        }
    }
}

#[cfg(feature = "parallel")]
fn default_workers() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
fn default_workers() -> usize {
    1
}

// ── Convenience entry point ───────────────────────────────────────────────────

/// Simulate `n_trials` trials with default run settings.
///
/// Equivalent to building a [`Simulation`] with [`SimOptions::default`] and
/// calling [`Simulation::run`] once.
pub fn simulate(params: &DiffusionParams, n_trials: usize) -> SimResult<TrialTable> {
    Simulation::new(params.clone(), SimOptions::default())?.run(n_trials)
}
