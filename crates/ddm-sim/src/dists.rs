//! Normalized per-trial distributions.
//!
//! # Design
//!
//! `TrialDists::new` runs all parameter checks, then folds the raw
//! parameters into three sampling distributions (drift rate, absolute
//! starting point, non-decision time) plus the per-step noise scale.  A
//! variability parameter that is not strictly positive collapses its
//! distribution to an explicit [`Sampler::Point`], as does one too small to
//! separate the uniform bounds at f64 precision.  Degenerate runs never
//! construct an empty sampling range; they skip the draw entirely.
//!
//! The draw order inside [`TrialDists::sample_trial`] (drift, start, ndt)
//! is part of the reproducibility contract: reordering it would change
//! every table produced from a given seed.

use ddm_core::{DiffusionParams, ParamError, TrialRng};

use crate::SimResult;

// ── Sampler ───────────────────────────────────────────────────────────────────

/// One per-trial sampling distribution, degenerate or not.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Sampler {
    /// Every trial receives the same value.
    Point(f64),
    /// Normal with the given mean and standard deviation.
    Normal { mean: f64, sd: f64 },
    /// Uniform on `[lo, hi)`.  Only constructed with `lo < hi`.
    Uniform { lo: f64, hi: f64 },
}

impl Sampler {
    /// Uniform on `[lo, hi)` when the interval is non-empty at f64
    /// precision, else a point mass at `fallback`.  A variability small
    /// enough to round the bounds together must not reach `gen_range`,
    /// which rejects empty ranges.
    fn uniform_or_point(lo: f64, hi: f64, fallback: f64) -> Self {
        if lo < hi {
            Sampler::Uniform { lo, hi }
        } else {
            Sampler::Point(fallback)
        }
    }

    #[inline]
    fn draw(&self, rng: &mut TrialRng) -> f64 {
        match *self {
            Sampler::Point(value) => value,
            Sampler::Normal { mean, sd } => mean + sd * rng.standard_normal(),
            Sampler::Uniform { lo, hi } => rng.gen_range(lo..hi),
        }
    }
}

// ── TrialDraw ─────────────────────────────────────────────────────────────────

/// The sampled quantities for a single trial.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrialDraw {
    /// This trial's drift rate, which doubles as the evidence value the
    /// delayed judgment is made from.
    pub evidence: f64,
    /// Evidence scaled to one integration step: `evidence * dt`.
    pub drift_per_step: f64,
    /// Absolute starting position of the walk.
    pub start: f64,
    /// Non-decision time added to the decision time.
    pub ndt: f64,
}

// ── TrialDists ────────────────────────────────────────────────────────────────

/// Validated, normalized distributions for one run.
///
/// Built once per run; sampling borrows a partition's RNG stream and never
/// mutates the dists themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialDists {
    pub(crate) drift: Sampler,
    pub(crate) start: Sampler,
    pub(crate) ndt:   Sampler,
    /// Integration timestep in seconds.
    dt: f64,
    /// Per-step noise standard deviation, `s * sqrt(dt)`.
    noise_sd: f64,
}

impl TrialDists {
    /// Validate `params` and `dt`, then normalize.
    ///
    /// Fails before any sampling; a run constructed from the result can no
    /// longer hit a parameter error.
    pub fn new(params: &DiffusionParams, dt: f64) -> SimResult<Self> {
        params.validate()?;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ParamError::InvalidTimestep(dt).into());
        }

        let drift = if params.sv > 0.0 {
            Sampler::Normal {
                mean: params.v,
                sd:   params.sv,
            }
        } else {
            Sampler::Point(params.v)
        };

        let mid = params.start_point();
        let start = if params.sz > 0.0 {
            Sampler::uniform_or_point(mid - 0.5 * params.sz, mid + 0.5 * params.sz, mid)
        } else {
            Sampler::Point(mid)
        };

        let ndt = if params.st0 > 0.0 {
            Sampler::uniform_or_point(params.t0, params.t0 + params.st0, params.t0)
        } else {
            Sampler::Point(params.t0)
        };

        Ok(Self {
            drift,
            start,
            ndt,
            dt,
            noise_sd: params.s * dt.sqrt(),
        })
    }

    /// Draw one trial's quantities, in the fixed order drift → start → ndt.
    pub fn sample_trial(&self, rng: &mut TrialRng) -> TrialDraw {
        let evidence = self.drift.draw(rng);
        let start = self.start.draw(rng);
        let ndt = self.ndt.draw(rng);
        TrialDraw {
            evidence,
            drift_per_step: evidence * self.dt,
            start,
            ndt,
        }
    }

    /// Integration timestep in seconds.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Per-step noise standard deviation.
    #[inline]
    pub fn noise_sd(&self) -> f64 {
        self.noise_sd
    }
}
