//! Diffusion-model parameters.
//!
//! # Design
//!
//! One immutable parameter set describes a whole run.  Evidence accumulates
//! from an absolute starting point `z * a` toward the boundaries at `0` and
//! `a`; the decision time is the number of steps to absorption times the
//! integration timestep, and the reported reaction time adds a non-decision
//! component on top.  Trial-to-trial variability parameters (`sz`, `sv`,
//! `st0`) widen the per-trial draws; any of them set to zero collapses the
//! corresponding draw to a constant.
//!
//! The two signal-detection criteria ride along here because the delayed
//! judgment is made from the same evidence value the walk used — they are
//! model parameters, not output options.

use crate::error::{ParamError, ParamResult};

/// Default signal-detection criteria: a lax criterion for upper-boundary
/// trials and a strict one for lower-boundary trials.
pub const DEFAULT_CRITERIA: [f64; 2] = [-0.5, 5.0];

// ── DiffusionParams ───────────────────────────────────────────────────────────

/// The full parameter set for one simulated run.
///
/// Construct with struct-update syntax from `Default::default()` and call
/// [`DiffusionParams::validate`] (the simulation engine does this for you)
/// before sampling anything.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffusionParams {
    /// Boundary separation.  The lower boundary sits at 0, the upper at `a`.
    pub a: f64,

    /// Mean drift rate.  Positive drift pushes toward the upper boundary.
    pub v: f64,

    /// Non-decision time in seconds (encoding + motor), added to every RT.
    pub t0: f64,

    /// Relative starting point in (0, 1).  0.5 is unbiased; the absolute
    /// starting position is `z * a`.
    pub z: f64,

    /// Starting-point variability: trial start is uniform on
    /// `[z*a - sz/2, z*a + sz/2]`.  Zero disables the jitter.
    pub sz: f64,

    /// Drift variability: trial drift is normal with mean `v` and sd `sv`.
    /// Zero disables the jitter.
    pub sv: f64,

    /// Non-decision-time variability: trial NDT is uniform on
    /// `[t0, t0 + st0]`.  Zero disables the jitter.
    pub st0: f64,

    /// Diffusion coefficient (within-trial noise scale).  Conventionally 1.
    pub s: f64,

    /// Signal-detection criteria for the delayed judgment:
    /// `crit[0]` applies to upper-boundary trials, `crit[1]` to lower.
    pub crit: [f64; 2],
}

impl Default for DiffusionParams {
    fn default() -> Self {
        Self {
            a: 1.0,
            v: 0.5,
            t0: 0.3,
            z: 0.5,
            sz: 0.0,
            sv: 0.0,
            st0: 0.0,
            s: 1.0,
            crit: DEFAULT_CRITERIA,
        }
    }
}

impl DiffusionParams {
    /// Check every structural constraint.  Called by the engine before any
    /// sampling; a failed run produces no rows.
    ///
    /// Variability parameters are deliberately not checked: a non-positive
    /// `sz`/`sv`/`st0` means "no jitter", not an invalid model.
    pub fn validate(&self) -> ParamResult<()> {
        if !self.a.is_finite() || self.a <= 0.0 {
            return Err(ParamError::NonPositiveBoundary(self.a));
        }
        if !self.s.is_finite() || self.s <= 0.0 {
            return Err(ParamError::NonPositiveDiffusion(self.s));
        }
        if !self.z.is_finite() || self.z <= 0.0 || self.z >= 1.0 {
            return Err(ParamError::StartOutOfRange(self.z));
        }
        if !self.t0.is_finite() || self.t0 < 0.0 {
            return Err(ParamError::NegativeNonDecision(self.t0));
        }
        Ok(())
    }

    /// Absolute mean starting position, `z * a`.
    #[inline]
    pub fn start_point(&self) -> f64 {
        self.z * self.a
    }
}
