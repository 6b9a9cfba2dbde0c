//! First-passage random walk between two absorbing boundaries.

use ddm_core::TrialRng;

// ── States ────────────────────────────────────────────────────────────────────

/// Which boundary absorbed the walk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Position reached `a` or above.
    Upper,
    /// Position reached 0 or below.
    Lower,
}

/// Walk status between steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WalkState {
    /// Strictly inside `(0, a)`.
    Running,
    Absorbed(Boundary),
}

/// A finished walk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Steps taken until absorption.  Zero when the walk was absorbed
    /// before its first step.
    pub steps: u64,
    pub boundary: Boundary,
}

// ── RandomWalk ────────────────────────────────────────────────────────────────

/// Evidence accumulator for one trial.
///
/// Each step adds the per-step drift plus Gaussian noise:
///
///   position += drift_per_step + noise_sd * N(0, 1)
///
/// and the walk ends when the position leaves the open interval `(0, upper)`.
/// There is no step cap: with drift and noise both near zero, absorption can
/// take arbitrarily long.  Parameter validation keeps the noise scale
/// strictly positive, which makes eventual absorption almost sure, but
/// pathological scales remain the caller's responsibility.
#[derive(Clone, Debug)]
pub struct RandomWalk {
    position: f64,
    upper:    f64,
    drift_per_step: f64,
    noise_sd: f64,
    steps: u64,
}

impl RandomWalk {
    /// Start a walk at `start` between absorbing boundaries 0 and `upper`.
    pub fn new(start: f64, upper: f64, drift_per_step: f64, noise_sd: f64) -> Self {
        Self {
            position: start,
            upper,
            drift_per_step,
            noise_sd,
            steps: 0,
        }
    }

    /// Current state, derived from the position.
    ///
    /// Running only while strictly inside `(0, upper)`; any other position
    /// is absorbed, a non-finite one included.  Boundary identity comes
    /// from the terminal `position >= upper` test, so a NaN position
    /// reports `Lower` and the walk still terminates when arithmetic
    /// poisons it.
    #[inline]
    pub fn state(&self) -> WalkState {
        if self.position > 0.0 && self.position < self.upper {
            WalkState::Running
        } else if self.position >= self.upper {
            WalkState::Absorbed(Boundary::Upper)
        } else {
            WalkState::Absorbed(Boundary::Lower)
        }
    }

    /// Advance one step and return the new state.
    ///
    /// Stepping an already-absorbed walk is allowed but pointless; `run`
    /// never does it.
    #[inline]
    pub fn step(&mut self, rng: &mut TrialRng) -> WalkState {
        self.position += self.drift_per_step + self.noise_sd * rng.standard_normal();
        self.steps += 1;
        self.state()
    }

    /// Step until absorption.
    pub fn run(mut self, rng: &mut TrialRng) -> WalkOutcome {
        loop {
            if let WalkState::Absorbed(boundary) = self.state() {
                return WalkOutcome {
                    steps: self.steps,
                    boundary,
                };
            }
            self.step(rng);
        }
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
