//! Per-run summary statistics.

use ddm_sim::TrialTable;

/// Aggregate statistics over one finished run.
///
/// The single-row analog of the trial table: enough to sanity-check a run
/// without loading every trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub n_trials: u64,
    pub mean_rt:  f64,
    pub min_rt:   f64,
    pub max_rt:   f64,
    /// Fraction of trials absorbed at the upper boundary.
    pub speeded_fraction: f64,
    /// Fraction of trials with a positive delayed judgment.
    pub delayed_fraction: f64,
}

impl RunSummary {
    /// Summarize a finished table.  An empty table yields all-zero stats.
    pub fn from_table(table: &TrialTable) -> Self {
        let (min_rt, max_rt) = table.rows().iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), row| (lo.min(row.rt), hi.max(row.rt)),
        );
        if table.is_empty() {
            return Self {
                n_trials: 0,
                mean_rt:  0.0,
                min_rt:   0.0,
                max_rt:   0.0,
                speeded_fraction: 0.0,
                delayed_fraction: 0.0,
            };
        }
        Self {
            n_trials: table.len() as u64,
            mean_rt:  table.mean_rt(),
            min_rt,
            max_rt,
            speeded_fraction: table.speeded_fraction(),
            delayed_fraction: table.delayed_fraction(),
        }
    }
}
