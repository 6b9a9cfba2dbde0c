//! The result table: one row per simulated trial.

// ── TrialRow ──────────────────────────────────────────────────────────────────

/// One completed trial.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialRow {
    /// Reaction time in seconds: non-decision time plus decision time.
    pub rt: f64,

    /// Primary (speeded) response: `true` means the walk was absorbed at the
    /// upper boundary.
    pub speeded_resp: bool,

    /// Secondary (delayed) judgment: `true` means the trial's evidence
    /// exceeded the criterion matching its boundary.
    pub delayed_resp: bool,
}

// ── TrialTable ────────────────────────────────────────────────────────────────

/// All rows of one run.
///
/// Row `i` holds trial `i` regardless of execution strategy; parallel runs
/// write each row from exactly one partition, so the table never depends on
/// thread scheduling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrialTable {
    rows: Vec<TrialRow>,
}

impl TrialTable {
    pub(crate) fn from_rows(rows: Vec<TrialRow>) -> Self {
        Self { rows }
    }

    /// Number of trials in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows in trial order.
    #[inline]
    pub fn rows(&self) -> &[TrialRow] {
        &self.rows
    }

    /// Consume the table, yielding the rows in trial order.
    #[inline]
    pub fn into_rows(self) -> Vec<TrialRow> {
        self.rows
    }

    /// Fraction of trials absorbed at the upper boundary.
    pub fn speeded_fraction(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let hits = self.rows.iter().filter(|r| r.speeded_resp).count();
        hits as f64 / self.rows.len() as f64
    }

    /// Fraction of trials with a positive delayed judgment.
    pub fn delayed_fraction(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let hits = self.rows.iter().filter(|r| r.delayed_resp).count();
        hits as f64 / self.rows.len() as f64
    }

    /// Mean reaction time across all trials.
    pub fn mean_rt(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.rows.iter().map(|r| r.rt).sum::<f64>() / self.rows.len() as f64
    }
}

impl std::ops::Index<usize> for TrialTable {
    type Output = TrialRow;

    #[inline]
    fn index(&self, trial: usize) -> &TrialRow {
        &self.rows[trial]
    }
}

impl<'a> IntoIterator for &'a TrialTable {
    type Item = &'a TrialRow;
    type IntoIter = std::slice::Iter<'a, TrialRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
