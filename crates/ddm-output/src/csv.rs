//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trials.csv`
//! - `run_summary.csv`
//!
//! Binary responses are written as `0`/`1`.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use ddm_sim::TrialRow;

use crate::writer::OutputWriter;
use crate::{OutputResult, RunSummary};

/// Writes trial output to two CSV files.
pub struct CsvWriter {
    trials:     Writer<File>,
    summaries:  Writer<File>,
    next_trial: u64,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trials = Writer::from_path(dir.join("trials.csv"))?;
        trials.write_record(["trial", "rt", "speeded_resp", "delayed_resp"])?;

        let mut summaries = Writer::from_path(dir.join("run_summary.csv"))?;
        summaries.write_record([
            "n_trials",
            "mean_rt",
            "min_rt",
            "max_rt",
            "speeded_fraction",
            "delayed_fraction",
        ])?;

        Ok(Self {
            trials,
            summaries,
            next_trial: 0,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trials(&mut self, rows: &[TrialRow]) -> OutputResult<()> {
        for row in rows {
            self.trials.write_record(&[
                self.next_trial.to_string(),
                row.rt.to_string(),
                (row.speeded_resp as u8).to_string(),
                (row.delayed_resp as u8).to_string(),
            ])?;
            self.next_trial += 1;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &RunSummary) -> OutputResult<()> {
        self.summaries.write_record(&[
            summary.n_trials.to_string(),
            summary.mean_rt.to_string(),
            summary.min_rt.to_string(),
            summary.max_rt.to_string(),
            summary.speeded_fraction.to_string(),
            summary.delayed_fraction.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trials.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
