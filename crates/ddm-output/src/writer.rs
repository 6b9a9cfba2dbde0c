//! The `OutputWriter` trait implemented by all backend writers.

use ddm_sim::{TrialRow, TrialTable};

use crate::{OutputResult, RunSummary};

/// Trait implemented by the CSV and Parquet writers.
///
/// Writers number trials themselves: consecutive `write_trials` calls
/// continue the trial index where the previous batch stopped, so a table
/// can be streamed out in chunks without the caller tracking offsets.
pub trait OutputWriter {
    /// Write a batch of trial rows in trial order.
    fn write_trials(&mut self, rows: &[TrialRow]) -> OutputResult<()>;

    /// Write the run summary row.
    fn write_summary(&mut self, summary: &RunSummary) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write a finished table and its summary through `writer`, then finish.
///
/// Returns the summary so callers can report it without recomputing.
pub fn write_run<W: OutputWriter>(writer: &mut W, table: &TrialTable) -> OutputResult<RunSummary> {
    let summary = RunSummary::from_table(table);
    writer.write_trials(table.rows())?;
    writer.write_summary(&summary)?;
    writer.finish()?;
    Ok(summary)
}
