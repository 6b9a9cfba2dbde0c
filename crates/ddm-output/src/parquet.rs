//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `trials.parquet`
//! - `run_summary.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Float64Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use ddm_sim::TrialRow;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{OutputResult, RunSummary};

fn trial_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("trial",        DataType::UInt64,  false),
        Field::new("rt",           DataType::Float64, false),
        Field::new("speeded_resp", DataType::Boolean, false),
        Field::new("delayed_resp", DataType::Boolean, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("n_trials",         DataType::UInt64,  false),
        Field::new("mean_rt",          DataType::Float64, false),
        Field::new("min_rt",           DataType::Float64, false),
        Field::new("max_rt",           DataType::Float64, false),
        Field::new("speeded_fraction", DataType::Float64, false),
        Field::new("delayed_fraction", DataType::Float64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes trial output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    trials:       Option<ArrowWriter<File>>,
    summaries:    Option<ArrowWriter<File>>,
    trial_schema: Arc<Schema>,
    summ_schema:  Arc<Schema>,
    next_trial:   u64,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let trial_schema = trial_schema();
        let summ_schema = summary_schema();

        let trial_file = File::create(dir.join("trials.parquet"))?;
        let trials = ArrowWriter::try_new(
            trial_file,
            Arc::clone(&trial_schema),
            Some(snappy_props()),
        )?;

        let summ_file = File::create(dir.join("run_summary.parquet"))?;
        let summaries = ArrowWriter::try_new(
            summ_file,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            trials: Some(trials),
            summaries: Some(summaries),
            trial_schema,
            summ_schema,
            next_trial: 0,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_trials(&mut self, rows: &[TrialRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.trials.as_mut() else {
            return Ok(());
        };

        let mut trials  = UInt64Builder::new();
        let mut rts     = Float64Builder::new();
        let mut speeded = BooleanBuilder::new();
        let mut delayed = BooleanBuilder::new();

        for row in rows {
            trials.append_value(self.next_trial);
            self.next_trial += 1;
            rts.append_value(row.rt);
            speeded.append_value(row.speeded_resp);
            delayed.append_value(row.delayed_resp);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.trial_schema),
            vec![
                Arc::new(trials.finish()),
                Arc::new(rts.finish()),
                Arc::new(speeded.finish()),
                Arc::new(delayed.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &RunSummary) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut n_trials = UInt64Builder::new();
        let mut means    = Float64Builder::new();
        let mut mins     = Float64Builder::new();
        let mut maxs     = Float64Builder::new();
        let mut speeded  = Float64Builder::new();
        let mut delayed  = Float64Builder::new();

        n_trials.append_value(summary.n_trials);
        means.append_value(summary.mean_rt);
        mins.append_value(summary.min_rt);
        maxs.append_value(summary.max_rt);
        speeded.append_value(summary.speeded_fraction);
        delayed.append_value(summary.delayed_fraction);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(n_trials.finish()),
                Arc::new(means.finish()),
                Arc::new(mins.finish()),
                Arc::new(maxs.finish()),
                Arc::new(speeded.finish()),
                Arc::new(delayed.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.trials.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
