//! `ddm-output` — trial-table writers for the ddm simulator.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                             |
//! |-----------|---------|-------------------------------------------|
//! | *(none)*  | CSV     | `trials.csv`, `run_summary.csv`           |
//! | `parquet` | Parquet | `trials.parquet`, `run_summary.parquet`   |
//!
//! Both backends implement [`OutputWriter`]; [`write_run`] drives any of
//! them over a finished table in one call.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ddm_output::{CsvWriter, write_run};
//!
//! let table = sim.run(10_000)?;
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! let summary = write_run(&mut writer, &table)?;
//! println!("mean rt {:.3}", summary.mean_rt);
//! ```

pub mod csv;
pub mod error;
pub mod summary;
pub mod writer;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use summary::RunSummary;
pub use writer::{OutputWriter, write_run};

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
