//! `cw-output` — simulation output writers for the CloudWaste simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                 |
//! |-----------|---------|-------------------------------|
//! | *(none)*  | CSV     | `reports.csv`, `flows.csv`    |
//! | `sqlite`  | SQLite  | `output.db`                   |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`OutputObserver`], which implements `cw_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cw_output::{CsvWriter, OutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = OutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::OutputObserver;
pub use row::{FlowRow, ReportRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
