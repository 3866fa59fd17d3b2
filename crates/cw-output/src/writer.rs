//! The `OutputWriter` trait implemented by all backend writers.

use crate::{FlowRow, OutputResult, ReportRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface through [`OutputObserver::take_error`] when the writer is
/// driven by a simulation run.
///
/// [`OutputObserver::take_error`]: crate::OutputObserver::take_error
pub trait OutputWriter {
    /// Append a batch of telemetry reports.
    fn write_reports(&mut self, rows: &[ReportRow]) -> OutputResult<()>;

    /// Write the per-flow counters of a finished run.
    fn write_flows(&mut self, rows: &[FlowRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
