//! `OutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use cw_core::{DeviceId, SimTime};
use cw_flow::FlowSnapshot;
use cw_sim::SimObserver;
use cw_telemetry::Report;

use crate::row::{FlowRow, ReportRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Report rows buffered before each `write_reports` call.
const REPORT_BATCH: usize = 1_024;

/// A [`SimObserver`] that writes the telemetry trace and the final flow table
/// to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct OutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<ReportRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> OutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::with_capacity(REPORT_BATCH), last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_reports(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_reports(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for OutputObserver<W> {
    fn on_report(&mut self, _time: SimTime, _device: DeviceId, report: &Report) {
        self.pending.push(ReportRow::from_report(report));
        if self.pending.len() >= REPORT_BATCH {
            self.flush_reports();
        }
    }

    fn on_sim_end(&mut self, _stop: SimTime, flows: &FlowSnapshot) {
        self.flush_reports();
        let rows: Vec<FlowRow> = flows.iter().map(FlowRow::from_entry).collect();
        let result = self.writer.write_flows(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
