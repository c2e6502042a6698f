//! `FlowOutputObserver<W>` — bridges `FlowObserver` to an `OutputWriter`.

use log::debug;

use od_data::ZoneIndex;
use od_flow::{FlowQuery, FlowView};
use od_session::FlowObserver;

use crate::row::{FlowLineRow, SummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`FlowObserver`] that writes every view the session produces to any
/// [`OutputWriter`] backend (CSV, GeoJSON, SQLite, …).
///
/// Each `on_view` is one render, numbered from 1.  Errors from the writer are
/// stored internally because observer methods have no return value; check
/// them with [`take_error`][Self::take_error] after closing the session.
pub struct FlowOutputObserver<W: OutputWriter> {
    writer:     W,
    renders:    u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> FlowOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, renders: 0, last_error: None }
    }

    /// Number of renders written (or attempted) so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files afterwards).
    pub fn into_writer(self) -> W {
        self.writer
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

impl<W: OutputWriter> FlowObserver for FlowOutputObserver<W> {
    fn on_view(&mut self, query: &FlowQuery, view: &FlowView, zones: &ZoneIndex) {
        self.renders += 1;
        let render = self.renders;

        let rows = FlowLineRow::from_view(render, view, zones);
        if !rows.is_empty() {
            let result = self.writer.write_lines(&rows);
            self.store_err(result);
        }

        let summary = SummaryRow::new(render, query, view, zones);
        let result = self.writer.write_summary(&summary);
        self.store_err(result);

        debug!("render {render}: wrote {} lines", rows.len());
    }

    fn on_close(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
