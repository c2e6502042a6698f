//! The `OutputWriter` trait implemented by all backend writers.

use crate::{FlowLineRow, OutputResult, SummaryRow};

/// Trait implemented by the CSV, GeoJSON, and SQLite writers.
///
/// Errors are returned here but stored by
/// [`FlowOutputObserver`][crate::FlowOutputObserver], since observer
/// callbacks have no return value.
pub trait OutputWriter {
    /// Write the lines of one render.
    fn write_lines(&mut self, rows: &[FlowLineRow]) -> OutputResult<()>;

    /// Write the summary of one render.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
