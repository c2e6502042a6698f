//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `flow_lines.csv`
//! - `flow_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{FlowLineRow, OutputResult, SummaryRow};
use crate::writer::OutputWriter;

/// Writes flow output to two CSV files.
pub struct CsvWriter {
    lines:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut lines = Writer::from_path(dir.join("flow_lines.csv"))?;
        lines.write_record([
            "render", "channel", "rank",
            "start_id", "start_name", "end_id", "end_name",
            "count", "weight",
            "start_lat", "start_lon", "end_lat", "end_lon",
        ])?;

        let mut summaries = Writer::from_path(dir.join("flow_summary.csv"))?;
        summaries.write_record([
            "render", "scope", "selection",
            "outbound_total", "inbound_total", "connected_zones", "max_count", "lines",
        ])?;

        Ok(Self { lines, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_lines(&mut self, rows: &[FlowLineRow]) -> OutputResult<()> {
        for row in rows {
            let [start, end] = row.path;
            self.lines.write_record(&[
                row.render.to_string(),
                row.channel.to_string(),
                row.rank.to_string(),
                row.start_id.clone(),
                row.start_name.clone(),
                row.end_id.clone(),
                row.end_name.clone(),
                row.count.to_string(),
                row.weight.to_string(),
                start.lat.to_string(),
                start.lon.to_string(),
                end.lat.to_string(),
                end.lon.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.render.to_string(),
            row.scope.to_owned(),
            row.selection.clone(),
            row.outbound_total.to_string(),
            row.inbound_total.to_string(),
            row.connected_zones.to_string(),
            row.max_count.to_string(),
            row.lines.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.lines.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
