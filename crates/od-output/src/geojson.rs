//! GeoJSON output backend.
//!
//! Creates `flows.geojson` in the configured output directory: one
//! `LineString` feature per drawn line, coordinates in `[lon, lat]` order.
//! Render summaries go into a top-level `"renders"` array.
//!
//! A GeoJSON document cannot be appended to, so features are buffered and
//! the whole file is written by [`finish`](OutputWriter::finish).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;

use crate::{FlowLineRow, OutputResult, SummaryRow};
use crate::writer::OutputWriter;

/// Writes flow output to a single GeoJSON `FeatureCollection`.
pub struct GeoJsonWriter {
    file:      Option<BufWriter<File>>,
    features:  Vec<Feature>,
    summaries: Vec<JsonValue>,
}

impl GeoJsonWriter {
    /// Create `flows.geojson` in `dir`.  Nothing is written until `finish`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let file = File::create(dir.join("flows.geojson"))?;
        Ok(Self {
            file:      Some(BufWriter::new(file)),
            features:  Vec::new(),
            summaries: Vec::new(),
        })
    }
}

fn line_feature(row: &FlowLineRow) -> Feature {
    let [start, end] = row.path;
    let mut feature = Feature {
        bbox:            None,
        geometry:        Some(Geometry::new(Value::LineString(vec![
            vec![start.lon, start.lat],
            vec![end.lon, end.lat],
        ]))),
        id:              None,
        properties:      None,
        foreign_members: None,
    };
    feature.set_property("render", row.render);
    feature.set_property("channel", row.channel.as_str());
    feature.set_property("rank", row.rank);
    feature.set_property("start_id", row.start_id.as_str());
    feature.set_property("start_name", row.start_name.as_str());
    feature.set_property("end_id", row.end_id.as_str());
    feature.set_property("end_name", row.end_name.as_str());
    feature.set_property("count", row.count);
    feature.set_property("weight", row.weight);
    feature
}

impl OutputWriter for GeoJsonWriter {
    fn write_lines(&mut self, rows: &[FlowLineRow]) -> OutputResult<()> {
        self.features.extend(rows.iter().map(line_feature));
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summaries.push(json!({
            "render":          row.render,
            "scope":           row.scope,
            "selection":       row.selection,
            "outbound_total":  row.outbound_total,
            "inbound_total":   row.inbound_total,
            "connected_zones": row.connected_zones,
            "max_count":       row.max_count,
            "lines":           row.lines,
        }));
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };

        let mut members = JsonObject::new();
        members.insert("renders".to_owned(), JsonValue::Array(std::mem::take(&mut self.summaries)));

        let gj = GeoJson::FeatureCollection(FeatureCollection {
            bbox:            None,
            features:        std::mem::take(&mut self.features),
            foreign_members: Some(members),
        });
        serde_json::to_writer_pretty(&mut file, &gj)?;
        file.flush()?;
        Ok(())
    }
}
