//! GeoJSON zone loader, CSV trip loader, and the combined dataset load.
//!
//! # Zone source
//!
//! A GeoJSON `FeatureCollection`.  Per feature:
//!
//! | Field               | Use                                              |
//! |---------------------|--------------------------------------------------|
//! | `id`                | zone id; string (as is) or number (stringified)  |
//! | `properties.name`   | display name; falls back to the id when falsy    |
//! | `properties.lat`    | centre latitude; number or numeric string        |
//! | `properties.lon`    | centre longitude; number or numeric string       |
//!
//! Features without an id or without finite coordinates are skipped.  A
//! name that is a non-zero number or `true` is stringified; `""`, `0`,
//! `false` and `null` fall back to the id.
//!
//! # Trip source
//!
//! ```csv
//! StartId,EndId,Count,Start Hour,DistanceInKm,Mot
//! 03241001,03241002,12,8,4.7,car
//! 03241002,03241001,3,17,4.7,bike
//! ```
//!
//! Every cell is read as text and coerced.  A blank numeric cell counts as
//! `0`; an absent one (missing column, short row) as `NaN`, which fails
//! validation.  Absent text becomes `""`.  Extra columns are ignored.  Rows
//! the CSV reader cannot decode are skipped with a warning.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use geojson::feature::Id;
use geojson::{Feature, GeoJson};
use log::{debug, info, warn};
use csv::StringRecord;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use od_core::{Bounds, GeoPoint, ZoneId};

use crate::{DataError, DataResult, LoadReport, RawTrip, TripStore, Zone, ZoneIndex, ZoneIndexBuilder};

/// How many undecodable CSV rows are logged individually before going quiet.
const MAX_LOGGED_ROW_ERRORS: usize = 5;

// ── CSV record ────────────────────────────────────────────────────────────────

/// `None` only when the column is absent; a blank cell is `Some("")`.
#[derive(Deserialize)]
struct TripRow {
    #[serde(rename = "StartId", default, deserialize_with = "present")]
    start_id:    Option<String>,
    #[serde(rename = "EndId", default, deserialize_with = "present")]
    end_id:      Option<String>,
    #[serde(rename = "Count", default, deserialize_with = "present")]
    count:       Option<String>,
    #[serde(rename = "Start Hour", default, deserialize_with = "present")]
    start_hour:  Option<String>,
    #[serde(rename = "DistanceInKm", default, deserialize_with = "present")]
    distance_km: Option<String>,
    #[serde(rename = "Mot", default, deserialize_with = "present")]
    mode:        Option<String>,
}

fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    String::deserialize(d).map(Some)
}

impl From<TripRow> for RawTrip {
    fn from(row: TripRow) -> Self {
        RawTrip {
            start_id:    row.start_id.unwrap_or_default(),
            end_id:      row.end_id.unwrap_or_default(),
            count:       coerce_number(row.count.as_deref()),
            hour:        coerce_number(row.start_hour.as_deref()),
            distance_km: coerce_number(row.distance_km.as_deref()),
            mode:        row.mode.unwrap_or_default(),
        }
    }
}

// ── Public API: trips ─────────────────────────────────────────────────────────

/// Read every trip row from a CSV file without validating it.
pub fn read_trips_csv(path: &Path) -> DataResult<(Vec<RawTrip>, LoadReport)> {
    let file = File::open(path)?;
    read_trip_rows(file)
}

/// Like [`read_trips_csv`] but accepts any `Read` source.
///
/// The returned report has `rows_read` and `rows_unreadable` filled in.
/// An I/O failure or undecodable header row is an error; bad data rows are not.
pub fn read_trip_rows<R: Read>(reader: R) -> DataResult<(Vec<RawTrip>, LoadReport)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut report = LoadReport::default();
    let mut rows = Vec::new();

    for result in csv_reader.records() {
        match result.and_then(|record| decode_row(&record, &headers)) {
            Ok(row) => rows.push(RawTrip::from(row)),
            Err(e) => {
                if report.rows_unreadable < MAX_LOGGED_ROW_ERRORS {
                    warn!("skipping unreadable trip row: {e}");
                }
                report.rows_unreadable += 1;
            }
        }
    }

    report.rows_read = rows.len();
    Ok((rows, report))
}

// ── Public API: zones ─────────────────────────────────────────────────────────

/// Load the zone index from a GeoJSON file.
pub fn load_zones_geojson(path: &Path) -> DataResult<(ZoneIndex, LoadReport)> {
    let file = File::open(path)?;
    load_zones_reader(file)
}

/// Like [`load_zones_geojson`] but accepts any `Read` source.
///
/// The returned report has `zones_loaded` and `zones_skipped` filled in.
pub fn load_zones_reader<R: Read>(mut reader: R) -> DataResult<(ZoneIndex, LoadReport)> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let GeoJson::FeatureCollection(collection) = text.parse::<GeoJson>()? else {
        return Err(DataError::NotAFeatureCollection);
    };
    debug!("zone source has {} features", collection.features.len());

    let mut report = LoadReport::default();
    let mut builder = ZoneIndexBuilder::with_capacity(collection.features.len());

    for feature in &collection.features {
        match zone_from_feature(feature) {
            Some(zone) => {
                builder.insert(zone);
            }
            None => report.zones_skipped += 1,
        }
    }

    let zones = builder.build();
    report.zones_loaded = zones.len();
    Ok((zones, report))
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Zone index and trip store loaded together, plus what the load dropped.
pub struct Dataset {
    pub zones:  ZoneIndex,
    pub trips:  TripStore,
    pub report: LoadReport,
}

impl Dataset {
    /// Read the shape file and the trip table concurrently, then validate
    /// trips against the zones.
    ///
    /// Either file failing to load fails the whole dataset; there is no
    /// partially loaded state.
    pub fn load(shapes: &Path, counts: &Path) -> DataResult<Self> {
        let (zones, rows) = rayon::join(
            || load_zones_geojson(shapes),
            || read_trips_csv(counts),
        );
        Ok(Self::assemble(zones?, rows?))
    }

    /// Like [`load`](Self::load) but from in-memory or streamed sources.
    pub fn from_readers<Z, T>(shapes: Z, counts: T) -> DataResult<Self>
    where
        Z: Read + Send,
        T: Read + Send,
    {
        let (zones, rows) = rayon::join(
            || load_zones_reader(shapes),
            || read_trip_rows(counts),
        );
        Ok(Self::assemble(zones?, rows?))
    }

    fn assemble(
        (zones, zone_report): (ZoneIndex, LoadReport),
        (rows, row_report):   (Vec<RawTrip>, LoadReport),
    ) -> Self {
        let mut report = LoadReport {
            zones_loaded:    zone_report.zones_loaded,
            zones_skipped:   zone_report.zones_skipped,
            rows_read:       row_report.rows_read,
            rows_unreadable: row_report.rows_unreadable,
            ..LoadReport::default()
        };
        let trips = TripStore::build(rows, &zones, &mut report);
        info!("loaded {report}");

        Self { zones, trips, report }
    }

    /// Bounding box of the centres of all active zones, for framing the
    /// initial view.  `None` when no trip survived the load; callers fall
    /// back to [`Bounds::FALLBACK_CENTER`].
    pub fn active_bounds(&self) -> Option<Bounds> {
        self.zones.bounds_of(self.trips.active_zones())
    }

    /// Active zones (referenced by at least one trip), in shape-file order.
    /// These are the only polygons worth drawing.
    pub fn active_zones(&self) -> impl Iterator<Item = &Zone> + '_ {
        self.zones
            .iter()
            .filter(|z| self.trips.is_active(z.id.as_str()))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Short rows are read against the matching prefix of the header, so their
/// trailing columns count as absent rather than blank.
fn decode_row(record: &StringRecord, headers: &StringRecord) -> csv::Result<TripRow> {
    if record.len() >= headers.len() {
        return record.deserialize(Some(headers));
    }
    let prefix: StringRecord = headers.iter().take(record.len()).collect();
    record.deserialize(Some(&prefix))
}

fn zone_from_feature(feature: &Feature) -> Option<Zone> {
    let id = match feature.id.as_ref()? {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    };
    if id.is_empty() {
        return None;
    }

    let lat = feature.property("lat").and_then(value_as_f64)?;
    let lon = feature.property("lon").and_then(value_as_f64)?;
    let center = GeoPoint::new(lat, lon);
    if !center.is_finite() {
        return None;
    }

    let name = feature.property("name").and_then(display_name);
    Some(Zone::new(ZoneId::from(id), name.as_deref(), center))
}

/// A usable display name: truthy strings, numbers and `true`.
fn display_name(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|x| x != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}

/// Numeric coercion for GeoJSON property values.
fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Numeric coercion for CSV cells: absent → `NaN`, blank → `0`,
/// unparseable → `NaN`.
fn coerce_number(cell: Option<&str>) -> f64 {
    match cell.map(str::trim) {
        None => f64::NAN,
        Some("") => 0.0,
        Some(s) => s.parse().unwrap_or(f64::NAN),
    }
}
