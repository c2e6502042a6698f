//! Trip records and the trip store.
//!
//! A [`RawTrip`] is one CSV row after type coercion, before validation.
//! [`TripStore::build`] validates each raw row against the zone index and
//! keeps only rows that satisfy every record invariant:
//!
//! | Field         | Accepted                                            |
//! |---------------|-----------------------------------------------------|
//! | `start_id`    | non-empty, present in the zone index                |
//! | `end_id`      | non-empty, present in the zone index                |
//! | `count`       | finite, `> 0`                                       |
//! | `hour`        | finite                                              |
//! | `distance_km` | finite, `>= 0`                                      |
//!
//! Rejected rows are never repaired; each one increments a counter in the
//! [`LoadReport`].  A finite hour off the `0..=23` grid (`8.5`, `24`) is
//! kept, but has no hour slot, so no hour selection matches it.

use indexmap::IndexSet;
use log::debug;

use od_core::{Hour, ZoneId};

use crate::{LoadReport, ZoneIndex};

// ── Records ───────────────────────────────────────────────────────────────────

/// One trip row exactly as coerced from the source table.
///
/// Absent numeric cells are `NaN`, absent text cells are empty, so they
/// fail validation rather than defaulting to something plausible.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTrip {
    pub start_id:    String,
    pub end_id:      String,
    pub count:       f64,
    pub hour:        f64,
    pub distance_km: f64,
    pub mode:        String,
}

/// A validated trip bucket: `count` trips from `start_id` to `end_id`
/// starting in `hour` by `mode`, covering `distance_km`.
///
/// `hour` is `None` when the source hour is finite but not a whole hour in
/// `0..=23`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRecord {
    pub start_id:    ZoneId,
    pub end_id:      ZoneId,
    pub count:       f64,
    pub hour:        Option<Hour>,
    pub mode:        String,
    pub distance_km: f64,
}

impl TripRecord {
    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.start_id == self.end_id
    }
}

/// Why a raw row was rejected.  Checked in declaration order; the first
/// failing check wins.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DropReason {
    /// Empty id or id not present in the zone index.
    UnknownZone,
    InvalidCount,
    InvalidHour,
    InvalidDistance,
}

impl RawTrip {
    /// Validate against `zones` and normalise into a [`TripRecord`].
    pub fn validate(&self, zones: &ZoneIndex) -> Result<TripRecord, DropReason> {
        let start_id = self.start_id.trim();
        let end_id   = self.end_id.trim();

        if start_id.is_empty() || end_id.is_empty() || !zones.contains(start_id) || !zones.contains(end_id) {
            return Err(DropReason::UnknownZone);
        }
        if !self.count.is_finite() || self.count <= 0.0 {
            return Err(DropReason::InvalidCount);
        }
        if !self.hour.is_finite() {
            return Err(DropReason::InvalidHour);
        }
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(DropReason::InvalidDistance);
        }

        Ok(TripRecord {
            start_id:    ZoneId::from(start_id),
            end_id:      ZoneId::from(end_id),
            count:       self.count,
            hour:        Hour::from_f64(self.hour),
            mode:        self.mode.trim().to_owned(),
            distance_km: self.distance_km,
        })
    }
}

// ── TripStore ─────────────────────────────────────────────────────────────────

/// Ordered, immutable collection of validated trips plus the facts derived
/// from them at load time.
#[derive(Clone, Debug, Default)]
pub struct TripStore {
    trips:           Vec<TripRecord>,
    /// Every zone referenced by at least one accepted trip, first-seen order.
    active_zones:    IndexSet<ZoneId>,
    /// Distinct mode strings, first-seen order.
    modes:           IndexSet<String>,
    max_distance_km: f64,
}

impl TripStore {
    /// Validate `raw` rows against `zones` and build the store.
    ///
    /// Drop counters are added to `report`; `report.trips_loaded` is set.
    pub fn build<I>(raw: I, zones: &ZoneIndex, report: &mut LoadReport) -> Self
    where
        I: IntoIterator<Item = RawTrip>,
    {
        let mut store = TripStore::default();

        for row in raw {
            match row.validate(zones) {
                Ok(trip) => store.push(trip),
                Err(reason) => {
                    debug!("dropping trip row {row:?}: {reason:?}");
                    report.record_drop(reason);
                }
            }
        }

        report.trips_loaded = store.trips.len();
        store
    }

    /// Build directly from already-validated records (tests, synthetic data).
    pub fn from_records<I: IntoIterator<Item = TripRecord>>(records: I) -> Self {
        let mut store = TripStore::default();
        for trip in records {
            store.push(trip);
        }
        store
    }

    fn push(&mut self, trip: TripRecord) {
        if !self.active_zones.contains(&trip.start_id) {
            self.active_zones.insert(trip.start_id.clone());
        }
        if !self.active_zones.contains(&trip.end_id) {
            self.active_zones.insert(trip.end_id.clone());
        }
        if !self.modes.contains(&trip.mode) {
            self.modes.insert(trip.mode.clone());
        }
        self.max_distance_km = self.max_distance_km.max(trip.distance_km);
        self.trips.push(trip);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.trips.iter()
    }

    pub fn active_zones(&self) -> &IndexSet<ZoneId> {
        &self.active_zones
    }

    #[inline]
    pub fn is_active(&self, id: &str) -> bool {
        self.active_zones.contains(id)
    }

    pub fn modes(&self) -> &IndexSet<String> {
        &self.modes
    }

    /// Largest `distance_km` among accepted trips; `0` when empty.
    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Upper end of the default distance range: the maximum distance rounded
    /// up to whole kilometres, never below 1.
    pub fn default_max_distance_km(&self) -> f64 {
        self.max_distance_km.ceil().max(1.0)
    }
}

impl<'a> IntoIterator for &'a TripStore {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.trips.iter()
    }
}
