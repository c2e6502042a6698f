//! Filter specification, selection, and the immutable flow query.
//!
//! `FilterSpec` and `Selection` are the mutable state an interactive shell
//! edits.  Before every aggregation the shell snapshots both into a
//! [`FlowQuery`], which the engine treats as a plain value.

use std::fmt;

use indexmap::IndexSet;

use od_core::{HourSet, ModeFilter, ZoneId};
use od_data::{TripRecord, TripStore, Zone, ZoneIndex};

use crate::{FlowView, aggregate, layout, select};

// ── DistanceRange ─────────────────────────────────────────────────────────────

/// Inclusive `[min_km, max_km]` bounds on trip distance.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceRange {
    pub min_km: f64,
    pub max_km: f64,
}

impl DistanceRange {
    /// Accepts every non-negative distance.
    pub const UNBOUNDED: DistanceRange = DistanceRange { min_km: 0.0, max_km: f64::MAX };

    pub fn new(min_km: f64, max_km: f64) -> Self {
        Self { min_km, max_km }
    }

    /// Inclusive at both ends.
    #[inline]
    pub fn contains(&self, km: f64) -> bool {
        km >= self.min_km && km <= self.max_km
    }
}

impl Default for DistanceRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

// ── FilterSpec ────────────────────────────────────────────────────────────────

/// Every user-adjustable filter, in one value.
///
/// | Field           | Default                    | Applied                  |
/// |-----------------|----------------------------|--------------------------|
/// | `mode`          | `All`                      | per trip, exact match    |
/// | `hours`         | all 24                     | per trip; empty → none   |
/// | `distance`      | `[0, store max]`           | per trip, inclusive      |
/// | `min_count`     | `1`                        | per edge, inclusive      |
/// | `max_edges`     | `80`                       | per channel, after sort  |
/// | `show_outbound` | `true`                     | per channel              |
/// | `show_inbound`  | `true`                     | per channel              |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterSpec {
    pub mode:          ModeFilter,
    pub hours:         HourSet,
    pub distance:      DistanceRange,
    pub min_count:     f64,
    pub max_edges:     usize,
    pub show_outbound: bool,
    pub show_inbound:  bool,
}

impl FilterSpec {
    pub const DEFAULT_MIN_COUNT: f64   = 1.0;
    pub const DEFAULT_MAX_EDGES: usize = 80;

    /// Defaults with the distance range spanning everything in `trips`:
    /// `[0, max(1, ceil(max_distance))]`.
    pub fn for_store(trips: &TripStore) -> Self {
        Self {
            distance: DistanceRange::new(0.0, trips.default_max_distance_km()),
            ..Self::default()
        }
    }

    /// Restore every field to its default, keeping the store-derived
    /// distance ceiling `max_km`.
    pub fn reset(&mut self, max_km: f64) {
        *self = Self {
            distance: DistanceRange::new(0.0, max_km),
            ..Self::default()
        };
    }

    /// Per-trip predicate: mode, hour bucket, and distance.  A trip with no
    /// hour bucket matches no hour selection.
    #[inline]
    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.mode.matches(&trip.mode)
            && trip.hour.is_some_and(|h| self.hours.contains(h))
            && self.distance.contains(trip.distance_km)
    }

    /// Set the lower distance bound, dragging the upper bound along if it
    /// would fall below.
    pub fn set_min_distance(&mut self, km: f64) {
        self.distance.min_km = km;
        if km > self.distance.max_km {
            self.distance.max_km = km;
        }
    }

    /// Set the upper distance bound, dragging the lower bound along if it
    /// would rise above.
    pub fn set_max_distance(&mut self, km: f64) {
        self.distance.max_km = km;
        if km < self.distance.min_km {
            self.distance.min_km = km;
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            mode:          ModeFilter::All,
            hours:         HourSet::ALL,
            distance:      DistanceRange::UNBOUNDED,
            min_count:     Self::DEFAULT_MIN_COUNT,
            max_edges:     Self::DEFAULT_MAX_EDGES,
            show_outbound: true,
            show_inbound:  true,
        }
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// The set of zones the user has picked.
///
/// Order does not affect results; it is kept only so iteration is stable.
/// One zone selects single-zone mode, two or more select between-zones mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Selection {
    zones: IndexSet<ZoneId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present.  Returns `true` if `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: ZoneId) -> bool {
        if self.zones.shift_remove(&id) {
            false
        } else {
            self.zones.insert(id);
            true
        }
    }

    pub fn insert(&mut self, id: ZoneId) -> bool {
        self.zones.insert(id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.zones.shift_remove(id)
    }

    pub fn clear(&mut self) {
        self.zones.clear();
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.zones.contains(id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneId> + '_ {
        self.zones.iter()
    }

    /// The selected zone when exactly one is selected.
    pub fn single(&self) -> Option<&ZoneId> {
        match self.zones.len() {
            1 => self.zones.first(),
            _ => None,
        }
    }

    /// Status text: `"None"`, `"<name> (<id>)"`, or `"<n> zones selected"`.
    pub fn describe(&self, zones: &ZoneIndex) -> String {
        if let Some(id) = self.single() {
            return zones
                .get(id.as_str())
                .map_or_else(|| id.to_string(), Zone::label);
        }
        match self.zones.len() {
            0 => "None".to_owned(),
            n => format!("{n} zones selected"),
        }
    }
}

impl FromIterator<ZoneId> for Selection {
    fn from_iter<I: IntoIterator<Item = ZoneId>>(iter: I) -> Self {
        Self { zones: iter.into_iter().collect() }
    }
}

impl<'a> FromIterator<&'a str> for Selection {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(ZoneId::from).collect()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, id) in self.zones.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        f.write_str("}")
    }
}

// ── FlowQuery ─────────────────────────────────────────────────────────────────

/// An immutable snapshot of selection and filters, built fresh before each
/// evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowQuery {
    pub selection: Selection,
    pub filter:    FilterSpec,
}

impl FlowQuery {
    pub fn new(selection: Selection, filter: FilterSpec) -> Self {
        Self { selection, filter }
    }

    /// Run aggregation, post-processing, and layout in one go.
    pub fn evaluate(&self, trips: &TripStore, zones: &ZoneIndex) -> FlowView {
        let aggregation = aggregate(trips, &self.selection, &self.filter);
        let rendered = select(aggregation, zones, &self.filter);
        let lines = layout(&rendered, zones);
        FlowView::new(rendered, lines)
    }
}
