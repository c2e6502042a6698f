//! Flow aggregation: one pass over the trip store per query.
//!
//! # Modes
//!
//! | Selection size | Mode          | Buckets                                     |
//! |----------------|---------------|---------------------------------------------|
//! | 0              | —             | none, returns [`Aggregation::Empty`]        |
//! | 1 (zone `Z`)   | single zone   | outbound by `end_id`, inbound by `start_id` |
//! | > 1            | between zones | by ordered pair `(start_id, end_id)`        |
//!
//! Single-zone mode counts a self-loop `Z → Z` in **both** buckets.
//! Between-zones mode ignores self-loops entirely.  The asymmetry is kept as
//! is: the between view is only about flow *between* the selected zones.
//!
//! Buckets are insertion-ordered, so edges come out in the order their key
//! was first seen.  Post-processing sorts stably by count, which keeps ties
//! in that order and makes the full pipeline deterministic.

use indexmap::IndexMap;
use log::debug;

use od_core::ZoneId;
use od_data::TripStore;

use crate::{FilterSpec, Selection};

#[cfg(feature = "fx-hash")]
type BucketMap<K> = IndexMap<K, f64, rustc_hash::FxBuildHasher>;
#[cfg(not(feature = "fx-hash"))]
type BucketMap<K> = IndexMap<K, f64>;

// ── FlowEdge ──────────────────────────────────────────────────────────────────

/// Summed trip count from `start_id` to `end_id` under the current filter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowEdge {
    pub start_id: ZoneId,
    pub end_id:   ZoneId,
    pub count:    f64,
}

impl FlowEdge {
    pub fn new(start_id: impl Into<ZoneId>, end_id: impl Into<ZoneId>, count: f64) -> Self {
        Self { start_id: start_id.into(), end_id: end_id.into(), count }
    }

    /// The endpoint that is not `anchor`.  For a self-loop both endpoints are
    /// `anchor`, so `anchor` is returned.
    pub fn other(&self, anchor: &ZoneId) -> &ZoneId {
        if &self.start_id == anchor { &self.end_id } else { &self.start_id }
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.start_id == self.end_id
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Raw aggregation output, before minimum-count filtering, sorting, and
/// truncation.
#[derive(Clone, Debug, PartialEq)]
pub enum Aggregation {
    /// Empty selection or empty hour set.
    Empty,
    /// Single-zone mode.  Outbound edges are `zone → other`, inbound edges
    /// are `other → zone`.
    Zone {
        zone:     ZoneId,
        outbound: Vec<FlowEdge>,
        inbound:  Vec<FlowEdge>,
    },
    /// Between-zones mode: directed pair edges among the selected zones.
    Between { pairs: Vec<FlowEdge> },
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        match self {
            Aggregation::Empty => true,
            Aggregation::Zone { outbound, inbound, .. } => outbound.is_empty() && inbound.is_empty(),
            Aggregation::Between { pairs } => pairs.is_empty(),
        }
    }
}

// ── aggregate ─────────────────────────────────────────────────────────────────

/// Sum the trips in `trips` that pass `filter`, according to the mode implied
/// by the size of `selection`.
///
/// Pure: identical inputs always produce identical output.  O(trips) time,
/// O(distinct keys) space.
pub fn aggregate(trips: &TripStore, selection: &Selection, filter: &FilterSpec) -> Aggregation {
    if selection.is_empty() || filter.hours.is_empty() {
        return Aggregation::Empty;
    }

    match selection.single() {
        Some(zone) => aggregate_zone(trips, zone, filter),
        None => aggregate_between(trips, selection, filter),
    }
}

fn aggregate_zone(trips: &TripStore, zone: &ZoneId, filter: &FilterSpec) -> Aggregation {
    let mut outbound: BucketMap<&ZoneId> = BucketMap::default();
    let mut inbound:  BucketMap<&ZoneId> = BucketMap::default();

    for trip in trips.iter().filter(|t| filter.matches(t)) {
        if &trip.start_id == zone {
            *outbound.entry(&trip.end_id).or_insert(0.0) += trip.count;
        }
        if &trip.end_id == zone {
            *inbound.entry(&trip.start_id).or_insert(0.0) += trip.count;
        }
    }

    debug!(
        "zone {zone}: {} outbound / {} inbound buckets",
        outbound.len(),
        inbound.len()
    );

    Aggregation::Zone {
        zone:     zone.clone(),
        outbound: outbound
            .into_iter()
            .map(|(other, count)| FlowEdge::new(zone.clone(), other.clone(), count))
            .collect(),
        inbound:  inbound
            .into_iter()
            .map(|(other, count)| FlowEdge::new(other.clone(), zone.clone(), count))
            .collect(),
    }
}

fn aggregate_between(trips: &TripStore, selection: &Selection, filter: &FilterSpec) -> Aggregation {
    let mut pairs: BucketMap<(&ZoneId, &ZoneId)> = BucketMap::default();

    for trip in trips.iter().filter(|t| filter.matches(t)) {
        if trip.is_self_loop()
            || !selection.contains(trip.start_id.as_str())
            || !selection.contains(trip.end_id.as_str())
        {
            continue;
        }
        *pairs.entry((&trip.start_id, &trip.end_id)).or_insert(0.0) += trip.count;
    }

    debug!("{} zones selected: {} pair buckets", selection.len(), pairs.len());

    Aggregation::Between {
        pairs: pairs
            .into_iter()
            .map(|((start, end), count)| FlowEdge::new(start.clone(), end.clone(), count))
            .collect(),
    }
}
