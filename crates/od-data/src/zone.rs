//! Zone index and builder.
//!
//! # Data layout
//!
//! Zones are kept in an insertion-ordered map keyed by [`ZoneId`], so
//! iteration follows the order of the shape file.  Each zone carries a single
//! representative coordinate (`center`) taken from the feature's `lat`/`lon`
//! properties.  The polygon itself is never consumed.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the zone with the nearest
//! centre.  The explorer uses it to turn a clicked coordinate into a zone
//! without polygon hit testing, restricted to zones that carry trips.

use indexmap::IndexMap;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use od_core::{Bounds, GeoPoint, ZoneId};

// ── Zone ──────────────────────────────────────────────────────────────────────

/// An administrative zone reduced to what the flow engine needs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub id:     ZoneId,
    /// Display label.  Falls back to the id when the source has none.
    pub name:   String,
    /// Aggregation anchor, not a true centroid of the polygon.
    pub center: GeoPoint,
}

impl Zone {
    /// Build a zone, substituting the id for a missing or empty name.
    pub fn new(id: ZoneId, name: Option<&str>, center: GeoPoint) -> Self {
        let name = match name {
            Some(n) if !n.is_empty() => n.to_owned(),
            _ => id.to_string(),
        };
        Self { id, name, center }
    }

    /// `"<name> (<id>)"`, the label used for a single selected zone.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

// ── R-tree zone entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[lat, lon]` point and the position of
/// the zone in the ordered map.
#[derive(Clone)]
struct ZoneEntry {
    point: [f64; 2], // [lat, lon]
    slot:  usize,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ZoneEntry {
    /// Squared Euclidean distance in lat/lon space, same flat-plane
    /// approximation the flow geometry uses.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── ZoneIndex ─────────────────────────────────────────────────────────────────

/// Immutable mapping from zone id to name and centre.
///
/// Do not construct directly; use [`ZoneIndexBuilder`] or
/// [`load_zones_reader`](crate::load_zones_reader).
pub struct ZoneIndex {
    zones:       IndexMap<ZoneId, Zone>,
    spatial_idx: RTree<ZoneEntry>,
}

impl ZoneIndex {
    /// An index with no zones.  Every trip validated against it is dropped.
    pub fn empty() -> Self {
        ZoneIndexBuilder::new().build()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Zone> {
        self.zones.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.zones.contains_key(id)
    }

    /// Centre of `id`, if the zone exists.
    #[inline]
    pub fn center(&self, id: &str) -> Option<GeoPoint> {
        self.zones.get(id).map(|z| z.center)
    }

    /// Display name of `id`, if the zone exists.
    #[inline]
    pub fn name(&self, id: &str) -> Option<&str> {
        self.zones.get(id).map(|z| z.name.as_str())
    }

    /// Zones in shape-file order.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> + '_ {
        self.zones.values()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The zone whose centre is closest to `pos`.
    ///
    /// Returns `None` only if the index is empty or `pos` is not finite.
    pub fn nearest_zone(&self, pos: GeoPoint) -> Option<&Zone> {
        if !pos.is_finite() {
            return None;
        }
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .and_then(|e| self.zones.get_index(e.slot))
            .map(|(_, zone)| zone)
    }

    /// The closest zone among those accepted by `keep`, walking the R-tree
    /// outward from `pos`.
    pub fn nearest_zone_where<F>(&self, pos: GeoPoint, mut keep: F) -> Option<&Zone>
    where
        F: FnMut(&Zone) -> bool,
    {
        if !pos.is_finite() {
            return None;
        }
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .filter_map(|e| self.zones.get_index(e.slot).map(|(_, zone)| zone))
            .find(|zone| keep(zone))
    }

    /// Bounding box of the centres of the given zones.  Unknown ids are
    /// ignored; `None` if none of them exist.
    pub fn bounds_of<'a, I>(&self, ids: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a ZoneId>,
    {
        Bounds::from_points(ids.into_iter().filter_map(|id| self.center(id.as_str())))
    }
}

// ── ZoneIndexBuilder ──────────────────────────────────────────────────────────

/// Construct a [`ZoneIndex`] incrementally, then call [`build`](Self::build).
///
/// Inserting an id twice replaces the earlier zone (last writer wins) but
/// keeps its original position.
///
/// # Example
///
/// ```
/// use od_core::{GeoPoint, ZoneId};
/// use od_data::{Zone, ZoneIndexBuilder};
///
/// let mut b = ZoneIndexBuilder::new();
/// b.insert(Zone::new(ZoneId::from("A"), Some("Alpha"), GeoPoint::new(52.0, 9.0)));
/// b.insert(Zone::new(ZoneId::from("B"), None, GeoPoint::new(52.1, 9.2)));
/// let zones = b.build();
/// assert_eq!(zones.len(), 2);
/// assert_eq!(zones.name("B"), Some("B"));
/// ```
pub struct ZoneIndexBuilder {
    zones: IndexMap<ZoneId, Zone>,
}

impl ZoneIndexBuilder {
    pub fn new() -> Self {
        Self { zones: IndexMap::new() }
    }

    pub fn with_capacity(zones: usize) -> Self {
        Self { zones: IndexMap::with_capacity(zones) }
    }

    /// Add or replace a zone.  Returns the replaced zone, if any.
    pub fn insert(&mut self, zone: Zone) -> Option<Zone> {
        self.zones.insert(zone.id.clone(), zone)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Consume the builder and bulk-load the R-tree.
    pub fn build(self) -> ZoneIndex {
        let entries: Vec<ZoneEntry> = self
            .zones
            .values()
            .enumerate()
            .map(|(slot, z)| ZoneEntry {
                point: [z.center.lat, z.center.lon],
                slot,
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        ZoneIndex { zones: self.zones, spatial_idx }
    }
}

impl Default for ZoneIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}
