//! Geographic coordinate type and bounding box.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Zone centroids are only
//! aggregation anchors, and the flow geometry treats lat/lon as a flat plane,
//! which is acceptable at the city/regional scale this tool targets.

use std::fmt;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Translate by `(d_lat, d_lon)` degrees.
    #[inline]
    pub fn offset(self, d_lat: f64, d_lon: f64) -> Self {
        Self { lat: self.lat + d_lat, lon: self.lon + d_lon }
    }

    /// Component-wise difference `self - origin` as `(d_lat, d_lon)`.
    #[inline]
    pub fn delta_from(self, origin: GeoPoint) -> (f64, f64) {
        (self.lat - origin.lat, self.lon - origin.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned lat/lon bounding box, used to frame the initial map view.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl Bounds {
    /// View centre used when there is nothing to frame (Lower Saxony).
    pub const FALLBACK_CENTER: GeoPoint = GeoPoint { lat: 52.2, lon: 9.6 };

    /// Zoom level paired with [`FALLBACK_CENTER`](Self::FALLBACK_CENTER).
    pub const FALLBACK_ZOOM: u8 = 7;

    /// Smallest box containing every finite point.  `None` if there are none.
    pub fn from_points<I: IntoIterator<Item = GeoPoint>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter().filter(|p| p.is_finite());
        let first = iter.next()?;
        let mut bounds = Bounds { min: first, max: first };
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: GeoPoint) {
        self.min.lat = self.min.lat.min(p.lat);
        self.min.lon = self.min.lon.min(p.lon);
        self.max.lat = self.max.lat.max(p.lat);
        self.max.lon = self.max.lon.max(p.lon);
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min.lat + self.max.lat) * 0.5,
            (self.min.lon + self.max.lon) * 0.5,
        )
    }

    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.min.lat..=self.max.lat).contains(&p.lat)
            && (self.min.lon..=self.max.lon).contains(&p.lon)
    }
}
