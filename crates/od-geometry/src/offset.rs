//! Perpendicular lane offsets for directional flows.
//!
//! When two zones exchange flow in both directions, both lines would share
//! the same straight segment.  Each direction is instead shifted sideways by
//! an amount proportional to the length of a shared *reference* segment:
//!
//! ```text
//!   d      = reference_end - reference_start        (lat, lon)
//!   normal = (-d.lon, d.lat) / |d|
//!   offset = clamp(|d| * 0.03, 0.005, 0.04)
//!   p'     = p + normal * offset * side
//! ```
//!
//! Both directions use the same reference orientation and opposite sides, so
//! they become two parallel lanes that never cross.

use od_core::GeoPoint;

/// Fraction of the reference length used as the lane offset.
pub const OFFSET_FRACTION: f64 = 0.03;

/// Smallest lane offset in degrees.
pub const MIN_OFFSET: f64 = 0.005;

/// Largest lane offset in degrees.
pub const MAX_OFFSET: f64 = 0.04;

/// Which of the two parallel lanes a flow occupies, relative to the left
/// normal of the reference direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// `+1`
    Left,
    /// `-1`
    Right,
}

impl Side {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Side::Left  => 1.0,
            Side::Right => -1.0,
        }
    }

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left  => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Lane offset magnitude for a reference segment of length `len` (degrees).
#[inline]
pub fn offset_magnitude(len: f64) -> f64 {
    (len * OFFSET_FRACTION).clamp(MIN_OFFSET, MAX_OFFSET)
}

/// Shift the segment `start → end` sideways, perpendicular to the direction
/// `reference_start → reference_end`.
///
/// A zero-length or non-finite reference leaves the segment unchanged.
pub fn offset_segment(
    start:           GeoPoint,
    end:             GeoPoint,
    reference_start: GeoPoint,
    reference_end:   GeoPoint,
    side:            Side,
) -> [GeoPoint; 2] {
    let (d_lat, d_lon) = reference_end.delta_from(reference_start);
    let len = d_lat.hypot(d_lon);

    if !len.is_finite() || len == 0.0 {
        return [start, end];
    }

    let norm_lat = -d_lon / len;
    let norm_lon = d_lat / len;
    let shift = offset_magnitude(len) * side.sign();
    let off_lat = norm_lat * shift;
    let off_lon = norm_lon * shift;

    [start.offset(off_lat, off_lon), end.offset(off_lat, off_lon)]
}
