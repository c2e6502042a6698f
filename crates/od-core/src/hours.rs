//! Hour-of-day buckets and the hour filter set.
//!
//! Trips are bucketed by the hour in which they start.  The filter keeps a
//! set of selected buckets as a 24-bit mask: membership tests in the
//! aggregation scan are a shift and an AND.
//!
//! An **empty** `HourSet` matches nothing.  It is not a synonym for "all
//! hours"; the aggregator short-circuits to an empty result on it.

use std::fmt;

use crate::OdError;

// ── Hour ──────────────────────────────────────────────────────────────────────

/// One hour-of-day bucket, `0..=23`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Hour(u8);

impl Hour {
    /// Number of buckets in a day.
    pub const COUNT: u8 = 24;

    /// `None` if `h > 23`.
    #[inline]
    pub fn new(h: u8) -> Option<Self> {
        (h < Self::COUNT).then_some(Self(h))
    }

    /// Coerce a raw numeric cell.  Only finite integral values in `0..=23`
    /// map to a bucket.
    pub fn from_f64(h: f64) -> Option<Self> {
        if !h.is_finite() || h.fract() != 0.0 || !(0.0..24.0).contains(&h) {
            return None;
        }
        Some(Self(h as u8))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Iterator over all 24 buckets in ascending order.
    pub fn all() -> impl Iterator<Item = Hour> {
        (0..Self::COUNT).map(Hour)
    }
}

impl TryFrom<u8> for Hour {
    type Error = OdError;
    fn try_from(h: u8) -> Result<Self, Self::Error> {
        Hour::new(h).ok_or(OdError::InvalidHour(h))
    }
}

impl From<Hour> for u8 {
    #[inline]
    fn from(h: Hour) -> u8 {
        h.0
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

// ── HourSet ───────────────────────────────────────────────────────────────────

/// A subset of the 24 hour-of-day buckets.
///
/// Serialized as a list of hour numbers; out-of-range entries in the list are
/// ignored on deserialization.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<u8>", into = "Vec<u8>"))]
pub struct HourSet(u32);

impl HourSet {
    const FULL_MASK: u32 = (1 << Hour::COUNT) - 1;

    /// Every hour selected (the filter default).
    pub const ALL: HourSet = HourSet(Self::FULL_MASK);

    /// No hour selected; matches nothing.
    pub const NONE: HourSet = HourSet(0);

    #[inline]
    pub fn contains(self, h: Hour) -> bool {
        self.0 & (1 << h.0) != 0
    }

    #[inline]
    pub fn insert(&mut self, h: Hour) {
        self.0 |= 1 << h.0;
    }

    #[inline]
    pub fn remove(&mut self, h: Hour) {
        self.0 &= !(1 << h.0);
    }

    /// Flip membership of `h`.  Returns `true` if `h` is selected afterwards.
    pub fn toggle(&mut self, h: Hour) -> bool {
        self.0 ^= 1 << h.0;
        self.contains(h)
    }

    /// Number of selected hours.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_full(self) -> bool {
        self.0 == Self::FULL_MASK
    }

    /// Selected hours in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Hour> {
        Hour::all().filter(move |h| self.contains(*h))
    }

    /// Short status line, e.g. `"8 / 24 hours selected"`.
    pub fn summary(self) -> String {
        format!("{} / {} hours selected", self.len(), Hour::COUNT)
    }
}

impl Default for HourSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromIterator<Hour> for HourSet {
    fn from_iter<I: IntoIterator<Item = Hour>>(iter: I) -> Self {
        let mut set = HourSet::NONE;
        for h in iter {
            set.insert(h);
        }
        set
    }
}

impl From<Vec<u8>> for HourSet {
    fn from(hours: Vec<u8>) -> Self {
        hours.into_iter().filter_map(Hour::new).collect()
    }
}

impl From<HourSet> for Vec<u8> {
    fn from(set: HourSet) -> Vec<u8> {
        set.iter().map(Hour::get).collect()
    }
}
