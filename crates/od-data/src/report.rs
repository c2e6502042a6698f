//! Load statistics.

use std::fmt;

use crate::DropReason;

/// What happened to every feature and row during a load.
///
/// Nothing in here is an error: rejected input is dropped by design and only
/// counted so the caller can log or display it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub zones_loaded:             usize,
    /// Features without an id or without finite `lat`/`lon`.
    pub zones_skipped:            usize,
    /// Rows decoded from the trip table, before validation.
    pub rows_read:                usize,
    /// Rows the CSV reader could not decode at all.
    pub rows_unreadable:          usize,
    pub trips_loaded:             usize,
    pub dropped_unknown_zone:     usize,
    pub dropped_invalid_count:    usize,
    pub dropped_invalid_hour:     usize,
    pub dropped_invalid_distance: usize,
}

impl LoadReport {
    pub(crate) fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::UnknownZone     => self.dropped_unknown_zone += 1,
            DropReason::InvalidCount    => self.dropped_invalid_count += 1,
            DropReason::InvalidHour     => self.dropped_invalid_hour += 1,
            DropReason::InvalidDistance => self.dropped_invalid_distance += 1,
        }
    }

    /// Total rows rejected by validation (excludes unreadable rows).
    pub fn trips_dropped(&self) -> usize {
        self.dropped_unknown_zone
            + self.dropped_invalid_count
            + self.dropped_invalid_hour
            + self.dropped_invalid_distance
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} zones ({} skipped), {} trips from {} rows \
             ({} unknown zone, {} bad count, {} bad hour, {} bad distance, {} unreadable)",
            self.zones_loaded,
            self.zones_skipped,
            self.trips_loaded,
            self.rows_read,
            self.dropped_unknown_zone,
            self.dropped_invalid_count,
            self.dropped_invalid_hour,
            self.dropped_invalid_distance,
            self.rows_unreadable,
        )
    }
}
