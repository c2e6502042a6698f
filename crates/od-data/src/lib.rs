//! `od-data` — zone index, trip store, and input loaders.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`zone`]   | `Zone`, `ZoneIndex` (id map + R-tree), `ZoneIndexBuilder`    |
//! | [`trip`]   | `TripRecord`, `RawTrip`, `TripStore`, `DropReason`           |
//! | [`loader`] | `load_zones_reader`, `read_trip_rows`, `Dataset::load`       |
//! | [`report`] | `LoadReport`                                                 |
//! | [`error`]  | `DataError`, `DataResult<T>`                                 |
//!
//! # Load model
//!
//! ```text
//! shapes.geojson ──► ZoneIndex ─┐
//!                               ├──► TripStore (validated against ZoneIndex)
//! counts.csv ─────► RawTrip[] ──┘
//! ```
//!
//! Both files are read and parsed concurrently; validation of trips against
//! the zone index happens once both are in memory.  Anything that fails
//! validation is dropped and counted in the [`LoadReport`], never repaired.
//! Both stores are immutable once built.

pub mod error;
pub mod loader;
pub mod report;
pub mod trip;
pub mod zone;


pub use error::{DataError, DataResult};
pub use loader::{Dataset, load_zones_geojson, load_zones_reader, read_trip_rows, read_trips_csv};
pub use report::LoadReport;
pub use trip::{DropReason, RawTrip, TripRecord, TripStore};
pub use zone::{Zone, ZoneIndex, ZoneIndexBuilder};
