//! `od-core` — foundational types for the `od_flows` origin-destination explorer.
//!
//! This crate is a dependency of every other `od-*` crate.  It has no `od-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                               |
//! |-----------|--------------------------------------------------------|
//! | [`ids`]   | `ZoneId`                                               |
//! | [`geo`]   | `GeoPoint`, `Bounds`                                   |
//! | [`hours`] | `Hour`, `HourSet` (24-bit hour-of-day mask)            |
//! | [`mode`]  | `ModeFilter` (`"all"` wildcard or one mode string)     |
//! | [`error`] | `OdError`, `OdResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod hours;
pub mod ids;
pub mod mode;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{OdError, OdResult};
pub use geo::{Bounds, GeoPoint};
pub use hours::{Hour, HourSet};
pub use ids::ZoneId;
pub use mode::ModeFilter;
