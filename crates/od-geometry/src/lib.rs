//! `od-geometry` — flow-line geometry.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`offset`] | `Side`, `offset_segment`, `offset_magnitude`               |
//! | [`weight`] | `line_weight`                                              |
//!
//! # Flat-plane constraint
//!
//! All computations treat latitude/longitude as a flat Euclidean plane.
//! That is a deliberate approximation, valid at the city/regional zoom
//! levels the explorer targets; offsets are in degrees, not metres.

pub mod offset;
pub mod weight;

#[cfg(test)]
mod tests;

pub use offset::{Side, offset_magnitude, offset_segment};
pub use weight::line_weight;
