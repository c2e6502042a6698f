//! Line width scaling.

/// Stroke width in pixels for a flow of `count` when the largest visible
/// flow is `max_in_view`.
///
/// Linear from 1.5 px (count 0) to 11.5 px (count == max).  The scale is
/// relative to what is currently rendered, not to the whole dataset.  A
/// non-positive maximum yields a flat 2 px.
#[inline]
pub fn line_weight(count: f64, max_in_view: f64) -> f64 {
    if max_in_view <= 0.0 {
        return 2.0;
    }
    1.5 + (count / max_in_view) * 10.0
}
