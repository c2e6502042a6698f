//! Lane layout: place each rendered edge as an offset segment with a width.
//!
//! # Lane rules
//!
//! | Scope          | Edge       | Segment     | Reference | Side    |
//! |----------------|------------|-------------|-----------|---------|
//! | zone `Z`       | `Z → O`    | `Z → O`     | `Z → O`   | `Left`  |
//! | zone `Z`       | `O → Z`    | `O → Z`     | `Z → O`   | `Right` |
//! | between        | `S → E`    | `S → E`     | min → max | `Left` if `S < E`, else `Right` |
//!
//! `min`/`max` are the pair's ids in string order.  Both directions of a pair
//! share one reference orientation and take opposite sides, so they are
//! drawn as two parallel lanes.

use od_core::{GeoPoint, ZoneId};
use od_data::ZoneIndex;
use od_geometry::{Side, line_weight, offset_segment};

use crate::{Channel, FlowEdge, FlowScope, FlowSummary, RenderedFlows};

// ── FlowLine ──────────────────────────────────────────────────────────────────

/// One drawable flow: the edge, its channel, the two offset endpoints, and
/// the stroke width in pixels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowLine {
    pub edge:    FlowEdge,
    pub channel: Channel,
    pub path:    [GeoPoint; 2],
    pub weight:  f64,
}

// ── FlowView ──────────────────────────────────────────────────────────────────

/// Everything a renderer needs after one evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowView {
    pub scope:   FlowScope,
    /// Outbound channel first, then inbound; each in descending count order.
    pub lines:   Vec<FlowLine>,
    pub summary: FlowSummary,
}

impl FlowView {
    pub fn new(rendered: RenderedFlows, lines: Vec<FlowLine>) -> Self {
        Self { scope: rendered.scope, lines, summary: rendered.summary }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines_in(&self, channel: Channel) -> impl Iterator<Item = &FlowLine> + '_ {
        self.lines.iter().filter(move |l| l.channel == channel)
    }
}

// ── layout ────────────────────────────────────────────────────────────────────

/// Lay out every rendered edge.  Edges whose endpoints have no centre are
/// skipped (they cannot survive [`select`](crate::select) anyway).
pub fn layout(rendered: &RenderedFlows, zones: &ZoneIndex) -> Vec<FlowLine> {
    let max_count = rendered.summary.max_count;
    let mut lines = Vec::with_capacity(rendered.outbound.len() + rendered.inbound.len());

    for channel in [Channel::Outbound, Channel::Inbound] {
        for edge in rendered.channel(channel) {
            let Some((reference_start, reference_end, side)) = lane(&rendered.scope, channel, edge) else {
                continue;
            };
            let (Some(start), Some(end), Some(ref_start), Some(ref_end)) = (
                zones.center(edge.start_id.as_str()),
                zones.center(edge.end_id.as_str()),
                zones.center(reference_start.as_str()),
                zones.center(reference_end.as_str()),
            ) else {
                continue;
            };

            lines.push(FlowLine {
                edge:    edge.clone(),
                channel,
                path:    offset_segment(start, end, ref_start, ref_end, side),
                weight:  line_weight(edge.count, max_count),
            });
        }
    }

    lines
}

/// Reference direction and side for one edge, per the lane rules.
fn lane<'a>(
    scope:   &'a FlowScope,
    channel: Channel,
    edge:    &'a FlowEdge,
) -> Option<(&'a ZoneId, &'a ZoneId, Side)> {
    match scope {
        FlowScope::Nothing => None,
        FlowScope::Zone(zone) => {
            let other = edge.other(zone);
            let side = match channel {
                Channel::Outbound => Side::Left,
                Channel::Inbound  => Side::Right,
            };
            Some((zone, other, side))
        }
        FlowScope::Between => {
            if edge.start_id < edge.end_id {
                Some((&edge.start_id, &edge.end_id, Side::Left))
            } else {
                Some((&edge.end_id, &edge.start_id, Side::Right))
            }
        }
    }
}
