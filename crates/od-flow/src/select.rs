//! Post-processing: turn an [`Aggregation`] into what is actually drawn.
//!
//! Steps, per channel:
//!
//! 1. drop edges with `count < min_count`;
//! 2. drop edges whose endpoints are missing from the zone index;
//! 3. stable sort by count, descending;
//! 4. split by channel (between-zones mode) and keep the first `max_edges`;
//!    a hidden channel is empty.
//!
//! The summary is computed from the truncated result only, so it always
//! describes what is visible rather than the full aggregate.

use std::collections::HashSet;

use od_core::ZoneId;
use od_data::ZoneIndex;

use crate::{Aggregation, Channel, FilterSpec, FlowEdge};

// ── FlowScope ─────────────────────────────────────────────────────────────────

/// Which aggregation mode produced a result.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowScope {
    /// Nothing selected or nothing could match.
    #[default]
    Nothing,
    /// Flows into and out of one zone.
    Zone(ZoneId),
    /// Flows among the selected zones.
    Between,
}

// ── FlowSummary ───────────────────────────────────────────────────────────────

/// Totals over the rendered edges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowSummary {
    pub outbound_total:  f64,
    pub inbound_total:   f64,
    /// Distinct zones touched by rendered edges.  In single-zone mode only
    /// the far endpoint of each edge counts.
    pub connected_zones: usize,
    /// Largest rendered count across both channels; `0` when nothing is
    /// rendered.  Line weights are relative to this.
    pub max_count:       f64,
}

// ── RenderedFlows ─────────────────────────────────────────────────────────────

/// Filtered, sorted, truncated edges per channel, plus their summary.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedFlows {
    pub scope:    FlowScope,
    pub outbound: Vec<FlowEdge>,
    pub inbound:  Vec<FlowEdge>,
    pub summary:  FlowSummary,
}

impl RenderedFlows {
    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty() && self.inbound.is_empty()
    }

    /// Edges of one channel.
    pub fn channel(&self, channel: Channel) -> &[FlowEdge] {
        match channel {
            Channel::Outbound => &self.outbound,
            Channel::Inbound  => &self.inbound,
        }
    }
}

// ── select ────────────────────────────────────────────────────────────────────

/// Apply minimum count, zone presence, sorting, channel split, and
/// truncation to `aggregation`, then summarise.
pub fn select(aggregation: Aggregation, zones: &ZoneIndex, filter: &FilterSpec) -> RenderedFlows {
    let (scope, outbound, inbound) = match aggregation {
        Aggregation::Empty => return RenderedFlows::default(),

        Aggregation::Zone { zone, outbound, inbound } => {
            let outbound = if filter.show_outbound {
                top_edges(outbound, zones, filter)
            } else {
                Vec::new()
            };
            let inbound = if filter.show_inbound {
                top_edges(inbound, zones, filter)
            } else {
                Vec::new()
            };
            (FlowScope::Zone(zone), outbound, inbound)
        }

        Aggregation::Between { pairs } => {
            let sorted = sorted_edges(pairs, zones, filter);
            let in_channel = |channel: Channel, shown: bool| -> Vec<FlowEdge> {
                if !shown {
                    return Vec::new();
                }
                sorted
                    .iter()
                    .filter(|e| Channel::for_pair(&e.start_id, &e.end_id) == Some(channel))
                    .take(filter.max_edges)
                    .cloned()
                    .collect()
            };
            let outbound = in_channel(Channel::Outbound, filter.show_outbound);
            let inbound = in_channel(Channel::Inbound, filter.show_inbound);
            (FlowScope::Between, outbound, inbound)
        }
    };

    let summary = summarize(&scope, &outbound, &inbound);
    RenderedFlows { scope, outbound, inbound, summary }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sorted_edges(edges: Vec<FlowEdge>, zones: &ZoneIndex, filter: &FilterSpec) -> Vec<FlowEdge> {
    let mut kept: Vec<FlowEdge> = edges
        .into_iter()
        .filter(|e| {
            e.count >= filter.min_count
                && zones.contains(e.start_id.as_str())
                && zones.contains(e.end_id.as_str())
        })
        .collect();
    // `sort_by` is stable: equal counts keep first-seen order.
    kept.sort_by(|a, b| b.count.total_cmp(&a.count));
    kept
}

fn top_edges(edges: Vec<FlowEdge>, zones: &ZoneIndex, filter: &FilterSpec) -> Vec<FlowEdge> {
    let mut kept = sorted_edges(edges, zones, filter);
    kept.truncate(filter.max_edges);
    kept
}

fn summarize(scope: &FlowScope, outbound: &[FlowEdge], inbound: &[FlowEdge]) -> FlowSummary {
    let outbound_total: f64 = outbound.iter().map(|e| e.count).sum();
    let inbound_total: f64 = inbound.iter().map(|e| e.count).sum();
    let max_count = outbound
        .iter()
        .chain(inbound)
        .map(|e| e.count)
        .fold(0.0, f64::max);

    let mut connected: HashSet<&ZoneId> = HashSet::new();
    match scope {
        FlowScope::Nothing => {}
        FlowScope::Zone(zone) => {
            connected.extend(outbound.iter().chain(inbound).map(|e| e.other(zone)));
        }
        FlowScope::Between => {
            for e in outbound.iter().chain(inbound) {
                connected.insert(&e.start_id);
                connected.insert(&e.end_id);
            }
        }
    }

    FlowSummary {
        outbound_total,
        inbound_total,
        connected_zones: connected.len(),
        max_count,
    }
}
