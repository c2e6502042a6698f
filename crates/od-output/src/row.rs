//! Plain data row types written by output backends.

use od_core::GeoPoint;
use od_data::ZoneIndex;
use od_flow::{Channel, FlowLine, FlowQuery, FlowScope, FlowView};

/// One drawn flow line.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLineRow {
    /// Sequence number of the render this line belongs to, starting at 1.
    pub render:     u64,
    pub channel:    Channel,
    /// 1-based position within its channel, largest count first.
    pub rank:       u32,
    pub start_id:   String,
    pub start_name: String,
    pub end_id:     String,
    pub end_name:   String,
    pub count:      f64,
    pub weight:     f64,
    /// Offset endpoints as drawn, not the zone centres.
    pub path:       [GeoPoint; 2],
}

impl FlowLineRow {
    pub fn new(render: u64, rank: u32, line: &FlowLine, zones: &ZoneIndex) -> Self {
        let start_id = line.edge.start_id.as_str();
        let end_id = line.edge.end_id.as_str();
        Self {
            render,
            channel:    line.channel,
            rank,
            start_id:   start_id.to_owned(),
            start_name: zones.name(start_id).unwrap_or(start_id).to_owned(),
            end_id:     end_id.to_owned(),
            end_name:   zones.name(end_id).unwrap_or(end_id).to_owned(),
            count:      line.edge.count,
            weight:     line.weight,
            path:       line.path,
        }
    }

    /// Rows for every line of `view`, ranked per channel.
    pub fn from_view(render: u64, view: &FlowView, zones: &ZoneIndex) -> Vec<Self> {
        let mut rows = Vec::with_capacity(view.lines.len());
        for channel in [Channel::Outbound, Channel::Inbound] {
            rows.extend(
                view.lines_in(channel)
                    .zip(1u32..)
                    .map(|(line, rank)| Self::new(render, rank, line, zones)),
            );
        }
        rows
    }
}

/// Totals of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub render:          u64,
    /// `"nothing"`, `"zone"`, or `"between"`.
    pub scope:           &'static str,
    /// Selection status text, e.g. `"Alpha (A)"`.
    pub selection:       String,
    pub outbound_total:  f64,
    pub inbound_total:   f64,
    pub connected_zones: u64,
    pub max_count:       f64,
    pub lines:           u64,
}

impl SummaryRow {
    pub fn new(render: u64, query: &FlowQuery, view: &FlowView, zones: &ZoneIndex) -> Self {
        Self {
            render,
            scope:           scope_name(&view.scope),
            selection:       query.selection.describe(zones),
            outbound_total:  view.summary.outbound_total,
            inbound_total:   view.summary.inbound_total,
            connected_zones: view.summary.connected_zones as u64,
            max_count:       view.summary.max_count,
            lines:           view.lines.len() as u64,
        }
    }
}

fn scope_name(scope: &FlowScope) -> &'static str {
    match scope {
        FlowScope::Nothing => "nothing",
        FlowScope::Zone(_) => "zone",
        FlowScope::Between => "between",
    }
}
