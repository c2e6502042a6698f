//! `od-flow` — the flow-aggregation and filtering engine.
//!
//! # Pipeline
//!
//! ```text
//! FlowQuery { Selection, FilterSpec }
//!     │
//!     ▼
//! aggregate(trips, selection, filter)  → Aggregation      (one O(trips) scan)
//!     │
//!     ▼
//! select(aggregation, zones, filter)   → RenderedFlows    (min count, sort,
//!     │                                                    channels, truncate,
//!     ▼                                                    summary)
//! layout(rendered, zones)              → Vec<FlowLine>    (offset lanes, weights)
//! ```
//!
//! [`FlowQuery::evaluate`] runs all three steps and returns a [`FlowView`].
//! Every step is a pure function of its inputs; nothing is cached between
//! calls and nothing here returns an error.  Inputs that cannot match
//! resolve to empty output.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`query`]     | `FilterSpec`, `DistanceRange`, `Selection`, `FlowQuery`   |
//! | [`aggregate`] | `FlowEdge`, `Aggregation`, `aggregate`                    |
//! | [`channel`]   | `Channel` (outbound / inbound render channel)             |
//! | [`select`]    | `FlowScope`, `RenderedFlows`, `FlowSummary`, `select`     |
//! | [`layout`]    | `FlowLine`, `FlowView`, `layout`                          |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for aggregation buckets.         |
//! | `serde`   | Serialize/Deserialize on queries and results.              |

pub mod aggregate;
pub mod channel;
pub mod layout;
pub mod query;
pub mod select;


pub use aggregate::{Aggregation, FlowEdge, aggregate};
pub use channel::Channel;
pub use layout::{FlowLine, FlowView, layout};
pub use query::{DistanceRange, FilterSpec, FlowQuery, Selection};
pub use select::{FlowScope, FlowSummary, RenderedFlows, select};
