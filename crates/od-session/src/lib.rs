//! `od-session` — the interactive explorer session.
//!
//! An [`Explorer`] owns the loaded data and the user's selection and
//! filters.  It is the only place with mutable state: every change goes
//! through one of its mutators, which rebuilds a [`FlowQuery`], re-runs the
//! whole `od-flow` pipeline, and hands the result to a [`FlowObserver`].
//!
//! ```text
//! toggle_zone / set_mode / toggle_hour / …
//!     │
//!     ▼
//! FlowQuery { selection, filter }  ──►  FlowQuery::evaluate  ──►  FlowView
//!                                                                   │
//!                                           FlowObserver::on_view ◄─┘
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use od_session::ExplorerBuilder;
//!
//! let mut explorer = ExplorerBuilder::load(shapes, counts)?.build()?;
//! explorer.toggle_zone("A")?;
//! println!("{}", explorer.view().summary.outbound_total);
//! ```
//!
//! [`FlowQuery`]: od_flow::FlowQuery

pub mod builder;
pub mod error;
pub mod explorer;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::ExplorerBuilder;
pub use error::{SessionError, SessionResult};
pub use explorer::Explorer;
pub use observer::{FlowObserver, NoopObserver};
