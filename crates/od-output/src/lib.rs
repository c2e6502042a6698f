//! `od-output` — flow view writers for the od_flows explorer.
//!
//! Three backends are provided, one behind a Cargo feature:
//!
//! | Feature   | Backend     | Files created                                  |
//! |-----------|-------------|------------------------------------------------|
//! | *(none)*  | CSV         | `flow_lines.csv`, `flow_summary.csv`           |
//! | *(none)*  | GeoJSON     | `flows.geojson`                                |
//! | `sqlite`  | SQLite      | `flows.db`                                     |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`FlowOutputObserver`], which implements `od_session::FlowObserver`.
//! Every view the session computes becomes one numbered render: its lines
//! and a summary row sharing the same `render` number.
//!
//! # Usage
//!
//! ```rust,ignore
//! use od_output::{CsvWriter, FlowOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut explorer = builder.observer(FlowOutputObserver::new(writer)).build()?;
//! explorer.toggle_zone("A")?;
//! let mut obs = explorer.close();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod geojson;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use crate::geojson::GeoJsonWriter;
pub use observer::FlowOutputObserver;
pub use row::{FlowLineRow, SummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
