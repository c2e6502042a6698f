//! Session observer trait: the boundary to whatever draws the flows.

use od_data::{LoadReport, ZoneIndex};
use od_flow::{FlowQuery, FlowView};

/// Callbacks invoked by an [`Explorer`][crate::Explorer] whenever its state
/// changes.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct StatusLine;
///
/// impl FlowObserver for StatusLine {
///     fn on_view(&mut self, _query: &FlowQuery, view: &FlowView, _zones: &ZoneIndex) {
///         println!("{} out / {} in", view.summary.outbound_total, view.summary.inbound_total);
///     }
/// }
/// ```
pub trait FlowObserver {
    /// Called once when the session is built, with what the load dropped.
    fn on_load(&mut self, _report: &LoadReport) {}

    /// Called after every recomputation with the query snapshot that
    /// produced `view`.
    ///
    /// `zones` gives read-only access to names and centres so a renderer
    /// can label lines without holding its own copy of the index.
    fn on_view(&mut self, _query: &FlowQuery, _view: &FlowView, _zones: &ZoneIndex) {}

    /// Called once by [`Explorer::close`][crate::Explorer::close].
    fn on_close(&mut self) {}
}

/// A [`FlowObserver`] that does nothing.
pub struct NoopObserver;

impl FlowObserver for NoopObserver {}

impl<O: FlowObserver + ?Sized> FlowObserver for &mut O {
    fn on_load(&mut self, report: &LoadReport) {
        (**self).on_load(report);
    }

    fn on_view(&mut self, query: &FlowQuery, view: &FlowView, zones: &ZoneIndex) {
        (**self).on_view(query, view, zones);
    }

    fn on_close(&mut self) {
        (**self).on_close();
    }
}
