//! The `Explorer` session and its state mutators.

use log::debug;

use od_core::{Bounds, GeoPoint, Hour, HourSet, ModeFilter, ZoneId};
use od_data::{Dataset, LoadReport, TripStore, Zone, ZoneIndex};
use od_flow::{FilterSpec, FlowQuery, FlowView, Selection};

use crate::{FlowObserver, SessionError, SessionResult};

/// The interactive session.
///
/// Owns the loaded dataset and the mutable selection and filter state.  Every
/// mutator that changes that state snapshots it into a [`FlowQuery`],
/// re-evaluates from scratch, stores the resulting [`FlowView`], and passes
/// both to the observer.  Mutators that leave the state unchanged do not
/// recompute.
///
/// Create via [`ExplorerBuilder`][crate::ExplorerBuilder].
pub struct Explorer<O: FlowObserver> {
    pub(crate) data:      Dataset,
    pub(crate) selection: Selection,
    pub(crate) filter:    FilterSpec,
    pub(crate) view:      FlowView,
    /// Number of evaluations so far, including the one in `build`.
    pub(crate) renders:   u64,
    pub(crate) observer:  O,
}

impl<O: FlowObserver> Explorer<O> {
    // ── Read access ───────────────────────────────────────────────────────

    pub fn zones(&self) -> &ZoneIndex {
        &self.data.zones
    }

    pub fn trips(&self) -> &TripStore {
        &self.data.trips
    }

    pub fn report(&self) -> &LoadReport {
        &self.data.report
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// The most recent evaluation result.
    pub fn view(&self) -> &FlowView {
        &self.view
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// End the session: notify the observer and hand it back.
    pub fn close(mut self) -> O {
        self.observer.on_close();
        self.observer
    }

    /// Snapshot of the current selection and filters.
    pub fn query(&self) -> FlowQuery {
        FlowQuery::new(self.selection.clone(), self.filter.clone())
    }

    /// Zones referenced by at least one trip, in shape-file order.
    pub fn active_zones(&self) -> impl Iterator<Item = &Zone> + '_ {
        self.data.active_zones()
    }

    /// Mode strings seen in the trip table, first-seen order.
    pub fn modes(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.trips.modes().iter().map(String::as_str)
    }

    /// Bounding box of the active zones, or `None` if no trip survived the
    /// load.
    pub fn bounds(&self) -> Option<Bounds> {
        self.data.active_bounds()
    }

    /// Where to centre the map initially: the middle of [`bounds`](Self::bounds),
    /// or the fixed fallback centre.
    pub fn initial_center(&self) -> GeoPoint {
        self.bounds().map_or(Bounds::FALLBACK_CENTER, |b| b.center())
    }

    /// Status text for the selection: `"None"`, `"<name> (<id>)"`, or
    /// `"<n> zones selected"`.
    pub fn selection_label(&self) -> String {
        self.selection.describe(&self.data.zones)
    }

    /// `"<n> / 24 hours selected"`.
    pub fn hour_summary(&self) -> String {
        self.filter.hours.summary()
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Add `id` to the selection or remove it.  Returns `true` if `id` is
    /// selected afterwards.
    pub fn toggle_zone(&mut self, id: &str) -> SessionResult<bool> {
        let zone = self
            .data
            .zones
            .get(id)
            .ok_or_else(|| SessionError::UnknownZone(id.to_owned()))?;
        let selected = self.selection.toggle(zone.id.clone());
        self.refresh();
        Ok(selected)
    }

    /// Toggle the active zone whose centre is nearest to `pos`.  Zones
    /// without trips are not drawn, so they cannot be picked.  Returns the
    /// zone toggled, or `None` if no zone is active or `pos` is not finite.
    pub fn toggle_nearest(&mut self, pos: GeoPoint) -> Option<ZoneId> {
        let trips = &self.data.trips;
        let id = self
            .data
            .zones
            .nearest_zone_where(pos, |z| trips.is_active(z.id.as_str()))?
            .id
            .clone();
        self.selection.toggle(id.clone());
        self.refresh();
        Some(id)
    }

    /// Replace the whole selection.  Fails without changing anything if any
    /// id is unknown.
    pub fn set_selection(&mut self, selection: Selection) -> SessionResult<()> {
        if let Some(unknown) = selection.iter().find(|id| !self.data.zones.contains(id.as_str())) {
            return Err(SessionError::UnknownZone(unknown.to_string()));
        }
        if selection != self.selection {
            self.selection = selection;
            self.refresh();
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.refresh();
        }
    }

    // ── Filters ───────────────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: ModeFilter) {
        self.update_filter(|f| f.mode = mode);
    }

    /// Returns `true` if `hour` is selected afterwards.
    pub fn toggle_hour(&mut self, hour: Hour) -> bool {
        self.filter.hours.toggle(hour);
        self.refresh();
        self.filter.hours.contains(hour)
    }

    pub fn set_hours(&mut self, hours: HourSet) {
        self.update_filter(|f| f.hours = hours);
    }

    pub fn select_all_hours(&mut self) {
        self.set_hours(HourSet::ALL);
    }

    pub fn select_no_hours(&mut self) {
        self.set_hours(HourSet::NONE);
    }

    /// Lower distance bound; raises the upper bound if needed.
    pub fn set_min_distance(&mut self, km: f64) {
        self.update_filter(|f| f.set_min_distance(km));
    }

    /// Upper distance bound; lowers the lower bound if needed.
    pub fn set_max_distance(&mut self, km: f64) {
        self.update_filter(|f| f.set_max_distance(km));
    }

    pub fn set_min_count(&mut self, min_count: f64) {
        self.update_filter(|f| f.min_count = min_count);
    }

    pub fn set_max_edges(&mut self, max_edges: usize) {
        self.update_filter(|f| f.max_edges = max_edges);
    }

    pub fn show_outbound(&mut self, show: bool) {
        self.update_filter(|f| f.show_outbound = show);
    }

    pub fn show_inbound(&mut self, show: bool) {
        self.update_filter(|f| f.show_inbound = show);
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.update_filter(|f| *f = filter);
    }

    /// Restore every filter to its default.  The distance range goes back to
    /// `[0, max(1, ceil(max trip distance))]`.  The selection is kept.
    pub fn reset_filters(&mut self) {
        let max_km = self.data.trips.default_max_distance_km();
        self.update_filter(|f| f.reset(max_km));
    }

    // ── Recompute ─────────────────────────────────────────────────────────

    fn update_filter(&mut self, edit: impl FnOnce(&mut FilterSpec)) {
        let before = self.filter.clone();
        edit(&mut self.filter);
        if self.filter != before {
            self.refresh();
        }
    }

    /// Snapshot the state, evaluate, store the view, notify the observer.
    pub(crate) fn refresh(&mut self) {
        let query = self.query();
        let view = query.evaluate(&self.data.trips, &self.data.zones);
        self.renders += 1;
        debug!(
            "render {}: selection {} → {} lines",
            self.renders,
            query.selection,
            view.lines.len()
        );
        self.observer.on_view(&query, &view, &self.data.zones);
        self.view = view;
    }
}
