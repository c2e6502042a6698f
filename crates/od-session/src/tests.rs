//! Integration tests for od-session.

use std::io::Cursor;

use od_core::{Bounds, GeoPoint, Hour, HourSet, ModeFilter};
use od_data::{Dataset, LoadReport, ZoneIndex};
use od_flow::{Channel, FlowQuery, FlowView};

use crate::{Explorer, ExplorerBuilder, FlowObserver, NoopObserver, SessionError};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SHAPES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "id": "A", "geometry": null,
      "properties": { "name": "Alpha", "lat": 52.0, "lon": 9.0 } },
    { "type": "Feature", "id": "B", "geometry": null,
      "properties": { "name": "Beta", "lat": 52.0, "lon": 9.4 } },
    { "type": "Feature", "id": "C", "geometry": null,
      "properties": { "name": "Gamma", "lat": 52.4, "lon": 9.2 } },
    { "type": "Feature", "id": "E", "geometry": null,
      "properties": { "name": "Empty", "lat": 50.0, "lon": 7.0 } }
  ]
}"#;

const COUNTS: &str = "\
StartId,EndId,Count,Start Hour,DistanceInKm,Mot
A,B,5,8,3,car
B,A,2,8,3,car
A,C,4,17,12.4,bike
C,A,1,17,12.4,bike
A,Q,9,8,3,car
";

fn dataset() -> Dataset {
    Dataset::from_readers(Cursor::new(SHAPES), Cursor::new(COUNTS)).unwrap()
}

fn explorer() -> Explorer<NoopObserver> {
    ExplorerBuilder::new(dataset()).build().unwrap()
}

/// Records every callback it receives.
#[derive(Default)]
struct Recorder {
    loads:   Vec<LoadReport>,
    queries: Vec<FlowQuery>,
    views:   Vec<FlowView>,
    closed:  bool,
}

impl FlowObserver for Recorder {
    fn on_load(&mut self, report: &LoadReport) {
        self.loads.push(report.clone());
    }

    fn on_view(&mut self, query: &FlowQuery, view: &FlowView, _zones: &ZoneIndex) {
        self.queries.push(query.clone());
        self.views.push(view.clone());
    }

    fn on_close(&mut self) {
        self.closed = true;
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn defaults_cover_the_store() {
        let ex = explorer();
        assert!(ex.selection().is_empty());
        assert_eq!(ex.filter().distance.max_km, 13.0);
        assert_eq!(ex.filter().max_edges, 80);
        assert!(ex.view().is_empty());
        assert_eq!(ex.renders(), 1);
    }

    #[test]
    fn observer_sees_load_then_first_view() {
        let ex = ExplorerBuilder::new(dataset())
            .selection(["A"].into_iter().collect())
            .observer(Recorder::default())
            .build()
            .unwrap();
        let rec = ex.into_observer();
        assert_eq!(rec.loads.len(), 1);
        assert_eq!(rec.loads[0].trips_loaded, 4);
        assert_eq!(rec.loads[0].dropped_unknown_zone, 1);
        assert_eq!(rec.views.len(), 1);
        assert_eq!(rec.views[0].summary.outbound_total, 9.0);
    }

    #[test]
    fn unknown_initial_selection_is_rejected() {
        let err = ExplorerBuilder::new(dataset())
            .selection(["A", "Q"].into_iter().collect())
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SessionError::UnknownZone(id) if id == "Q"));
    }

    #[test]
    fn query_sets_selection_and_filter() {
        let mut query = FlowQuery::default();
        query.selection = ["A", "B"].into_iter().collect();
        query.filter.mode = ModeFilter::from("car");
        let ex = ExplorerBuilder::new(dataset()).query(query.clone()).build().unwrap();
        assert_eq!(ex.query(), query);
        assert_eq!(ex.view().lines.len(), 2);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExplorerBuilder::load(&dir.path().join("shapes.geojson"), &dir.path().join("counts.csv"))
            .err()
            .unwrap();
        assert!(matches!(err, SessionError::Load(_)));
        assert!(err.to_string().starts_with("failed to load"));
    }

    #[test]
    fn loads_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let shapes = dir.path().join("shapes.geojson");
        let counts = dir.path().join("counts.csv");
        std::fs::write(&shapes, SHAPES).unwrap();
        std::fs::write(&counts, COUNTS).unwrap();

        let ex = ExplorerBuilder::load(&shapes, &counts).unwrap().build().unwrap();
        assert_eq!(ex.zones().len(), 4);
        assert_eq!(ex.trips().len(), 4);
        assert_eq!(ex.report().rows_read, 5);
    }
}

// ── Explorer state ────────────────────────────────────────────────────────────

#[cfg(test)]
mod explorer_tests {
    use super::*;

    #[test]
    fn toggling_zones_switches_modes() {
        let mut ex = explorer();
        assert!(ex.toggle_zone("A").unwrap());
        assert_eq!(ex.selection_label(), "Alpha (A)");
        assert_eq!(ex.view().summary.outbound_total, 9.0);
        assert_eq!(ex.view().summary.inbound_total, 3.0);
        assert_eq!(ex.view().summary.connected_zones, 2);

        assert!(ex.toggle_zone("B").unwrap());
        assert_eq!(ex.selection_label(), "2 zones selected");
        let out: Vec<_> = ex.view().lines_in(Channel::Outbound).map(|l| l.edge.count).collect();
        let inb: Vec<_> = ex.view().lines_in(Channel::Inbound).map(|l| l.edge.count).collect();
        assert_eq!(out, vec![5.0]);
        assert_eq!(inb, vec![2.0]);

        assert!(!ex.toggle_zone("A").unwrap());
        assert_eq!(ex.selection_label(), "Beta (B)");
    }

    #[test]
    fn toggling_an_unknown_zone_fails_without_recompute() {
        let mut ex = explorer();
        let before = ex.renders();
        assert!(matches!(ex.toggle_zone("Q"), Err(SessionError::UnknownZone(_))));
        assert_eq!(ex.renders(), before);
    }

    #[test]
    fn nearest_zone_toggle() {
        let mut ex = explorer();
        let picked = ex.toggle_nearest(GeoPoint::new(52.38, 9.25)).unwrap();
        assert_eq!(picked.as_str(), "C");
        assert!(ex.selection().contains("C"));
        assert!(ex.toggle_nearest(GeoPoint::new(f64::NAN, 9.0)).is_none());
    }

    #[test]
    fn nearest_zone_toggle_skips_zones_without_trips() {
        let mut ex = explorer();
        let picked = ex.toggle_nearest(GeoPoint::new(50.0, 7.0)).unwrap();
        assert_eq!(picked.as_str(), "A");
        assert!(!ex.selection().contains("E"));
    }

    #[test]
    fn clear_selection_empties_the_view() {
        let mut ex = explorer();
        ex.toggle_zone("A").unwrap();
        ex.clear_selection();
        assert!(ex.view().is_empty());
        assert_eq!(ex.selection_label(), "None");

        let renders = ex.renders();
        ex.clear_selection();
        assert_eq!(ex.renders(), renders);
    }

    #[test]
    fn hour_controls() {
        let mut ex = explorer();
        ex.toggle_zone("A").unwrap();
        assert_eq!(ex.hour_summary(), "24 / 24 hours selected");

        ex.select_no_hours();
        assert!(ex.view().is_empty());
        assert_eq!(ex.hour_summary(), "0 / 24 hours selected");

        assert!(ex.toggle_hour(Hour::new(17).unwrap()));
        assert_eq!(ex.view().summary.outbound_total, 4.0);
        assert_eq!(ex.view().summary.inbound_total, 1.0);

        assert!(!ex.toggle_hour(Hour::new(17).unwrap()));
        ex.select_all_hours();
        assert_eq!(ex.filter().hours, HourSet::ALL);
    }

    #[test]
    fn mode_and_distance_filters() {
        let mut ex = explorer();
        ex.toggle_zone("A").unwrap();

        ex.set_mode(ModeFilter::from("bike"));
        assert_eq!(ex.view().summary.outbound_total, 4.0);

        ex.set_mode(ModeFilter::All);
        ex.set_max_distance(5.0);
        assert_eq!(ex.view().summary.outbound_total, 5.0);

        ex.set_min_distance(10.0);
        assert_eq!(ex.filter().distance.max_km, 10.0);
        assert!(ex.view().is_empty());
    }

    #[test]
    fn edge_limits_and_channels() {
        let mut ex = explorer();
        ex.toggle_zone("A").unwrap();

        ex.set_max_edges(1);
        let out: Vec<_> = ex.view().lines_in(Channel::Outbound).map(|l| l.edge.count).collect();
        assert_eq!(out, vec![5.0]);

        ex.set_min_count(3.0);
        assert_eq!(ex.view().lines_in(Channel::Inbound).count(), 0);

        ex.show_outbound(false);
        assert!(ex.view().is_empty());
    }

    #[test]
    fn reset_restores_defaults_and_keeps_selection() {
        let mut ex = explorer();
        ex.toggle_zone("A").unwrap();
        ex.set_mode(ModeFilter::from("car"));
        ex.select_no_hours();
        ex.set_min_distance(20.0);
        ex.set_max_edges(1);

        ex.reset_filters();
        assert_eq!(ex.filter(), &od_flow::FilterSpec::for_store(ex.trips()));
        assert!(ex.selection().contains("A"));
        assert_eq!(ex.view().summary.outbound_total, 9.0);
    }

    #[test]
    fn unchanged_filter_does_not_recompute() {
        let mut ex = explorer();
        let renders = ex.renders();
        ex.set_max_edges(80);
        ex.show_inbound(true);
        ex.set_mode(ModeFilter::All);
        assert_eq!(ex.renders(), renders);
    }

    #[test]
    fn every_change_reaches_the_observer() {
        let mut ex = ExplorerBuilder::new(dataset())
            .observer(Recorder::default())
            .build()
            .unwrap();
        ex.toggle_zone("A").unwrap();
        ex.set_min_count(2.0);
        ex.show_inbound(false);

        let rec = ex.observer();
        assert_eq!(rec.views.len(), 4);
        assert_eq!(rec.queries[3].filter.min_count, 2.0);
        assert!(!rec.queries[3].filter.show_inbound);
        assert_eq!(rec.views.last(), Some(ex.view()));
    }

    #[test]
    fn borrowed_observer() {
        let mut rec = Recorder::default();
        {
            let mut ex = ExplorerBuilder::new(dataset()).observer(&mut rec).build().unwrap();
            ex.toggle_zone("B").unwrap();
        }
        assert_eq!(rec.views.len(), 2);
        assert!(!rec.closed);
    }

    #[test]
    fn close_notifies_the_observer() {
        let ex = ExplorerBuilder::new(dataset())
            .observer(Recorder::default())
            .build()
            .unwrap();
        let rec = ex.close();
        assert!(rec.closed);
        assert_eq!(rec.views.len(), 1);
    }

    #[test]
    fn framing_uses_active_zones() {
        let ex = explorer();
        let bounds = ex.bounds().unwrap();
        // E has no trips, so it does not stretch the box.
        assert_eq!(bounds.min, GeoPoint::new(52.0, 9.0));
        assert_eq!(bounds.max, GeoPoint::new(52.4, 9.4));
        assert_eq!(ex.active_zones().count(), 3);
        assert_eq!(ex.modes().collect::<Vec<_>>(), vec!["car", "bike"]);
    }

    #[test]
    fn framing_falls_back_without_trips() {
        let data = Dataset::from_readers(
            Cursor::new(SHAPES),
            Cursor::new("StartId,EndId,Count,Start Hour,DistanceInKm,Mot\n"),
        )
        .unwrap();
        let ex = ExplorerBuilder::new(data).build().unwrap();
        assert!(ex.bounds().is_none());
        assert_eq!(ex.initial_center(), Bounds::FALLBACK_CENTER);
        assert_eq!(ex.filter().distance.max_km, 1.0);
    }
}
