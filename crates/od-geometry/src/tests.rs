//! Unit tests for od-geometry.

#[cfg(test)]
mod offset {
    use od_core::GeoPoint;

    use crate::offset::{MAX_OFFSET, MIN_OFFSET};
    use crate::{Side, offset_magnitude, offset_segment};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn zero_length_reference_is_identity() {
        let s = GeoPoint::new(52.0, 9.0);
        let e = GeoPoint::new(52.3, 9.5);
        let r = GeoPoint::new(10.0, 10.0);
        assert_eq!(offset_segment(s, e, r, r, Side::Left), [s, e]);
        assert_eq!(offset_segment(s, e, r, r, Side::Right), [s, e]);
    }

    #[test]
    fn non_finite_reference_is_identity() {
        let s = GeoPoint::new(52.0, 9.0);
        let e = GeoPoint::new(52.3, 9.5);
        let bad = GeoPoint::new(f64::NAN, 9.0);
        assert_eq!(offset_segment(s, e, s, bad, Side::Left), [s, e]);
        let inf = GeoPoint::new(f64::INFINITY, 9.0);
        assert_eq!(offset_segment(s, e, s, inf, Side::Left), [s, e]);
    }

    #[test]
    fn magnitude_is_clamped() {
        assert_eq!(offset_magnitude(0.0), MIN_OFFSET);
        assert_eq!(offset_magnitude(0.1), MIN_OFFSET); // 0.003 → floor
        assert!(close(offset_magnitude(1.0), 0.03));
        assert_eq!(offset_magnitude(2.0), MAX_OFFSET); // 0.06 → cap
        assert_eq!(offset_magnitude(1_000.0), MAX_OFFSET);
    }

    #[test]
    fn magnitude_is_monotone() {
        let mut prev = 0.0;
        for i in 0..400 {
            let m = offset_magnitude(i as f64 * 0.01);
            assert!(m >= prev);
            assert!((MIN_OFFSET..=MAX_OFFSET).contains(&m));
            prev = m;
        }
    }

    #[test]
    fn northward_reference_shifts_east_on_left() {
        // d = (+1 lat, 0 lon) → normal = (-d.lon, d.lat) / |d| = (0, +1)
        let s = GeoPoint::new(0.0, 0.0);
        let e = GeoPoint::new(1.0, 0.0);
        let [a, b] = offset_segment(s, e, s, e, Side::Left);
        assert!(close(a.lat, 0.0) && close(a.lon, 0.03));
        assert!(close(b.lat, 1.0) && close(b.lon, 0.03));

        let [c, d] = offset_segment(s, e, s, e, Side::Right);
        assert!(close(c.lon, -0.03) && close(d.lon, -0.03));
    }

    #[test]
    fn shift_is_parallel_and_perpendicular() {
        let s = GeoPoint::new(52.0, 9.0);
        let e = GeoPoint::new(52.3, 9.4);
        let [a, b] = offset_segment(s, e, s, e, Side::Left);

        // Same shift applied to both endpoints.
        let da = a.delta_from(s);
        let db = b.delta_from(e);
        assert!(close(da.0, db.0) && close(da.1, db.1));

        // Perpendicular to the reference direction.
        let (r_lat, r_lon) = e.delta_from(s);
        assert!(close(da.0 * r_lat + da.1 * r_lon, 0.0));

        // Length equals the clamped magnitude (|d| = 0.5 → 0.015).
        assert!(close(da.0.hypot(da.1), 0.015));
    }

    #[test]
    fn opposite_directions_use_opposite_lanes() {
        // A→B and B→A with the same canonical reference A→B.
        let a = GeoPoint::new(52.0, 9.0);
        let b = GeoPoint::new(52.2, 9.3);
        let ab = offset_segment(a, b, a, b, Side::Left);
        let ba = offset_segment(b, a, a, b, Side::Right);

        // Each lane is shifted by the same amount in opposite directions.
        let shift_ab = ab[0].delta_from(a);
        let shift_ba = ba[1].delta_from(a);
        assert!(close(shift_ab.0, -shift_ba.0));
        assert!(close(shift_ab.1, -shift_ba.1));
        assert_ne!(ab[0], ba[1]);
    }

    #[test]
    fn side_helpers() {
        assert_eq!(Side::Left.sign(), 1.0);
        assert_eq!(Side::Right.sign(), -1.0);
        assert_eq!(Side::Left.opposite(), Side::Right);
    }
}

#[cfg(test)]
mod weight {
    use crate::line_weight;

    #[test]
    fn flat_when_no_maximum() {
        assert_eq!(line_weight(5.0, 0.0), 2.0);
        assert_eq!(line_weight(5.0, -1.0), 2.0);
    }

    #[test]
    fn endpoints_of_scale() {
        assert_eq!(line_weight(0.0, 10.0), 1.5);
        assert_eq!(line_weight(10.0, 10.0), 11.5);
        assert_eq!(line_weight(5.0, 10.0), 6.5);
    }
}
