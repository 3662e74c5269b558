use super::*;

#[test]
fn half_scrub_is_half_progress() {
    // Container is 3 viewports tall: 2 viewports of scrub distance.
    let g = ScrollGeometry {
        top: -800.0,
        height: 2400.0,
        viewport_height: 800.0,
    };
    assert_eq!(g.scrub_distance(), 1600.0);
    assert_eq!(g.raw_progress(), 0.5);
}

#[test]
fn progress_clamps_before_and_after_region() {
    let above = ScrollGeometry {
        top: 300.0,
        height: 1600.0,
        viewport_height: 800.0,
    };
    assert_eq!(above.raw_progress(), 0.0);

    let past = ScrollGeometry {
        top: -5000.0,
        height: 1600.0,
        viewport_height: 800.0,
    };
    assert_eq!(past.raw_progress(), 1.0);
}

#[test]
fn zero_or_negative_scrub_distance_is_zero_progress() {
    for height in [800.0, 400.0, 0.0] {
        let g = ScrollGeometry {
            top: -200.0,
            height,
            viewport_height: 800.0,
        };
        let p = g.raw_progress();
        assert!(p.is_finite());
        assert_eq!(p, 0.0);
    }
}

#[test]
fn non_finite_geometry_is_zero_progress() {
    let g = ScrollGeometry {
        top: f64::NAN,
        height: 1600.0,
        viewport_height: 800.0,
    };
    assert_eq!(g.raw_progress(), 0.0);

    let g = ScrollGeometry {
        top: -10.0,
        height: f64::INFINITY,
        viewport_height: 800.0,
    };
    assert_eq!(g.raw_progress(), 0.0);
}

#[test]
fn at_progress_round_trips() {
    for p in [0.0, 0.25, 0.5, 1.0] {
        let g = ScrollGeometry::at_progress(720.0, 1.0, p);
        assert!((g.raw_progress() - p).abs() < 1e-12);
    }
}

#[test]
fn shared_geometry_updates_are_visible_to_clones() {
    let host = SharedGeometry::new(ScrollGeometry::at_progress(100.0, 1.0, 0.0));
    let container: Box<dyn ScrollContainer> = Box::new(host.clone());
    host.set_top(-50.0);
    assert_eq!(container.geometry().raw_progress(), 0.5);
    host.set(ScrollGeometry::default());
    assert_eq!(container.geometry(), ScrollGeometry::default());
}
