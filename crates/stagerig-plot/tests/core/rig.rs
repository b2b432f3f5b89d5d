use proptest::prelude::*;
use stagerig_core::units::{
    bar_length_px, BAR_HEIGHT_PX, ICON_SIZE_PX, SNAP_CLEARANCE_PX, SNAP_SPACING_PX,
};
use stagerig_core::Point;
use stagerig_plot::rig::{find_bar_near, is_near_bar, snap_to_bar, BarFrame, Side};
use stagerig_plot::Item;

fn bar_at(x: f64, y: f64, rotation: f64) -> Item {
    let mut bar = Item::bar(x, y);
    bar.rotation = rotation;
    bar
}

fn attach_distance() -> f64 {
    BAR_HEIGHT_PX / 2.0 + ICON_SIZE_PX / 2.0 + SNAP_CLEARANCE_PX
}

#[test]
fn local_world_round_trip_at_fixed_angles() {
    for &angle in &[-180.0, -90.0, 0.0, 37.0, 90.0, 180.0] {
        let frame = BarFrame::of(&bar_at(150.0, -80.0, angle));
        let p = Point::new(42.5, -17.25);
        let back = frame.to_local(frame.to_world(p));
        assert!(
            (back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9,
            "round trip drifted at {angle} deg: {back:?}"
        );
    }
}

#[test]
fn snap_is_deterministic() {
    let bar = bar_at(200.0, 100.0, 30.0);
    let p = Point::new(230.0, 85.0);
    let a = snap_to_bar(&bar, p);
    let b = snap_to_bar(&bar, p);
    assert_eq!(a, b);
}

#[test]
fn snap_quantizes_to_spacing() {
    let bar = bar_at(0.0, 0.0, 0.0);
    let snap = snap_to_bar(&bar, Point::new(44.0, -20.0));
    // 44 rounds to the station at 30.
    assert!((snap.station_x - SNAP_SPACING_PX).abs() < 1e-9);
    assert_eq!(snap.side, Side::Above);
    assert!((snap.position.y - (-attach_distance())).abs() < 1e-9);
}

#[test]
fn snap_clamps_to_bar_ends() {
    let bar = bar_at(0.0, 0.0, 0.0);
    let far = snap_to_bar(&bar, Point::new(10_000.0, 5.0));
    let half_span = bar_length_px() / 2.0 - ICON_SIZE_PX / 2.0;
    assert!(far.station_x <= half_span + 1e-9);
    assert_eq!(far.side, Side::Below);
}

#[test]
fn snap_side_follows_local_sign_under_rotation() {
    // Bar rotated 90 degrees: local y points along world -x.
    let bar = bar_at(0.0, 0.0, 90.0);
    let left = snap_to_bar(&bar, Point::new(-15.0, 10.0));
    let right = snap_to_bar(&bar, Point::new(15.0, 10.0));
    assert_ne!(left.side, right.side);
}

#[test]
fn near_bar_window_is_looser_than_snap_span() {
    let bar = bar_at(0.0, 0.0, 0.0);
    let past_end = Point::new(bar_length_px() / 2.0 + 20.0, 0.0);
    assert!(is_near_bar(&bar, past_end));
    let way_out = Point::new(bar_length_px() / 2.0 + 500.0, 0.0);
    assert!(!is_near_bar(&bar, way_out));
    let too_far_above = Point::new(0.0, -200.0);
    assert!(!is_near_bar(&bar, too_far_above));
}

#[test]
fn find_bar_near_skips_fixtures_and_distant_bars() {
    let fixture_types = stagerig_core::fixture_catalog();
    let items = vec![
        Item::fixture(&fixture_types[0], 0.0, 0.0, 1),
        Item::bar(1000.0, 1000.0),
        Item::bar(10.0, 10.0),
    ];
    let found = find_bar_near(items.iter(), Point::new(0.0, 0.0)).expect("bar in range");
    assert_eq!(found.uid, items[2].uid);
    assert!(find_bar_near(items.iter(), Point::new(5000.0, 5000.0)).is_none());
}

proptest! {
    #[test]
    fn round_trip_is_identity_for_any_rotation(
        angle in -360.0f64..360.0,
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
    ) {
        let frame = BarFrame::of(&bar_at(77.0, -33.0, angle));
        let p = Point::new(x, y);
        let back = frame.to_world(frame.to_local(p));
        prop_assert!((back.x - p.x).abs() < 1e-6);
        prop_assert!((back.y - p.y).abs() < 1e-6);
    }

    #[test]
    fn snapped_station_is_always_on_grid_and_in_span(
        angle in -360.0f64..360.0,
        x in -600.0f64..600.0,
        y in -200.0f64..200.0,
    ) {
        let bar = bar_at(0.0, 0.0, angle);
        let snap = snap_to_bar(&bar, Point::new(x, y));
        let half_span = bar_length_px() / 2.0 - ICON_SIZE_PX / 2.0;
        prop_assert!(snap.station_x.abs() <= half_span + 1e-9);
        // On grid unless clamped to an end.
        let on_grid = (snap.station_x / SNAP_SPACING_PX).fract().abs() < 1e-9;
        let clamped = (snap.station_x.abs() - half_span).abs() < 1e-9;
        prop_assert!(on_grid || clamped);
    }
}
