use super::*;

const EPSILON: f64 = 1e-6;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Entity {
    let mut e = Entity::line();
    e.send(pt(x0, y0));
    e.send(pt(x1, y1));
    e
}

fn snap(x: f64, y: f64) -> SnapPoint {
    SnapPoint::new(pt(x, y), SnapPointKind::Endpoint)
}

// =============================================================
// angle_guides
// =============================================================

#[test]
fn guides_cover_full_turn() {
    let guides = angle_guides(pt(0.0, 0.0), 45.0);
    assert_eq!(guides.len(), 8);
    assert_eq!(angle_guides(pt(0.0, 0.0), 15.0).len(), 24);
}

#[test]
fn first_guide_points_along_x() {
    let guides = angle_guides(pt(3.0, 4.0), 90.0);
    let first = guides[0];
    assert_eq!(first.start, pt(3.0, 4.0));
    assert!((first.end.x - (3.0 + ANGLE_GUIDE_LENGTH)).abs() < EPSILON);
    assert!((first.end.y - 4.0).abs() < EPSILON);
}

#[test]
fn non_positive_step_has_no_guides() {
    assert!(angle_guides(pt(0.0, 0.0), 0.0).is_empty());
    assert!(angle_guides(pt(0.0, 0.0), -10.0).is_empty());
    assert!(angle_guides(pt(0.0, 0.0), f64::NAN).is_empty());
}

#[test]
fn tiny_step_is_raised_to_minimum() {
    assert_eq!(angle_guides(pt(0.0, 0.0), 0.0001).len(), 360);
    assert_eq!(angle_guides(pt(0.0, 0.0), MIN_ANGLE_STEP_DEG).len(), 360);
}

// =============================================================
// draw_helpers
// =============================================================

#[test]
fn angle_snap_lands_on_diagonal_guide() {
    let helpers = draw_helpers(&[], &[pt(0.0, 0.0)], &[], pt(10.5, 9.5), 45.0, 5.0);
    let sp = helpers.angle_snap_point.unwrap();
    assert_eq!(sp.kind, SnapPointKind::AngleGuide);
    assert!((sp.point.x - 10.0).abs() < EPSILON);
    assert!((sp.point.y - 10.0).abs() < EPSILON);
    let guide = helpers.angle_guide.unwrap();
    assert!(guide.contains_point(sp.point, EPSILON));
}

#[test]
fn no_anchor_means_no_angle_snap() {
    let helpers = draw_helpers(&[], &[], &[], pt(10.0, 9.0), 45.0, 5.0);
    assert!(helpers.angle_snap_point.is_none());
    assert!(helpers.angle_guide.is_none());
}

#[test]
fn entity_snap_picks_nearby_endpoint() {
    let entities = vec![line(0.0, 0.0, 100.0, 0.0)];
    let helpers = draw_helpers(&entities, &[], &[], pt(98.0, 2.0), 45.0, 5.0);
    let sp = helpers.entity_snap_point.unwrap();
    assert_eq!(sp.point, pt(100.0, 0.0));
    assert_eq!(sp.kind, SnapPointKind::Endpoint);
}

#[test]
fn entity_snap_outside_radius_is_none() {
    let entities = vec![line(0.0, 0.0, 100.0, 0.0)];
    let helpers = draw_helpers(&entities, &[], &[], pt(30.0, 30.0), 45.0, 5.0);
    assert!(helpers.entity_snap_point.is_none());
}

#[test]
fn crossing_lines_offer_intersection_snap() {
    let entities = vec![line(0.0, 0.0, 10.0, 10.0), line(0.0, 10.0, 10.0, 0.0)];
    let points = entity_snap_points(&entities);
    assert!(points
        .iter()
        .any(|sp| sp.kind == SnapPointKind::Intersection && sp.point.approx_eq(pt(5.0, 5.0))));
}

#[test]
fn eligible_hovered_points_are_snap_candidates() {
    let helpers = draw_helpers(&[], &[], &[snap(50.0, 50.0)], pt(51.0, 50.0), 45.0, 5.0);
    assert_eq!(helpers.entity_snap_point.unwrap().point, pt(50.0, 50.0));
}

// =============================================================
// resolve_click
// =============================================================

#[test]
fn click_prefers_strictly_closer_candidate() {
    let helpers = DrawHelpers {
        angle_guide: None,
        entity_snap_point: Some(snap(3.0, 0.0)),
        angle_snap_point: Some(SnapPoint::new(pt(1.0, 0.0), SnapPointKind::AngleGuide)),
    };
    assert_eq!(resolve_click(&helpers, pt(0.0, 0.0), 5.0), pt(1.0, 0.0));
}

#[test]
fn click_tie_prefers_entity_snap() {
    let helpers = DrawHelpers {
        angle_guide: None,
        entity_snap_point: Some(snap(2.0, 0.0)),
        angle_snap_point: Some(SnapPoint::new(pt(-2.0, 0.0), SnapPointKind::AngleGuide)),
    };
    assert_eq!(resolve_click(&helpers, pt(0.0, 0.0), 5.0), pt(2.0, 0.0));
}

#[test]
fn click_without_candidates_uses_mouse() {
    let helpers = DrawHelpers::default();
    assert_eq!(resolve_click(&helpers, pt(7.0, 8.0), 5.0), pt(7.0, 8.0));
}

// =============================================================
// HoverTracker
// =============================================================

#[test]
fn dwell_accumulates_while_hovering() {
    let mut tracker = HoverTracker::new(500.0);
    let target = snap(10.0, 10.0);
    tracker.track(Some(target), pt(10.0, 11.0), 5.0, 16.0);
    assert_eq!(tracker.hovered().len(), 1);
    assert!(tracker.hovered()[0].milliseconds_hovered.abs() < EPSILON);
    for _ in 0..10 {
        tracker.track(Some(target), pt(10.0, 11.0), 5.0, 16.0);
    }
    assert!((tracker.hovered()[0].milliseconds_hovered - 160.0).abs() < EPSILON);
    assert!(tracker.eligible().is_empty());
}

#[test]
fn point_becomes_eligible_after_dwell() {
    let mut tracker = HoverTracker::new(500.0);
    let target = snap(10.0, 10.0);
    tracker.track(Some(target), pt(10.0, 10.0), 5.0, 0.0);
    tracker.track(Some(target), pt(10.0, 10.0), 5.0, 300.0);
    tracker.track(Some(target), pt(10.0, 10.0), 5.0, 300.0);
    assert_eq!(tracker.eligible(), vec![target]);
}

#[test]
fn switching_target_resets_dwell() {
    let mut tracker = HoverTracker::new(500.0);
    let a = snap(0.0, 0.0);
    let b = snap(20.0, 0.0);
    tracker.track(Some(a), pt(0.0, 0.0), 5.0, 0.0);
    tracker.track(Some(a), pt(0.0, 0.0), 5.0, 400.0);
    tracker.track(Some(b), pt(20.0, 0.0), 5.0, 16.0);
    assert_eq!(tracker.hovered().len(), 1);
    assert_eq!(tracker.hovered()[0].snap_point, b);

    tracker.track(Some(a), pt(0.0, 0.0), 5.0, 16.0);
    assert!(tracker.hovered()[0].milliseconds_hovered.abs() < EPSILON);
}

#[test]
fn eligible_points_survive_moving_away() {
    let mut tracker = HoverTracker::new(500.0);
    let a = snap(0.0, 0.0);
    tracker.track(Some(a), pt(0.0, 0.0), 5.0, 0.0);
    tracker.track(Some(a), pt(0.0, 0.0), 5.0, 600.0);
    tracker.track(None, pt(100.0, 100.0), 5.0, 16.0);
    assert_eq!(tracker.eligible(), vec![a]);

    tracker.clear();
    assert!(tracker.eligible().is_empty());
}

#[test]
fn mouse_outside_radius_is_not_hovering() {
    let mut tracker = HoverTracker::new(500.0);
    tracker.track(Some(snap(0.0, 0.0)), pt(50.0, 0.0), 5.0, 16.0);
    assert!(tracker.hovered().is_empty());
}
