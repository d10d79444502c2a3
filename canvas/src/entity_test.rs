#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn built(mut entity: Entity, a: Point, b: Point) -> Entity {
    entity.send(a);
    assert!(entity.send(b));
    entity
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Entity {
    built(Entity::rectangle(), pt(x0, y0), pt(x1, y1))
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Entity {
    built(Entity::line(), pt(x0, y0), pt(x1, y1))
}

fn circle(cx: f64, cy: f64, r: f64) -> Entity {
    built(Entity::circle(), pt(cx, cy), pt(cx + r, cy))
}

fn all_committed() -> Vec<Entity> {
    vec![
        Entity::point(pt(3.0, -2.0)),
        line(0.0, 0.0, 10.0, 5.0),
        rect(10.0, 10.0, 50.0, 50.0),
        circle(5.0, 5.0, 3.0),
    ]
}

// =============================================================
// Construction
// =============================================================

#[test]
fn point_completes_immediately() {
    let mut p = Entity::point(pt(1.0, 1.0));
    assert!(p.send(pt(1.0, 1.0)));
    assert!(p.is_complete());
}

#[test]
fn line_first_send_anchors() {
    let mut l = Entity::line();
    assert!(!l.send(pt(0.0, 0.0)));
    assert!(l.shape().is_none());
    assert_eq!(l.first_point(), Some(pt(0.0, 0.0)));
}

#[test]
fn rectangle_normalizes_corners() {
    let r = rect(50.0, 50.0, 10.0, 10.0);
    assert_eq!(r.bounding_box(), Some(Aabb { xmin: 10.0, ymin: 10.0, xmax: 50.0, ymax: 50.0 }));
    assert_eq!(r.first_point(), Some(pt(50.0, 50.0)));
}

#[test]
fn circle_radius_from_second_click() {
    let mut c = Entity::circle();
    c.send(pt(0.0, 0.0));
    assert!(c.send(pt(3.0, 4.0)));
    assert_eq!(c.shape(), Some(Shape::Circle(Circle::new(pt(0.0, 0.0), 5.0))));
}

#[test]
fn zero_length_line_does_not_complete() {
    let mut l = Entity::line();
    l.send(pt(2.0, 2.0));
    assert!(!l.send(pt(2.0, 2.0)));
    assert!(l.shape().is_none());
}

#[test]
fn zero_area_rectangle_does_not_complete() {
    let mut r = Entity::rectangle();
    r.send(pt(0.0, 0.0));
    assert!(!r.send(pt(10.0, 0.0)));
    assert!(r.bounding_box().is_none());
}

#[test]
fn zero_radius_circle_does_not_complete() {
    let mut c = Entity::circle();
    c.send(pt(1.0, 1.0));
    assert!(!c.send(pt(1.0, 1.0)));
}

#[test]
fn entity_ids_are_unique() {
    assert_ne!(Entity::line().id, Entity::line().id);
}

#[test]
fn default_style() {
    let e = Entity::rectangle();
    assert_eq!(e.line_color, "#fff");
    assert_eq!(e.line_width, 1.0);
}

#[test]
fn entity_type_tags() {
    assert_eq!(Entity::point(pt(0.0, 0.0)).entity_type(), EntityType::Point);
    assert_eq!(Entity::line().entity_type(), EntityType::Line);
    assert_eq!(Entity::rectangle().entity_type(), EntityType::Rectangle);
    assert_eq!(Entity::circle().entity_type(), EntityType::Circle);
    assert_eq!(Entity::selection_rectangle().entity_type(), EntityType::SelectionRectangle);
}

#[test]
fn persisted_type_names() {
    assert_eq!(EntityType::Point.as_str(), "point");
    assert_eq!(EntityType::Line.as_str(), "line");
    assert_eq!(EntityType::Rectangle.as_str(), "rectangle");
    assert_eq!(EntityType::Circle.as_str(), "circle");
}

// =============================================================
// Absent payload
// =============================================================

#[test]
fn incomplete_entity_queries_are_absent() {
    let mut r = Entity::rectangle();
    r.send(pt(0.0, 0.0));
    let b = Aabb::from_corners(pt(-100.0, -100.0), pt(100.0, 100.0));
    assert!(r.shape().is_none());
    assert!(r.bounding_box().is_none());
    assert!(r.distance_to(&Shape::Point(pt(0.0, 0.0))).is_none());
    assert!(!r.intersects_with_box(&b));
    assert!(!r.is_contained_in_box(&b));
    assert!(r.snap_points().is_empty());
    assert!(r.intersections(&line(-5.0, 0.0, 5.0, 0.0)).is_empty());
}

// =============================================================
// Bounding box and snap points
// =============================================================

#[test]
fn bounding_box_contains_every_snap_point() {
    for e in all_committed() {
        let bbox = e.bounding_box().unwrap();
        for sp in e.snap_points() {
            assert!(bbox.contains_point(sp.point), "{:?} outside {:?}", sp, e.entity_type());
        }
    }
}

#[test]
fn line_snap_points() {
    let sps = line(0.0, 0.0, 10.0, 0.0).snap_points();
    assert_eq!(sps.len(), 3);
    assert!(sps.contains(&SnapPoint::new(pt(5.0, 0.0), SnapPointKind::Midpoint)));
}

#[test]
fn rectangle_has_eight_snap_points() {
    let sps = rect(0.0, 0.0, 10.0, 20.0).snap_points();
    assert_eq!(sps.len(), 8);
    assert_eq!(sps.iter().filter(|s| s.kind == SnapPointKind::Endpoint).count(), 4);
    assert!(sps.contains(&SnapPoint::new(pt(10.0, 10.0), SnapPointKind::Midpoint)));
}

#[test]
fn circle_snap_points_center_and_quadrants() {
    let sps = circle(0.0, 0.0, 2.0).snap_points();
    assert_eq!(sps.len(), 5);
    assert_eq!(sps[0], SnapPoint::new(pt(0.0, 0.0), SnapPointKind::Center));
    assert!(sps.contains(&SnapPoint::new(pt(0.0, -2.0), SnapPointKind::Quadrant)));
}

#[test]
fn point_snap_point_is_itself() {
    let sps = Entity::point(pt(7.0, 8.0)).snap_points();
    assert_eq!(sps, vec![SnapPoint::new(pt(7.0, 8.0), SnapPointKind::Endpoint)]);
}

// =============================================================
// Box predicates
// =============================================================

#[test]
fn rectangle_partially_covered_intersects_but_not_contained() {
    let r = rect(10.0, 10.0, 50.0, 50.0);
    let sel = Aabb::from_corners(pt(0.0, 0.0), pt(30.0, 30.0));
    assert!(r.intersects_with_box(&sel));
    assert!(!r.is_contained_in_box(&sel));
}

#[test]
fn rectangle_inside_selection_is_contained() {
    let r = rect(10.0, 10.0, 50.0, 50.0);
    let sel = Aabb::from_corners(pt(0.0, 0.0), pt(60.0, 60.0));
    assert!(r.is_contained_in_box(&sel));
    assert!(!r.intersects_with_box(&sel));
}

#[test]
fn point_never_intersects_box() {
    let p = Entity::point(pt(5.0, 5.0));
    let sel = Aabb::from_corners(pt(0.0, 0.0), pt(10.0, 10.0));
    assert!(!p.intersects_with_box(&sel));
    assert!(p.is_contained_in_box(&sel));
}

#[test]
fn circle_crossing_box_intersects() {
    let c = circle(0.0, 0.0, 5.0);
    let sel = Aabb::from_corners(pt(3.0, -10.0), pt(20.0, 10.0));
    assert!(c.intersects_with_box(&sel));
}

// =============================================================
// Distance / intersections / outline
// =============================================================

#[test]
fn line_distance_to_point() {
    let (d, seg) = line(0.0, 0.0, 10.0, 0.0).distance_to(&Shape::Point(pt(5.0, 2.0))).unwrap();
    assert!((d - 2.0).abs() < 1e-9);
    assert_eq!(seg.start, pt(5.0, 0.0));
}

#[test]
fn rectangle_and_line_intersections() {
    let r = rect(0.0, 0.0, 10.0, 10.0);
    let l = line(-5.0, 5.0, 15.0, 5.0);
    let hits = r.intersections(&l);
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().any(|p| p.approx_eq(pt(0.0, 5.0))));
    assert!(hits.iter().any(|p| p.approx_eq(pt(10.0, 5.0))));
}

#[test]
fn contains_point_on_shape_outline_only() {
    let r = rect(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains_point_on_shape(pt(0.0, 4.0)));
    assert!(!r.contains_point_on_shape(pt(4.0, 4.0)));
}

// =============================================================
// Selection rectangle
// =============================================================

#[test]
fn selection_left_to_right_is_containment() {
    let s = built(Entity::selection_rectangle(), pt(0.0, 0.0), pt(30.0, 30.0));
    assert_eq!(s.selection_mode(), Some(SelectionMode::Containment));
}

#[test]
fn selection_right_to_left_is_intersection() {
    let s = built(Entity::selection_rectangle(), pt(30.0, 30.0), pt(0.0, 0.0));
    assert_eq!(s.selection_mode(), Some(SelectionMode::Intersection));
    assert_eq!(s.bounding_box(), Some(Aabb::from_corners(pt(0.0, 0.0), pt(30.0, 30.0))));
}

#[test]
fn selection_rectangle_has_no_snap_points_or_svg() {
    let s = built(Entity::selection_rectangle(), pt(0.0, 0.0), pt(30.0, 30.0));
    assert!(s.snap_points().is_empty());
    assert!(s.svg_fragment(Vector::new(0.0, 0.0)).is_none());
}

#[test]
fn selection_zero_area_click_completes() {
    let s = built(Entity::selection_rectangle(), pt(4.0, 4.0), pt(4.0, 4.0));
    assert!(s.is_complete());
    assert_eq!(s.selection_mode(), Some(SelectionMode::Containment));
}

// =============================================================
// Preview
// =============================================================

#[test]
fn preview_stretches_to_mouse() {
    let mut l = Entity::line();
    l.send(pt(0.0, 0.0));
    assert_eq!(
        l.preview_shape(pt(3.0, 3.0)),
        Some(Shape::Segment(Segment::new(pt(0.0, 0.0), pt(3.0, 3.0))))
    );
}

#[test]
fn preview_of_empty_draft_is_none() {
    assert!(Entity::circle().preview_shape(pt(1.0, 1.0)).is_none());
}

#[test]
fn svg_fragment_translates() {
    let r = rect(0.0, 0.0, 10.0, 10.0);
    let svg = r.svg_fragment(Vector::new(5.0, 5.0)).unwrap();
    assert!(svg.contains(r#"x="5""#));
    assert!(svg.contains(r##"stroke="#fff""##));
}
