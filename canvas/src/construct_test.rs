use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn pair(a: Point, b: Point) -> Option<(Point, Point)> {
    Some((a, b))
}

// =============================================================
// Construction transition
// =============================================================

#[test]
fn empty_send_anchors() {
    let (next, step) = Construction::Empty.send(pt(1.0, 2.0));
    assert_eq!(next, Construction::Anchored(pt(1.0, 2.0)));
    assert_eq!(step, Step::Anchored);
}

#[test]
fn anchored_send_completes_with_both_points() {
    let (next, step) = Construction::Anchored(pt(1.0, 2.0)).send(pt(3.0, 4.0));
    assert_eq!(next, Construction::Anchored(pt(1.0, 2.0)));
    assert_eq!(step, Step::Complete { anchor: pt(1.0, 2.0), point: pt(3.0, 4.0) });
}

#[test]
fn default_is_empty() {
    assert_eq!(Construction::default(), Construction::Empty);
    assert!(Construction::default().anchor().is_none());
}

// =============================================================
// Draft
// =============================================================

#[test]
fn draft_two_clicks_complete() {
    let mut d: Draft<(Point, Point)> = Draft::empty();
    assert!(!d.send(pt(0.0, 0.0), pair));
    assert_eq!(d.anchor(), Some(pt(0.0, 0.0)));
    assert!(d.payload().is_none());
    assert!(d.send(pt(5.0, 5.0), pair));
    assert_eq!(d.payload(), Some((pt(0.0, 0.0), pt(5.0, 5.0))));
}

#[test]
fn draft_degenerate_click_is_ignored() {
    let mut d: Draft<(Point, Point)> = Draft::empty();
    d.send(pt(0.0, 0.0), pair);
    assert!(!d.send(pt(0.0, 0.0), |_, _| None));
    assert_eq!(d.anchor(), Some(pt(0.0, 0.0)));
    assert!(!d.is_complete());
    // A later, valid click still completes.
    assert!(d.send(pt(1.0, 0.0), pair));
}

#[test]
fn draft_complete_ignores_further_clicks() {
    let mut d = Draft::finished(pt(0.0, 0.0), (pt(0.0, 0.0), pt(1.0, 1.0)));
    assert!(d.send(pt(9.0, 9.0), pair));
    assert_eq!(d.payload(), Some((pt(0.0, 0.0), pt(1.0, 1.0))));
}

#[test]
fn draft_anchored_starts_with_anchor() {
    let d: Draft<(Point, Point)> = Draft::anchored(pt(3.0, 3.0));
    assert_eq!(d.anchor(), Some(pt(3.0, 3.0)));
    assert!(!d.is_complete());
}
