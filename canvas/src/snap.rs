//! Snapping: entity snap points, angle guides, and hover dwell tracking.
//!
//! Two candidate generators feed one resolution step. The entity generator
//! offers every committed entity's snap points, their pairwise intersections,
//! and snap points the user has dwelt on long enough. The angle generator
//! casts rays from construction anchors at every multiple of the angle step
//! and offers the nearest ray point. [`resolve_click`] picks whichever
//! candidate is strictly closer to the mouse within the snap radius.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::consts::{ANGLE_GUIDE_LENGTH, MIN_ANGLE_STEP_DEG};
use crate::entity::{Entity, SnapPoint, SnapPointKind};
use crate::geom::{Point, Segment, Vector};
use crate::proximity::closest_snap_point_within_radius;

/// Output of one snap pass, consumed by the renderer and by click resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawHelpers {
    /// The winning angle guide, drawn as a full line.
    pub angle_guide: Option<Segment>,
    /// Closest entity-derived snap point within the radius.
    pub entity_snap_point: Option<SnapPoint>,
    /// Closest point on any angle guide within the radius.
    pub angle_snap_point: Option<SnapPoint>,
}

/// Rays from `anchor` at every multiple of `angle_step_deg` in `[0, 360)`.
///
/// A non-positive or non-finite step yields no guides. Steps below
/// [`MIN_ANGLE_STEP_DEG`] are raised to it.
#[must_use]
pub fn angle_guides(anchor: Point, angle_step_deg: f64) -> Vec<Segment> {
    if !angle_step_deg.is_finite() || angle_step_deg <= 0.0 {
        return Vec::new();
    }
    let angle_step_deg = angle_step_deg.max(MIN_ANGLE_STEP_DEG);
    let mut guides = Vec::new();
    let mut k = 0u32;
    loop {
        let angle = angle_step_deg * f64::from(k);
        if angle >= 360.0 {
            break;
        }
        let dir = Vector::from_angle_deg(angle);
        guides.push(Segment::new(anchor, anchor + dir * ANGLE_GUIDE_LENGTH));
        k += 1;
    }
    guides
}

/// All snap points offered by committed entities: their own snap points plus
/// pairwise intersections.
#[must_use]
pub fn entity_snap_points(entities: &[Entity]) -> Vec<SnapPoint> {
    let mut out: Vec<SnapPoint> = entities.iter().flat_map(Entity::snap_points).collect();
    for (i, a) in entities.iter().enumerate() {
        for b in &entities[i + 1..] {
            out.extend(
                a.intersections(b)
                    .into_iter()
                    .map(|p| SnapPoint::new(p, SnapPointKind::Intersection)),
            );
        }
    }
    out
}

/// Compute snap candidates for the current mouse position.
///
/// `anchors` are the points guides radiate from (the active construction's
/// first point and any eligible hovered snap points). `eligible` snap points
/// are also offered as entity snap candidates.
#[must_use]
pub fn draw_helpers(
    entities: &[Entity],
    anchors: &[Point],
    eligible: &[SnapPoint],
    mouse: Point,
    angle_step_deg: f64,
    radius: f64,
) -> DrawHelpers {
    let mut candidates = entity_snap_points(entities);
    candidates.extend_from_slice(eligible);
    let entity_snap_point = closest_snap_point_within_radius(&candidates, mouse, radius);

    let mut best: Option<(f64, Segment, Point)> = None;
    for anchor in anchors {
        for guide in angle_guides(*anchor, angle_step_deg) {
            let on_guide = guide.closest_point(mouse);
            let d = on_guide.distance_to(mouse);
            if d > radius {
                continue;
            }
            if best.is_none_or(|(bd, _, _)| d < bd) {
                best = Some((d, guide, on_guide));
            }
        }
    }

    DrawHelpers {
        angle_guide: best.map(|(_, guide, _)| guide),
        entity_snap_point,
        angle_snap_point: best.map(|(_, _, p)| SnapPoint::new(p, SnapPointKind::AngleGuide)),
    }
}

/// The point a click at `mouse` should feed into construction.
///
/// Prefers whichever candidate is strictly closer; on a tie the entity snap
/// point wins. Falls back to `mouse` when neither is within `radius`.
#[must_use]
pub fn resolve_click(helpers: &DrawHelpers, mouse: Point, radius: f64) -> Point {
    let candidates: Vec<SnapPoint> = [helpers.entity_snap_point, helpers.angle_snap_point]
        .into_iter()
        .flatten()
        .collect();
    closest_snap_point_within_radius(&candidates, mouse, radius).map_or(mouse, |sp| sp.point)
}

// =============================================================
// Hover dwell tracking
// =============================================================

/// A snap point and how long it has been continuously hovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoveredSnapPoint {
    pub snap_point: SnapPoint,
    pub milliseconds_hovered: f64,
}

/// Tracks dwell time on snap points so that lingering on one turns it into
/// an angle-guide anchor.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    hovered: Vec<HoveredSnapPoint>,
    dwell_ms: f64,
}

impl HoverTracker {
    #[must_use]
    pub fn new(dwell_ms: f64) -> Self {
        Self { hovered: Vec::new(), dwell_ms }
    }

    /// Advance by one frame.
    ///
    /// `current` is the closest snap point this frame. It ages by
    /// `elapsed_ms` while `mouse` stays within `radius` of it. Points that
    /// are neither current nor already eligible are dropped, so their time
    /// restarts from zero when hovered again.
    pub fn track(&mut self, current: Option<SnapPoint>, mouse: Point, radius: f64, elapsed_ms: f64) {
        let current = current.filter(|sp| sp.point.distance_to(mouse) <= radius);
        let dwell_ms = self.dwell_ms;
        self.hovered.retain(|h| {
            h.milliseconds_hovered > dwell_ms || current.is_some_and(|sp| sp.point.approx_eq(h.snap_point.point))
        });

        let Some(current) = current else {
            return;
        };
        match self
            .hovered
            .iter_mut()
            .find(|h| h.snap_point.point.approx_eq(current.point))
        {
            Some(existing) => existing.milliseconds_hovered += elapsed_ms.max(0.0),
            None => self.hovered.push(HoveredSnapPoint { snap_point: current, milliseconds_hovered: 0.0 }),
        }
    }

    /// Snap points hovered for longer than the dwell time.
    #[must_use]
    pub fn eligible(&self) -> Vec<SnapPoint> {
        self.hovered
            .iter()
            .filter(|h| h.milliseconds_hovered > self.dwell_ms)
            .map(|h| h.snap_point)
            .collect()
    }

    #[must_use]
    pub fn hovered(&self) -> &[HoveredSnapPoint] {
        &self.hovered
    }

    pub fn clear(&mut self) {
        self.hovered.clear();
    }
}
