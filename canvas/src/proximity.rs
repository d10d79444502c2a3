//! Closest-entity and closest-snap-point search.
//!
//! Both searches are a single linear pass; the target scale is hand-drawn
//! diagrams, so there is no spatial index.

#[cfg(test)]
#[path = "proximity_test.rs"]
mod proximity_test;

use crate::entity::{Entity, SnapPoint};
use crate::geom::{Point, Segment, Shape};

/// Result of [`find_closest_entity`].
#[derive(Debug, Clone, Copy)]
pub struct ClosestEntity<'a> {
    /// World-space distance from the entity outline to the query point.
    pub distance: f64,
    /// Segment from the nearest point on the entity to the query point.
    pub segment: Segment,
    pub entity: &'a Entity,
}

/// Find the entity whose outline is nearest to `point`.
///
/// Entities without a payload are skipped. Ties keep the first entity
/// encountered. Returns `None` when no entity has a payload.
#[must_use]
pub fn find_closest_entity<'a, I>(point: Point, entities: I) -> Option<ClosestEntity<'a>>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let target = Shape::Point(point);
    let mut best: Option<ClosestEntity<'a>> = None;
    for entity in entities {
        let Some((distance, segment)) = entity.distance_to(&target) else {
            continue;
        };
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(ClosestEntity { distance, segment, entity });
        }
    }
    best
}

/// Like [`find_closest_entity`] but only accepts a hit within `max_distance`.
#[must_use]
pub fn find_closest_entity_within<'a, I>(point: Point, entities: I, max_distance: f64) -> Option<ClosestEntity<'a>>
where
    I: IntoIterator<Item = &'a Entity>,
{
    find_closest_entity(point, entities).filter(|hit| hit.distance < max_distance)
}

/// The candidate nearest to `point`, if it lies within `radius`.
///
/// Ties keep the first candidate.
#[must_use]
pub fn closest_snap_point_within_radius(candidates: &[SnapPoint], point: Point, radius: f64) -> Option<SnapPoint> {
    let mut best: Option<(f64, SnapPoint)> = None;
    for candidate in candidates {
        let d = candidate.point.distance_to(point);
        if d > radius {
            continue;
        }
        if best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, *candidate));
        }
    }
    best.map(|(_, sp)| sp)
}
