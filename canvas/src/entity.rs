//! Entity model: the drawable shapes and their shared capabilities.
//!
//! An [`Entity`] carries an immutable id, a stroke style, and an
//! [`EntityKind`] holding the variant's geometric payload. Line-like variants
//! wrap their payload in a [`Draft`] so the same value represents both the
//! in-progress construction and the committed shape. Queries return `None`
//! (or `false`, or an empty list) when the payload is absent or degenerate,
//! which lets the proximity and selection passes skip such entities.
//!
//! Selection and highlight are not stored here; see [`crate::input::UiState`].

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use uuid::Uuid;

use crate::consts::{DEFAULT_LINE_COLOR, DEFAULT_LINE_WIDTH, GEOMETRY_EPSILON};
use crate::construct::Draft;
use crate::geom::{Aabb, Circle, Point, Segment, Shape, Vector};

/// Unique identifier for an entity.
pub type EntityId = Uuid;

/// Discriminant tag for the entity variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Point,
    Line,
    Rectangle,
    Circle,
    SelectionRectangle,
}

impl EntityType {
    /// The persisted type tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::SelectionRectangle => "selection_rectangle",
        }
    }
}

/// What makes a snap point geometrically significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapPointKind {
    /// End of a line, corner of a rectangle, or a lone point.
    Endpoint,
    /// Middle of a line or rectangle edge.
    Midpoint,
    /// Circle center.
    Center,
    /// Circle point at 0°, 90°, 180° or 270°.
    Quadrant,
    /// Where two entities cross.
    Intersection,
    /// Nearest point on an angle guide.
    AngleGuide,
}

/// A point a construction click can be drawn toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub point: Point,
    pub kind: SnapPointKind,
}

impl SnapPoint {
    #[must_use]
    pub fn new(point: Point, kind: SnapPointKind) -> Self {
        Self { point, kind }
    }
}

/// How a finished selection rectangle picks entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Dragged left to right: only fully enclosed entities.
    Containment,
    /// Dragged right to left: enclosed or boundary-crossing entities.
    Intersection,
}

/// Variant payloads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Point(Point),
    Line(Draft<Segment>),
    Rectangle(Draft<Aabb>),
    Circle(Draft<Circle>),
    /// The drag from first to second click; the direction picks the mode.
    SelectionRectangle(Draft<Segment>),
}

/// A drawable entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub line_color: String,
    pub line_width: f64,
    pub kind: EntityKind,
}

impl Entity {
    /// New entity with a fresh id and the default style.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self::with_id(Uuid::new_v4(), kind)
    }

    /// New entity with a known id and the default style.
    #[must_use]
    pub fn with_id(id: EntityId, kind: EntityKind) -> Self {
        Self { id, line_color: DEFAULT_LINE_COLOR.to_owned(), line_width: DEFAULT_LINE_WIDTH, kind }
    }

    #[must_use]
    pub fn point(p: Point) -> Self {
        Self::new(EntityKind::Point(p))
    }

    #[must_use]
    pub fn line() -> Self {
        Self::new(EntityKind::Line(Draft::empty()))
    }

    /// A line already anchored at `start`, used to chain polylines.
    #[must_use]
    pub fn line_from(start: Point) -> Self {
        Self::new(EntityKind::Line(Draft::anchored(start)))
    }

    #[must_use]
    pub fn rectangle() -> Self {
        Self::new(EntityKind::Rectangle(Draft::empty()))
    }

    #[must_use]
    pub fn circle() -> Self {
        Self::new(EntityKind::Circle(Draft::empty()))
    }

    #[must_use]
    pub fn selection_rectangle() -> Self {
        Self::new(EntityKind::SelectionRectangle(Draft::empty()))
    }

    #[must_use]
    pub fn entity_type(&self) -> EntityType {
        match self.kind {
            EntityKind::Point(_) => EntityType::Point,
            EntityKind::Line(_) => EntityType::Line,
            EntityKind::Rectangle(_) => EntityType::Rectangle,
            EntityKind::Circle(_) => EntityType::Circle,
            EntityKind::SelectionRectangle(_) => EntityType::SelectionRectangle,
        }
    }

    /// Feed a construction click. Returns `true` once the entity is complete.
    pub fn send(&mut self, point: Point) -> bool {
        // A zero-area selection drag is still a valid (empty) selection.
        let allow_degenerate = matches!(self.kind, EntityKind::SelectionRectangle(_));
        match &mut self.kind {
            EntityKind::Point(_) => true,
            EntityKind::Line(draft) | EntityKind::SelectionRectangle(draft) => draft.send(point, |a, b| {
                let seg = Segment::new(a, b);
                (allow_degenerate || !seg.is_degenerate()).then_some(seg)
            }),
            EntityKind::Rectangle(draft) => draft.send(point, |a, b| {
                let rect = Aabb::from_corners(a, b);
                (!rect.is_degenerate()).then_some(rect)
            }),
            EntityKind::Circle(draft) => draft.send(point, |center, rim| {
                let circle = Circle::new(center, center.distance_to(rim));
                (!circle.is_degenerate()).then_some(circle)
            }),
        }
    }

    /// Whether construction has finished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match &self.kind {
            EntityKind::Point(_) => true,
            EntityKind::Line(d) | EntityKind::SelectionRectangle(d) => d.is_complete(),
            EntityKind::Rectangle(d) => d.is_complete(),
            EntityKind::Circle(d) => d.is_complete(),
        }
    }

    /// The geometric payload, or `None` while incomplete or degenerate.
    #[must_use]
    pub fn shape(&self) -> Option<Shape> {
        let shape = match &self.kind {
            EntityKind::Point(p) => Shape::Point(*p),
            EntityKind::Line(d) => Shape::Segment(d.payload()?),
            EntityKind::Rectangle(d) => Shape::Box(d.payload()?),
            EntityKind::Circle(d) => Shape::Circle(d.payload()?),
            EntityKind::SelectionRectangle(d) => {
                let drag = d.payload()?;
                Shape::Box(Aabb::from_corners(drag.start, drag.end))
            }
        };
        if shape.is_degenerate() && !matches!(self.kind, EntityKind::SelectionRectangle(_)) {
            return None;
        }
        Some(shape)
    }

    /// The shape to draw while construction is in progress, stretched from
    /// the anchor to `mouse`. Complete entities return their own shape.
    #[must_use]
    pub fn preview_shape(&self, mouse: Point) -> Option<Shape> {
        if self.is_complete() {
            return self.shape();
        }
        let anchor = self.first_point()?;
        let shape = match self.kind {
            EntityKind::Point(p) => Shape::Point(p),
            EntityKind::Line(_) => Shape::Segment(Segment::new(anchor, mouse)),
            EntityKind::Rectangle(_) | EntityKind::SelectionRectangle(_) => Shape::Box(Aabb::from_corners(anchor, mouse)),
            EntityKind::Circle(_) => Shape::Circle(Circle::new(anchor, anchor.distance_to(mouse))),
        };
        Some(shape)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.shape().map(|s| s.bounding_box())
    }

    /// Whether the outline crosses the outline of `selection`.
    ///
    /// A point has no outline to cross and never intersects.
    #[must_use]
    pub fn intersects_with_box(&self, selection: &Aabb) -> bool {
        if matches!(self.kind, EntityKind::Point(_)) {
            return false;
        }
        self.shape()
            .is_some_and(|shape| !shape.intersect(&Shape::Box(*selection)).is_empty())
    }

    #[must_use]
    pub fn is_contained_in_box(&self, selection: &Aabb) -> bool {
        self.bounding_box()
            .is_some_and(|bbox| selection.contains_box(&bbox))
    }

    /// Distance from this entity's outline to `shape`, with the connecting
    /// segment starting on this entity.
    #[must_use]
    pub fn distance_to(&self, shape: &Shape) -> Option<(f64, Segment)> {
        self.shape().map(|own| own.distance_to(shape))
    }

    /// Significant points of the finished shape.
    #[must_use]
    pub fn snap_points(&self) -> Vec<SnapPoint> {
        use SnapPointKind::{Center, Endpoint, Midpoint, Quadrant};

        if matches!(self.kind, EntityKind::SelectionRectangle(_)) {
            return Vec::new();
        }
        let Some(shape) = self.shape() else {
            return Vec::new();
        };
        match shape {
            Shape::Point(p) => vec![SnapPoint::new(p, Endpoint)],
            Shape::Segment(s) => vec![
                SnapPoint::new(s.start, Endpoint),
                SnapPoint::new(s.end, Endpoint),
                SnapPoint::new(s.middle(), Midpoint),
            ],
            Shape::Box(b) => {
                let mut out: Vec<SnapPoint> = b.corners().into_iter().map(|p| SnapPoint::new(p, Endpoint)).collect();
                out.extend(b.edges().iter().map(|e| SnapPoint::new(e.middle(), Midpoint)));
                out
            }
            Shape::Circle(c) => {
                let mut out = vec![SnapPoint::new(c.center, Center)];
                out.extend(c.quadrant_points().into_iter().map(|p| SnapPoint::new(p, Quadrant)));
                out
            }
        }
    }

    /// Points where this entity's outline meets `other`'s.
    #[must_use]
    pub fn intersections(&self, other: &Entity) -> Vec<Point> {
        match (self.shape(), other.shape()) {
            (Some(a), Some(b)) => a.intersect(&b),
            _ => Vec::new(),
        }
    }

    /// The first construction click, available even before completion.
    #[must_use]
    pub fn first_point(&self) -> Option<Point> {
        match &self.kind {
            EntityKind::Point(p) => Some(*p),
            EntityKind::Line(d) | EntityKind::SelectionRectangle(d) => d.anchor(),
            EntityKind::Rectangle(d) => d.anchor(),
            EntityKind::Circle(d) => d.anchor(),
        }
    }

    /// Whether `point` lies on the outline.
    #[must_use]
    pub fn contains_point_on_shape(&self, point: Point) -> bool {
        self.shape()
            .is_some_and(|shape| shape.contains_point_on_outline(point, GEOMETRY_EPSILON.sqrt()))
    }

    /// Selection mode of a selection rectangle, once both clicks are in.
    #[must_use]
    pub fn selection_mode(&self) -> Option<SelectionMode> {
        let EntityKind::SelectionRectangle(d) = &self.kind else {
            return None;
        };
        let drag = d.payload()?;
        Some(if drag.end.x < drag.start.x { SelectionMode::Intersection } else { SelectionMode::Containment })
    }

    /// SVG element for the finished shape, moved by `offset`.
    #[must_use]
    pub fn svg_fragment(&self, offset: Vector) -> Option<String> {
        if matches!(self.kind, EntityKind::SelectionRectangle(_)) {
            return None;
        }
        let shape = self.shape()?.translate(offset);
        Some(shape.svg(&self.line_color, self.line_width))
    }
}
