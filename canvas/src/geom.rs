//! Planar geometry primitives: points, vectors, boxes, segments and circles.
//!
//! Everything above this module (entities, proximity search, snapping,
//! selection, SVG export) speaks in terms of these types. Distances are
//! Euclidean in world units. Nearest-point queries return a [`Segment`] that
//! starts on the queried shape and ends on the argument shape; a zero-length
//! segment means the shapes touch.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::fmt::Write;
use std::ops::{Add, Mul, Sub};

use crate::consts::GEOMETRY_EPSILON;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Whether two points coincide within [`GEOMETRY_EPSILON`].
    #[must_use]
    pub fn approx_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() <= GEOMETRY_EPSILON && (self.y - other.y).abs() <= GEOMETRY_EPSILON
    }

    #[must_use]
    pub fn translate(self, by: Vector) -> Self {
        self + by
    }

    #[must_use]
    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle_deg` degrees counter-clockwise from +x.
    #[must_use]
    pub fn from_angle_deg(angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        Self::new(rad.cos(), rad.sin())
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn dot(self, other: Vector) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Z component of the 3D cross product.
    #[must_use]
    pub fn cross(self, other: Vector) -> f64 {
        self.x.mul_add(other.y, -(self.y * other.x))
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Vector> {
        let len = self.length();
        if len <= GEOMETRY_EPSILON {
            return None;
        }
        Some(Self::new(self.x / len, self.y / len))
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

// =============================================================
// Aabb
// =============================================================

/// Axis-aligned box with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Aabb {
    /// Build a box from any two opposite corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self { xmin: a.x.min(b.x), ymin: a.y.min(b.y), xmax: a.x.max(b.x), ymax: a.y.max(b.y) }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    #[must_use]
    pub fn min(&self) -> Point {
        Point::new(self.xmin, self.ymin)
    }

    #[must_use]
    pub fn max(&self) -> Point {
        Point::new(self.xmax, self.ymax)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.min().midpoint(self.max())
    }

    /// A box with no area (either side collapsed).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= GEOMETRY_EPSILON || self.height() <= GEOMETRY_EPSILON
    }

    /// Corners in order: min, (max x, min y), max, (min x, max y).
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.xmin, self.ymin),
            Point::new(self.xmax, self.ymin),
            Point::new(self.xmax, self.ymax),
            Point::new(self.xmin, self.ymax),
        ]
    }

    /// Edges following [`Aabb::corners`] order, closing back to the first corner.
    #[must_use]
    pub fn edges(&self) -> [Segment; 4] {
        let [a, b, c, d] = self.corners();
        [Segment::new(a, b), Segment::new(b, c), Segment::new(c, d), Segment::new(d, a)]
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.xmin - GEOMETRY_EPSILON
            && p.x <= self.xmax + GEOMETRY_EPSILON
            && p.y >= self.ymin - GEOMETRY_EPSILON
            && p.y <= self.ymax + GEOMETRY_EPSILON
    }

    /// Whether `other` lies entirely within this box.
    #[must_use]
    pub fn contains_box(&self, other: &Aabb) -> bool {
        self.contains_point(other.min()) && self.contains_point(other.max())
    }

    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }

    #[must_use]
    pub fn translate(&self, by: Vector) -> Aabb {
        Aabb::from_corners(self.min() + by, self.max() + by)
    }
}

// =============================================================
// Segment
// =============================================================

/// Directed line segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    #[must_use]
    pub fn middle(&self) -> Point {
        self.start.midpoint(self.end)
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length() <= GEOMETRY_EPSILON
    }

    #[must_use]
    pub fn reversed(&self) -> Segment {
        Segment::new(self.end, self.start)
    }

    #[must_use]
    pub fn translate(&self, by: Vector) -> Segment {
        Segment::new(self.start + by, self.end + by)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_corners(self.start, self.end)
    }

    /// The point on the segment nearest to `p`.
    #[must_use]
    pub fn closest_point(&self, p: Point) -> Point {
        let d = self.end - self.start;
        let len_sq = d.dot(d);
        if len_sq <= GEOMETRY_EPSILON * GEOMETRY_EPSILON {
            return self.start;
        }
        let t = ((p - self.start).dot(d) / len_sq).clamp(0.0, 1.0);
        self.start + d * t
    }

    /// Whether `p` lies on the segment within `tolerance`.
    #[must_use]
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.closest_point(p).distance_to(p) <= tolerance
    }

    /// Crossing points with another segment. Collinear overlaps report the
    /// endpoints of each segment that lie on the other.
    #[must_use]
    pub fn intersect_segment(&self, other: &Segment) -> Vec<Point> {
        let r = self.end - self.start;
        let s = other.end - other.start;
        let denom = r.cross(s);
        let qp = other.start - self.start;

        if denom.abs() <= GEOMETRY_EPSILON {
            if qp.cross(r).abs() > GEOMETRY_EPSILON {
                return Vec::new();
            }
            let mut out = Vec::new();
            for p in [other.start, other.end] {
                if self.contains_point(p, GEOMETRY_EPSILON) {
                    push_unique(&mut out, p);
                }
            }
            for p in [self.start, self.end] {
                if other.contains_point(p, GEOMETRY_EPSILON) {
                    push_unique(&mut out, p);
                }
            }
            return out;
        }

        let t = qp.cross(s) / denom;
        let u = qp.cross(r) / denom;
        let range = -GEOMETRY_EPSILON..=1.0 + GEOMETRY_EPSILON;
        if range.contains(&t) && range.contains(&u) {
            vec![self.start + r * t]
        } else {
            Vec::new()
        }
    }

    /// Crossing points with a circle's outline.
    #[must_use]
    pub fn intersect_circle(&self, circle: &Circle) -> Vec<Point> {
        let d = self.end - self.start;
        let f = self.start - circle.center;
        let a = d.dot(d);
        if a <= GEOMETRY_EPSILON * GEOMETRY_EPSILON {
            return if circle.contains_point_on_outline(self.start, GEOMETRY_EPSILON) {
                vec![self.start]
            } else {
                Vec::new()
            };
        }
        let b = 2.0 * f.dot(d);
        let c = f.dot(f) - circle.radius * circle.radius;
        let disc = b.mul_add(b, -(4.0 * a * c));
        if disc < 0.0 {
            return Vec::new();
        }
        let sqrt_disc = disc.sqrt();
        let mut out = Vec::new();
        for t in [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)] {
            if (-GEOMETRY_EPSILON..=1.0 + GEOMETRY_EPSILON).contains(&t) {
                push_unique(&mut out, self.start + d * t);
            }
        }
        out
    }
}

// =============================================================
// Circle
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.radius <= GEOMETRY_EPSILON
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb {
            xmin: self.center.x - self.radius,
            ymin: self.center.y - self.radius,
            xmax: self.center.x + self.radius,
            ymax: self.center.y + self.radius,
        }
    }

    /// Points at 0°, 90°, 180° and 270°.
    #[must_use]
    pub fn quadrant_points(&self) -> [Point; 4] {
        let Point { x, y } = self.center;
        let r = self.radius;
        [Point::new(x + r, y), Point::new(x, y + r), Point::new(x - r, y), Point::new(x, y - r)]
    }

    /// The outline point nearest to `p`. The center maps to the 0° point.
    #[must_use]
    pub fn closest_point(&self, p: Point) -> Point {
        let dir = (p - self.center).normalized().unwrap_or(Vector::new(1.0, 0.0));
        self.center + dir * self.radius
    }

    #[must_use]
    pub fn contains_point_on_outline(&self, p: Point, tolerance: f64) -> bool {
        (self.center.distance_to(p) - self.radius).abs() <= tolerance
    }

    #[must_use]
    pub fn translate(&self, by: Vector) -> Circle {
        Circle::new(self.center + by, self.radius)
    }

    /// Crossing points of two outlines. Coincident circles report none.
    #[must_use]
    pub fn intersect_circle(&self, other: &Circle) -> Vec<Point> {
        let delta = other.center - self.center;
        let d = delta.length();
        if d <= GEOMETRY_EPSILON {
            return Vec::new();
        }
        if d > self.radius + other.radius + GEOMETRY_EPSILON || d < (self.radius - other.radius).abs() - GEOMETRY_EPSILON {
            return Vec::new();
        }
        let a = (self.radius.powi(2) - other.radius.powi(2) + d * d) / (2.0 * d);
        let h = (self.radius.powi(2) - a * a).max(0.0).sqrt();
        let u = delta * (1.0 / d);
        let base = self.center + u * a;
        let perp = Vector::new(-u.y, u.x);
        let mut out = Vec::new();
        push_unique(&mut out, base + perp * h);
        push_unique(&mut out, base - perp * h);
        out
    }
}

// =============================================================
// Shape
// =============================================================

/// Any geometric payload an entity can own or be queried against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Point(Point),
    Segment(Segment),
    Box(Aabb),
    Circle(Circle),
}

/// Outline pieces a shape decomposes into for pairwise queries.
#[derive(Debug, Clone, Copy)]
enum Piece {
    Point(Point),
    Segment(Segment),
    Circle(Circle),
}

impl Shape {
    fn pieces(&self) -> Vec<Piece> {
        match self {
            Shape::Point(p) => vec![Piece::Point(*p)],
            Shape::Segment(s) => vec![Piece::Segment(*s)],
            Shape::Box(b) => b.edges().into_iter().map(Piece::Segment).collect(),
            Shape::Circle(c) => vec![Piece::Circle(*c)],
        }
    }

    /// Whether the payload has collapsed (zero length, area or radius).
    /// A point is never degenerate.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match self {
            Shape::Point(_) => false,
            Shape::Segment(s) => s.is_degenerate(),
            Shape::Box(b) => b.is_degenerate(),
            Shape::Circle(c) => c.is_degenerate(),
        }
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Shape::Point(p) => Aabb::from_corners(*p, *p),
            Shape::Segment(s) => s.bounding_box(),
            Shape::Box(b) => *b,
            Shape::Circle(c) => c.bounding_box(),
        }
    }

    #[must_use]
    pub fn translate(&self, by: Vector) -> Shape {
        match self {
            Shape::Point(p) => Shape::Point(*p + by),
            Shape::Segment(s) => Shape::Segment(s.translate(by)),
            Shape::Box(b) => Shape::Box(b.translate(by)),
            Shape::Circle(c) => Shape::Circle(c.translate(by)),
        }
    }

    /// Shortest distance between the outlines of two shapes and the segment
    /// realising it (from `self` to `other`).
    #[must_use]
    pub fn distance_to(&self, other: &Shape) -> (f64, Segment) {
        let mut best: Option<(f64, Segment)> = None;
        for a in self.pieces() {
            for b in other.pieces() {
                let candidate = piece_distance(a, b);
                if best.is_none_or(|(d, _)| candidate.0 < d) {
                    best = Some(candidate);
                }
            }
        }
        // Every shape decomposes into at least one piece.
        best.unwrap_or_else(|| {
            let p = self.bounding_box().min();
            (f64::INFINITY, Segment::new(p, p))
        })
    }

    /// Points where the outlines of two shapes meet.
    #[must_use]
    pub fn intersect(&self, other: &Shape) -> Vec<Point> {
        let mut out = Vec::new();
        for a in self.pieces() {
            for b in other.pieces() {
                for p in piece_intersections(a, b) {
                    push_unique(&mut out, p);
                }
            }
        }
        out
    }

    /// Whether `p` lies on the outline within `tolerance`.
    #[must_use]
    pub fn contains_point_on_outline(&self, p: Point, tolerance: f64) -> bool {
        self.pieces().into_iter().any(|piece| match piece {
            Piece::Point(q) => q.distance_to(p) <= tolerance,
            Piece::Segment(s) => s.contains_point(p, tolerance),
            Piece::Circle(c) => c.contains_point_on_outline(p, tolerance),
        })
    }

    /// SVG element for this shape with the given stroke.
    #[must_use]
    pub fn svg(&self, stroke: &str, stroke_width: f64) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let written = match self {
            Shape::Point(p) => write!(out, r#"<circle cx="{}" cy="{}" r="1" fill="{stroke}" />"#, p.x, p.y),
            Shape::Segment(s) => write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{stroke_width}" />"#,
                s.start.x, s.start.y, s.end.x, s.end.y
            ),
            Shape::Box(b) => write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" stroke="{stroke}" stroke-width="{stroke_width}" fill="none" />"#,
                b.xmin,
                b.ymin,
                b.width(),
                b.height()
            ),
            Shape::Circle(c) => write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" stroke="{stroke}" stroke-width="{stroke_width}" fill="none" />"#,
                c.center.x, c.center.y, c.radius
            ),
        };
        if written.is_err() {
            out.clear();
        }
        out
    }
}

// =============================================================
// Pairwise helpers
// =============================================================

fn push_unique(out: &mut Vec<Point>, p: Point) {
    if !out.iter().any(|q| q.approx_eq(p)) {
        out.push(p);
    }
}

fn touching(p: Point) -> (f64, Segment) {
    (0.0, Segment::new(p, p))
}

fn flip((d, s): (f64, Segment)) -> (f64, Segment) {
    (d, s.reversed())
}

fn point_to_segment(p: Point, s: &Segment) -> (f64, Segment) {
    let q = s.closest_point(p);
    (p.distance_to(q), Segment::new(p, q))
}

fn point_to_circle(p: Point, c: &Circle) -> (f64, Segment) {
    let q = c.closest_point(p);
    (p.distance_to(q), Segment::new(p, q))
}

fn segment_to_segment(a: &Segment, b: &Segment) -> (f64, Segment) {
    if let Some(p) = a.intersect_segment(b).first() {
        return touching(*p);
    }
    let candidates = [
        point_to_segment(a.start, b),
        point_to_segment(a.end, b),
        flip(point_to_segment(b.start, a)),
        flip(point_to_segment(b.end, a)),
    ];
    nearest(candidates)
}

fn segment_to_circle(s: &Segment, c: &Circle) -> (f64, Segment) {
    if let Some(p) = s.intersect_circle(c).first() {
        return touching(*p);
    }
    let q = s.closest_point(c.center);
    if q.distance_to(c.center) > c.radius {
        return point_to_circle(q, c);
    }
    // Entirely inside: the endpoint nearest the outline is the farther one from the center.
    let far = if s.start.distance_to(c.center) >= s.end.distance_to(c.center) { s.start } else { s.end };
    point_to_circle(far, c)
}

fn circle_to_circle(a: &Circle, b: &Circle) -> (f64, Segment) {
    if let Some(p) = a.intersect_circle(b).first() {
        return touching(*p);
    }
    let delta = b.center - a.center;
    let d = delta.length();
    let u = delta.normalized().unwrap_or(Vector::new(1.0, 0.0));
    let (pa, pb) = if d > a.radius + b.radius {
        (a.center + u * a.radius, b.center - u * b.radius)
    } else if a.radius >= b.radius {
        (a.center + u * a.radius, b.center + u * b.radius)
    } else {
        (a.center - u * a.radius, b.center - u * b.radius)
    };
    (pa.distance_to(pb), Segment::new(pa, pb))
}

fn nearest<const N: usize>(candidates: [(f64, Segment); N]) -> (f64, Segment) {
    let mut best = candidates[0];
    for c in candidates.into_iter().skip(1) {
        if c.0 < best.0 {
            best = c;
        }
    }
    best
}

fn piece_distance(a: Piece, b: Piece) -> (f64, Segment) {
    match (a, b) {
        (Piece::Point(p), Piece::Point(q)) => (p.distance_to(q), Segment::new(p, q)),
        (Piece::Point(p), Piece::Segment(s)) => point_to_segment(p, &s),
        (Piece::Segment(s), Piece::Point(p)) => flip(point_to_segment(p, &s)),
        (Piece::Point(p), Piece::Circle(c)) => point_to_circle(p, &c),
        (Piece::Circle(c), Piece::Point(p)) => flip(point_to_circle(p, &c)),
        (Piece::Segment(s), Piece::Segment(t)) => segment_to_segment(&s, &t),
        (Piece::Segment(s), Piece::Circle(c)) => segment_to_circle(&s, &c),
        (Piece::Circle(c), Piece::Segment(s)) => flip(segment_to_circle(&s, &c)),
        (Piece::Circle(c), Piece::Circle(d)) => circle_to_circle(&c, &d),
    }
}

fn piece_intersections(a: Piece, b: Piece) -> Vec<Point> {
    match (a, b) {
        (Piece::Point(p), other) | (other, Piece::Point(p)) => {
            let on = match other {
                Piece::Point(q) => q.approx_eq(p),
                Piece::Segment(s) => s.contains_point(p, GEOMETRY_EPSILON),
                Piece::Circle(c) => c.contains_point_on_outline(p, GEOMETRY_EPSILON),
            };
            if on { vec![p] } else { Vec::new() }
        }
        (Piece::Segment(s), Piece::Segment(t)) => s.intersect_segment(&t),
        (Piece::Segment(s), Piece::Circle(c)) | (Piece::Circle(c), Piece::Segment(s)) => s.intersect_circle(&c),
        (Piece::Circle(c), Piece::Circle(d)) => c.intersect_circle(&d),
    }
}
