//! Shared numeric constants for the canvas crate.

// ── Proximity ───────────────────────────────────────────────────

/// Screen-space distance in pixels under which the closest entity is highlighted.
pub const HIGHLIGHT_ENTITY_DISTANCE_PX: f64 = 10.0;

/// Screen-space radius in pixels within which a snap point captures a click.
pub const SNAP_POINT_DISTANCE_PX: f64 = 15.0;

/// Dwell time in milliseconds before a hovered snap point anchors angle guides.
pub const HOVERED_SNAP_POINT_TIME_MS: f64 = 500.0;

// ── Guides ──────────────────────────────────────────────────────

/// Default angular step between angle guides, in degrees.
pub const DEFAULT_ANGLE_STEP_DEG: f64 = 45.0;

/// Smallest accepted angle step. Guide count is `360 / step`.
pub const MIN_ANGLE_STEP_DEG: f64 = 1.0;

/// Length of an angle guide ray in world units. Long enough to leave any viewport.
pub const ANGLE_GUIDE_LENGTH: f64 = 100_000.0;

// ── Viewport ────────────────────────────────────────────────────

/// Fractional scale change per wheel notch.
pub const MOUSE_ZOOM_MULTIPLIER: f64 = 0.05;

// ── Geometry ────────────────────────────────────────────────────

/// Tolerance for coincidence and on-shape tests, in world units.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

// ── History / export ────────────────────────────────────────────

/// Maximum number of undo snapshots retained.
pub const HISTORY_LIMIT: usize = 100;

/// Margin around the drawing in exported SVG, in world units.
pub const SVG_MARGIN: f64 = 10.0;

// ── Style ───────────────────────────────────────────────────────

/// Default stroke color for new entities.
pub const DEFAULT_LINE_COLOR: &str = "#fff";

/// Default stroke width for new entities, in world units.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
