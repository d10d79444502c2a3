#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::geom::{Point, Vector};

/// Pan/zoom state mapping world space onto the canvas.
///
/// `offset` is the world point shown at the top-left screen corner.
/// `scale` is screen pixels per world unit (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: Point,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset: Point::origin(), scale: 1.0 }
    }
}

impl Viewport {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: screen.x / self.scale + self.offset.x,
            y: screen.y / self.scale + self.offset.y,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: (world.x - self.offset.x) * self.scale,
            y: (world.y - self.offset.y) * self.scale,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Shift the view by a screen-space pointer delta so the content follows the cursor.
    pub fn pan_by_screen_delta(&mut self, delta: Vector) {
        self.offset = Point::new(
            self.offset.x - delta.x / self.scale,
            self.offset.y - delta.y / self.scale,
        );
    }

    /// Zoom by one wheel step around `screen_pt`, keeping the world point
    /// under the cursor fixed. `delta_y > 0` zooms out; `0` is a no-op.
    pub fn zoom_at(&mut self, screen_pt: Point, delta_y: f64, multiplier: f64) {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let before = self.screen_to_world(screen_pt);
        let factor = 1.0 - multiplier * delta_y.signum();
        if factor <= 0.0 {
            return;
        }
        self.scale *= factor;
        let after = self.screen_to_world(screen_pt);
        self.offset = self.offset + (before - after);
    }
}
