#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_BASE_SPACING, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP_IN, ZOOM_STEP_OUT};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom over the drawing.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom), clamped to
/// [`ZOOM_MIN`]..=[`ZOOM_MAX`] by every zoom operation.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Multiply the zoom factor by `factor`, clamping to the allowed range.
    ///
    /// With an `anchor` screen point, the pan is recomputed so the world
    /// point under the anchor before the zoom is still under it afterwards
    /// (zoom-to-cursor). Without one, the pan is left alone and the view
    /// scales about the screen origin.
    pub fn zoom_by(&mut self, factor: f64, anchor: Option<Point>) {
        let world = anchor.map(|a| self.screen_to_world(a));
        self.zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        if let (Some(anchor), Some(world)) = (anchor, world) {
            self.pan_x = anchor.x - world.x * self.zoom;
            self.pan_y = anchor.y - world.y * self.zoom;
        }
    }

    /// Translate the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Grid line spacing in screen pixels at the current zoom.
    #[must_use]
    pub fn grid_spacing(&self) -> f64 {
        GRID_BASE_SPACING * self.zoom
    }

    /// Screen-space offset of the first grid line, always in `[0, spacing)`.
    #[must_use]
    pub fn grid_phase(&self) -> Point {
        let spacing = self.grid_spacing();
        Point {
            x: self.pan_x.rem_euclid(spacing),
            y: self.pan_y.rem_euclid(spacing),
        }
    }
}

/// Map a wheel delta to a zoom multiplier: scrolling down zooms out.
#[must_use]
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    if delta_y > 0.0 { ZOOM_STEP_OUT } else { ZOOM_STEP_IN }
}
