//! Scene model: shapes, layers, and the mutation operations over them.
//!
//! This module defines the core data types that describe what is on the
//! canvas (`Shape`, `ShapeKind`, `Layer`) and the `Scene` that owns them.
//! The scene owns every shape exclusively; a shape belongs to exactly one
//! layer, assigned at creation and never silently reassigned. Callers refer
//! to shapes by `ShapeId`, so a stale reference after undo/redo or deletion
//! simply stops resolving instead of dangling.
//!
//! Data flows into this layer from the input engine (mutations) and from
//! file loads (serde deserialization of whole scenes). The renderer reads
//! layers bottom-to-top to determine draw order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{EDGE_SNAP_MAX_DIST, PATH_MIN_POINTS, SNAP_UNIT};
use crate::geom;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// Geometry of a shape, tagged the way it is stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle anchored at a corner. Extents may be negative
    /// while a drag is in progress; finalized rectangles are normalized.
    #[serde(rename = "rectangle")]
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// Circle around a center point.
    Circle { x: f64, y: f64, radius: f64 },
    /// Straight segment from a start point plus a delta to the end point.
    Line { x: f64, y: f64, width: f64, height: f64 },
    /// Free-form polyline. At least one point while drawing, two to
    /// persist, three before `closed` means anything for containment.
    Path {
        points: Vec<Point>,
        closed: bool,
        #[serde(default)]
        filled: bool,
    },
}

/// A shape as stored in the scene and on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier; regenerated for files that predate ids.
    #[serde(default = "Uuid::new_v4")]
    pub id: ShapeId,
    /// Geometry variant.
    #[serde(flatten)]
    pub kind: ShapeKind,
    /// Stroke/fill color as a hex string.
    pub color: String,
    /// Stroke width in world units, at least 1.
    #[serde(rename = "lineWidth", default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Hit points the derived game block starts with.
    #[serde(default = "default_health")]
    pub health: i32,
    /// Gameplay effect tag, passed through to the game untouched.
    #[serde(default = "default_effect")]
    pub effect: String,
    /// Index of the owning layer at creation time.
    #[serde(default)]
    pub layer: usize,
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_health() -> i32 {
    1
}

fn default_effect() -> String {
    "none".to_owned()
}

impl Shape {
    /// The shape's anchor point: rectangle corner, circle center, line
    /// start, or the top-left of a path's bounding box.
    #[must_use]
    pub fn origin(&self) -> Point {
        match &self.kind {
            ShapeKind::Rect { x, y, .. }
            | ShapeKind::Circle { x, y, .. }
            | ShapeKind::Line { x, y, .. } => Point::new(*x, *y),
            ShapeKind::Path { points, .. } => {
                let b = geom::bounding_box(points);
                Point::new(b.x, b.y)
            }
        }
    }

    /// Move the shape so its anchor lands on `pos`. No bounds clamping.
    /// Paths translate every point by the same delta.
    pub fn move_to(&mut self, pos: Point) {
        let origin = self.origin();
        let dx = pos.x - origin.x;
        let dy = pos.y - origin.y;
        match &mut self.kind {
            ShapeKind::Rect { x, y, .. }
            | ShapeKind::Circle { x, y, .. }
            | ShapeKind::Line { x, y, .. } => {
                *x = pos.x;
                *y = pos.y;
            }
            ShapeKind::Path { points, .. } => {
                for p in points {
                    p.x += dx;
                    p.y += dy;
                }
            }
        }
    }
}

/// A named group of shapes with a visibility toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub shapes: Vec<Shape>,
}

impl Layer {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            visible: true,
            shapes: Vec::new(),
        }
    }
}

/// The complete set of layers being edited.
///
/// Invariant: at least one layer exists at all times. Constructors start
/// with one, and deserialized scenes are repaired by [`Scene::ensure_layer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub layers: Vec<Layer>,
}

impl Scene {
    /// A scene with a single empty default layer.
    #[must_use]
    pub fn new() -> Self {
        Self { layers: vec![Layer::new("Layer 1")] }
    }

    /// Restore the at-least-one-layer invariant after a load.
    pub fn ensure_layer(&mut self) {
        if self.layers.is_empty() {
            self.layers.push(Layer::new("Layer 1"));
        }
    }

    /// Append a new empty layer and return its index.
    pub fn add_layer(&mut self, name: &str) -> usize {
        self.layers.push(Layer::new(name));
        self.layers.len() - 1
    }

    /// Toggle a layer's visibility. Out-of-range indexes are ignored.
    pub fn set_layer_visible(&mut self, index: usize, visible: bool) {
        if let Some(layer) = self.layers.get_mut(index) {
            layer.visible = visible;
        }
    }

    /// Append `shape` to the layer at `layer_index` (clamped to the last
    /// layer) and record that layer on the shape. Returns the shape's id.
    ///
    /// History snapshots are the caller's responsibility; this only mutates.
    pub fn add_shape(&mut self, layer_index: usize, mut shape: Shape) -> ShapeId {
        self.ensure_layer();
        let index = layer_index.min(self.layers.len() - 1);
        shape.layer = index;
        let id = shape.id;
        self.layers[index].shapes.push(shape);
        id
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        self.layers
            .iter()
            .flat_map(|l| l.shapes.iter())
            .find(|s| s.id == id)
    }

    /// Look up a shape by id for mutation.
    pub fn find_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.layers
            .iter_mut()
            .flat_map(|l| l.shapes.iter_mut())
            .find(|s| s.id == id)
    }

    /// Remove a shape by id from whichever layer holds it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        for layer in &mut self.layers {
            if let Some(pos) = layer.shapes.iter().position(|s| s.id == id) {
                return Some(layer.shapes.remove(pos));
            }
        }
        None
    }

    /// Empty every layer's shape list, keeping the layers themselves.
    pub fn clear_shapes(&mut self) {
        for layer in &mut self.layers {
            layer.shapes.clear();
        }
    }

    /// Shapes of visible layers in draw order: layers bottom-to-top,
    /// shapes in insertion order within each layer.
    pub fn visible_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.layers
            .iter()
            .filter(|l| l.visible)
            .flat_map(|l| l.shapes.iter())
    }

    /// Shapes of visible layers in hit-test order: topmost layer first,
    /// last-drawn shape first within each layer.
    pub fn shapes_topmost_first(&self) -> impl Iterator<Item = &Shape> {
        self.layers
            .iter()
            .rev()
            .filter(|l| l.visible)
            .flat_map(|l| l.shapes.iter().rev())
    }

    /// Total shape count across all layers.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.layers.iter().map(|l| l.shapes.len()).sum()
    }

    /// Insert `point` into the path `id` on the edge nearest to it.
    ///
    /// The edge is chosen by minimum point-to-segment distance over
    /// consecutive point pairs (including the wrap-around edge of a closed
    /// path), ties broken by the lowest edge index. If no edge comes within
    /// [`EDGE_SNAP_MAX_DIST`] world units the point appends at the end.
    /// Returns the insertion index, or `None` if `id` is not a path.
    pub fn insert_path_point(&mut self, id: ShapeId, point: Point) -> Option<usize> {
        let shape = self.find_mut(id)?;
        let ShapeKind::Path { points, closed, .. } = &mut shape.kind else {
            return None;
        };

        let index = nearest_edge_insertion(points, *closed, point);
        points.insert(index, point);
        Some(index)
    }

    /// Delete point `index` from the path `id`. Refused (returning `false`)
    /// if the path would drop below [`PATH_MIN_POINTS`] points or the
    /// arguments don't resolve.
    pub fn delete_path_point(&mut self, id: ShapeId, index: usize) -> bool {
        let Some(shape) = self.find_mut(id) else {
            return false;
        };
        let ShapeKind::Path { points, .. } = &mut shape.kind else {
            return false;
        };
        if points.len() <= PATH_MIN_POINTS || index >= points.len() {
            return false;
        }
        points.remove(index);
        true
    }

    /// Move a single path point to `pos`. Ignored if `id`/`index` don't
    /// resolve to a path point.
    pub fn move_path_point(&mut self, id: ShapeId, index: usize, pos: Point) {
        if let Some(shape) = self.find_mut(id) {
            if let ShapeKind::Path { points, .. } = &mut shape.kind {
                if let Some(p) = points.get_mut(index) {
                    *p = pos;
                }
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Index at which a new point should be inserted into `points`.
fn nearest_edge_insertion(points: &[Point], closed: bool, point: Point) -> usize {
    let mut best: Option<(usize, f64)> = None;

    if points.len() >= 2 {
        let edge_count = if closed { points.len() } else { points.len() - 1 };
        for i in 0..edge_count {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            let d = geom::point_to_segment_distance(point, a, b);
            if d <= EDGE_SNAP_MAX_DIST && best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
    }

    match best {
        Some((edge, _)) => edge + 1,
        None => points.len(),
    }
}

/// Round each coordinate to the nearest multiple of the snap grid unit.
#[must_use]
pub fn snap_to_grid(p: Point) -> Point {
    Point {
        x: (p.x / SNAP_UNIT).round() * SNAP_UNIT,
        y: (p.y / SNAP_UNIT).round() * SNAP_UNIT,
    }
}
