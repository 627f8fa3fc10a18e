//! Hit-testing: resolving a world-space point to a shape or an editable
//! path point.
//!
//! Scans run in reverse z-order — topmost layer first, last-drawn shape
//! first within a layer, invisible layers skipped — so the shape the user
//! sees on top is the one that wins. A path point hit always takes
//! precedence over a body hit at the same location.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::POINT_HIT_RADIUS;
use crate::doc::{Scene, Shape, ShapeId, ShapeKind};
use crate::geom;

/// What the cursor landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// An editable point of a path shape.
    PathPoint { shape: ShapeId, index: usize },
    /// The body of a shape.
    Body { shape: ShapeId },
}

impl Hit {
    /// The shape this hit belongs to, whichever part was hit.
    #[must_use]
    pub fn shape(self) -> ShapeId {
        match self {
            Self::PathPoint { shape, .. } | Self::Body { shape } => shape,
        }
    }
}

/// Find the topmost path point within [`POINT_HIT_RADIUS`] world units of
/// `world`. Points are checked in path order within each shape.
#[must_use]
pub fn pick_point(scene: &Scene, world: Point) -> Option<(ShapeId, usize)> {
    for shape in scene.shapes_topmost_first() {
        if let ShapeKind::Path { points, .. } = &shape.kind {
            for (index, p) in points.iter().enumerate() {
                if geom::distance(world, *p) <= POINT_HIT_RADIUS {
                    return Some((shape.id, index));
                }
            }
        }
    }
    None
}

/// Find the topmost shape whose body contains `world`.
#[must_use]
pub fn pick_shape(scene: &Scene, world: Point) -> Option<ShapeId> {
    scene
        .shapes_topmost_first()
        .find(|shape| geom::point_in_shape(world, shape))
        .map(|shape| shape.id)
}

/// Resolve `world` to the best hit: a path point if one is in range,
/// otherwise a shape body.
#[must_use]
pub fn hit_test(scene: &Scene, world: Point) -> Option<Hit> {
    if let Some((shape, index)) = pick_point(scene, world) {
        return Some(Hit::PathPoint { shape, index });
    }
    pick_shape(scene, world).map(|shape| Hit::Body { shape })
}

/// The shape a hit refers to, looked up in the scene.
#[must_use]
pub fn hit_shape<'a>(scene: &'a Scene, hit: Hit) -> Option<&'a Shape> {
    scene.find(hit.shape())
}
