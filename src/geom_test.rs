#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Shape, ShapeKind};
use uuid::Uuid;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn shape(kind: ShapeKind) -> Shape {
    Shape {
        id: Uuid::new_v4(),
        kind,
        color: "#ff0000".to_owned(),
        stroke_width: 2.0,
        health: 1,
        effect: "none".to_owned(),
        layer: 0,
    }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// distance
// =============================================================

#[test]
fn distance_pythagorean_triple() {
    assert!(approx_eq(distance(pt(0.0, 0.0), pt(3.0, 4.0)), 5.0));
}

#[test]
fn distance_is_symmetric() {
    let a = pt(-2.5, 7.0);
    let b = pt(4.0, -1.0);
    assert!(approx_eq(distance(a, b), distance(b, a)));
}

#[test]
fn distance_to_self_is_zero() {
    let a = pt(12.0, -9.0);
    assert_eq!(distance(a, a), 0.0);
}

// =============================================================
// normalized_rect
// =============================================================

#[test]
fn normalized_rect_passes_positive_extents_through() {
    let r = normalized_rect(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r, Bounds { x: 10.0, y: 20.0, width: 30.0, height: 40.0 });
}

#[test]
fn normalized_rect_flips_negative_extents() {
    let r = normalized_rect(100.0, 100.0, -30.0, -40.0);
    assert_eq!(r, Bounds { x: 70.0, y: 60.0, width: 30.0, height: 40.0 });
}

// =============================================================
// point_in_shape: rectangle
// =============================================================

#[test]
fn rect_contains_interior_point() {
    let s = shape(ShapeKind::Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
    assert!(point_in_shape(pt(5.0, 5.0), &s));
}

#[test]
fn rect_contains_boundary_point() {
    let s = shape(ShapeKind::Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
    assert!(point_in_shape(pt(10.0, 10.0), &s));
}

#[test]
fn rect_excludes_outside_point() {
    let s = shape(ShapeKind::Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
    assert!(!point_in_shape(pt(10.1, 5.0), &s));
}

#[test]
fn negative_drag_rect_is_still_hit_at_visual_location() {
    // Dragged up-left from (50, 50): extents are negative.
    let s = shape(ShapeKind::Rect { x: 50.0, y: 50.0, width: -20.0, height: -10.0 });
    assert!(point_in_shape(pt(40.0, 45.0), &s));
    assert!(!point_in_shape(pt(55.0, 45.0), &s));
}

// =============================================================
// point_in_shape: circle
// =============================================================

#[test]
fn circle_contains_point_exactly_on_radius() {
    let s = shape(ShapeKind::Circle { x: 0.0, y: 0.0, radius: 5.0 });
    assert!(point_in_shape(pt(5.0, 0.0), &s));
}

#[test]
fn circle_excludes_point_just_past_radius() {
    let s = shape(ShapeKind::Circle { x: 0.0, y: 0.0, radius: 5.0 });
    assert!(!point_in_shape(pt(5.0 + 1e-9, 0.0), &s));
}

#[test]
fn circle_containment_respects_center_offset() {
    let s = shape(ShapeKind::Circle { x: 100.0, y: -40.0, radius: 3.0 });
    assert!(point_in_shape(pt(102.0, -40.0), &s));
    assert!(!point_in_shape(pt(104.0, -40.0), &s));
}

// =============================================================
// point_in_shape: line and paths
// =============================================================

#[test]
fn line_has_no_interior() {
    let s = shape(ShapeKind::Line { x: 0.0, y: 0.0, width: 10.0, height: 0.0 });
    assert!(!point_in_shape(pt(5.0, 0.0), &s));
}

#[test]
fn open_path_has_no_interior() {
    let s = shape(ShapeKind::Path {
        points: vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(5.0, 10.0)],
        closed: false,
        filled: false,
    });
    assert!(!point_in_shape(pt(5.0, 3.0), &s));
}

#[test]
fn closed_triangle_contains_centroid() {
    let s = shape(ShapeKind::Path {
        points: vec![pt(0.0, 0.0), pt(12.0, 0.0), pt(6.0, 9.0)],
        closed: true,
        filled: true,
    });
    assert!(point_in_shape(pt(6.0, 3.0), &s));
}

#[test]
fn closed_triangle_excludes_far_point() {
    let s = shape(ShapeKind::Path {
        points: vec![pt(0.0, 0.0), pt(12.0, 0.0), pt(6.0, 9.0)],
        closed: true,
        filled: true,
    });
    assert!(!point_in_shape(pt(100.0, 100.0), &s));
}

#[test]
fn two_point_closed_path_contains_nothing() {
    let s = shape(ShapeKind::Path {
        points: vec![pt(0.0, 0.0), pt(10.0, 10.0)],
        closed: true,
        filled: false,
    });
    assert!(!point_in_shape(pt(5.0, 5.0), &s));
}

#[test]
fn concave_polygon_classifies_notch_as_outside() {
    // A "C" shape: the notch on the right is outside.
    let points = vec![
        pt(0.0, 0.0),
        pt(10.0, 0.0),
        pt(10.0, 3.0),
        pt(3.0, 3.0),
        pt(3.0, 7.0),
        pt(10.0, 7.0),
        pt(10.0, 10.0),
        pt(0.0, 10.0),
    ];
    assert!(point_in_polygon(pt(1.5, 5.0), &points));
    assert!(!point_in_polygon(pt(7.0, 5.0), &points));
}

// =============================================================
// point_to_segment_distance
// =============================================================

#[test]
fn segment_distance_perpendicular_projection() {
    let d = point_to_segment_distance(pt(5.0, 3.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert!(approx_eq(d, 3.0));
}

#[test]
fn segment_distance_clamps_to_start() {
    let d = point_to_segment_distance(pt(-3.0, 4.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn segment_distance_clamps_to_end() {
    let d = point_to_segment_distance(pt(13.0, 4.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn segment_distance_zero_length_segment() {
    let d = point_to_segment_distance(pt(3.0, 4.0), pt(0.0, 0.0), pt(0.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn segment_distance_point_on_segment_is_zero() {
    let d = point_to_segment_distance(pt(5.0, 0.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert!(approx_eq(d, 0.0));
}

// =============================================================
// bounding_box / shape_bounds
// =============================================================

#[test]
fn bounding_box_of_empty_is_zero() {
    assert_eq!(bounding_box(&[]), Bounds::default());
}

#[test]
fn bounding_box_of_single_point_is_degenerate() {
    let b = bounding_box(&[pt(4.0, -2.0)]);
    assert_eq!(b, Bounds { x: 4.0, y: -2.0, width: 0.0, height: 0.0 });
}

#[test]
fn bounding_box_spans_extremes() {
    let b = bounding_box(&[pt(1.0, 9.0), pt(-3.0, 2.0), pt(7.0, 5.0)]);
    assert_eq!(b, Bounds { x: -3.0, y: 2.0, width: 10.0, height: 7.0 });
}

#[test]
fn shape_bounds_circle_spans_diameter() {
    let s = shape(ShapeKind::Circle { x: 10.0, y: 10.0, radius: 4.0 });
    assert_eq!(shape_bounds(&s), Bounds { x: 6.0, y: 6.0, width: 8.0, height: 8.0 });
}

#[test]
fn shape_bounds_line_normalizes_negative_delta() {
    let s = shape(ShapeKind::Line { x: 10.0, y: 10.0, width: -6.0, height: 2.0 });
    assert_eq!(shape_bounds(&s), Bounds { x: 4.0, y: 10.0, width: 6.0, height: 2.0 });
}
