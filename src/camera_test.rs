#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Defaults ---

#[test]
fn camera_default_pan_is_zero() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
}

#[test]
fn camera_default_zoom_is_one() {
    let cam = Camera::default();
    assert_eq!(cam.zoom, 1.0);
}

// --- screen_to_world / world_to_screen ---

#[test]
fn screen_to_world_identity() {
    let cam = Camera::default();
    let world = cam.screen_to_world(Point::new(50.0, 75.0));
    assert!(point_approx_eq(world, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(40.0, 30.0));
    assert!(approx_eq(world.x, 10.0));
    assert!(approx_eq(world.y, 10.0));
}

#[test]
fn world_to_screen_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 3.0 };
    let screen = cam.world_to_screen(Point::new(5.0, 5.0));
    assert!(approx_eq(screen.x, 35.0));
    assert!(approx_eq(screen.y, 25.0));
}

#[test]
fn round_trip_world_first() {
    let cam = Camera { pan_x: 50.0, pan_y: -30.0, zoom: 2.0 };
    let world = Point::new(100.0, 200.0);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!(point_approx_eq(world, back));
}

#[test]
fn round_trip_screen_first() {
    let cam = Camera { pan_x: 13.7, pan_y: -42.3, zoom: 0.75 };
    let screen = Point::new(333.3, -999.9);
    let back = cam.world_to_screen(cam.screen_to_world(screen));
    assert!(point_approx_eq(screen, back));
}

#[test]
fn screen_dist_to_world_scales_inverse_to_zoom() {
    let cam = Camera { pan_x: 999.0, pan_y: -999.0, zoom: 4.0 };
    assert!(approx_eq(cam.screen_dist_to_world(8.0), 2.0));
}

// --- zoom_by clamping ---

#[test]
fn zoom_by_multiplies_zoom() {
    let mut cam = Camera::default();
    cam.zoom_by(1.2, None);
    assert!(approx_eq(cam.zoom, 1.2));
}

#[test]
fn zoom_by_clamps_at_max() {
    let mut cam = Camera::default();
    for _ in 0..20 {
        cam.zoom_by(1.2, None);
    }
    assert!(approx_eq(cam.zoom, 5.0));
}

#[test]
fn zoom_by_clamps_at_min() {
    let mut cam = Camera::default();
    for _ in 0..20 {
        cam.zoom_by(0.8, None);
    }
    assert!(approx_eq(cam.zoom, 0.1));
}

#[test]
fn zoom_by_without_anchor_keeps_pan() {
    let mut cam = Camera { pan_x: 17.0, pan_y: -4.0, zoom: 1.0 };
    cam.zoom_by(1.2, None);
    assert_eq!(cam.pan_x, 17.0);
    assert_eq!(cam.pan_y, -4.0);
}

// --- zoom_by anchoring ---

#[test]
fn zoom_to_anchor_keeps_world_point_under_cursor() {
    let mut cam = Camera { pan_x: 30.0, pan_y: -12.0, zoom: 1.5 };
    let anchor = Point::new(240.0, 180.0);
    let before = cam.screen_to_world(anchor);
    cam.zoom_by(1.2, Some(anchor));
    let after = cam.screen_to_world(anchor);
    assert!(point_approx_eq(before, after));
}

#[test]
fn zoom_to_anchor_holds_across_repeated_zooms() {
    let mut cam = Camera::default();
    let anchor = Point::new(400.0, 300.0);
    let before = cam.screen_to_world(anchor);
    for _ in 0..5 {
        cam.zoom_by(1.2, Some(anchor));
    }
    for _ in 0..3 {
        cam.zoom_by(0.8, Some(anchor));
    }
    let after = cam.screen_to_world(anchor);
    assert!(point_approx_eq(before, after));
}

#[test]
fn zoom_to_anchor_keeps_world_point_even_when_clamped() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.9 };
    let anchor = Point::new(100.0, 100.0);
    let before = cam.screen_to_world(anchor);
    cam.zoom_by(1.2, Some(anchor));
    assert!(approx_eq(cam.zoom, 5.0));
    let after = cam.screen_to_world(anchor);
    assert!(point_approx_eq(before, after));
}

// --- pan_by ---

#[test]
fn pan_by_translates_view() {
    let mut cam = Camera::default();
    cam.pan_by(10.0, -5.0);
    assert_eq!(cam.pan_x, 10.0);
    assert_eq!(cam.pan_y, -5.0);
    let world = cam.screen_to_world(Point::new(10.0, -5.0));
    assert!(point_approx_eq(world, Point::new(0.0, 0.0)));
}

// --- grid derivation ---

#[test]
fn grid_spacing_scales_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    assert!(approx_eq(cam.grid_spacing(), 40.0));
}

#[test]
fn grid_phase_is_pan_mod_spacing() {
    let cam = Camera { pan_x: 50.0, pan_y: 25.0, zoom: 1.0 };
    let phase = cam.grid_phase();
    assert!(approx_eq(phase.x, 10.0));
    assert!(approx_eq(phase.y, 5.0));
}

#[test]
fn grid_phase_stays_non_negative_for_negative_pan() {
    let cam = Camera { pan_x: -7.0, pan_y: -33.0, zoom: 1.0 };
    let phase = cam.grid_phase();
    assert!(phase.x >= 0.0 && phase.x < cam.grid_spacing());
    assert!(phase.y >= 0.0 && phase.y < cam.grid_spacing());
    assert!(approx_eq(phase.x, 13.0));
}

// --- wheel mapping ---

#[test]
fn wheel_down_zooms_out() {
    assert!(approx_eq(wheel_zoom_factor(3.0), 0.8));
}

#[test]
fn wheel_up_zooms_in() {
    assert!(approx_eq(wheel_zoom_factor(-3.0), 1.2));
}
