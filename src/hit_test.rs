use super::*;

fn rect_at(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape {
        id: ShapeId::new_v4(),
        kind: ShapeKind::Rect { x, y, width: w, height: h },
        color: "#ff0000".to_owned(),
        stroke_width: 2.0,
        health: 1,
        effect: "none".to_owned(),
        layer: 0,
    }
}

fn path_of(points: Vec<Point>) -> Shape {
    Shape {
        id: ShapeId::new_v4(),
        kind: ShapeKind::Path { points, closed: false, filled: false },
        color: "#00ff00".to_owned(),
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
// pick_shape
// =============================================================

#[test]
fn pick_shape_finds_containing_shape() {
    let mut scene = Scene::new();
    let id = scene.add_shape(0, rect_at(10.0, 10.0, 20.0, 20.0));
    assert_eq!(pick_shape(&scene, pt(15.0, 15.0)), Some(id));
}

#[test]
fn pick_shape_misses_empty_space() {
    let mut scene = Scene::new();
    scene.add_shape(0, rect_at(10.0, 10.0, 20.0, 20.0));
    assert_eq!(pick_shape(&scene, pt(100.0, 100.0)), None);
}

#[test]
fn pick_shape_prefers_last_drawn_on_overlap() {
    let mut scene = Scene::new();
    scene.add_shape(0, rect_at(0.0, 0.0, 50.0, 50.0));
    let top = scene.add_shape(0, rect_at(0.0, 0.0, 50.0, 50.0));
    assert_eq!(pick_shape(&scene, pt(25.0, 25.0)), Some(top));
}

#[test]
fn pick_shape_prefers_higher_layer() {
    let mut scene = Scene::new();
    scene.add_layer("top");
    let bottom = scene.add_shape(0, rect_at(0.0, 0.0, 50.0, 50.0));
    let top = scene.add_shape(1, rect_at(0.0, 0.0, 50.0, 50.0));
    assert_eq!(pick_shape(&scene, pt(25.0, 25.0)), Some(top));

    scene.set_layer_visible(1, false);
    assert_eq!(pick_shape(&scene, pt(25.0, 25.0)), Some(bottom));
}

#[test]
fn pick_shape_skips_invisible_layer_entirely() {
    let mut scene = Scene::new();
    scene.add_shape(0, rect_at(0.0, 0.0, 50.0, 50.0));
    scene.set_layer_visible(0, false);
    assert_eq!(pick_shape(&scene, pt(25.0, 25.0)), None);
}

#[test]
fn pick_shape_hits_negative_drag_rect() {
    let mut scene = Scene::new();
    let id = scene.add_shape(0, rect_at(50.0, 50.0, -20.0, -20.0));
    assert_eq!(pick_shape(&scene, pt(40.0, 40.0)), Some(id));
}

// =============================================================
// pick_point
// =============================================================

#[test]
fn pick_point_within_radius() {
    let mut scene = Scene::new();
    let id = scene.add_shape(0, path_of(vec![pt(0.0, 0.0), pt(100.0, 0.0)]));
    assert_eq!(pick_point(&scene, pt(5.0, 5.0)), Some((id, 0)));
}

#[test]
fn pick_point_misses_outside_radius() {
    let mut scene = Scene::new();
    scene.add_shape(0, path_of(vec![pt(0.0, 0.0), pt(100.0, 0.0)]));
    assert_eq!(pick_point(&scene, pt(9.0, 5.0)), None);
}

#[test]
fn pick_point_exactly_at_radius_hits() {
    let mut scene = Scene::new();
    let id = scene.add_shape(0, path_of(vec![pt(0.0, 0.0), pt(100.0, 0.0)]));
    assert_eq!(pick_point(&scene, pt(8.0, 0.0)), Some((id, 0)));
}

#[test]
fn pick_point_returns_first_point_in_path_order() {
    let mut scene = Scene::new();
    let id = scene.add_shape(0, path_of(vec![pt(0.0, 0.0), pt(4.0, 0.0)]));
    // Both points are in range of (2, 0); the earlier index wins.
    assert_eq!(pick_point(&scene, pt(2.0, 0.0)), Some((id, 0)));
}

#[test]
fn pick_point_prefers_topmost_path() {
    let mut scene = Scene::new();
    scene.add_shape(0, path_of(vec![pt(0.0, 0.0), pt(100.0, 0.0)]));
    let top = scene.add_shape(0, path_of(vec![pt(0.0, 0.0), pt(0.0, 100.0)]));
    assert_eq!(pick_point(&scene, pt(0.0, 0.0)), Some((top, 0)));
}

#[test]
fn pick_point_ignores_non_path_shapes() {
    let mut scene = Scene::new();
    scene.add_shape(0, rect_at(0.0, 0.0, 10.0, 10.0));
    assert_eq!(pick_point(&scene, pt(0.0, 0.0)), None);
}

// =============================================================
// hit_test precedence
// =============================================================

#[test]
fn point_hit_beats_body_hit() {
    let mut scene = Scene::new();
    // A rect covering the area, and a path vertex inside it.
    scene.add_shape(0, rect_at(0.0, 0.0, 100.0, 100.0));
    let path = scene.add_shape(0, path_of(vec![pt(50.0, 50.0), pt(60.0, 60.0), pt(70.0, 50.0)]));
    assert_eq!(
        hit_test(&scene, pt(50.0, 50.0)),
        Some(Hit::PathPoint { shape: path, index: 0 })
    );
}

#[test]
fn body_hit_when_no_point_in_range() {
    let mut scene = Scene::new();
    let rect = scene.add_shape(0, rect_at(0.0, 0.0, 100.0, 100.0));
    scene.add_shape(0, path_of(vec![pt(50.0, 50.0), pt(60.0, 60.0)]));
    assert_eq!(hit_test(&scene, pt(20.0, 20.0)), Some(Hit::Body { shape: rect }));
}

#[test]
fn hit_test_empty_space_is_none() {
    let scene = Scene::new();
    assert_eq!(hit_test(&scene, pt(10.0, 10.0)), None);
}

#[test]
fn hit_shape_resolves_through_scene() {
    let mut scene = Scene::new();
    let id = scene.add_shape(0, rect_at(0.0, 0.0, 10.0, 10.0));
    let hit = Hit::Body { shape: id };
    assert!(hit_shape(&scene, hit).is_some());
    assert_eq!(hit.shape(), id);
}
