//! Editor engine: ties the scene, camera, history, and hit-testing together
//! behind pointer/keyboard/wheel handlers.
//!
//! All coordinates entering the engine are canvas-relative CSS pixels; the
//! engine maps them to world space itself. Handlers return [`Action`]s for
//! the host to process — the engine never touches the DOM. `EngineCore`
//! holds all logic and is testable natively; [`Engine`] wraps it together
//! with the browser canvas element.
//!
//! History discipline: every undoable operation snapshots the scene as it
//! stood before the mutation. Drag gestures snapshot lazily, right before
//! their first actual mutation, so an aborted drag leaves no history entry.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, wheel_zoom_factor};
use crate::consts::{ZOOM_STEP_IN, ZOOM_STEP_OUT};
use crate::doc::{Scene, Shape, ShapeId, ShapeKind, snap_to_grid};
use crate::geom;
use crate::history::History;
use crate::hit::{self, Hit};
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::level::{self, GameLevelFile, LevelError, ProjectFile, TraceFile};
use crate::{paint, render};

/// Results returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The view changed; the host should repaint.
    RenderNeeded,
    /// The pointer moved; world coordinates for the status readout.
    CursorMoved(Point),
    /// The selection changed.
    SelectionChanged(Option<Hit>),
    /// A new shape was committed to the scene.
    ShapeFinalized(ShapeId),
    /// The whole scene was replaced (undo, redo, load, new project).
    SceneReplaced,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore {
    pub scene: Scene,
    pub camera: Camera,
    pub history: History,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    /// Background reference image for tracing, as an opaque data URI.
    /// Decoding and display belong to the host.
    pub background_image: Option<String>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera::default(),
            history: History::new(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            background_image: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Toolbar state ---

    /// Set the active tool, cancelling any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
        self.input = InputState::Idle;
    }

    pub fn set_color(&mut self, color: &str) {
        self.ui.color = color.to_owned();
    }

    /// Set the stroke width for new shapes, floored at 1.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.ui.stroke_width = width.max(1.0);
    }

    pub fn set_block_health(&mut self, health: i32) {
        self.ui.health = health.max(1);
    }

    pub fn set_block_effect(&mut self, effect: &str) {
        self.ui.effect = effect.to_owned();
    }

    pub fn set_snapping(&mut self, enabled: bool) {
        self.ui.snapping = enabled;
    }

    /// Set the layer new shapes land in. Out-of-range indexes are ignored.
    pub fn set_active_layer(&mut self, index: usize) {
        if index < self.scene.layers.len() {
            self.ui.active_layer = index;
        }
    }

    /// Add a layer and make it active.
    pub fn add_layer(&mut self, name: &str) -> usize {
        let index = self.scene.add_layer(name);
        self.ui.active_layer = index;
        index
    }

    /// Toggle a layer's visibility. Hiding a layer drops any selection into
    /// it, since the user can no longer see what they had selected.
    pub fn set_layer_visible(&mut self, index: usize, visible: bool) {
        self.scene.set_layer_visible(index, visible);
        if !visible {
            if let Some(selected) = self.ui.selected {
                let in_hidden = self
                    .scene
                    .find(selected.shape())
                    .is_none_or(|s| s.layer == index);
                if in_hidden {
                    self.ui.selected = None;
                }
            }
        }
    }

    pub fn set_background_image(&mut self, image: Option<String>) {
        self.background_image = image;
    }

    // --- Pointer input ---

    /// Handle pointer-down at a canvas-relative screen point.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen);

        match button {
            Button::Middle => {
                self.input = InputState::Panning { last_screen: screen };
                Vec::new()
            }
            Button::Secondary => self.insert_point_at(world),
            Button::Primary => match self.ui.tool {
                Tool::Select => self.begin_select_gesture(world),
                Tool::Rect | Tool::Circle | Tool::Line => {
                    let anchor = self.maybe_snap(world);
                    self.input = InputState::DrawingShape { anchor, current: anchor };
                    vec![Action::RenderNeeded]
                }
                Tool::Path => {
                    let start = self.maybe_snap(world);
                    self.input = InputState::DrawingPath { points: vec![start] };
                    vec![Action::RenderNeeded]
                }
            },
        }
    }

    /// Handle pointer-move at a canvas-relative screen point.
    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen);
        let mut actions = vec![Action::CursorMoved(world)];

        // Take the gesture out so its context can be used alongside the
        // scene and history borrows, then put it back.
        let mut gesture = std::mem::take(&mut self.input);
        match &mut gesture {
            InputState::Idle => {}
            InputState::Panning { last_screen } => {
                let dx = screen.x - last_screen.x;
                let dy = screen.y - last_screen.y;
                *last_screen = screen;
                self.camera.pan_by(dx, dy);
                actions.push(Action::RenderNeeded);
            }
            InputState::DraggingShape { id, grab_dx, grab_dy, moved } => {
                let target = Point::new(world.x - *grab_dx, world.y - *grab_dy);
                if !*moved {
                    *moved = true;
                    let pre = self.scene.clone();
                    self.history.snapshot(&pre);
                }
                let target = self.maybe_snap(target);
                if let Some(shape) = self.scene.find_mut(*id) {
                    shape.move_to(target);
                }
                actions.push(Action::RenderNeeded);
            }
            InputState::DraggingPathPoint { id, index, moved } => {
                if !*moved {
                    *moved = true;
                    let pre = self.scene.clone();
                    self.history.snapshot(&pre);
                }
                let target = self.maybe_snap(world);
                self.scene.move_path_point(*id, *index, target);
                actions.push(Action::RenderNeeded);
            }
            InputState::DrawingShape { current, .. } => {
                *current = world;
                actions.push(Action::RenderNeeded);
            }
            InputState::DrawingPath { points } => {
                let next = self.maybe_snap(world);
                if points.last() != Some(&next) {
                    points.push(next);
                }
                actions.push(Action::RenderNeeded);
            }
        }
        self.input = gesture;

        actions
    }

    /// Handle pointer-up at a canvas-relative screen point.
    pub fn on_pointer_up(&mut self, screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen);
        let gesture = std::mem::take(&mut self.input);

        match gesture {
            InputState::DrawingShape { anchor, .. } => {
                let current = self.maybe_snap(world);
                self.finalize_drag_shape(anchor, current)
            }
            InputState::DrawingPath { points } => self.finalize_path(points),
            InputState::Idle
            | InputState::Panning { .. }
            | InputState::DraggingShape { .. }
            | InputState::DraggingPathPoint { .. } => vec![Action::RenderNeeded],
        }
    }

    /// Handle a wheel event: zoom about the cursor.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        self.camera.zoom_by(wheel_zoom_factor(delta.dy), Some(screen));
        vec![Action::RenderNeeded]
    }

    /// Handle key-down: delete, undo/redo shortcuts, gesture cancel.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selection(),
            "z" | "Z" if modifiers.ctrl && modifiers.shift => self.redo(),
            "z" | "Z" if modifiers.ctrl => self.undo(),
            "y" | "Y" if modifiers.ctrl => self.redo(),
            "Escape" => {
                self.input = InputState::Idle;
                let changed = self.ui.selected.take().is_some();
                if changed {
                    vec![Action::SelectionChanged(None), Action::RenderNeeded]
                } else {
                    vec![Action::RenderNeeded]
                }
            }
            _ => Vec::new(),
        }
    }

    // --- Editing operations ---

    /// Undo the latest mutation. No-op at the start of history. Always
    /// clears the selection: identities from the replaced scene are stale.
    pub fn undo(&mut self) -> Vec<Action> {
        let Some(restored) = self.history.undo(&self.scene) else {
            return Vec::new();
        };
        self.scene = restored;
        self.ui.selected = None;
        self.input = InputState::Idle;
        vec![Action::SceneReplaced, Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// Redo the latest undone mutation. No-op at the end of history.
    pub fn redo(&mut self) -> Vec<Action> {
        let Some(restored) = self.history.redo() else {
            return Vec::new();
        };
        self.scene = restored;
        self.ui.selected = None;
        self.input = InputState::Idle;
        vec![Action::SceneReplaced, Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// Delete the selected path point (honoring the two-point minimum) or
    /// the selected shape. No-op without a selection.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        match self.ui.selected {
            Some(Hit::PathPoint { shape, index }) => {
                let pre = self.scene.clone();
                if self.scene.delete_path_point(shape, index) {
                    self.history.snapshot(&pre);
                    self.ui.selected = Some(Hit::Body { shape });
                    vec![
                        Action::SelectionChanged(self.ui.selected),
                        Action::RenderNeeded,
                    ]
                } else {
                    Vec::new()
                }
            }
            Some(Hit::Body { shape }) => {
                let pre = self.scene.clone();
                if self.scene.remove_shape(shape).is_some() {
                    self.history.snapshot(&pre);
                    self.ui.selected = None;
                    vec![Action::SelectionChanged(None), Action::RenderNeeded]
                } else {
                    self.ui.selected = None;
                    Vec::new()
                }
            }
            None => Vec::new(),
        }
    }

    /// Remove every shape from every layer, keeping the layers.
    pub fn clear_canvas(&mut self) -> Vec<Action> {
        if self.scene.shape_count() == 0 {
            return Vec::new();
        }
        let pre = self.scene.clone();
        self.history.snapshot(&pre);
        self.scene.clear_shapes();
        self.ui.selected = None;
        vec![Action::SceneReplaced, Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// Reset to a fresh single-layer scene, dropping history, selection,
    /// camera state, and the background image.
    pub fn new_project(&mut self) -> Vec<Action> {
        self.scene = Scene::new();
        self.camera = Camera::default();
        self.history.clear();
        self.ui.selected = None;
        self.ui.active_layer = 0;
        self.input = InputState::Idle;
        self.background_image = None;
        vec![Action::SceneReplaced, Action::RenderNeeded]
    }

    /// Zoom in one step about the viewport center.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_step(ZOOM_STEP_IN)
    }

    /// Zoom out one step about the viewport center.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_step(ZOOM_STEP_OUT)
    }

    fn zoom_step(&mut self, factor: f64) -> Vec<Action> {
        let center = Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        self.camera.zoom_by(factor, Some(center));
        vec![Action::RenderNeeded]
    }

    // --- Files ---

    /// Replace the scene with a parsed project file. All-or-nothing: a
    /// parse error leaves the current scene untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] for malformed JSON or schema mismatches.
    pub fn load_project_json(&mut self, json: &str) -> Result<Vec<Action>, LevelError> {
        let project = level::parse_project(json)?;
        self.install_scene(project.into_scene());
        Ok(vec![Action::SceneReplaced, Action::SelectionChanged(None), Action::RenderNeeded])
    }

    /// Replace the scene with a parsed tracer file, installing its
    /// background image alongside the shapes.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] for malformed JSON or schema mismatches.
    pub fn load_trace_json(&mut self, json: &str) -> Result<Vec<Action>, LevelError> {
        let trace = level::parse_trace(json)?;
        let image = trace.image_data_uri();
        self.install_scene(trace.into_scene());
        self.background_image = image;
        Ok(vec![Action::SceneReplaced, Action::SelectionChanged(None), Action::RenderNeeded])
    }

    /// Build the layered save file for the current scene.
    #[must_use]
    pub fn save_project(&self, name: &str, author: &str, created: &str) -> ProjectFile {
        level::project_file(&self.scene, name, author, created)
    }

    /// Build the flat tracer save file for the current scene.
    #[must_use]
    pub fn save_trace(&self, name: &str, author: &str, created: &str) -> TraceFile {
        level::trace_file(&self.scene, self.background_image.as_deref(), name, author, created)
    }

    /// Flatten visible layers into the game export format.
    #[must_use]
    pub fn export_game_level(&self, title: &str, author: &str) -> GameLevelFile {
        level::export_game_level(&self.scene, title, author)
    }

    // --- Queries ---

    /// The current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Hit> {
        self.ui.selected
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The in-progress shape under the cursor, if a draw gesture is active.
    /// It carries the current style but is not part of the scene yet.
    #[must_use]
    pub fn preview_shape(&self) -> Option<Shape> {
        match &self.input {
            InputState::DrawingShape { anchor, current } => {
                drag_shape_kind(self.ui.tool, *anchor, *current).map(|kind| self.styled_shape(kind))
            }
            InputState::DrawingPath { points } => Some(self.styled_shape(ShapeKind::Path {
                points: points.clone(),
                closed: false,
                filled: false,
            })),
            _ => None,
        }
    }

    // --- Internals ---

    fn maybe_snap(&self, p: Point) -> Point {
        if self.ui.snapping { snap_to_grid(p) } else { p }
    }

    fn styled_shape(&self, kind: ShapeKind) -> Shape {
        Shape {
            id: ShapeId::new_v4(),
            kind,
            color: self.ui.color.clone(),
            stroke_width: self.ui.stroke_width,
            health: self.ui.health,
            effect: self.ui.effect.clone(),
            layer: self.ui.active_layer,
        }
    }

    fn begin_select_gesture(&mut self, world: Point) -> Vec<Action> {
        let hit = hit::hit_test(&self.scene, world);
        let previous = self.ui.selected;
        self.ui.selected = hit;

        match hit {
            Some(Hit::PathPoint { shape, index }) => {
                self.input = InputState::DraggingPathPoint { id: shape, index, moved: false };
            }
            Some(Hit::Body { shape }) => {
                let origin = self.scene.find(shape).map_or(world, Shape::origin);
                self.input = InputState::DraggingShape {
                    id: shape,
                    grab_dx: world.x - origin.x,
                    grab_dy: world.y - origin.y,
                    moved: false,
                };
            }
            None => {
                self.input = InputState::Idle;
            }
        }

        if hit == previous {
            vec![Action::RenderNeeded]
        } else {
            vec![Action::SelectionChanged(hit), Action::RenderNeeded]
        }
    }

    /// Insert a point into the selected path on the edge nearest `world`.
    fn insert_point_at(&mut self, world: Point) -> Vec<Action> {
        let Some(selected) = self.ui.selected else {
            return Vec::new();
        };
        let id = selected.shape();
        let point = self.maybe_snap(world);

        let pre = self.scene.clone();
        let Some(index) = self.scene.insert_path_point(id, point) else {
            return Vec::new();
        };
        self.history.snapshot(&pre);
        self.ui.selected = Some(Hit::PathPoint { shape: id, index });
        vec![Action::SelectionChanged(self.ui.selected), Action::RenderNeeded]
    }

    fn finalize_drag_shape(&mut self, anchor: Point, current: Point) -> Vec<Action> {
        let Some(kind) = drag_shape_kind(self.ui.tool, anchor, current) else {
            return vec![Action::RenderNeeded];
        };
        let shape = self.styled_shape(normalized_kind(kind));

        let pre = self.scene.clone();
        self.history.snapshot(&pre);
        let id = self.scene.add_shape(self.ui.active_layer, shape);
        vec![Action::ShapeFinalized(id), Action::RenderNeeded]
    }

    fn finalize_path(&mut self, points: Vec<Point>) -> Vec<Action> {
        if points.len() < 2 {
            return vec![Action::RenderNeeded];
        }
        let shape = self.styled_shape(ShapeKind::Path { points, closed: false, filled: false });

        let pre = self.scene.clone();
        self.history.snapshot(&pre);
        let id = self.scene.add_shape(self.ui.active_layer, shape);
        vec![Action::ShapeFinalized(id), Action::RenderNeeded]
    }

    fn install_scene(&mut self, mut scene: Scene) {
        scene.ensure_layer();
        self.scene = scene;
        self.history.clear();
        self.ui.selected = None;
        self.ui.active_layer = 0;
        self.input = InputState::Idle;
    }
}

/// Geometry for a drag-sized shape, or `None` for a degenerate zero-extent
/// drag (a plain click with a draw tool creates nothing).
fn drag_shape_kind(tool: Tool, anchor: Point, current: Point) -> Option<ShapeKind> {
    let width = current.x - anchor.x;
    let height = current.y - anchor.y;
    match tool {
        Tool::Rect => {
            if width == 0.0 && height == 0.0 {
                return None;
            }
            Some(ShapeKind::Rect { x: anchor.x, y: anchor.y, width, height })
        }
        Tool::Circle => {
            let radius = geom::distance(anchor, current);
            if radius == 0.0 {
                return None;
            }
            Some(ShapeKind::Circle { x: anchor.x, y: anchor.y, radius })
        }
        Tool::Line => {
            if width == 0.0 && height == 0.0 {
                return None;
            }
            Some(ShapeKind::Line { x: anchor.x, y: anchor.y, width, height })
        }
        Tool::Select | Tool::Path => None,
    }
}

/// Normalize rectangles on finalize so negative drag extents never persist.
fn normalized_kind(kind: ShapeKind) -> ShapeKind {
    match kind {
        ShapeKind::Rect { x, y, width, height } => {
            let r = geom::normalized_rect(x, y, width, height);
            ShapeKind::Rect { x: r.x, y: r.y, width: r.width, height: r.height }
        }
        other => other,
    }
}

/// The full editor engine. Wraps [`EngineCore`] and owns the browser canvas
/// element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self.context_2d()?;
        let cmds = render::editor_frame(&self.core);
        paint::paint(
            &ctx,
            &cmds,
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
    }

    fn context_2d(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        self.canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)
    }
}
