//! Input model: tools, modifier keys, mouse buttons, and the gesture state
//! machine.
//!
//! This module defines the types consumed by the editor engine. `Tool` and
//! `Modifiers` capture the user's intent at the time of a pointer event.
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying all context needed to apply incremental mutations
//! and finalize the result on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ShapeId;
use crate::hit::Hit;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Draw a rectangle by dragging between opposite corners.
    Rect,
    /// Draw a circle by dragging from the center outward.
    Circle,
    /// Draw a straight line segment.
    Line,
    /// Trace a free-form path.
    Path,
}

impl Tool {
    /// Whether this tool draws a drag-sized shape (rect, circle, line).
    #[must_use]
    pub fn is_drag_shape(self) -> bool {
        matches!(self, Self::Rect | Self::Circle | Self::Line)
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, holding the name as reported by the browser
/// (e.g. `"Delete"`, `"z"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer: the active tool, current
/// selection, active layer, and the style applied to new shapes.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Current selection, if any. Identity-based; cleared whenever the
    /// referenced shape leaves the scene or the scene is replaced.
    pub selected: Option<Hit>,
    /// Index of the layer new shapes land in.
    pub active_layer: usize,
    /// Color applied to new shapes.
    pub color: String,
    /// Stroke width applied to new shapes, at least 1.
    pub stroke_width: f64,
    /// Block health applied to new shapes.
    pub health: i32,
    /// Block effect tag applied to new shapes.
    pub effect: String,
    /// Whether new coordinates snap to the grid.
    pub snapping: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::Select,
            selected: None,
            active_layer: 0,
            color: "#ff0000".to_owned(),
            stroke_width: 2.0,
            health: 1,
            effect: "none".to_owned(),
            snapping: false,
        }
    }
}

/// Internal state for the gesture state machine.
///
/// Each active variant carries the context needed to apply incremental
/// mutations during pointer-move and finalize on pointer-up. Drag gestures
/// track whether they have mutated yet so the history snapshot is taken
/// exactly once, right before the first mutation.
#[derive(Debug, Clone)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// The user is panning the view with the middle button.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is moving an existing shape.
    DraggingShape {
        /// Id of the shape being dragged.
        id: ShapeId,
        /// World-space offset from the shape's anchor to the grab point,
        /// so the shape doesn't jump to the cursor.
        grab_dx: f64,
        grab_dy: f64,
        /// Whether the drag has mutated the scene yet.
        moved: bool,
    },
    /// The user is repositioning a single path point.
    DraggingPathPoint {
        /// Id of the path shape being edited.
        id: ShapeId,
        /// Index of the point being dragged.
        index: usize,
        /// Whether the drag has mutated the scene yet.
        moved: bool,
    },
    /// The user is sizing a new rect/circle/line from an anchor.
    DrawingShape {
        /// World-space point where the drag started.
        anchor: Point,
        /// World-space pointer position at the latest event.
        current: Point,
    },
    /// The user is tracing a free-form path.
    DrawingPath {
        /// Points collected so far, in trace order.
        points: Vec<Point>,
    },
}

impl Default for InputState {
    fn default() -> Self {
        Self::Idle
    }
}
