//! Draw-call list production.
//!
//! The core never draws pixels. These functions reduce editor and game
//! state to flat lists of screen-space [`DrawCmd`]s; [`crate::paint`]
//! executes them against a canvas context, and a host is free to consume
//! them as JSON instead. All world→screen mapping happens here, in pure
//! code, so draw order and geometry are testable without a browser.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Camera, Point};
use crate::doc::{Shape, ShapeKind};
use crate::engine::EngineCore;
use crate::game::{Game, GamePhase};
use crate::geom;
use crate::hit::Hit;

/// Grid line color.
const GRID_COLOR: &str = "#ffffff";

/// Selection overlay color.
const SELECTION_COLOR: &str = "#00ffff";

/// World-space padding around a selected shape's bounds.
const SELECTION_PADDING: f64 = 5.0;

/// Screen-space radius of a path point handle.
const HANDLE_RADIUS_PX: f64 = 4.0;

/// Paddle fill color.
const PADDLE_COLOR: &str = "#4ECDC4";

/// Ball fill color.
const BALL_COLOR: &str = "#FF6B6B";

/// Stroke parameters for an outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dashed: bool,
}

impl Stroke {
    fn solid(color: &str, width: f64) -> Self {
        Self { color: color.to_owned(), width, dashed: false }
    }

    fn dashed(color: &str, width: f64) -> Self {
        Self { color: color.to_owned(), width, dashed: true }
    }
}

/// One screen-space drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DrawCmd {
    /// Reset the canvas; a wash color leaves a motion trail instead of a
    /// hard clear.
    Clear { wash: Option<String> },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Segment {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        color: String,
        size_px: f64,
    },
}

// =============================================================
// Editor frame
// =============================================================

/// The complete editor frame: grid, shapes in z-order, the in-progress
/// preview, and the selection overlay.
#[must_use]
pub fn editor_frame(core: &EngineCore) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Clear { wash: None }];

    grid_lines(&core.camera, core.viewport_width, core.viewport_height, &mut cmds);

    for shape in core.scene.visible_shapes() {
        cmds.push(shape_cmd(shape, &core.camera, false));
    }

    if let Some(preview) = core.preview_shape() {
        cmds.push(shape_cmd(&preview, &core.camera, true));
    }

    if let Some(selected) = core.ui.selected {
        selection_overlay(core, selected, &mut cmds);
    }

    cmds
}

/// Grid segments derived from the camera: spacing scales with zoom, phase
/// is the pan offset wrapped into one grid cell.
pub fn grid_lines(camera: &Camera, viewport_w: f64, viewport_h: f64, cmds: &mut Vec<DrawCmd>) {
    let spacing = camera.grid_spacing();
    if spacing <= 0.0 || viewport_w <= 0.0 || viewport_h <= 0.0 {
        return;
    }
    let phase = camera.grid_phase();

    let mut x = phase.x;
    while x < viewport_w {
        cmds.push(DrawCmd::Segment {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: viewport_h,
            stroke: Stroke::solid(GRID_COLOR, 1.0),
        });
        x += spacing;
    }

    let mut y = phase.y;
    while y < viewport_h {
        cmds.push(DrawCmd::Segment {
            x1: 0.0,
            y1: y,
            x2: viewport_w,
            y2: y,
            stroke: Stroke::solid(GRID_COLOR, 1.0),
        });
        y += spacing;
    }
}

/// A single shape as a screen-space command. Previews render as dashed
/// outlines in the shape's color instead of fills.
fn shape_cmd(shape: &Shape, camera: &Camera, preview: bool) -> DrawCmd {
    let stroke_w = (shape.stroke_width * camera.zoom).max(1.0);
    let stroke = if preview {
        Some(Stroke::dashed(&shape.color, stroke_w))
    } else {
        None
    };

    match &shape.kind {
        ShapeKind::Rect { x, y, width, height } => {
            let r = geom::normalized_rect(*x, *y, *width, *height);
            let p = camera.world_to_screen(Point::new(r.x, r.y));
            DrawCmd::Rect {
                x: p.x,
                y: p.y,
                width: r.width * camera.zoom,
                height: r.height * camera.zoom,
                fill: fill_unless_preview(shape, preview),
                stroke,
            }
        }
        ShapeKind::Circle { x, y, radius } => {
            let c = camera.world_to_screen(Point::new(*x, *y));
            DrawCmd::Circle {
                cx: c.x,
                cy: c.y,
                radius: radius * camera.zoom,
                fill: fill_unless_preview(shape, preview),
                stroke,
            }
        }
        ShapeKind::Line { x, y, width, height } => {
            let a = camera.world_to_screen(Point::new(*x, *y));
            let b = camera.world_to_screen(Point::new(x + width, y + height));
            let line_stroke = if preview {
                Stroke::dashed(&shape.color, stroke_w)
            } else {
                Stroke::solid(&shape.color, stroke_w)
            };
            DrawCmd::Segment { x1: a.x, y1: a.y, x2: b.x, y2: b.y, stroke: line_stroke }
        }
        ShapeKind::Path { points, closed, filled } => {
            let screen: Vec<Point> = points.iter().map(|p| camera.world_to_screen(*p)).collect();
            let fill = if !preview && *closed && *filled {
                Some(shape.color.clone())
            } else {
                None
            };
            let path_stroke = if preview {
                Stroke::dashed(&shape.color, stroke_w)
            } else {
                Stroke::solid(&shape.color, stroke_w)
            };
            DrawCmd::Polyline {
                points: screen,
                closed: *closed,
                fill,
                stroke: Some(path_stroke),
            }
        }
    }
}

fn fill_unless_preview(shape: &Shape, preview: bool) -> Option<String> {
    if preview { None } else { Some(shape.color.clone()) }
}

/// Dashed bounds (or circle) around the selected shape, plus point handles
/// when the selection is on a path.
fn selection_overlay(core: &EngineCore, selected: Hit, cmds: &mut Vec<DrawCmd>) {
    let camera = &core.camera;
    let Some(shape) = core.scene.find(selected.shape()) else {
        return;
    };

    match &shape.kind {
        ShapeKind::Circle { x, y, radius } => {
            let c = camera.world_to_screen(Point::new(*x, *y));
            cmds.push(DrawCmd::Circle {
                cx: c.x,
                cy: c.y,
                radius: (radius + SELECTION_PADDING) * camera.zoom,
                fill: None,
                stroke: Some(Stroke::dashed(SELECTION_COLOR, 2.0)),
            });
        }
        _ => {
            let b = geom::shape_bounds(shape);
            let p = camera.world_to_screen(Point::new(b.x - SELECTION_PADDING, b.y - SELECTION_PADDING));
            cmds.push(DrawCmd::Rect {
                x: p.x,
                y: p.y,
                width: (b.width + SELECTION_PADDING * 2.0) * camera.zoom,
                height: (b.height + SELECTION_PADDING * 2.0) * camera.zoom,
                fill: None,
                stroke: Some(Stroke::dashed(SELECTION_COLOR, 2.0)),
            });
        }
    }

    if let ShapeKind::Path { points, .. } = &shape.kind {
        let active = match selected {
            Hit::PathPoint { index, .. } => Some(index),
            Hit::Body { .. } => None,
        };
        for (index, point) in points.iter().enumerate() {
            let c = camera.world_to_screen(*point);
            let fill = if active == Some(index) {
                SELECTION_COLOR
            } else {
                "#ffffff"
            };
            cmds.push(DrawCmd::Circle {
                cx: c.x,
                cy: c.y,
                radius: HANDLE_RADIUS_PX,
                fill: Some(fill.to_owned()),
                stroke: Some(Stroke::solid(SELECTION_COLOR, 1.0)),
            });
        }
    }
}

// =============================================================
// Game frame
// =============================================================

/// The complete game frame: trail-fade wash, blocks, paddle, ball, and the
/// idle/paused banners.
#[must_use]
pub fn game_frame(game: &Game) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Clear { wash: Some("rgba(0, 0, 0, 0.1)".to_owned()) }];

    cmds.push(DrawCmd::Rect {
        x: game.paddle.x,
        y: game.paddle.y,
        width: game.paddle.width,
        height: game.paddle.height,
        fill: Some(PADDLE_COLOR.to_owned()),
        stroke: None,
    });

    cmds.push(DrawCmd::Circle {
        cx: game.ball.x,
        cy: game.ball.y,
        radius: game.ball.radius,
        fill: Some(BALL_COLOR.to_owned()),
        stroke: None,
    });

    for block in &game.blocks {
        cmds.push(DrawCmd::Rect {
            x: block.x,
            y: block.y,
            width: block.width,
            height: block.height,
            fill: Some(block.color.clone()),
            stroke: None,
        });
    }

    match game.phase {
        GamePhase::Idle | GamePhase::GameOver => {
            cmds.push(DrawCmd::Text {
                x: game.width / 2.0,
                y: game.height / 2.0,
                text: "Select a drawing and press Start".to_owned(),
                color: "#ffffff".to_owned(),
                size_px: (game.width / 25.0).max(16.0),
            });
        }
        GamePhase::Paused => {
            cmds.push(DrawCmd::Rect {
                x: 0.0,
                y: 0.0,
                width: game.width,
                height: game.height,
                fill: Some("rgba(0, 0, 0, 0.7)".to_owned()),
                stroke: None,
            });
            cmds.push(DrawCmd::Text {
                x: game.width / 2.0,
                y: game.height / 2.0,
                text: "PAUSED".to_owned(),
                color: "#ffffff".to_owned(),
                size_px: (game.width / 20.0).max(24.0),
            });
        }
        GamePhase::Running | GamePhase::LevelComplete => {}
    }

    cmds
}
