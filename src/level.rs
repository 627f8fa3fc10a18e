//! Persisted and exported JSON formats shared by the editor and the game.
//!
//! This module owns every representation that crosses a file boundary: the
//! layered editor save ([`ProjectFile`]), the flat tracer save
//! ([`TraceFile`]), the game export ([`GameLevelFile`]), and the block
//! layout the game loads ([`GameDrawing`]). Loads are all-or-nothing —
//! parsing happens before any state is replaced, and a malformed file
//! surfaces a [`LevelError`] while the previous state stays installed.
//!
//! The sample drawings the game ships with live here too, so the game can
//! offer something to play before the editor has exported anything.

#[cfg(test)]
#[path = "level_test.rs"]
mod level_test;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::PATH_BLOCK_SIZE;
use crate::doc::{Layer, Scene, Shape, ShapeKind};
use crate::geom;

/// Error returned by the parse functions.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// The text was not valid JSON or did not match the expected schema.
    #[error("failed to parse level file: {0}")]
    Parse(#[from] serde_json::Error),
    /// The drawing parsed but contains no blocks to play against.
    #[error("drawing contains no blocks")]
    EmptyDrawing,
}

/// File metadata stamped on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// ISO-8601 creation timestamp, supplied by the host.
    pub created: String,
    /// Save format version.
    pub version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            created: String::new(),
            version: "1.0".to_owned(),
        }
    }
}

/// Layered editor save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    pub author: String,
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl ProjectFile {
    /// Consume the file into a scene.
    #[must_use]
    pub fn into_scene(self) -> Scene {
        let mut scene = Scene { layers: self.layers };
        scene.ensure_layer();
        scene
    }
}

/// Flat tracer save file: shapes plus the traced reference image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFile {
    pub name: String,
    pub author: String,
    pub shapes: Vec<Shape>,
    /// Reference image as a data URI, or the empty string when none was set.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl TraceFile {
    /// The reference image, if one was saved.
    #[must_use]
    pub fn image_data_uri(&self) -> Option<String> {
        if self.image.is_empty() {
            None
        } else {
            Some(self.image.clone())
        }
    }

    /// Consume the file into a single-layer scene.
    #[must_use]
    pub fn into_scene(self) -> Scene {
        let mut layer = Layer::new("Layer 1");
        layer.shapes = self.shapes;
        Scene { layers: vec![layer] }
    }
}

/// Integer-rounded point inside an exported path element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

/// Geometry of one exported element, tagged like the editor shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    #[serde(rename = "rectangle")]
    Rectangle { x: i64, y: i64, width: i64, height: i64 },
    Circle { x: i64, y: i64, radius: i64 },
    Line { x: i64, y: i64, width: i64, height: i64 },
    Path {
        points: Vec<GridPoint>,
        closed: bool,
        filled: bool,
    },
}

/// One breakable element of an exported level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(flatten)]
    pub kind: ElementKind,
    pub color: String,
    pub health: i32,
    pub effect: String,
}

/// Level file the editor exports for the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLevelFile {
    pub title: String,
    pub author: String,
    pub background: String,
    pub elements: Vec<Element>,
}

impl GameLevelFile {
    /// Flatten the elements into the block layout the game plays against.
    ///
    /// Rectangles map to one block each; circles and lines to their
    /// bounding block; paths to one fixed-size block per vertex, the same
    /// cloud-of-blocks form the sample drawings use.
    #[must_use]
    pub fn to_drawing(&self) -> GameDrawing {
        let mut blocks = Vec::new();
        for element in &self.elements {
            push_element_blocks(&mut blocks, element);
        }
        GameDrawing { name: self.title.clone(), blocks }
    }
}

/// One destructible block in the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub health: i32,
}

/// A named block layout the game can load directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDrawing {
    pub name: String,
    pub blocks: Vec<Block>,
}

// =============================================================
// Parsing (the load boundary)
// =============================================================

/// Parse a layered editor save.
///
/// # Errors
///
/// Returns [`LevelError::Parse`] for malformed JSON or schema mismatches.
pub fn parse_project(json: &str) -> Result<ProjectFile, LevelError> {
    serde_json::from_str(json).map_err(|err| {
        warn!(%err, "rejected project file");
        LevelError::Parse(err)
    })
}

/// Parse a flat tracer save.
///
/// # Errors
///
/// Returns [`LevelError::Parse`] for malformed JSON or schema mismatches.
pub fn parse_trace(json: &str) -> Result<TraceFile, LevelError> {
    serde_json::from_str(json).map_err(|err| {
        warn!(%err, "rejected trace file");
        LevelError::Parse(err)
    })
}

/// Parse a block layout for the game.
///
/// # Errors
///
/// Returns [`LevelError::Parse`] for malformed JSON or schema mismatches
/// and [`LevelError::EmptyDrawing`] for a layout with nothing to break.
pub fn parse_drawing(json: &str) -> Result<GameDrawing, LevelError> {
    let drawing: GameDrawing = serde_json::from_str(json).map_err(|err| {
        warn!(%err, "rejected drawing file");
        LevelError::Parse(err)
    })?;
    if drawing.blocks.is_empty() {
        warn!(name = %drawing.name, "rejected drawing with no blocks");
        return Err(LevelError::EmptyDrawing);
    }
    Ok(drawing)
}

// =============================================================
// Building save files
// =============================================================

/// Build the layered save file for `scene`.
#[must_use]
pub fn project_file(scene: &Scene, name: &str, author: &str, created: &str) -> ProjectFile {
    ProjectFile {
        name: name.to_owned(),
        author: author.to_owned(),
        layers: scene.layers.clone(),
        metadata: Metadata {
            created: created.to_owned(),
            ..Metadata::default()
        },
    }
}

/// Build the flat tracer save file for `scene`, flattening every layer in
/// z-order.
#[must_use]
pub fn trace_file(
    scene: &Scene,
    image: Option<&str>,
    name: &str,
    author: &str,
    created: &str,
) -> TraceFile {
    TraceFile {
        name: name.to_owned(),
        author: author.to_owned(),
        shapes: scene
            .layers
            .iter()
            .flat_map(|l| l.shapes.iter().cloned())
            .collect(),
        image: image.unwrap_or_default().to_owned(),
        metadata: Metadata {
            created: created.to_owned(),
            ..Metadata::default()
        },
    }
}

/// Flatten the visible layers of `scene` into the game export format, with
/// every coordinate rounded to an integer.
#[must_use]
pub fn export_game_level(scene: &Scene, title: &str, author: &str) -> GameLevelFile {
    GameLevelFile {
        title: title.to_owned(),
        author: author.to_owned(),
        background: "#1a1a2e".to_owned(),
        elements: scene.visible_shapes().map(shape_to_element).collect(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_i64(v: f64) -> i64 {
    v.round() as i64
}

fn shape_to_element(shape: &Shape) -> Element {
    let kind = match &shape.kind {
        ShapeKind::Rect { x, y, width, height } => ElementKind::Rectangle {
            x: round_i64(*x),
            y: round_i64(*y),
            width: round_i64(*width),
            height: round_i64(*height),
        },
        ShapeKind::Circle { x, y, radius } => ElementKind::Circle {
            x: round_i64(*x),
            y: round_i64(*y),
            radius: round_i64(*radius),
        },
        ShapeKind::Line { x, y, width, height } => ElementKind::Line {
            x: round_i64(*x),
            y: round_i64(*y),
            width: round_i64(*width),
            height: round_i64(*height),
        },
        ShapeKind::Path { points, closed, filled } => ElementKind::Path {
            points: points
                .iter()
                .map(|p| GridPoint { x: round_i64(p.x), y: round_i64(p.y) })
                .collect(),
            closed: *closed,
            filled: *filled,
        },
    };
    Element {
        kind,
        color: shape.color.clone(),
        health: shape.health,
        effect: shape.effect.clone(),
    }
}

// =============================================================
// Element flattening
// =============================================================

#[allow(clippy::cast_precision_loss)]
fn push_element_blocks(blocks: &mut Vec<Block>, element: &Element) {
    let block = |x: f64, y: f64, w: f64, h: f64| Block {
        x,
        y,
        width: w,
        height: h,
        color: element.color.clone(),
        health: element.health,
    };

    match &element.kind {
        ElementKind::Rectangle { x, y, width, height } => {
            let r = geom::normalized_rect(*x as f64, *y as f64, *width as f64, *height as f64);
            blocks.push(block(r.x, r.y, r.width, r.height));
        }
        ElementKind::Circle { x, y, radius } => {
            let r = (*radius as f64).abs();
            blocks.push(block(*x as f64 - r, *y as f64 - r, r * 2.0, r * 2.0));
        }
        ElementKind::Line { x, y, width, height } => {
            let r = geom::normalized_rect(*x as f64, *y as f64, *width as f64, *height as f64);
            // A degenerate axis keeps at least one block unit of thickness.
            blocks.push(block(
                r.x,
                r.y,
                r.width.max(PATH_BLOCK_SIZE),
                r.height.max(PATH_BLOCK_SIZE),
            ));
        }
        ElementKind::Path { points, .. } => {
            let half = PATH_BLOCK_SIZE / 2.0;
            for p in points {
                blocks.push(block(
                    p.x as f64 - half,
                    p.y as f64 - half,
                    PATH_BLOCK_SIZE,
                    PATH_BLOCK_SIZE,
                ));
            }
        }
    }
}

// =============================================================
// Sample drawings
// =============================================================

/// The built-in drawings the game offers before anything is loaded, sized
/// for a canvas of `width` × `height`.
#[must_use]
pub fn sample_drawings(width: f64, height: f64) -> Vec<GameDrawing> {
    vec![
        GameDrawing { name: "Smiley".to_owned(), blocks: smiley_blocks(width, height) },
        GameDrawing { name: "Heart".to_owned(), blocks: heart_blocks(width, height) },
        GameDrawing { name: "Star".to_owned(), blocks: star_blocks(width, height) },
    ]
}

fn sample_block_size(width: f64) -> f64 {
    (width / 100.0).max(4.0)
}

fn smiley_blocks(width: f64, height: f64) -> Vec<Block> {
    let center_x = width / 2.0;
    let center_y = height / 3.0;
    let radius = (width / 4.0).min(80.0);
    let size = sample_block_size(width);
    let mut blocks = Vec::new();

    // Face outline.
    let mut angle = 0.0_f64;
    while angle < 360.0 {
        let rad = angle.to_radians();
        blocks.push(Block {
            x: center_x + rad.cos() * radius,
            y: center_y + rad.sin() * radius,
            width: size,
            height: size,
            color: "#FFD700".to_owned(),
            health: 1,
        });
        angle += 15.0;
    }

    // Eyes.
    let eye = (size * 1.5).max(8.0);
    for dx in [-25.0, 25.0] {
        blocks.push(Block {
            x: center_x + dx,
            y: center_y - 15.0,
            width: eye,
            height: eye,
            color: "#000".to_owned(),
            health: 1,
        });
    }

    // Smile arc.
    let mut angle = 200.0_f64;
    while angle < 340.0 {
        let rad = angle.to_radians();
        blocks.push(Block {
            x: center_x + rad.cos() * (radius * 0.6),
            y: center_y + rad.sin() * (radius * 0.6),
            width: size * 0.8,
            height: size * 0.8,
            color: "#000".to_owned(),
            health: 1,
        });
        angle += 12.0;
    }

    blocks
}

fn heart_blocks(width: f64, height: f64) -> Vec<Block> {
    let center_x = width / 2.0;
    let center_y = height / 3.0;
    let size = sample_block_size(width);
    let mut blocks = Vec::new();

    let mut angle = 0.0_f64;
    while angle < 360.0 {
        let t = angle.to_radians();
        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        blocks.push(Block {
            x: center_x - x * 2.5,
            y: center_y - y * 2.5,
            width: size,
            height: size,
            color: "#FF6B6B".to_owned(),
            health: 1,
        });
        angle += 8.0;
    }

    blocks
}

fn star_blocks(width: f64, height: f64) -> Vec<Block> {
    let center_x = width / 2.0;
    let center_y = height / 3.0;
    let points = 5_u32;
    let outer = (width / 6.0).min(60.0);
    let inner = outer * 0.5;
    let size = sample_block_size(width);
    let mut blocks = Vec::new();

    for i in 0..=(points * 2) {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = (std::f64::consts::PI / f64::from(points)) * f64::from(i);
        blocks.push(Block {
            x: center_x + angle.cos() * radius,
            y: center_y + angle.sin() * radius,
            width: size,
            height: size,
            color: "#4ECDC4".to_owned(),
            health: 1,
        });
    }

    blocks
}
