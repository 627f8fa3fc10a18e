//! Vector level editor and breakout-style game core.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns
//! everything between raw input events and draw calls: the shape/layer scene
//! model, pan/zoom camera math, hit-testing, snapshot undo/redo, the level
//! file formats shared by the editor and the game, and the game's discrete
//! physics step. The host JavaScript layer is responsible only for wiring DOM
//! events into the engine, executing the returned draw-call lists, and moving
//! files in and out of the browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor engine and the native-testable [`engine::EngineCore`] |
//! | [`doc`] | Scene model: shapes, layers, and mutation operations |
//! | [`geom`] | Pure geometry kernel (distance, containment, bounding boxes) |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`history`] | Snapshot-based undo/redo over the scene |
//! | [`hit`] | Hit-testing points and shapes under the cursor |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`level`] | Persisted/exported JSON formats shared with the game |
//! | [`game`] | Ball/paddle/block simulation and its state machine |
//! | [`render`] | Draw-call list production (scene, grid, selection, game) |
//! | [`paint`] | Executes draw-call lists against a 2D canvas context |
//! | [`consts`] | Shared numeric constants (zoom limits, hit radii, speeds) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod game;
pub mod geom;
pub mod history;
pub mod hit;
pub mod input;
pub mod level;
pub mod paint;
pub mod render;
