//! Shared numeric constants for the editor and the game.

// ── Camera ──────────────────────────────────────────────────────

/// Minimum zoom factor the camera may reach.
pub const ZOOM_MIN: f64 = 0.1;

/// Maximum zoom factor the camera may reach.
pub const ZOOM_MAX: f64 = 5.0;

/// Zoom-in multiplier for one wheel notch or toolbar click.
pub const ZOOM_STEP_IN: f64 = 1.2;

/// Zoom-out multiplier for one wheel notch or toolbar click.
pub const ZOOM_STEP_OUT: f64 = 0.8;

/// Grid line spacing in world units at zoom 1.0.
pub const GRID_BASE_SPACING: f64 = 20.0;

// ── Editing ─────────────────────────────────────────────────────

/// World-space radius within which a path point is considered hit.
pub const POINT_HIT_RADIUS: f64 = 8.0;

/// Maximum world-space distance from a path edge for point insertion;
/// beyond it new points append at the end of the path.
pub const EDGE_SNAP_MAX_DIST: f64 = 20.0;

/// Grid unit for coordinate snapping, in world units.
pub const SNAP_UNIT: f64 = 10.0;

/// A path must keep at least this many points to remain a line.
pub const PATH_MIN_POINTS: usize = 2;

// ── Game ────────────────────────────────────────────────────────

/// Ball radius in canvas units before resize scaling.
pub const BALL_RADIUS: f64 = 6.0;

/// Magnitude of each ball velocity component at launch.
pub const BALL_SPEED: f64 = 4.0;

/// Vertical gap between the canvas bottom and the ball spawn point.
pub const BALL_SPAWN_OFFSET: f64 = 50.0;

/// Paddle width in canvas units before resize scaling.
pub const PADDLE_WIDTH: f64 = 100.0;

/// Paddle height in canvas units.
pub const PADDLE_HEIGHT: f64 = 12.0;

/// Paddle horizontal speed per frame under keyboard control.
pub const PADDLE_SPEED: f64 = 8.0;

/// Vertical gap between the canvas bottom and the paddle top.
pub const PADDLE_BOTTOM_OFFSET: f64 = 25.0;

/// Horizontal speed imparted by an edge-of-paddle hit (center hit is 0).
pub const PADDLE_BOUNCE_SPEED: f64 = 6.0;

/// Score awarded for destroying one block.
pub const SCORE_PER_BLOCK: i64 = 10;

/// Bonus score awarded for clearing every block in a level.
pub const LEVEL_CLEAR_BONUS: i64 = 100;

/// Lives at the start of a fresh game.
pub const START_LIVES: i32 = 3;

/// Side length of the block a path vertex flattens to.
pub const PATH_BLOCK_SIZE: f64 = 8.0;
