//! Breakout-style simulation: ball, paddle, and the blocks derived from an
//! exported drawing.
//!
//! The simulation advances one fixed step per [`Game::step`] call — the
//! host's animation loop provides the cadence, the core never scales by
//! elapsed time. Nothing in here may panic for reachable state: a frame
//! callback that throws kills the whole animation loop, so misses, empty
//! block lists, and degenerate sizes are all normal outcomes. Only running
//! out of lives ends a run.
//!
//! Status display is an output port: every step returns a [`Hud`] readout
//! and presentation belongs to the host.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use serde::Serialize;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{
    BALL_RADIUS, BALL_SPAWN_OFFSET, BALL_SPEED, LEVEL_CLEAR_BONUS, PADDLE_BOTTOM_OFFSET,
    PADDLE_BOUNCE_SPEED, PADDLE_HEIGHT, PADDLE_SPEED, PADDLE_WIDTH, SCORE_PER_BLOCK, START_LIVES,
};
use crate::level::{Block, GameDrawing};
use crate::{paint, render};

/// Where the simulation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// No run in progress; waiting for a drawing and a start.
    Idle,
    /// The ball is live.
    Running,
    /// A run is suspended; toggling resumes it.
    Paused,
    /// All lives spent. A reset returns to `Idle`.
    GameOver,
    /// Every block cleared. `continue_level` resumes, `reset` returns to `Idle`.
    LevelComplete,
}

/// The ball: position, radius, and per-frame velocity.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub dx: f64,
    pub dy: f64,
}

/// The paddle: position, extent, and per-frame horizontal velocity.
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub dx: f64,
}

/// Per-frame status readout for the host to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: i64,
    pub lives: i32,
    pub level: i32,
    pub phase: GamePhase,
}

/// The whole game state for one canvas.
pub struct Game {
    pub width: f64,
    pub height: f64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub blocks: Vec<Block>,
    pub score: i64,
    pub lives: i32,
    pub level: i32,
    pub phase: GamePhase,
    drawing: Option<GameDrawing>,
}

impl Game {
    /// A fresh idle game for a canvas of `width` × `height`.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let mut game = Self {
            width,
            height,
            ball: Ball {
                x: width / 2.0,
                y: height - BALL_SPAWN_OFFSET,
                radius: BALL_RADIUS,
                dx: BALL_SPEED,
                dy: -BALL_SPEED,
            },
            paddle: Paddle {
                x: (width - PADDLE_WIDTH) / 2.0,
                y: height - PADDLE_BOTTOM_OFFSET,
                width: PADDLE_WIDTH,
                height: PADDLE_HEIGHT,
                dx: 0.0,
            },
            blocks: Vec::new(),
            score: 0,
            lives: START_LIVES,
            level: 1,
            phase: GamePhase::Idle,
            drawing: None,
        };
        game.set_bounds(width, height);
        game
    }

    /// Adapt to a resized canvas: entities reposition and rescale, and the
    /// block layout rebuilds from the installed drawing.
    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;

        self.ball.radius = (width / 100.0).max(4.0);
        self.ball.x = width / 2.0;
        self.ball.y = height - BALL_SPAWN_OFFSET;

        self.paddle.width = (width / 5.0).max(80.0);
        self.paddle.x = (width - self.paddle.width) / 2.0;
        self.paddle.y = height - PADDLE_BOTTOM_OFFSET;

        self.rebuild_blocks();
    }

    /// Install a drawing and build its block layout.
    pub fn load_drawing(&mut self, drawing: GameDrawing) {
        self.blocks = drawing.blocks.clone();
        self.drawing = Some(drawing);
    }

    /// The installed drawing's name, if any.
    #[must_use]
    pub fn drawing_name(&self) -> Option<&str> {
        self.drawing.as_ref().map(|d| d.name.as_str())
    }

    /// Begin a run. Refused (returning `false`) until a drawing is loaded.
    pub fn start(&mut self) -> bool {
        if self.drawing.is_none() {
            return false;
        }
        self.phase = GamePhase::Running;
        self.reset_ball();
        true
    }

    /// Suspend or resume a run. No-op in any other phase.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// Return to `Idle` with a fresh score, lives, and block layout.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
        self.phase = GamePhase::Idle;
        self.rebuild_blocks();
        self.reset_ball();
    }

    /// Resume play after a completed level with a rebuilt block layout.
    /// No-op unless the phase is `LevelComplete`.
    pub fn continue_level(&mut self) {
        if self.phase != GamePhase::LevelComplete {
            return;
        }
        self.rebuild_blocks();
        self.reset_ball();
        self.phase = GamePhase::Running;
    }

    /// Set the paddle's horizontal velocity. Keyboard control passes
    /// ±[`PADDLE_SPEED`]; touch-follow control passes a proportional value.
    pub fn set_paddle_dx(&mut self, dx: f64) {
        self.paddle.dx = dx;
    }

    /// Convenience for keyboard control: -1 left, 0 stop, 1 right.
    pub fn steer(&mut self, direction: i32) {
        self.paddle.dx = f64::from(direction.signum()) * PADDLE_SPEED;
    }

    /// Current status readout.
    #[must_use]
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            level: self.level,
            phase: self.phase,
        }
    }

    /// Advance the simulation one frame and return the readout.
    ///
    /// Does nothing unless the phase is `Running`.
    pub fn step(&mut self) -> Hud {
        if self.phase != GamePhase::Running {
            return self.hud();
        }

        // Paddle moves and clamps to the canvas.
        let max_x = (self.width - self.paddle.width).max(0.0);
        self.paddle.x = (self.paddle.x + self.paddle.dx).clamp(0.0, max_x);

        // Ball moves.
        self.ball.x += self.ball.dx;
        self.ball.y += self.ball.dy;

        // Side walls reflect horizontally, the top reflects vertically.
        // Signs are set outright so an overlapping ball cannot re-flip.
        if self.ball.x - self.ball.radius < 0.0 {
            self.ball.dx = self.ball.dx.abs();
        }
        if self.ball.x + self.ball.radius > self.width {
            self.ball.dx = -self.ball.dx.abs();
        }
        if self.ball.y - self.ball.radius < 0.0 {
            self.ball.dy = self.ball.dy.abs();
        }

        // Paddle: only triggers while the ball is moving downward, so a
        // ball already bouncing away cannot re-trigger.
        if self.ball.dy > 0.0
            && self.ball.y + self.ball.radius > self.paddle.y
            && self.ball.x > self.paddle.x
            && self.ball.x < self.paddle.x + self.paddle.width
        {
            let half = self.paddle.width / 2.0;
            let hit_pos = (self.ball.x - (self.paddle.x + half)) / half;
            self.ball.dx = hit_pos * PADDLE_BOUNCE_SPEED;
            self.ball.dy = -self.ball.dy;
        }

        // Below the canvas is a miss, not a bounce.
        if self.ball.y - self.ball.radius > self.height {
            self.lives -= 1;
            if self.lives <= 0 {
                debug!(score = self.score, "game over");
                self.phase = GamePhase::GameOver;
            } else {
                self.reset_ball();
            }
            return self.hud();
        }

        // Blocks: health decrements per overlapped block, but the ball's
        // vertical velocity flips at most once per frame however many
        // blocks were struck.
        let ball = self.ball;
        let mut any_hit = false;
        let mut destroyed: i64 = 0;
        self.blocks.retain_mut(|block| {
            if !ball_overlaps_block(&ball, block) {
                return true;
            }
            any_hit = true;
            block.health -= 1;
            if block.health <= 0 {
                destroyed += 1;
                return false;
            }
            true
        });
        self.score += destroyed * SCORE_PER_BLOCK;
        if any_hit {
            self.ball.dy = -self.ball.dy;
        }

        if any_hit && self.blocks.is_empty() {
            self.level += 1;
            self.score += LEVEL_CLEAR_BONUS;
            self.phase = GamePhase::LevelComplete;
            debug!(level = self.level, score = self.score, "level complete");
        }

        self.hud()
    }

    fn reset_ball(&mut self) {
        self.ball.x = self.width / 2.0;
        self.ball.y = self.height - BALL_SPAWN_OFFSET;
        self.ball.dx = if rand::random::<bool>() { BALL_SPEED } else { -BALL_SPEED };
        self.ball.dy = -BALL_SPEED;
    }

    fn rebuild_blocks(&mut self) {
        if let Some(drawing) = &self.drawing {
            self.blocks = drawing.blocks.clone();
        }
    }
}

/// Axis-aligned overlap between the ball's bounding box and a block.
fn ball_overlaps_block(ball: &Ball, block: &Block) -> bool {
    ball.x + ball.radius > block.x
        && ball.x - ball.radius < block.x + block.width
        && ball.y + ball.radius > block.y
        && ball.y - ball.radius < block.y + block.height
}

/// The full game. Wraps [`Game`] and owns the browser canvas element.
pub struct Arcade {
    canvas: HtmlCanvasElement,
    pub game: Game,
}

impl Arcade {
    /// Create a game bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, width: f64, height: f64) -> Self {
        Self { canvas, game: Game::new(width, height) }
    }

    /// Advance one frame and repaint.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call fails.
    pub fn tick(&mut self) -> Result<Hud, JsValue> {
        let hud = self.game.step();
        let ctx = self.context_2d()?;
        let cmds = render::game_frame(&self.game);
        paint::paint(&ctx, &cmds, self.game.width, self.game.height, 1.0)?;
        Ok(hud)
    }

    fn context_2d(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        self.canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)
    }
}
