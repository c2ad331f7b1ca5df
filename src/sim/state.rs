//! Game state and core simulation types
//!
//! The tuple (bird, obstacles, score, phase, spawn timer) is the entire
//! session. `reset` reinitializes it in place - there is never more than one
//! session object per page load.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first activation, bird frozen mid-field
    NotStarted,
    /// Active gameplay
    Running,
    /// Bird collided or left the playfield
    Over,
}

/// Events emitted by `tick` for the audio/UI layer to consume.
///
/// The core has no dependency on anyone listening; dropping these on the
/// floor is fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An impulse was applied this tick
    Flapped,
    /// The bird cleared an obstacle (one event per obstacle)
    Scored,
    /// Terminal transition to `Over` (at most once per session)
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Center position; `pos.x` is fixed after construction
    pub pos: Vec2,
    /// Vertical velocity in units/tick (positive = down)
    pub vel_y: f32,
    pub radius: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BIRD_X, FIELD_HEIGHT / 2.0),
            vel_y: 0.0,
            radius: BIRD_RADIUS,
        }
    }
}

impl Bird {
    /// Square bounding box used for collision (center ± radius on both axes).
    ///
    /// The bird renders as a circle but collides as a box; that mismatch is
    /// deliberate and matches the original gameplay feel.
    pub fn aabb(&self) -> Rect {
        Rect::from_center_half_extent(self.pos, Vec2::splat(self.radius))
    }
}

/// A gap obstacle (pipe pair) scrolling right-to-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge, decremented by the scroll speed every tick
    pub x: f32,
    /// Bottom of the top pipe (top of the gap)
    pub gap_top: f32,
    /// Top of the bottom pipe (bottom of the gap)
    pub gap_bottom: f32,
    /// Set once when the bird clears this obstacle; awards exactly one point
    pub passed: bool,
}

impl Obstacle {
    /// Create an obstacle at horizontal position `x` with the gap starting
    /// at `gap_top`. Gap height is the fixed constant.
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            gap_bottom: gap_top + GAP_HEIGHT,
            passed: false,
        }
    }

    /// Trailing (right) edge
    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    /// Top pipe rectangle: from the playfield ceiling down to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, 0.0),
            Vec2::new(self.right(), self.gap_top),
        )
    }

    /// Bottom pipe rectangle: from the gap down to the playfield floor
    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.gap_bottom),
            Vec2::new(self.right(), FIELD_HEIGHT),
        )
    }

    /// True once the trailing edge has scrolled past the playfield's left edge
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed (for logging/diagnostics)
    pub seed: u64,
    pub bird: Bird,
    /// Live obstacles in creation order (left-to-right on screen)
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub phase: GamePhase,
    /// Ticks since the last obstacle spawn
    pub spawn_timer: u32,
    /// Ticks spent in `Running` this session
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session in `NotStarted`
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            bird: Bird::default(),
            obstacles: Vec::new(),
            score: 0,
            phase: GamePhase::NotStarted,
            spawn_timer: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// `NotStarted` → `Running`. Returns false (and does nothing) from any
    /// other phase.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Running;
            true
        } else {
            false
        }
    }

    /// Snap the bird's velocity to the jump constant (overwrite, not add).
    /// Only valid while `Running`; a no-op otherwise. Returns whether the
    /// impulse was applied.
    pub fn apply_impulse(&mut self) -> bool {
        if self.phase == GamePhase::Running {
            self.bird.vel_y = JUMP_VELOCITY;
            true
        } else {
            false
        }
    }

    /// Reinitialize the session in place: bird back to defaults, obstacles
    /// cleared, score and spawn timer zeroed, phase `NotStarted`.
    ///
    /// The RNG keeps running so consecutive sessions see different gap
    /// sequences (matching the original's unseeded randomness).
    pub fn reset(&mut self) {
        self.bird = Bird::default();
        self.obstacles.clear();
        self.score = 0;
        self.phase = GamePhase::NotStarted;
        self.spawn_timer = 0;
        self.time_ticks = 0;
    }
}
