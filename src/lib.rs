//! Flapwing - a minimal Flappy Bird variant for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio sound effects and background music
//! - `settings`: Audio preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions (game units, y grows downward)
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Bird defaults - x never changes after construction
    pub const BIRD_X: f32 = 120.0;
    pub const BIRD_RADIUS: f32 = 20.0;
    /// Downward acceleration per tick²
    pub const GRAVITY: f32 = 0.5;
    /// Velocity snap applied on a flap (negative = up)
    pub const JUMP_VELOCITY: f32 = -8.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    /// Vertical opening the bird must pass through
    pub const GAP_HEIGHT: f32 = 150.0;
    /// Minimum pipe stub above/below the gap
    pub const MIN_GAP_MARGIN: f32 = 60.0;
    /// Horizontal scroll per tick
    pub const SCROLL_SPEED: f32 = 2.0;
    /// Ticks between obstacle spawns
    pub const SPAWN_INTERVAL_TICKS: u32 = 100;
}
