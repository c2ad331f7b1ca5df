//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable obstacle order (creation order = left-to-right on screen)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, bird_hits_obstacle, bird_out_of_bounds};
pub use state::{Bird, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, tick};
