//! Axis-aligned collision tests
//!
//! The bird renders as a circle but collides as a square box - the original
//! game's approximation, kept on purpose. Making this circle-accurate would
//! change gameplay feel and counts as a behavior change.

use glam::Vec2;

use super::state::{Bird, Obstacle};
use crate::consts::*;

/// Axis-aligned rectangle in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extent(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap test; touching edges don't count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Box/box test between the bird and an obstacle's two pipe rectangles.
///
/// Collision iff the bird's box horizontally overlaps the obstacle's x-span
/// AND the bird extends above the gap top or below the gap bottom.
pub fn bird_hits_obstacle(bird: &Bird, obstacle: &Obstacle) -> bool {
    let within_x = bird.pos.x + bird.radius > obstacle.x
        && bird.pos.x - bird.radius < obstacle.x + OBSTACLE_WIDTH;
    if !within_x {
        return false;
    }
    bird.pos.y - bird.radius < obstacle.gap_top
        || bird.pos.y + bird.radius > obstacle.gap_bottom
}

/// True when the bird's top or bottom edge exits the playfield
pub fn bird_out_of_bounds(bird: &Bird) -> bool {
    bird.pos.y - bird.radius < 0.0 || bird.pos.y + bird.radius > FIELD_HEIGHT
}
