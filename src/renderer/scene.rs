//! Builds the per-frame vertex list from a simulation snapshot
//!
//! Pull-based and read-only: the renderer never feeds anything back into
//! the simulation.

use super::shapes::{circle, rect};
use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState, Rect};

const BIRD_SEGMENTS: u32 = 32;
/// Cap depth at the obstacle's leading edge
const RIM_HEIGHT: f32 = 14.0;

/// Tessellate the whole playfield for this frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for obstacle in &state.obstacles {
        let top = obstacle.top_rect();
        let bottom = obstacle.bottom_rect();
        vertices.extend(rect(&top, colors::PIPE));
        vertices.extend(rect(&bottom, colors::PIPE));

        // Darker rim strips framing the gap
        let top_rim = Rect::new(
            glam::Vec2::new(top.min.x, (top.max.y - RIM_HEIGHT).max(0.0)),
            top.max,
        );
        let bottom_rim = Rect::new(
            bottom.min,
            glam::Vec2::new(bottom.max.x, bottom.min.y + RIM_HEIGHT),
        );
        vertices.extend(rect(&top_rim, colors::PIPE_RIM));
        vertices.extend(rect(&bottom_rim, colors::PIPE_RIM));
    }

    let bird_color = if state.phase == GamePhase::Over {
        colors::BIRD_DEAD
    } else {
        colors::BIRD
    };
    vertices.extend(circle(
        state.bird.pos,
        state.bird.radius,
        bird_color,
        BIRD_SEGMENTS,
    ));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    #[test]
    fn test_empty_field_draws_only_bird() {
        let state = GameState::new(7);
        let verts = build_scene(&state);
        assert_eq!(verts.len(), (BIRD_SEGMENTS * 3) as usize);
    }

    #[test]
    fn test_obstacles_add_quads() {
        let mut state = GameState::new(7);
        state.obstacles.push(Obstacle::new(300.0, 100.0));
        let verts = build_scene(&state);
        // 4 quads (two pipes + two rims) + the bird fan
        assert_eq!(verts.len(), 4 * 6 + (BIRD_SEGMENTS * 3) as usize);
    }
}
