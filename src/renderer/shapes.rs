//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for a filled axis-aligned rectangle (two triangles)
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(r.min.x, r.min.y, color),
        Vertex::new(r.max.x, r.min.y, color),
        Vertex::new(r.min.x, r.max.y, color),
        Vertex::new(r.min.x, r.max.y, color),
        Vertex::new(r.max.x, r.min.y, color),
        Vertex::new(r.max.x, r.max.y, color),
    ]
}

/// Generate vertices for a filled circle (triangle fan from center)
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
