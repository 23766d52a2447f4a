//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::geometry::Rect;

/// Two triangles covering a quad given as NW, NE, SW, SE corners
fn quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [nw, ne, sw, se] = corners;
    vertices.push(Vertex::new(nw.x, nw.y, color));
    vertices.push(Vertex::new(ne.x, ne.y, color));
    vertices.push(Vertex::new(sw.x, sw.y, color));

    vertices.push(Vertex::new(sw.x, sw.y, color));
    vertices.push(Vertex::new(ne.x, ne.y, color));
    vertices.push(Vertex::new(se.x, se.y, color));
}

/// Generate vertices for a filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    quad(&mut vertices, r.corners(), color);
    vertices
}

/// Generate vertices for a rectangle border drawn inside its edges
pub fn rect_outline(r: &Rect, line_width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = line_width.min(r.width / 2.0).min(r.height / 2.0).max(0.0);
    let max = r.max();
    let strips = [
        // Top and bottom span the full width
        Rect::new(r.pos, r.width, w),
        Rect::new(Vec2::new(r.pos.x, max.y - w), r.width, w),
        // Left and right fill the gap between them
        Rect::new(Vec2::new(r.pos.x, r.pos.y + w), w, r.height - 2.0 * w),
        Rect::new(Vec2::new(max.x - w, r.pos.y + w), w, r.height - 2.0 * w),
    ];

    let mut vertices = Vec::with_capacity(strips.len() * 6);
    for strip in &strips {
        quad(&mut vertices, strip.corners(), color);
    }
    vertices
}

/// Generate vertices for the upper half of a disc (flat side down)
pub fn half_disc(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        // Screen space: y grows downward, so the dome is at negative y
        let theta1 = (i as f32 / segments as f32) * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y - radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y - radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        [from + perp, to + perp, from - perp, to - perp],
        color,
    );
    vertices
}
