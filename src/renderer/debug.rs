//! Debug-draw context for hitbox overlays

use glam::DVec2;
use std::f64::consts::TAU;

use super::vertex::Vertex;

pub type Color = [f32; 4];

/// Sink for hitbox outlines. Passed explicitly into every draw call.
pub trait DebugDraw {
    fn line(&mut self, start: DVec2, end: DVec2, color: Color);
    fn circle(&mut self, center: DVec2, radius: f64, color: Color);
}

/// Collects outlines as a line-list vertex buffer (two vertices per line),
/// shifted by a camera offset.
#[derive(Debug, Clone, Default)]
pub struct LineList {
    vertices: Vec<Vertex>,
    circle_segments: u32,
    offset: DVec2,
}

impl LineList {
    pub fn new(circle_segments: u32) -> Self {
        Self {
            vertices: Vec::new(),
            circle_segments: circle_segments.max(3),
            offset: DVec2::ZERO,
        }
    }

    /// Camera offset added to every point
    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes ready for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    fn push(&mut self, p: DVec2, color: Color) {
        let p = p + self.offset;
        self.vertices.push(Vertex::new(p.x as f32, p.y as f32, color));
    }
}

impl DebugDraw for LineList {
    fn line(&mut self, start: DVec2, end: DVec2, color: Color) {
        self.push(start, color);
        self.push(end, color);
    }

    fn circle(&mut self, center: DVec2, radius: f64, color: Color) {
        let segments = self.circle_segments;
        for i in 0..segments {
            let theta1 = (i as f64 / segments as f64) * TAU;
            let theta2 = ((i + 1) as f64 / segments as f64) * TAU;
            self.line(
                center + DVec2::new(theta1.cos(), theta1.sin()) * radius,
                center + DVec2::new(theta2.cos(), theta2.sin()) * radius,
                color,
            );
        }
    }
}
