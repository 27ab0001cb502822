//! Wireframe line builder
//!
//! Collects line-list vertices on the CPU. Every shape is expanded into
//! vertex pairs, so the result can be uploaded and drawn with a
//! `LineList` topology as-is.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use super::LineVertex;
use crate::physics::Bounds;

pub mod palette {
    pub const GRID: [f32; 4] = [0.05, 0.35, 0.1, 1.0];
    pub const BOUNDARY: [f32; 4] = [0.9, 0.2, 0.1, 1.0];
    pub const TARGET: [f32; 4] = [1.0, 0.4, 0.0, 1.0];
    pub const TARGET_LOCKED: [f32; 4] = [0.2, 1.0, 0.2, 1.0];
    pub const CHARACTER: [f32; 4] = [0.8, 0.8, 0.85, 1.0];
    pub const CABLE: [f32; 4] = [0.25, 0.6, 1.0, 1.0];
    pub const DEBUG: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
}

/// Segments used for circles.
const CIRCLE_SEGMENTS: usize = 24;

#[derive(Debug, Clone, Default)]
pub struct WireframeBuilder {
    vertices: Vec<LineVertex>,
}

impl WireframeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(lines: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(lines * 2),
        }
    }

    /// Drop all lines, keeping the allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn line_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn line(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        self.vertices.push(LineVertex::new(a, color));
        self.vertices.push(LineVertex::new(b, color));
    }

    /// Consecutive points joined by segments.
    pub fn polyline(&mut self, points: &[Vec3], color: [f32; 4]) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color);
        }
    }

    /// Closed loop through the points.
    pub fn polygon(&mut self, points: &[Vec3], color: [f32; 4]) {
        self.polyline(points, color);
        if points.len() > 2 {
            self.line(points[points.len() - 1], points[0], color);
        }
    }

    /// The 12 edges of a box.
    pub fn aabb(&mut self, min: Vec3, max: Vec3, color: [f32; 4]) {
        let c = |x: bool, y: bool, z: bool| {
            Vec3::new(
                if x { max.x } else { min.x },
                if y { max.y } else { min.y },
                if z { max.z } else { min.z },
            )
        };
        for &y in &[false, true] {
            self.polygon(
                &[c(false, y, false), c(true, y, false), c(true, y, true), c(false, y, true)],
                color,
            );
        }
        for &(x, z) in &[(false, false), (true, false), (true, true), (false, true)] {
            self.line(c(x, false, z), c(x, true, z), color);
        }
    }

    /// Circle of `radius` around `center` in the plane with normal `axis`.
    pub fn circle(&mut self, center: Vec3, radius: f32, axis: Vec3, color: [f32; 4]) {
        let rotation = Quat::from_rotation_arc(Vec3::Y, axis.normalize_or(Vec3::Y));
        let points: Vec<Vec3> = (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
                center + rotation * Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
            })
            .collect();
        self.polygon(&points, color);
    }

    /// Three great circles.
    pub fn sphere(&mut self, center: Vec3, radius: f32, color: [f32; 4]) {
        self.circle(center, radius, Vec3::X, color);
        self.circle(center, radius, Vec3::Y, color);
        self.circle(center, radius, Vec3::Z, color);
    }

    pub fn bounds(&mut self, bounds: &Bounds, color: [f32; 4]) {
        match *bounds {
            Bounds::Aabb { min, max } => self.aabb(min, max, color),
            Bounds::Sphere { center, radius } => self.sphere(center, radius, color),
        }
    }

    /// Square floor grid centred on the origin at height `y`.
    pub fn grid(&mut self, half_width: f32, spacing: f32, y: f32, color: [f32; 4]) {
        if spacing <= 0.0 || half_width <= 0.0 {
            return;
        }
        let steps = (half_width / spacing).floor() as i32;
        for i in -steps..=steps {
            let offset = i as f32 * spacing;
            self.line(
                Vec3::new(offset, y, -half_width),
                Vec3::new(offset, y, half_width),
                color,
            );
            self.line(
                Vec3::new(-half_width, y, offset),
                Vec3::new(half_width, y, offset),
                color,
            );
        }
    }

    /// Upright marker: a box for the body and a line showing the facing.
    pub fn character(&mut self, position: Vec3, facing: f32, height: f32, color: [f32; 4]) {
        let half = Vec3::new(0.35, 0.0, 0.35);
        self.aabb(position - half, position + half + Vec3::Y * height, color);
        let chest = position + Vec3::Y * height * 0.6;
        let heading = Vec3::new(facing.sin(), 0.0, facing.cos());
        self.line(chest, chest + heading, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_has_twelve_edges() {
        let mut builder = WireframeBuilder::new();
        builder.aabb(Vec3::ZERO, Vec3::ONE, palette::TARGET);
        assert_eq!(builder.line_count(), 12);
        assert_eq!(builder.vertices().len(), 24);
    }

    #[test]
    fn test_polyline_segments() {
        let mut builder = WireframeBuilder::new();
        let points = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        builder.polyline(&points, palette::CABLE);
        assert_eq!(builder.line_count(), 3);
        builder.clear();
        builder.polyline(&points[..1], palette::CABLE);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_circle_points_on_radius() {
        let mut builder = WireframeBuilder::new();
        builder.circle(Vec3::new(1.0, 2.0, 3.0), 2.0, Vec3::Y, palette::DEBUG);
        assert_eq!(builder.line_count(), CIRCLE_SEGMENTS);
        for v in builder.vertices() {
            let p = Vec3::from_array(v.position);
            assert!(((p - Vec3::new(1.0, 2.0, 3.0)).length() - 2.0).abs() < 1e-4);
            assert!((p.y - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_grid_line_count() {
        let mut builder = WireframeBuilder::new();
        builder.grid(2.0, 1.0, 0.0, palette::GRID);
        // 5 lines per direction
        assert_eq!(builder.line_count(), 10);
    }
}
