//! Trailing data cable
//!
//! A fixed-length chain of points hanging off the character's back socket.
//! Each frame the head is pinned to the socket, every free point drops by a
//! constant gravity step, then gets pulled halfway back toward its
//! predecessor if the link is overstretched. Links only ever contract, so
//! the cable sags and drags along the floor instead of behaving like a rod.
//!
//! The renderable curve is rebuilt from the points every frame into a
//! buffer the simulator owns.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::{CatmullRomCurve, CurveType};

/// Tuning for the cable chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CableConfig {
    /// Number of points in the chain, anchor included
    pub point_count: usize,
    /// Maximum link length before the constraint pulls (meters)
    pub rest_length: f32,
    /// Downward displacement applied to each free point per update (meters)
    pub gravity_step: f32,
    /// Lowest height a point may reach
    pub floor_height: f32,
    /// Fraction of the excess removed per update
    pub correction: f32,
    /// Segments used when sampling the rendered curve
    pub curve_segments: usize,
    pub curve_type: CurveType,
    /// Height of the initial chain laid out behind the spawn point
    pub initial_height: f32,
}

impl Default for CableConfig {
    fn default() -> Self {
        Self {
            point_count: 30,
            rest_length: 0.5,
            gravity_step: 0.01,
            floor_height: 0.1,
            correction: 0.5,
            curve_segments: 50,
            curve_type: CurveType::Centripetal,
            initial_height: 0.2,
        }
    }
}

/// The cable chain and its derived curve.
#[derive(Debug, Clone)]
pub struct CableSimulator {
    config: CableConfig,
    /// Index 0 is the anchor; the length never changes after construction
    points: Vec<Vec3>,
    /// Sampled curve, rebuilt every update
    curve: Vec<Vec3>,
}

impl CableSimulator {
    /// Lay the chain out in a straight line running -Z from `origin`.
    ///
    /// Chains shorter than two points are padded to two.
    pub fn new(config: CableConfig, origin: Vec3) -> Self {
        Self::trailing(config, origin, Vec3::NEG_Z)
    }

    /// Lay the chain out along `back` (projected onto the floor) from
    /// `origin`, at the configured initial height.
    pub fn trailing(config: CableConfig, origin: Vec3, back: Vec3) -> Self {
        let count = config.point_count.max(2);
        let mut cable = Self {
            config,
            points: vec![Vec3::ZERO; count],
            curve: Vec::with_capacity(config.curve_segments + 1),
        };
        cable.reset_trailing(origin, back);
        cable
    }

    /// Build a chain from explicit points (anchor first).
    pub fn from_points(config: CableConfig, points: Vec<Vec3>) -> Self {
        let mut cable = Self {
            config,
            points,
            curve: Vec::with_capacity(config.curve_segments + 1),
        };
        cable.rebuild_curve();
        cable
    }

    pub fn config(&self) -> &CableConfig {
        &self.config
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Curve produced by the last update.
    pub fn curve(&self) -> &[Vec3] {
        &self.curve
    }

    pub fn anchor(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    /// Pin the head to `anchor`, relax the chain once and rebuild the curve.
    pub fn update(&mut self, anchor: Vec3) -> &[Vec3] {
        self.relax(anchor);
        self.rebuild_curve();
        &self.curve
    }

    /// One relaxation pass without touching the curve.
    ///
    /// Points are processed head to tail; each correction uses the
    /// predecessor's already-updated position.
    pub fn relax(&mut self, anchor: Vec3) {
        let Some(head) = self.points.first_mut() else {
            return;
        };
        *head = anchor;

        let CableConfig {
            rest_length,
            gravity_step,
            floor_height,
            correction,
            ..
        } = self.config;

        for i in 1..self.points.len() {
            let prev = self.points[i - 1];
            let mut point = self.points[i];

            point.y -= gravity_step;

            let delta = point - prev;
            let dist = delta.length();
            if dist > rest_length {
                // dist > rest_length >= 0, so the division is safe
                let excess = (dist - rest_length) * correction;
                point -= delta / dist * excess;
            }

            point.y = point.y.max(floor_height);
            self.points[i] = point;
        }
    }

    /// Reset the chain to the straight -Z layout from `origin`.
    pub fn reset(&mut self, origin: Vec3) {
        self.reset_trailing(origin, Vec3::NEG_Z);
    }

    /// Reset the chain to a straight layout along `back` from `origin`.
    /// A vertical or zero `back` falls back to -Z.
    pub fn reset_trailing(&mut self, origin: Vec3, back: Vec3) {
        let direction = Vec3::new(back.x, 0.0, back.z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let spacing = self.config.rest_length;
        let height = self.config.initial_height;
        for (i, p) in self.points.iter_mut().enumerate() {
            let along = origin + direction * (i as f32 * spacing);
            *p = Vec3::new(along.x, height, along.z);
        }
        self.rebuild_curve();
    }

    /// Longest link in the chain.
    pub fn max_link_length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .fold(0.0, f32::max)
    }

    fn rebuild_curve(&mut self) {
        CatmullRomCurve::new(&self.points)
            .with_type(self.config.curve_type)
            .sample_into(self.config.curve_segments, &mut self.curve);
    }
}
