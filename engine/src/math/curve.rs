//! Catmull-Rom Curve
//!
//! Open Catmull-Rom spline through an ordered list of control points.
//! Used to turn the cable's relaxed point chain into a smooth polyline.
//!
//! Three parameterizations are supported:
//!
//! - **Centripetal** (default): knot spacing `|p_i - p_j|^0.5`, no cusps or
//!   self-intersections within a segment
//! - **Chordal**: knot spacing `|p_i - p_j|`
//! - **Uniform**: fixed tension, classic Catmull-Rom
//!
//! The curve is parameterized by `t ∈ [0, 1]` spread evenly over segments
//! (not arc length). End tangents use mirrored phantom points.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Knot parameterization for the spline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    #[default]
    Centripetal,
    Chordal,
    Uniform,
}

/// Minimum knot interval before falling back to a neighbour interval.
const KNOT_EPSILON: f32 = 1e-4;

/// Default tension for the uniform variant.
pub const DEFAULT_TENSION: f32 = 0.5;

/// Cubic polynomial `c0 + c1 t + c2 t^2 + c3 t^3` with vector coefficients.
#[derive(Debug, Clone, Copy)]
struct CubicPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicPoly {
    /// Hermite form from endpoints and tangents.
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn uniform(x0: Vec3, x1: Vec3, x2: Vec3, x3: Vec3, tension: f32) -> Self {
        Self::hermite(x1, x2, tension * (x2 - x0), tension * (x3 - x1))
    }

    fn nonuniform(x0: Vec3, x1: Vec3, x2: Vec3, x3: Vec3, dt0: f32, dt1: f32, dt2: f32) -> Self {
        // Tangents on the [0, 1] interval of the middle segment
        let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        t1 *= dt1;
        t2 *= dt1;
        Self::hermite(x1, x2, t1, t2)
    }

    #[inline]
    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

/// Open Catmull-Rom spline over a borrowed point slice.
#[derive(Debug, Clone, Copy)]
pub struct CatmullRomCurve<'a> {
    points: &'a [Vec3],
    curve_type: CurveType,
}

impl<'a> CatmullRomCurve<'a> {
    /// Create a centripetal curve through `points`.
    pub fn new(points: &'a [Vec3]) -> Self {
        Self {
            points,
            curve_type: CurveType::Centripetal,
        }
    }

    /// Select the knot parameterization.
    pub fn with_type(mut self, curve_type: CurveType) -> Self {
        self.curve_type = curve_type;
        self
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Evaluate the curve at `t ∈ [0, 1]`.
    ///
    /// Returns `Vec3::ZERO` for an empty curve and the single point for a
    /// one-point curve.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let p = (n - 1) as f32 * t.clamp(0.0, 1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;

        if segment >= n - 1 {
            segment = n - 2;
            weight = 1.0;
        }

        // Phantom end points mirror the first/last segment
        let p0 = if segment > 0 {
            self.points[segment - 1]
        } else {
            2.0 * self.points[0] - self.points[1]
        };
        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p3 = if segment + 2 < n {
            self.points[segment + 2]
        } else {
            2.0 * self.points[n - 1] - self.points[n - 2]
        };

        let poly = match self.curve_type {
            CurveType::Uniform => CubicPoly::uniform(p0, p1, p2, p3, DEFAULT_TENSION),
            CurveType::Centripetal | CurveType::Chordal => {
                let pow = if self.curve_type == CurveType::Chordal {
                    0.5
                } else {
                    0.25
                };
                let mut dt0 = p0.distance_squared(p1).powf(pow);
                let mut dt1 = p1.distance_squared(p2).powf(pow);
                let mut dt2 = p2.distance_squared(p3).powf(pow);

                // Coincident points would divide by zero
                if dt1 < KNOT_EPSILON {
                    dt1 = 1.0;
                }
                if dt0 < KNOT_EPSILON {
                    dt0 = dt1;
                }
                if dt2 < KNOT_EPSILON {
                    dt2 = dt1;
                }
                CubicPoly::nonuniform(p0, p1, p2, p3, dt0, dt1, dt2)
            }
        };

        poly.eval(weight)
    }

    /// Sample `segments + 1` evenly spaced points into `out`, replacing its contents.
    ///
    /// Reuses the buffer's allocation; callers rebuilding every frame should
    /// keep the same `Vec` around.
    pub fn sample_into(&self, segments: usize, out: &mut Vec<Vec3>) {
        out.clear();
        if self.points.is_empty() {
            return;
        }
        let segments = segments.max(1);
        out.reserve(segments + 1);
        for i in 0..=segments {
            out.push(self.point_at(i as f32 / segments as f32));
        }
    }

    /// Sample `segments + 1` evenly spaced points.
    pub fn sample(&self, segments: usize) -> Vec<Vec3> {
        let mut out = Vec::new();
        self.sample_into(segments, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_curve_passes_through_control_points() {
        let points = zigzag();
        for curve_type in [CurveType::Centripetal, CurveType::Chordal, CurveType::Uniform] {
            let curve = CatmullRomCurve::new(&points).with_type(curve_type);
            for (i, p) in points.iter().enumerate() {
                let t = i as f32 / (points.len() - 1) as f32;
                assert!(
                    (curve.point_at(t) - *p).length() < 1e-4,
                    "{:?} missed point {}",
                    curve_type,
                    i
                );
            }
        }
    }

    #[test]
    fn test_sample_count_and_endpoints() {
        let points = zigzag();
        let curve = CatmullRomCurve::new(&points);
        let samples = curve.sample(50);
        assert_eq!(samples.len(), 51);
        assert!((samples[0] - points[0]).length() < 1e-5);
        assert!((samples[50] - points[3]).length() < 1e-5);
    }

    #[test]
    fn test_straight_line_stays_straight() {
        let points: Vec<Vec3> = (0..5).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let curve = CatmullRomCurve::new(&points);
        for p in curve.sample(20) {
            assert!(p.y.abs() < 1e-5);
            assert!(p.z.abs() < 1e-5);
        }
    }

    #[test]
    fn test_coincident_points_are_finite() {
        let points = vec![Vec3::ONE; 6];
        let curve = CatmullRomCurve::new(&points);
        for p in curve.sample(10) {
            assert!(p.is_finite());
            assert!((p - Vec3::ONE).length() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty: Vec<Vec3> = Vec::new();
        assert!(CatmullRomCurve::new(&empty).sample(10).is_empty());

        let single = vec![Vec3::new(1.0, 2.0, 3.0)];
        assert_eq!(CatmullRomCurve::new(&single).point_at(0.7), single[0]);
    }

    #[test]
    fn test_sample_into_reuses_buffer() {
        let points = zigzag();
        let curve = CatmullRomCurve::new(&points);
        let mut buffer = Vec::with_capacity(64);
        let ptr = buffer.as_ptr();
        curve.sample_into(50, &mut buffer);
        assert_eq!(buffer.len(), 51);
        assert_eq!(buffer.as_ptr(), ptr);
    }
}
