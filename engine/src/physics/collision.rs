//! Ray intersection queries
//!
//! Interactive targets are hit-tested with simple bounding shapes: boxes for
//! racks, doors and desks, spheres for the core and hologram parts. The
//! resolver only needs the entry distance along the ray.
//!
//! # Example
//!
//! ```ignore
//! use server_room_engine::physics::collision::{Bounds, Ray};
//! use glam::Vec3;
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
//! let crate_box = Bounds::aabb_from_center(Vec3::ZERO, Vec3::splat(1.0));
//!
//! if let Some(t) = crate_box.intersect(&ray) {
//!     println!("Hit at distance {}: {:?}", t, ray.at(t));
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always normalized (or zero for a degenerate ray)
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray. A zero-length direction yields a degenerate ray that
    /// hits nothing.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec3::ZERO
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Hit-test geometry for one part of a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Bounds {
    /// Axis-aligned box given by its corners.
    Aabb { min: Vec3, max: Vec3 },
    Sphere { center: Vec3, radius: f32 },
}

impl Bounds {
    /// Box from a centre and full size.
    pub fn aabb_from_center(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Bounds::Aabb {
            min: center - half,
            max: center + half,
        }
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Bounds::Sphere {
            center,
            radius: radius.abs(),
        }
    }

    /// Centre of the shape.
    pub fn center(&self) -> Vec3 {
        match *self {
            Bounds::Aabb { min, max } => (min + max) * 0.5,
            Bounds::Sphere { center, .. } => center,
        }
    }

    /// Same shape moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        match *self {
            Bounds::Aabb { min, max } => Bounds::Aabb {
                min: min + offset,
                max: max + offset,
            },
            Bounds::Sphere { center, radius } => Bounds::Sphere {
                center: center + offset,
                radius,
            },
        }
    }

    /// Distance along the ray to the first surface crossing, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        if ray.is_degenerate() {
            return None;
        }
        match *self {
            Bounds::Aabb { min, max } => ray_aabb_intersect(ray.origin, ray.direction, min, max),
            Bounds::Sphere { center, radius } => {
                ray_sphere_intersect(ray.origin, ray.direction, center, radius)
            }
        }
    }
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// The slab method intersects the ray with each pair of axis-aligned planes
/// bounding the box. If the ray enters and exits at valid times
/// (t_enter <= t_exit and t_exit >= 0) there is an intersection.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let dir = ray_dir[axis];
        let (lo, hi) = (aabb_min[axis], aabb_max[axis]);

        if dir.abs() < 1e-10 {
            // Parallel to this slab: miss unless the origin is between the planes
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let t1 = (lo - origin) * inv;
        let t2 = (hi - origin) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the box
            Some(t_max)
        }
    } else {
        None
    }
}

/// Ray-sphere intersection. `ray_dir` must be normalized.
///
/// Returns the nearest non-negative distance, or the exit distance when the
/// origin is inside the sphere.
pub fn ray_sphere_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let far = -b + sqrt_d;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_ray_aabb_hit_front() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!((t.unwrap() - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_ray_aabb_miss() {
        let t = ray_aabb_intersect(
            Vec3::new(3.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_aabb_from_inside_returns_exit() {
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!((t.unwrap() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_ray_aabb_axis_parallel_outside_slab() {
        // Direction has zero Y and origin is above the box
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 2.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_sphere_hit() {
        let t = ray_sphere_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::ZERO, 1.5);
        assert!((t.unwrap() - 3.5).abs() < EPSILON);
    }

    #[test]
    fn test_ray_sphere_miss_and_behind() {
        assert!(ray_sphere_intersect(Vec3::new(0.0, 2.0, -5.0), Vec3::Z, Vec3::ZERO, 1.0).is_none());
        assert!(ray_sphere_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_bounds_translated_and_center() {
        let b = Bounds::aabb_from_center(Vec3::ZERO, Vec3::new(2.0, 4.0, 2.0));
        let moved = b.translated(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(moved.center(), Vec3::new(10.0, 0.0, 0.0));

        let s = Bounds::sphere(Vec3::ONE, -2.0).translated(Vec3::ONE);
        assert_eq!(s, Bounds::Sphere { center: Vec3::splat(2.0), radius: 2.0 });
    }

    #[test]
    fn test_degenerate_ray_hits_nothing() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(ray.is_degenerate());
        assert!(Bounds::sphere(Vec3::ZERO, 5.0).intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < EPSILON);
        assert!((ray.at(2.0) - Vec3::new(0.0, 0.0, -2.0)).length() < EPSILON);
    }
}
