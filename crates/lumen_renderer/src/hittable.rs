//! Hittable trait and Hit record for ray-primitive intersection.

use lumen_math::{Interval, Ray, Vec3};

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs, in units of the ray direction
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Outward surface normal at the intersection (not necessarily unit length)
    pub normal: Vec3,
}

/// Trait for primitives that can be hit by rays.
///
/// Implemented by exactly [`Sphere`](crate::Sphere) and [`AxisBox`](crate::AxisBox).
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection whose `t` lies strictly inside `ray_t`.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Hit>;
}
