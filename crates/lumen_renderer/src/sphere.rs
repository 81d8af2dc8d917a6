//! Sphere primitive for ray casting.

use std::sync::Arc;

use crate::{
    hittable::{Hit, Hittable},
    Shader,
};
use lumen_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    shader: Arc<Shader>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, shader: Arc<Shader>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            shader,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn shader(&self) -> &Arc<Shader> {
        &self.shader
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        if a == 0.0 {
            return None;
        }
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(Hit {
            t: root,
            point,
            normal: point - self.center,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> Arc<Shader> {
        Arc::new(Shader::lambertian(Vec3::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit_head_on() {
        let radius = 2.0;
        let sphere = Sphere::new(Vec3::ZERO, radius, grey());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray, Interval::FORWARD).expect("ray should hit");
        assert_eq!(hit.t, 10.0 - radius);
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, radius));
        // Normal is left unnormalized: hit point minus center
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, radius));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());

        // Offset 1.5 from the axis, radius 1
        let ray = Ray::new(Vec3::new(1.5, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect(&ray, Interval::FORWARD).is_none());
    }

    #[test]
    fn test_t_scales_with_direction_length() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -4.0));

        let hit = sphere.intersect(&ray, Interval::FORWARD).unwrap();
        assert!((hit.t - 9.0 / 4.0).abs() < 1e-6);
        assert!((hit.point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_behind_origin_is_not_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect(&ray, Interval::FORWARD).is_none());
    }

    #[test]
    fn test_origin_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 3.0, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.intersect(&ray, Interval::FORWARD).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-6);
        assert!((hit.normal - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_surface_origin_skips_self_hit_with_bias() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let surface_point = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(surface_point, Vec3::new(0.3, 1.0, 0.2));

        assert!(sphere.intersect(&ray, Interval::new(1e-3, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(Vec3::ZERO, -1.0, grey());
        assert_eq!(sphere.radius(), 0.0);
    }

    #[test]
    fn test_zero_direction_never_hits() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert!(sphere.intersect(&ray, Interval::FORWARD).is_none());
    }
}
