//! Scene aggregate and the nearest-hit visibility query.

use crate::{AxisBox, Hit, Hittable, Light, Shader, Sphere};
use lumen_math::{Interval, Ray};

/// The primitive responsible for a [`SceneHit`].
#[derive(Debug, Clone, Copy)]
pub enum PrimitiveRef<'a> {
    Sphere(&'a Sphere),
    Box(&'a AxisBox),
}

impl<'a> PrimitiveRef<'a> {
    /// Shader of the referenced primitive.
    pub fn shader(&self) -> &'a Shader {
        match *self {
            PrimitiveRef::Sphere(sphere) => sphere.shader().as_ref(),
            PrimitiveRef::Box(aabox) => aabox.shader().as_ref(),
        }
    }
}

/// Nearest intersection found by [`Scene::nearest_hit`].
#[derive(Debug, Clone, Copy)]
pub struct SceneHit<'a> {
    pub hit: Hit,
    pub primitive: PrimitiveRef<'a>,
}

impl<'a> SceneHit<'a> {
    pub fn shader(&self) -> &'a Shader {
        self.primitive.shader()
    }
}

/// Spheres, boxes and lights, read-only while rendering.
///
/// Primitive kinds are kept in separate lists. Iteration order only matters
/// for exact distance ties, where spheres win over boxes and earlier entries
/// win over later ones.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    boxes: Vec<AxisBox>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_box(&mut self, aabox: AxisBox) {
        self.boxes.push(aabox);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn boxes(&self) -> &[AxisBox] {
        &self.boxes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Total number of primitives of every kind.
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.boxes.len()
    }

    /// Find the nearest primitive hit along `ray` with `t` inside `ray_t`.
    pub fn nearest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<SceneHit<'_>> {
        let mut closest: Option<SceneHit<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for sphere in &self.spheres {
            if let Some(hit) = sphere.intersect(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(SceneHit {
                    hit,
                    primitive: PrimitiveRef::Sphere(sphere),
                });
            }
        }

        for aabox in &self.boxes {
            if let Some(hit) = aabox.intersect(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(SceneHit {
                    hit,
                    primitive: PrimitiveRef::Box(aabox),
                });
            }
        }

        closest
    }

    /// Returns true if any primitive intersects `ray` inside `ray_t`.
    pub fn is_occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.spheres.iter().any(|s| s.intersect(ray, ray_t).is_some())
            || self.boxes.iter().any(|b| b.intersect(ray, ray_t).is_some())
    }
}
