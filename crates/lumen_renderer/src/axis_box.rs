//! Axis-aligned box primitive, intersected with the slab method.

use std::sync::Arc;

use crate::{
    hittable::{Hit, Hittable},
    Shader,
};
use lumen_math::{Interval, Ray, Vec3};

/// An axis-aligned box spanning `min_pt..=max_pt`.
///
/// `min_pt` is expected to be componentwise less than or equal to `max_pt`;
/// this is not validated.
#[derive(Debug, Clone)]
pub struct AxisBox {
    min_pt: Vec3,
    max_pt: Vec3,
    shader: Arc<Shader>,
}

impl AxisBox {
    /// Create a new box from its two extreme corners.
    pub fn new(min_pt: Vec3, max_pt: Vec3, shader: Arc<Shader>) -> Self {
        Self {
            min_pt,
            max_pt,
            shader,
        }
    }

    pub fn min_pt(&self) -> Vec3 {
        self.min_pt
    }

    pub fn max_pt(&self) -> Vec3 {
        self.max_pt
    }

    pub fn shader(&self) -> &Arc<Shader> {
        &self.shader
    }
}

impl Hittable for AxisBox {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut entry = [f32::NEG_INFINITY; 3];
        let mut exit = [f32::INFINITY; 3];
        // Outward normal sign of the face crossed on entry, per axis
        let mut sign = [-1.0_f32; 3];

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let lo = self.min_pt[axis];
            let hi = self.max_pt[axis];

            if d == 0.0 {
                // Parallel to this slab: either always inside it or never
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let mut t0 = (lo - o) / d;
            let mut t1 = (hi - o) / d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
                sign[axis] = 1.0;
            }
            entry[axis] = t0;
            exit[axis] = t1;
        }

        // Latest entry wins; on ties the earlier axis is kept
        let mut entry_axis = 0;
        for axis in 1..3 {
            if entry[axis] > entry[entry_axis] {
                entry_axis = axis;
            }
        }
        let t_near = entry[entry_axis];
        let t_far = exit[0].min(exit[1]).min(exit[2]);

        // The entry must lie strictly inside `ray_t`: an origin on a face
        // (t_near == 0) is treated like an origin inside the box
        if !(t_near < t_far) || !ray_t.surrounds(t_near) {
            return None;
        }

        let mut normal = Vec3::ZERO;
        normal[entry_axis] = sign[entry_axis];

        Some(Hit {
            t: t_near,
            point: ray.at(t_near),
            normal,
        })
    }
}
