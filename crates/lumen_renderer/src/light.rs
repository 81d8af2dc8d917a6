//! Point lights.

use crate::Color;
use lumen_math::Vec3;

/// An isotropic point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// World-space position
    pub position: Vec3,
    /// Per-channel intensity (unbounded)
    pub intensity: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}
