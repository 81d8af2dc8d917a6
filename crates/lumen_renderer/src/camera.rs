//! Pinhole camera for primary ray generation.

use lumen_math::{Ray, Vec3};
use thiserror::Error;

/// Errors that can occur while building a camera.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("View direction has zero length")]
    DegenerateViewDirection,

    #[error("Up vector {up:?} is parallel to the view direction {view_dir:?}")]
    DegenerateBasis { view_dir: Vec3, up: Vec3 },

    #[error("Image size {width}x{height} has no pixels")]
    EmptyImage { width: u32, height: u32 },

    #[error("Invalid view plane: projection distance {proj_distance}, width {view_width}")]
    InvalidViewPlane { proj_distance: f32, view_width: f32 },
}

/// Camera description, resolved into a [`Camera`] by [`CameraSettings::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    pub view_point: Vec3,
    pub view_dir: Vec3,
    pub view_up: Vec3,

    // View plane
    pub proj_distance: f32,
    pub view_width: f32,
    pub view_height: f32,
}

impl CameraSettings {
    /// Create camera settings with default placement: at the origin,
    /// looking down -Z with +Y up, on a unit view plane one unit away.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            view_point: Vec3::ZERO,
            view_dir: Vec3::NEG_Z,
            view_up: Vec3::Y,
            proj_distance: 1.0,
            view_width: 1.0,
            view_height: 1.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, view_point: Vec3, view_dir: Vec3, view_up: Vec3) -> Self {
        self.view_point = view_point;
        self.view_dir = view_dir;
        self.view_up = view_up;
        self
    }

    /// Set view plane distance and size.
    pub fn with_view_plane(mut self, proj_distance: f32, view_width: f32, view_height: f32) -> Self {
        self.proj_distance = proj_distance;
        self.view_width = view_width;
        self.view_height = view_height;
        self
    }

    /// Compute the camera basis.
    pub fn build(&self) -> Result<Camera, CameraError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(CameraError::EmptyImage {
                width: self.image_width,
                height: self.image_height,
            });
        }

        let plane_ok = |x: f32| x.is_finite() && x > 0.0;
        if !plane_ok(self.proj_distance) || !plane_ok(self.view_width) {
            return Err(CameraError::InvalidViewPlane {
                proj_distance: self.proj_distance,
                view_width: self.view_width,
            });
        }

        // `direction` points from the view plane back toward the eye
        let direction = (-self.view_dir)
            .try_normalize()
            .ok_or(CameraError::DegenerateViewDirection)?;
        let u = self
            .view_up
            .cross(direction)
            .try_normalize()
            .ok_or(CameraError::DegenerateBasis {
                view_dir: self.view_dir,
                up: self.view_up,
            })?;
        let v = direction.cross(u).normalize();

        Ok(Camera {
            image_width: self.image_width,
            image_height: self.image_height,
            view_point: self.view_point,
            direction,
            u,
            v,
            proj_distance: self.proj_distance,
            view_width: self.view_width,
            view_height: self.view_height,
        })
    }
}

/// Camera for generating primary rays into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    image_width: u32,
    image_height: u32,

    view_point: Vec3,
    direction: Vec3,
    u: Vec3,
    v: Vec3,

    proj_distance: f32,
    view_width: f32,
    view_height: f32,
}

impl Camera {
    /// Generate the primary ray through pixel (`row`, `col`).
    ///
    /// Row 0 is the top of the image. The returned direction runs from the
    /// viewpoint to the pixel's point on the view plane and is not normalized.
    pub fn get_ray(&self, row: u32, col: u32) -> Ray {
        let uc = col as f32 - self.image_width as f32 / 2.0;
        let vc = -(row as f32) + self.image_height as f32 / 2.0;
        let wc = (self.proj_distance / self.view_width) * self.image_width as f32;

        let sample = self.view_point + self.u * uc + self.v * vc - self.direction * wc;
        Ray::new(self.view_point, sample - self.view_point)
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn view_point(&self) -> Vec3 {
        self.view_point
    }

    /// Unit vector pointing backwards, from the scene toward the eye.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Unit vector pointing right in image space.
    pub fn u(&self) -> Vec3 {
        self.u
    }

    /// Unit vector pointing up in image space.
    pub fn v(&self) -> Vec3 {
        self.v
    }

    pub fn proj_distance(&self) -> f32 {
        self.proj_distance
    }

    pub fn view_width(&self) -> f32 {
        self.view_width
    }

    pub fn view_height(&self) -> f32 {
        self.view_height
    }
}
