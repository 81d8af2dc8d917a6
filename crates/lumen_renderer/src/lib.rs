//! Lumen renderer - CPU ray casting
//!
//! Renders spheres and axis-aligned boxes lit by point lights, with
//! Lambertian and Phong shading and hard shadows. One primary ray per
//! pixel, one shadow ray per light; no recursion and no acceleration
//! structure.

mod axis_box;
mod bucket;
mod camera;
mod hittable;
mod light;
mod renderer;
mod scene;
mod shader;
mod sphere;

pub use axis_box::AxisBox;
pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraError, CameraSettings};
pub use hittable::{Hit, Hittable};
pub use light::Light;
pub use renderer::{
    clamp_channel, color_to_rgb, ray_color, render, render_pixel, render_with_config, shade, PixelBuffer,
    RenderConfig, Rgb, BACKGROUND,
};
pub use scene::{PrimitiveRef, Scene, SceneHit};
pub use shader::{Color, Shader, DEFAULT_SHININESS};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
