//! Core ray casting renderer.
//!
//! Implements single-bounce local shading with:
//! - One primary ray per pixel (no anti-aliasing)
//! - Hard shadows from point lights
//! - Lambertian diffuse plus Phong specular reflectance

use std::time::Instant;

use crate::bucket::{render_parallel, DEFAULT_BUCKET_SIZE};
use crate::{Camera, Color, Scene, SceneHit};
use lumen_math::{Interval, Ray};

/// 8-bit RGB pixel.
pub type Rgb = [u8; 3];

/// Color of pixels whose primary ray hits nothing.
pub const BACKGROUND: Rgb = [0, 0, 0];

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// World-space distance skipped at the start of each shadow ray, so a
    /// surface does not shadow itself through rounding error
    pub shadow_bias: f32,
    /// Edge length of the square tiles used by the parallel renderer
    pub bucket_size: u32,
    /// Render buckets on the rayon thread pool instead of a single thread
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shadow_bias: 0.001,
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
        }
    }
}

/// Sum the contributions of every light that is visible from a hit.
///
/// Shadow rays end at the light: occluders farther away than the light do
/// not block it.
pub fn shade(scene: &Scene, ray: &Ray, hit: &SceneHit<'_>, config: &RenderConfig) -> Color {
    let shader = hit.shader();
    let point = hit.hit.point;

    let Some(normal) = hit.hit.normal.try_normalize() else {
        log::debug!("Degenerate normal at {:?}", point);
        return Color::ZERO;
    };
    let view_dir = (-ray.direction()).try_normalize().unwrap_or(normal);

    let mut color = Color::ZERO;
    for light in scene.lights() {
        // Shadow ray reaches the light at t = 1
        let shadow_ray = Ray::between(point, light.position);
        let to_light = shadow_ray.direction();
        let Some(light_vec) = to_light.try_normalize() else {
            log::debug!("Light at {:?} coincides with a surface point", light.position);
            continue;
        };

        let shadow_t = Interval::new(config.shadow_bias / to_light.length(), 1.0);
        if scene.is_occluded(&shadow_ray, shadow_t) {
            continue;
        }

        color += shader.radiance(light_vec, view_dir, normal, light.intensity);
    }

    color
}

/// Compute the linear color seen along a primary ray.
///
/// Returns `None` when the ray hits nothing.
pub fn ray_color(ray: &Ray, scene: &Scene, config: &RenderConfig) -> Option<Color> {
    let hit = scene.nearest_hit(ray, Interval::FORWARD)?;
    Some(shade(scene, ray, &hit, config))
}

/// Scale a linear channel to 8 bits, clamping to [0, 255].
///
/// NaN maps to 0.
#[inline]
pub fn clamp_channel(x: f32) -> u8 {
    if x.is_nan() {
        return 0;
    }
    Interval::new(0.0, 255.0).clamp(255.0 * x) as u8
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> Rgb {
    [
        clamp_channel(color.x),
        clamp_channel(color.y),
        clamp_channel(color.z),
    ]
}

/// Shade one pixel, reporting whether its color contained NaN.
///
/// Infinite channels are not reported; they clamp to 255.
pub(crate) fn sample_pixel(
    camera: &Camera,
    scene: &Scene,
    row: u32,
    col: u32,
    config: &RenderConfig,
) -> (Rgb, bool) {
    let ray = camera.get_ray(row, col);
    match ray_color(&ray, scene, config) {
        Some(color) => (color_to_rgb(color), color.is_nan()),
        None => (BACKGROUND, false),
    }
}

/// Render a single pixel.
pub fn render_pixel(camera: &Camera, scene: &Scene, row: u32, col: u32, config: &RenderConfig) -> Rgb {
    sample_pixel(camera, scene, row, col, config).0
}

/// Row-major 8-bit RGB image, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Create a new pixel buffer filled with the background color.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width as usize * height as usize],
        }
    }

    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Get the pixel at (`row`, `col`).
    pub fn get(&self, row: u32, col: u32) -> Rgb {
        self.pixels[self.index(row, col)]
    }

    /// Set the pixel at (`row`, `col`).
    pub fn set(&mut self, row: u32, col: u32, rgb: Rgb) {
        let index = self.index(row, col);
        self.pixels[index] = rgb;
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Flatten to interleaved RGB bytes (for saving).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}

pub(crate) fn log_summary(camera: &Camera, anomalies: usize, start: Instant) {
    if anomalies > 0 {
        log::warn!("{} pixels had NaN color, written as 0", anomalies);
    }
    log::info!(
        "Rendered {}x{} in {:?}",
        camera.image_width(),
        camera.image_height(),
        start.elapsed()
    );
}

pub(crate) fn log_start(camera: &Camera, scene: &Scene, mode: &str) {
    log::info!(
        "Rendering {}x{} ({}): {} spheres, {} boxes, {} lights",
        camera.image_width(),
        camera.image_height(),
        mode,
        scene.spheres().len(),
        scene.boxes().len(),
        scene.lights().len()
    );
}

/// Render the entire scene on the calling thread.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> PixelBuffer {
    log_start(camera, scene, "single-threaded");
    let start = Instant::now();

    let mut image = PixelBuffer::new(camera.image_width(), camera.image_height());
    let mut anomalies = 0;

    for row in 0..camera.image_height() {
        for col in 0..camera.image_width() {
            let (rgb, degenerate) = sample_pixel(camera, scene, row, col, config);
            anomalies += degenerate as usize;
            image.set(row, col, rgb);
        }
    }

    log_summary(camera, anomalies, start);
    image
}

/// Render with the strategy selected by `config.parallel`.
pub fn render_with_config(camera: &Camera, scene: &Scene, config: &RenderConfig) -> PixelBuffer {
    if config.parallel {
        render_parallel(camera, scene, config)
    } else {
        render(camera, scene, config)
    }
}
