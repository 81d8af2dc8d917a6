//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered
//! independently and in parallel using rayon.

use std::time::Instant;

use rayon::prelude::*;

use crate::renderer::{log_start, log_summary, sample_pixel, PixelBuffer, RenderConfig, Rgb};
use crate::{Camera, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Column of the bucket's top-left corner
    pub x: u32,
    /// Row of the bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering an image in row-major order.
///
/// Buckets on the right and bottom edges are cropped to the image.
/// A `bucket_size` of zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Rgb>,
    /// Number of pixels whose color was NaN or infinite before clamping
    pub anomalies: usize,
}

impl BucketResult {
    /// Copy this bucket's pixels into their place in `image`.
    pub fn blit(&self, image: &mut PixelBuffer) {
        let width = self.bucket.width as usize;
        for (local_y, row) in self.pixels.chunks(width).enumerate() {
            for (local_x, rgb) in row.iter().enumerate() {
                image.set(
                    self.bucket.y + local_y as u32,
                    self.bucket.x + local_x as u32,
                    *rgb,
                );
            }
        }
    }
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    let mut anomalies = 0;

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let row = bucket.y + local_y;
            let col = bucket.x + local_x;
            let (rgb, degenerate) = sample_pixel(camera, scene, row, col, config);
            anomalies += degenerate as usize;
            pixels.push(rgb);
        }
    }

    log::debug!("Bucket {} done ({}x{} at {},{})", bucket.index, bucket.width, bucket.height, bucket.x, bucket.y);

    BucketResult {
        bucket: *bucket,
        pixels,
        anomalies,
    }
}

/// Render the entire scene, one bucket per rayon task.
///
/// Produces the same image as [`render`](crate::render).
pub fn render_parallel(camera: &Camera, scene: &Scene, config: &RenderConfig) -> PixelBuffer {
    log_start(camera, scene, "parallel");
    let start = Instant::now();

    let buckets = generate_buckets(camera.image_width(), camera.image_height(), config.bucket_size);
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, config))
        .collect();

    let mut image = PixelBuffer::new(camera.image_width(), camera.image_height());
    let mut anomalies = 0;
    for result in &results {
        result.blit(&mut image);
        anomalies += result.anomalies;
    }

    log_summary(camera, anomalies, start);
    image
}
