use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::RgbImage;
use lumen_renderer::{render_with_config, PixelBuffer, RenderConfig, DEFAULT_BUCKET_SIZE};
use lumen_scene::{load_scene, SceneDefaults};

/// Render an XML scene description of spheres, boxes and point lights to PNG.
#[derive(Parser, Debug)]
#[command(name = "lumen", version)]
struct Cli {
    /// Scene description file
    scene: PathBuf,

    /// Output image path (defaults to `<SCENE>_test.png`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render on the calling thread only
    #[arg(long)]
    single_threaded: bool,

    /// World-space offset applied to shadow ray origins
    #[arg(long, default_value_t = 0.001)]
    shadow_bias: f32,

    /// Tile size for parallel rendering
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: u32,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            shadow_bias: self.shadow_bias,
            bucket_size: self.bucket_size,
            parallel: !self.single_threaded,
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| default_output_path(&self.scene))
    }
}

/// `scene.xml` renders to `scene.xml_test.png` next to it.
fn default_output_path(scene: &Path) -> PathBuf {
    let mut name = scene.as_os_str().to_owned();
    name.push("_test.png");
    PathBuf::from(name)
}

fn to_rgb_image(buffer: &PixelBuffer) -> Result<RgbImage> {
    RgbImage::from_raw(buffer.width, buffer.height, buffer.to_rgb_bytes())
        .context("Pixel buffer size does not match image dimensions")
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    log::info!("Starting Lumen");

    let loaded = load_scene(&cli.scene, &SceneDefaults::default())
        .with_context(|| format!("Failed to load scene {:?}", cli.scene))?;

    let start = Instant::now();
    let buffer = render_with_config(&loaded.camera, &loaded.scene, &cli.render_config());
    log::info!("Render finished in {:?}", start.elapsed());

    let output = cli.output_path();
    to_rgb_image(&buffer)?
        .save(&output)
        .with_context(|| format!("Failed to write image {:?}", output))?;
    log::info!("Saved to {:?}", output);

    Ok(())
}
