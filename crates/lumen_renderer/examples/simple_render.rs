//! Simple ray casting example.
//!
//! Renders spheres on a box floor and saves to PPM format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use lumen_renderer::{
    render_parallel, AxisBox, CameraSettings, Color, Light, PixelBuffer, RenderConfig, Scene, Shader, Sphere,
    Vec3,
};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let camera = CameraSettings::new(800, 450)
        .with_position(
            Vec3::new(10.0, 4.2, 6.0),    // view point
            Vec3::new(-10.0, -4.2, -6.0), // view direction
            Vec3::new(0.0, 1.0, 0.0),     // up
        )
        .with_view_plane(6.0, 3.5, 3.5)
        .build()
        .expect("Camera basis is well defined");

    let image = render_parallel(&camera, &scene, &RenderConfig::default());

    let filename = "output.ppm";
    save_ppm(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    let floor = Arc::new(Shader::lambertian(Color::new(0.5, 0.5, 0.5)));
    let blue = Arc::new(Shader::phong(Color::new(0.2, 0.3, 0.8), Color::ONE, 50.0));
    let red = Arc::new(Shader::phong(Color::new(0.8, 0.2, 0.2), Color::splat(0.5), 20.0));

    // Ground slab
    scene.add_box(AxisBox::new(
        Vec3::new(-10.0, -1.2, -10.0),
        Vec3::new(10.0, -1.0, 10.0),
        floor,
    ));

    scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0, blue.clone()));
    scene.add_sphere(Sphere::new(Vec3::new(-2.2, -0.4, 1.0), 0.6, red));
    scene.add_sphere(Sphere::new(Vec3::new(1.6, -0.6, 1.8), 0.4, blue));

    scene.add_light(Light::new(Vec3::new(3.0, 4.0, 5.0), Color::new(0.9, 0.9, 0.9)));
    scene.add_light(Light::new(Vec3::new(-4.0, 6.0, 2.0), Color::new(0.3, 0.3, 0.4)));

    println!(
        "Created {} primitives, {} lights",
        scene.primitive_count(),
        scene.lights().len()
    );
    scene
}

fn save_ppm(image: &PixelBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for row in 0..image.height {
        for col in 0..image.width {
            let [r, g, b] = image.get(row, col);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}
