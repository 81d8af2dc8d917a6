//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run -p lumen_scene --example load_scene -- scenes/two_spheres.xml

use std::env;

use lumen_scene::{load_scene, SceneDefaults};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-xml>");
        println!("\nExample:");
        println!("  cargo run -p lumen_scene --example load_scene -- scenes/two_spheres.xml");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path, &SceneDefaults::default()) {
        Ok(loaded) => {
            let camera = &loaded.camera;
            let scene = &loaded.scene;

            println!("\n=== Camera ===");
            println!("Image: {}x{}", camera.image_width(), camera.image_height());
            let eye = camera.view_point();
            println!("View point: ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);

            println!("\n=== Scene ===");
            println!("Spheres: {}", scene.spheres().len());
            println!("Boxes: {}", scene.boxes().len());
            println!("Lights: {}", scene.lights().len());

            println!("\n--- Spheres ---");
            for (i, sphere) in scene.spheres().iter().enumerate() {
                let c = sphere.center();
                println!(
                    "  [{}] center ({:.2}, {:.2}, {:.2}) radius {:.2} shader {}",
                    i,
                    c.x,
                    c.y,
                    c.z,
                    sphere.radius(),
                    sphere.shader().name.as_deref().unwrap_or("<unnamed>")
                );
            }

            println!("\n--- Boxes ---");
            for (i, aabox) in scene.boxes().iter().enumerate() {
                let lo = aabox.min_pt();
                let hi = aabox.max_pt();
                println!(
                    "  [{}] ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
                    i, lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
                );
            }

            println!("\n--- Lights ---");
            for (i, light) in scene.lights().iter().enumerate() {
                let p = light.position;
                let e = light.intensity;
                println!(
                    "  [{}] at ({:.2}, {:.2}, {:.2}) intensity ({:.2}, {:.2}, {:.2})",
                    i, p.x, p.y, p.z, e.x, e.y, e.z
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
