//! Lumen scene - XML scene description loading.
//!
//! Reads a `<scene>` document describing the image size, a camera,
//! named shaders, surfaces (spheres and boxes) and point lights, and
//! turns it into a [`lumen_renderer::Camera`] and [`lumen_renderer::Scene`].
//!
//! # Example
//!
//! ```ignore
//! use lumen_scene::{load_scene, SceneDefaults};
//!
//! let loaded = load_scene("scene.xml", &SceneDefaults::default())?;
//! let image = lumen_renderer::render(&loaded.camera, &loaded.scene, &Default::default());
//! ```

mod loader;
mod parser;
mod types;

use lumen_renderer::CameraError;
use thiserror::Error;

pub use loader::{load_scene, load_scene_from_str, LoadedScene, SceneDefaults};
pub use parser::{parse_image_size, parse_scalar, parse_vec3};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("Invalid vector in <{element}>: '{value}'")]
    InvalidVector { element: String, value: String },

    #[error("Invalid number in <{element}>: '{value}'")]
    InvalidNumber { element: String, value: String },

    #[error("Invalid image size: '{0}'")]
    InvalidImageSize(String),

    #[error("Scene has no <camera>")]
    MissingCamera,

    #[error("Missing <{element}> in {context}")]
    MissingElement { element: &'static str, context: String },

    #[error("Unknown shader '{0}'")]
    UnknownShader(String),

    #[error("Unknown shader type '{0}'")]
    UnknownShaderType(String),

    #[error("Unknown surface type '{0}'")]
    UnknownSurfaceType(String),

    #[error("Invalid camera: {0}")]
    Camera(#[from] CameraError),
}

pub type SceneResult<T> = Result<T, SceneError>;
