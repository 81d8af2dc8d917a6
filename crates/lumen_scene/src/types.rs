//! Raw scene document, as deserialized from XML.
//!
//! Every value is kept as text here; [`crate::loader`] turns it into
//! renderer types and reports malformed values with their element name.

use serde::Deserialize;

/// `<scene>` root element.
#[derive(Debug, Deserialize)]
pub struct SceneDocument {
    /// `<image>width height</image>`
    pub image: Option<String>,

    #[serde(default, rename = "camera")]
    pub cameras: Vec<CameraElement>,

    #[serde(default, rename = "shader")]
    pub shaders: Vec<ShaderElement>,

    #[serde(default, rename = "surface")]
    pub surfaces: Vec<SurfaceElement>,

    #[serde(default, rename = "light")]
    pub lights: Vec<LightElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraElement {
    pub view_point: Option<String>,
    pub view_dir: Option<String>,
    pub view_up: Option<String>,
    /// Accepted for compatibility; the view plane is always perpendicular
    /// to the view direction.
    pub proj_normal: Option<String>,
    pub proj_distance: Option<String>,
    pub view_width: Option<String>,
    pub view_height: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShaderElement {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub diffuse_color: Option<String>,
    pub specular_color: Option<String>,
    pub exponent: Option<String>,
}

/// `<shader ref="..."/>` inside a surface.
#[derive(Debug, Deserialize)]
pub struct ShaderRef {
    #[serde(rename = "@ref")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceElement {
    #[serde(rename = "@type")]
    pub kind: String,
    pub shader: Option<ShaderRef>,
    pub center: Option<String>,
    pub radius: Option<String>,
    pub min_pt: Option<String>,
    pub max_pt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LightElement {
    pub position: Option<String>,
    pub intensity: Option<String>,
}
