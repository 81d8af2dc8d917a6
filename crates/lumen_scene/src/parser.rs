//! Text-level parsing: XML deserialization and whitespace-separated values.

use lumen_math::Vec3;

use crate::types::SceneDocument;
use crate::{SceneError, SceneResult};

/// Deserialize a scene document from XML text.
pub fn parse_document(xml: &str) -> SceneResult<SceneDocument> {
    Ok(quick_xml::de::from_str(xml)?)
}

/// Parse a whitespace-separated `x y z` triple.
pub fn parse_vec3(element: &str, text: &str) -> SceneResult<Vec3> {
    let invalid = || SceneError::InvalidVector {
        element: element.to_string(),
        value: text.to_string(),
    };

    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let mut xyz = [0.0_f32; 3];
    for (slot, part) in xyz.iter_mut().zip(&parts) {
        *slot = part.parse::<f32>().map_err(|_| invalid())?;
    }
    Ok(Vec3::from_array(xyz))
}

/// Parse a single floating-point value.
pub fn parse_scalar(element: &str, text: &str) -> SceneResult<f32> {
    text.trim().parse::<f32>().map_err(|_| SceneError::InvalidNumber {
        element: element.to_string(),
        value: text.to_string(),
    })
}

/// Parse `<image>width height</image>`.
pub fn parse_image_size(text: &str) -> SceneResult<(u32, u32)> {
    let invalid = || SceneError::InvalidImageSize(text.to_string());

    let mut parts = text.split_whitespace();
    let width = parts.next().ok_or_else(invalid)?.parse::<u32>().map_err(|_| invalid())?;
    let height = parts.next().ok_or_else(invalid)?.parse::<u32>().map_err(|_| invalid())?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((width, height))
}
