//! Surface reflectance: Lambertian diffuse plus a Phong specular lobe.

use lumen_math::Vec3;

/// Color type alias (linear RGB, nominally 0-1 but not clamped)
pub type Color = Vec3;

/// Shininess used when a shader does not specify one.
pub const DEFAULT_SHININESS: f32 = 50.0;

/// Reflectance parameters shared by every primitive that references them.
///
/// Shaders are immutable once built; primitives hold them through an
/// `Arc` so one material can back many surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    /// Name from the scene description, if any
    pub name: Option<String>,
    /// Diffuse color
    pub diffuse: Color,
    /// Specular color (zero for purely diffuse surfaces)
    pub specular: Color,
    /// Phong exponent
    pub shininess: f32,
}

impl Shader {
    /// Diffuse-only shader.
    pub fn lambertian(diffuse: Color) -> Self {
        Self {
            name: None,
            diffuse,
            specular: Color::ZERO,
            shininess: DEFAULT_SHININESS,
        }
    }

    /// Diffuse shader with a specular highlight.
    pub fn phong(diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            name: None,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Attach a name for diagnostics.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Radiance reflected toward the viewer from one unoccluded light.
    ///
    /// `light_vec`, `view_dir` and `normal` must be unit vectors; `light_vec`
    /// points from the surface to the light and `view_dir` from the surface
    /// back to the eye.
    pub fn radiance(&self, light_vec: Vec3, view_dir: Vec3, normal: Vec3, intensity: Color) -> Color {
        let diffuse = self.diffuse * intensity * light_vec.dot(normal).max(0.0);

        // Opposite light and view directions leave the half vector undefined
        let specular = match (light_vec + view_dir).try_normalize() {
            Some(half) => {
                self.specular * intensity * half.dot(normal).max(0.0).powf(self.shininess)
            }
            None => Color::ZERO,
        };

        diffuse + specular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambertian_defaults() {
        let shader = Shader::lambertian(Color::new(0.2, 0.3, 0.8));
        assert_eq!(shader.specular, Color::ZERO);
        assert_eq!(shader.shininess, 50.0);
        assert!(shader.name.is_none());
    }

    #[test]
    fn test_diffuse_follows_cosine() {
        let shader = Shader::lambertian(Color::ONE);
        let normal = Vec3::Z;

        let head_on = shader.radiance(Vec3::Z, Vec3::Z, normal, Color::ONE);
        assert!((head_on - Color::ONE).length() < 1e-6);

        let tilted_dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        let tilted = shader.radiance(tilted_dir, Vec3::Z, normal, Color::ONE);
        let expected = std::f32::consts::FRAC_1_SQRT_2;
        assert!((tilted.x - expected).abs() < 1e-6);
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        let shader = Shader::phong(Color::ONE, Color::ONE, 10.0);
        let color = shader.radiance(-Vec3::Z, Vec3::Z, Vec3::Z, Color::ONE);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_specular_peaks_on_mirror_direction() {
        let shader = Shader::phong(Color::ZERO, Color::new(1.0, 0.5, 0.25), 20.0);
        let normal = Vec3::Y;
        let light = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mirror = Vec3::new(-1.0, 1.0, 0.0).normalize();

        // Half vector equals the normal, so the lobe is at full strength
        let peak = shader.radiance(light, mirror, normal, Color::splat(2.0));
        assert!((peak - Color::new(2.0, 1.0, 0.5)).length() < 1e-5);

        let off = shader.radiance(light, Vec3::new(0.0, 0.2, 1.0).normalize(), normal, Color::splat(2.0));
        assert!(off.x < peak.x);
    }

    #[test]
    fn test_intensity_scales_per_channel() {
        let shader = Shader::lambertian(Color::new(0.5, 0.5, 0.5));
        let color = shader.radiance(Vec3::Z, Vec3::Z, Vec3::Z, Color::new(1.0, 2.0, 0.0));
        assert!((color - Color::new(0.5, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_opposite_light_and_view_skip_specular() {
        let shader = Shader::phong(Color::ZERO, Color::ONE, 50.0);
        let color = shader.radiance(Vec3::X, -Vec3::X, Vec3::Y, Color::ONE);
        assert_eq!(color, Color::ZERO);
        assert!(color.is_finite());
    }
}
