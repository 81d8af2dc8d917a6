//! Build a renderable camera and scene from a parsed document.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use lumen_math::Vec3;
use lumen_renderer::{AxisBox, Camera, CameraSettings, Color, Light, Scene, Shader, Sphere};

use crate::parser::{parse_document, parse_image_size, parse_scalar, parse_vec3};
use crate::types::{CameraElement, LightElement, SceneDocument, ShaderElement, SurfaceElement};
use crate::{SceneError, SceneResult};

/// Values used for elements a scene description leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDefaults {
    pub view_dir: Vec3,
    pub view_up: Vec3,
    pub proj_distance: f32,
    pub view_width: f32,
    pub view_height: f32,
    pub light_intensity: Color,
    pub phong_exponent: f32,
}

impl Default for SceneDefaults {
    fn default() -> Self {
        Self {
            view_dir: Vec3::new(0.0, 0.0, -1.0),
            view_up: Vec3::new(0.0, 1.0, 0.0),
            proj_distance: 1.0,
            view_width: 1.0,
            view_height: 1.0,
            light_intensity: Color::ONE,
            phong_exponent: lumen_renderer::DEFAULT_SHININESS,
        }
    }
}

/// A camera and scene ready to render.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub camera: Camera,
    pub scene: Scene,
}

/// Load a scene description from an XML file.
pub fn load_scene<P: AsRef<Path>>(path: P, defaults: &SceneDefaults) -> SceneResult<LoadedScene> {
    let path = path.as_ref();
    log::info!("Loading scene from: {:?}", path);

    let xml = std::fs::read_to_string(path)?;
    load_scene_from_str(&xml, defaults)
}

/// Load a scene description from XML text.
pub fn load_scene_from_str(xml: &str, defaults: &SceneDefaults) -> SceneResult<LoadedScene> {
    let document = parse_document(xml)?;
    let loaded = build(&document, defaults)?;

    log::info!(
        "Loaded scene: {}x{}, {} spheres, {} boxes, {} lights",
        loaded.camera.image_width(),
        loaded.camera.image_height(),
        loaded.scene.spheres().len(),
        loaded.scene.boxes().len(),
        loaded.scene.lights().len()
    );
    Ok(loaded)
}

fn build(document: &SceneDocument, defaults: &SceneDefaults) -> SceneResult<LoadedScene> {
    let image = document.image.as_deref().ok_or(SceneError::MissingElement {
        element: "image",
        context: "scene".to_string(),
    })?;
    let (width, height) = parse_image_size(image)?;

    if document.cameras.len() > 1 {
        log::warn!("Scene has {} cameras, using the last one", document.cameras.len());
    }
    let camera_element = document.cameras.last().ok_or(SceneError::MissingCamera)?;
    let camera = build_camera(camera_element, width, height, defaults)?;

    let shaders = build_shaders(&document.shaders, defaults)?;

    let mut scene = Scene::new();
    for (index, surface) in document.surfaces.iter().enumerate() {
        add_surface(&mut scene, surface, index, &shaders)?;
    }
    for (index, light) in document.lights.iter().enumerate() {
        scene.add_light(build_light(light, index, defaults)?);
    }

    Ok(LoadedScene { camera, scene })
}

fn optional_vec3(element: &str, text: Option<&String>, default: Vec3) -> SceneResult<Vec3> {
    text.map_or(Ok(default), |t| parse_vec3(element, t))
}

fn optional_scalar(element: &str, text: Option<&String>, default: f32) -> SceneResult<f32> {
    text.map_or(Ok(default), |t| parse_scalar(element, t))
}

fn required<'a>(element: &'static str, text: Option<&'a String>, context: &str) -> SceneResult<&'a String> {
    text.ok_or_else(|| SceneError::MissingElement {
        element,
        context: context.to_string(),
    })
}

fn build_camera(
    element: &CameraElement,
    width: u32,
    height: u32,
    defaults: &SceneDefaults,
) -> SceneResult<Camera> {
    let view_point = parse_vec3(
        "viewPoint",
        required("viewPoint", element.view_point.as_ref(), "camera")?,
    )?;
    let view_dir = optional_vec3("viewDir", element.view_dir.as_ref(), defaults.view_dir)?;
    let view_up = optional_vec3("viewUp", element.view_up.as_ref(), defaults.view_up)?;
    let proj_distance = optional_scalar("projDistance", element.proj_distance.as_ref(), defaults.proj_distance)?;
    let view_width = optional_scalar("viewWidth", element.view_width.as_ref(), defaults.view_width)?;
    let view_height = optional_scalar("viewHeight", element.view_height.as_ref(), defaults.view_height)?;

    if element.proj_normal.is_some() {
        log::debug!("Ignoring projNormal; the view plane faces the view direction");
    }

    let camera = CameraSettings::new(width, height)
        .with_position(view_point, view_dir, view_up)
        .with_view_plane(proj_distance, view_width, view_height)
        .build()?;
    Ok(camera)
}

fn build_shaders(
    elements: &[ShaderElement],
    defaults: &SceneDefaults,
) -> SceneResult<HashMap<String, Arc<Shader>>> {
    let mut shaders = HashMap::with_capacity(elements.len());

    for element in elements {
        let context = format!("shader '{}'", element.name);
        let diffuse = parse_vec3(
            "diffuseColor",
            required("diffuseColor", element.diffuse_color.as_ref(), &context)?,
        )?;

        let shader = match element.kind.as_str() {
            "Lambertian" => Shader::lambertian(diffuse),
            "Phong" => {
                let specular = parse_vec3(
                    "specularColor",
                    required("specularColor", element.specular_color.as_ref(), &context)?,
                )?;
                let exponent = optional_scalar("exponent", element.exponent.as_ref(), defaults.phong_exponent)?;
                Shader::phong(diffuse, specular, exponent)
            }
            other => return Err(SceneError::UnknownShaderType(other.to_string())),
        };

        log::debug!("Shader '{}': {:?}", element.name, shader);
        let previous = shaders.insert(element.name.clone(), Arc::new(shader.with_name(&element.name)));
        if previous.is_some() {
            log::warn!("Shader '{}' defined more than once, keeping the last definition", element.name);
        }
    }

    Ok(shaders)
}

fn add_surface(
    scene: &mut Scene,
    element: &SurfaceElement,
    index: usize,
    shaders: &HashMap<String, Arc<Shader>>,
) -> SceneResult<()> {
    let context = format!("surface #{}", index);
    let shader_ref = element.shader.as_ref().ok_or_else(|| SceneError::MissingElement {
        element: "shader",
        context: context.clone(),
    })?;
    let shader = shaders
        .get(&shader_ref.name)
        .cloned()
        .ok_or_else(|| SceneError::UnknownShader(shader_ref.name.clone()))?;

    match element.kind.as_str() {
        "Sphere" => {
            let center = parse_vec3("center", required("center", element.center.as_ref(), &context)?)?;
            let radius = parse_scalar("radius", required("radius", element.radius.as_ref(), &context)?)?;
            scene.add_sphere(Sphere::new(center, radius, shader));
        }
        "Box" => {
            let min_pt = parse_vec3("minPt", required("minPt", element.min_pt.as_ref(), &context)?)?;
            let max_pt = parse_vec3("maxPt", required("maxPt", element.max_pt.as_ref(), &context)?)?;
            scene.add_box(AxisBox::new(min_pt, max_pt, shader));
        }
        other => return Err(SceneError::UnknownSurfaceType(other.to_string())),
    }

    Ok(())
}

fn build_light(element: &LightElement, index: usize, defaults: &SceneDefaults) -> SceneResult<Light> {
    let context = format!("light #{}", index);
    let position = parse_vec3("position", required("position", element.position.as_ref(), &context)?)?;
    let intensity = optional_vec3("intensity", element.intensity.as_ref(), defaults.light_intensity)?;
    Ok(Light::new(position, intensity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::PrimitiveRef;

    const TWO_SPHERES: &str = r#"
        <scene>
            <image>40 30</image>
            <camera>
                <viewPoint>10 4.2 6</viewPoint>
                <viewDir>-10 -4.2 -6</viewDir>
                <projNormal>10 4.2 6</projNormal>
                <viewUp>0 1 0</viewUp>
                <projDistance>6</projDistance>
                <viewWidth>3.5</viewWidth>
                <viewHeight>3.5</viewHeight>
            </camera>
            <surface type="Sphere">
                <shader ref="blue"/>
                <center>0 0 0</center>
                <radius>1</radius>
            </surface>
            <surface type="Box">
                <shader ref="gray"/>
                <minPt>-5 -5 -5</minPt>
                <maxPt>5 -1 5</maxPt>
            </surface>
            <surface type="Sphere">
                <shader ref="blue"/>
                <center>2 0 0</center>
                <radius>0.5</radius>
            </surface>
            <shader name="blue" type="Phong">
                <diffuseColor>.2 .3 .8</diffuseColor>
                <specularColor>1 1 0</specularColor>
                <exponent>50</exponent>
            </shader>
            <shader name="gray" type="Lambertian">
                <diffuseColor>.5 .5 .5</diffuseColor>
            </shader>
            <light>
                <position>3 4 5</position>
                <intensity>1 1 1</intensity>
            </light>
            <light>
                <position>-3 4 5</position>
            </light>
        </scene>
    "#;

    fn load(xml: &str) -> SceneResult<LoadedScene> {
        load_scene_from_str(xml, &SceneDefaults::default())
    }

    #[test]
    fn test_load_full_scene() {
        let loaded = load(TWO_SPHERES).unwrap();
        let scene = &loaded.scene;

        assert_eq!(loaded.camera.image_width(), 40);
        assert_eq!(loaded.camera.image_height(), 30);
        assert_eq!(loaded.camera.proj_distance(), 6.0);
        assert_eq!(loaded.camera.view_width(), 3.5);
        assert_eq!(loaded.camera.view_point(), Vec3::new(10.0, 4.2, 6.0));

        assert_eq!(scene.spheres().len(), 2);
        assert_eq!(scene.boxes().len(), 1);
        assert_eq!(scene.lights().len(), 2);

        // Surface order is kept within each kind
        assert_eq!(scene.spheres()[1].center(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(scene.spheres()[1].radius(), 0.5);
        assert_eq!(scene.boxes()[0].max_pt(), Vec3::new(5.0, -1.0, 5.0));

        let blue = scene.spheres()[0].shader();
        assert_eq!(blue.name.as_deref(), Some("blue"));
        assert_eq!(blue.specular, Color::new(1.0, 1.0, 0.0));
        assert_eq!(blue.shininess, 50.0);
        assert_eq!(scene.boxes()[0].shader().specular, Color::ZERO);
    }

    #[test]
    fn test_shaders_are_shared() {
        let loaded = load(TWO_SPHERES).unwrap();
        let spheres = loaded.scene.spheres();
        assert!(Arc::ptr_eq(spheres[0].shader(), spheres[1].shader()));
        assert!(!Arc::ptr_eq(spheres[0].shader(), loaded.scene.boxes()[0].shader()));
    }

    #[test]
    fn test_defaults_are_applied() {
        let xml = r#"
            <scene>
                <image>8 6</image>
                <camera><viewPoint>0 0 5</viewPoint></camera>
                <shader name="s" type="Phong">
                    <diffuseColor>1 1 1</diffuseColor>
                    <specularColor>1 1 1</specularColor>
                </shader>
                <surface type="Sphere"><shader ref="s"/><center>0 0 0</center><radius>1</radius></surface>
                <light><position>0 0 5</position></light>
            </scene>
        "#;

        let loaded = load(xml).unwrap();
        let camera = &loaded.camera;
        assert_eq!(camera.direction(), Vec3::Z);
        assert_eq!(camera.v(), Vec3::Y);
        assert_eq!(camera.proj_distance(), 1.0);
        assert_eq!(camera.view_width(), 1.0);
        assert_eq!(camera.view_height(), 1.0);
        assert_eq!(loaded.scene.lights()[0].intensity, Color::ONE);
        assert_eq!(loaded.scene.spheres()[0].shader().shininess, 50.0);
    }

    #[test]
    fn test_custom_defaults() {
        let xml = r#"
            <scene>
                <image>8 6</image>
                <camera><viewPoint>0 0 5</viewPoint></camera>
                <light><position>0 0 5</position></light>
            </scene>
        "#;
        let defaults = SceneDefaults {
            light_intensity: Color::splat(0.25),
            proj_distance: 3.0,
            ..Default::default()
        };

        let loaded = load_scene_from_str(xml, &defaults).unwrap();
        assert_eq!(loaded.scene.lights()[0].intensity, Color::splat(0.25));
        assert_eq!(loaded.camera.proj_distance(), 3.0);
        assert_eq!(loaded.scene.primitive_count(), 0);
    }

    #[test]
    fn test_last_camera_wins() {
        let xml = r#"
            <scene>
                <image>2 2</image>
                <camera><viewPoint>0 0 1</viewPoint></camera>
                <camera><viewPoint>0 0 9</viewPoint></camera>
            </scene>
        "#;
        let loaded = load(xml).unwrap();
        assert_eq!(loaded.camera.view_point(), Vec3::new(0.0, 0.0, 9.0));
    }

    #[test]
    fn test_rendered_scene_hits_surfaces() {
        let loaded = load(TWO_SPHERES).unwrap();
        let camera = &loaded.camera;
        let ray = camera.get_ray(camera.image_height() / 2, camera.image_width() / 2);

        let hit = loaded
            .scene
            .nearest_hit(&ray, lumen_math::Interval::FORWARD)
            .expect("center ray looks at the first sphere");
        assert!(matches!(hit.primitive, PrimitiveRef::Sphere(_)));
    }

    #[test]
    fn test_unknown_shader_ref() {
        let xml = TWO_SPHERES.replacen(r#"<shader ref="gray"/>"#, r#"<shader ref="green"/>"#, 1);
        let err = load(&xml).unwrap_err();
        assert!(matches!(err, SceneError::UnknownShader(ref name) if name == "green"));
    }

    #[test]
    fn test_unknown_types() {
        let xml = TWO_SPHERES.replacen(r#"type="Box""#, r#"type="Cone""#, 1);
        assert!(matches!(load(&xml).unwrap_err(), SceneError::UnknownSurfaceType(_)));

        let xml = TWO_SPHERES.replacen(r#"type="Lambertian""#, r#"type="Toon""#, 1);
        assert!(matches!(load(&xml).unwrap_err(), SceneError::UnknownShaderType(_)));
    }

    #[test]
    fn test_malformed_vector() {
        let xml = TWO_SPHERES.replacen("<center>0 0 0</center>", "<center>0 0</center>", 1);
        let err = load(&xml).unwrap_err();
        assert!(matches!(err, SceneError::InvalidVector { ref element, .. } if element == "center"));
    }

    #[test]
    fn test_missing_required_elements() {
        let xml = "<scene><image>2 2</image></scene>";
        assert!(matches!(load(xml).unwrap_err(), SceneError::MissingCamera));

        let xml = "<scene><camera><viewPoint>0 0 1</viewPoint></camera></scene>";
        assert!(matches!(
            load(xml).unwrap_err(),
            SceneError::MissingElement { element: "image", .. }
        ));

        let xml = TWO_SPHERES.replacen("<radius>1</radius>", "", 1);
        assert!(matches!(
            load(&xml).unwrap_err(),
            SceneError::MissingElement { element: "radius", .. }
        ));
    }

    #[test]
    fn test_degenerate_camera_is_reported() {
        let xml = r#"
            <scene>
                <image>2 2</image>
                <camera><viewPoint>0 0 1</viewPoint><viewDir>0 1 0</viewDir></camera>
            </scene>
        "#;
        assert!(matches!(load(xml).unwrap_err(), SceneError::Camera(_)));
    }

    #[test]
    fn test_load_scene_from_file() {
        let path = std::env::temp_dir().join(format!("lumen_scene_test_{}.xml", std::process::id()));
        std::fs::write(&path, TWO_SPHERES).unwrap();

        let loaded = load_scene(&path, &SceneDefaults::default());
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap().scene.primitive_count(), 3);
    }

    #[test]
    fn test_load_sample_scene() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenes/two_spheres.xml");
        let loaded = load_scene(path, &SceneDefaults::default()).unwrap();

        assert_eq!(loaded.camera.image_width(), 300);
        assert_eq!(loaded.scene.spheres().len(), 2);
        assert_eq!(loaded.scene.boxes().len(), 1);
        assert_eq!(loaded.scene.lights()[1].intensity, Color::splat(0.3));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_scene("/nonexistent/lumen/scene.xml", &SceneDefaults::default()).unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }
}
