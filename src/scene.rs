use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use log::{ debug, warn };
use serde::{ Serialize, Deserialize };

use crate::tuple::Tuple;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::light::{ PointLight, Material };
use crate::sphere::Sphere;
use crate::world::World;
use crate::camera::Camera;
use crate::error::{ Result, TraceError };

/// Everything needed for a render: what to draw and where to look from.
#[derive(Clone, Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// The default world, seen from (0, 1.5, -5) looking at the origin.
    pub fn with_default_world(hsize: usize, vsize: usize, field_of_view: f64)
        -> Result<Scene> {
        let camera = Camera::new(hsize, vsize, field_of_view)
            .with_transform(Matrix::view_transform(
                Tuple::point(0.0, 1.5, -5.0),
                Tuple::point(0.0, 0.0, 0.0),
                Tuple::vector(0.0, 1.0, 0.0),
            ))?;

        Ok(Scene { world: Default::default(), camera })
    }

    /// Parses a JSON scene description.
    ///
    /// ```
    /// # use sphere_tracer::scene::Scene;
    /// let scene = Scene::from_json(r#"{
    ///     "canvas_width": 20, "canvas_height": 10, "field_of_view": 1.0,
    ///     "camera_from": [0, 0, -5], "camera_to": [0, 0, 0],
    ///     "camera_up": [0, 1, 0],
    ///     "light": { "position": [-10, 10, -10], "intensity": [1, 1, 1] },
    ///     "spheres": [ {} ]
    /// }"#).unwrap();
    ///
    /// assert_eq!(scene.camera.hsize, 20);
    /// assert_eq!(scene.world.objects.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_str(json)?;
        Scene::try_from(scene_json)
    }

    /// Reads and parses a JSON scene description file.
    pub fn load(path: &Path) -> Result<Scene> {
        debug!("loading scene from {}", path.display());
        Scene::from_json(&fs::read_to_string(path)?)
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = TraceError;

    fn try_from(scene_json: SceneJson) -> Result<Scene> {
        if scene_json.canvas_width == 0 || scene_json.canvas_height == 0 {
            return Err(TraceError::InvalidScene(format!(
                "canvas must not be empty, got {}x{}",
                scene_json.canvas_width, scene_json.canvas_height
            )));
        }

        let fov = scene_json.field_of_view;
        if !(fov > 0.0 && fov < std::f64::consts::PI) {
            return Err(TraceError::InvalidScene(format!(
                "field_of_view must be between 0 and pi radians, got {}", fov
            )));
        }

        // Create the camera transform from the view parameters.
        let camera_transform = Matrix::view_transform(
            point("camera_from", &scene_json.camera_from)?,
            point("camera_to", &scene_json.camera_to)?,
            vector("camera_up", &scene_json.camera_up)?,
        );

        // A degenerate view (e.g. `up` parallel to the line of sight) has no
        // inverse.
        let camera = Camera::new(
            scene_json.canvas_width,
            scene_json.canvas_height,
            fov,
        ).with_transform(camera_transform).map_err(|e|
            TraceError::InvalidScene(format!("camera: {}", e))
        )?;

        // Create the world.
        let mut world = World::empty();
        for light in scene_json.light.iter().chain(scene_json.lights.iter()) {
            world.add_light(light.to_point_light()?);
        }

        for (i, sphere) in scene_json.spheres.iter().enumerate() {
            world.add_object(sphere.to_sphere().map_err(|e|
                TraceError::InvalidScene(format!("sphere {}: {}", i, e))
            )?);
        }

        if world.light_sources.is_empty() {
            warn!("scene has no light sources");
        }
        debug!("scene has {} spheres and {} lights", world.objects.len(),
            world.light_sources.len());

        Ok(Scene { world, camera })
    }
}

/// The JSON scene description.
///
/// Vectors are plain arrays of three numbers. `light` is shorthand for a
/// single entry of `lights`; both may be given.
#[derive(Serialize, Deserialize)]
pub struct SceneJson {
    canvas_width: usize,
    canvas_height: usize,
    field_of_view: f64,

    camera_from: Vec<f64>,
    camera_to: Vec<f64>,
    camera_up: Vec<f64>,

    #[serde(default)]
    light: Option<LightJson>,
    #[serde(default)]
    lights: Vec<LightJson>,
    #[serde(default)]
    spheres: Vec<SphereJson>,
}

#[derive(Clone, Serialize, Deserialize)]
struct LightJson {
    intensity: Vec<f64>,
    position: Vec<f64>,
}

impl LightJson {
    fn to_point_light(&self) -> Result<PointLight> {
        Ok(PointLight::new(
            color("light intensity", &self.intensity)?,
            point("light position", &self.position)?,
        ))
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
struct SphereJson {
    #[serde(default)]
    transforms: Vec<TransformJson>,
    #[serde(default)]
    material: MaterialJson,
}

impl SphereJson {
    /// A unit sphere, transformed in list order: the first transform listed
    /// is the first applied to the sphere.
    fn to_sphere(&self) -> Result<Sphere> {
        let mut transform = Matrix::identity(4);
        for t in self.transforms.iter() {
            transform = &t.to_matrix()? * &transform;
        }

        Sphere::unit()
            .with_material(self.material.to_material()?)
            .with_transform(transform)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TransformJson {
    Translate(Vec<f64>),
    Scale(Vec<f64>),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Shear(Vec<f64>),
}

impl TransformJson {
    fn to_matrix(&self) -> Result<Matrix> {
        Ok(match self {
            TransformJson::Translate(v) => {
                let [x, y, z] = triple("translate", v)?;
                Matrix::translation(x, y, z)
            },
            TransformJson::Scale(v) => {
                let [x, y, z] = triple("scale", v)?;
                Matrix::scaling(x, y, z)
            },
            TransformJson::RotateX(r) => Matrix::rotation_x(*r),
            TransformJson::RotateY(r) => Matrix::rotation_y(*r),
            TransformJson::RotateZ(r) => Matrix::rotation_z(*r),
            TransformJson::Shear(v) => match v.as_slice() {
                [xy, xz, yx, yz, zx, zy] =>
                    Matrix::shearing(*xy, *xz, *yx, *yz, *zx, *zy),
                _ => return Err(TraceError::InvalidScene(format!(
                    "shear needs 6 values, got {}", v.len()
                ))),
            },
        })
    }
}

/// Material fields; anything left out keeps the default material's value.
#[derive(Clone, Default, Serialize, Deserialize)]
struct MaterialJson {
    #[serde(default)]
    color: Option<Vec<f64>>,
    #[serde(default)]
    ambient: Option<f64>,
    #[serde(default)]
    diffuse: Option<f64>,
    #[serde(default)]
    specular: Option<f64>,
    #[serde(default)]
    shininess: Option<f64>,
}

impl MaterialJson {
    fn to_material(&self) -> Result<Material> {
        let mut m = Material::default();

        if let Some(c) = &self.color {
            m.color = color("material color", c)?;
        }
        m.ambient = self.ambient.unwrap_or(m.ambient);
        m.diffuse = self.diffuse.unwrap_or(m.diffuse);
        m.specular = self.specular.unwrap_or(m.specular);
        m.shininess = self.shininess.unwrap_or(m.shininess);

        Ok(m)
    }
}

fn triple(what: &str, v: &[f64]) -> Result<[f64; 3]> {
    match v {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(TraceError::InvalidScene(format!(
            "{} needs 3 values, got {}", what, v.len()
        ))),
    }
}

fn point(what: &str, v: &[f64]) -> Result<Tuple> {
    let [x, y, z] = triple(what, v)?;
    Ok(Tuple::point(x, y, z))
}

fn vector(what: &str, v: &[f64]) -> Result<Tuple> {
    let [x, y, z] = triple(what, v)?;
    Ok(Tuple::vector(x, y, z))
}

fn color(what: &str, v: &[f64]) -> Result<Color> {
    let [r, g, b] = triple(what, v)?;
    Ok(Color::rgb(r, g, b))
}

#[cfg(test)]
const SAMPLE_SCENE: &str = r#"{
    "canvas_width": 200,
    "canvas_height": 100,
    "field_of_view": 1.047,
    "camera_from": [0, 1.5, -5],
    "camera_to": [0, 0, 0],
    "camera_up": [0, 1, 0],
    "lights": [ { "position": [-10, 10, -10], "intensity": [1, 1, 1] } ],
    "spheres": [
        {
            "transforms": [ { "scale": [0.5, 0.5, 0.5] }, { "translate": [0, 1, 0] } ],
            "material": { "color": [1, 0.2, 1], "diffuse": 0.7 }
        },
        {}
    ]
}"#;

#[test]
fn parse_sample_scene() {
    let scene = Scene::from_json(SAMPLE_SCENE).unwrap();

    assert_eq!(scene.camera.hsize, 200);
    assert_eq!(scene.camera.vsize, 100);
    assert_eq!(scene.camera.field_of_view, 1.047);
    assert_eq!(scene.camera.transform(), &Matrix::view_transform(
        Tuple::point(0.0, 1.5, -5.0),
        Tuple::point(0.0, 0.0, 0.0),
        Tuple::vector(0.0, 1.0, 0.0),
    ));

    assert_eq!(scene.world.light_sources, vec![PointLight::new(
        Color::white(),
        Tuple::point(-10.0, 10.0, -10.0),
    )]);
    assert_eq!(scene.world.objects.len(), 2);
}

#[test]
fn transforms_apply_in_list_order() {
    let scene = Scene::from_json(SAMPLE_SCENE).unwrap();
    let s = &scene.world.objects[0];

    assert_eq!(s.transform(),
        &(Matrix::translation(0.0, 1.0, 0.0) * Matrix::scaling(0.5, 0.5, 0.5)));

    // Scaled first, so the sphere is half size around (0, 1, 0).
    assert_eq!(s.transform() * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(0.0, 1.5, 0.0));
}

#[test]
fn missing_material_fields_use_defaults() {
    let scene = Scene::from_json(SAMPLE_SCENE).unwrap();

    let mut expected = Material::default();
    expected.color = Color::rgb(1.0, 0.2, 1.0);
    expected.diffuse = 0.7;

    assert_eq!(scene.world.objects[0].material, expected);
    assert_eq!(scene.world.objects[1], Sphere::unit());
}

#[test]
fn light_shorthand_and_list_combine() {
    let scene = Scene::from_json(r#"{
        "canvas_width": 10, "canvas_height": 10, "field_of_view": 1.0,
        "camera_from": [0, 0, -5], "camera_to": [0, 0, 0], "camera_up": [0, 1, 0],
        "light": { "position": [0, 0, -10], "intensity": [1, 1, 1] },
        "lights": [ { "position": [0, 10, 0], "intensity": [0.5, 0.5, 0.5] } ]
    }"#).unwrap();

    assert_eq!(scene.world.light_sources.len(), 2);
    assert_eq!(scene.world.light_sources[0].position, Tuple::point(0.0, 0.0, -10.0));
    assert_eq!(scene.world.light_sources[1].intensity, Color::rgb(0.5, 0.5, 0.5));
    assert!(scene.world.objects.is_empty());
}

#[test]
fn every_transform_kind_parses() {
    let scene = Scene::from_json(r#"{
        "canvas_width": 10, "canvas_height": 10, "field_of_view": 1.0,
        "camera_from": [0, 0, -5], "camera_to": [0, 0, 0], "camera_up": [0, 1, 0],
        "spheres": [ { "transforms": [
            { "rotate_x": 0.5 }, { "rotate_y": 0.25 }, { "rotate_z": 1.0 },
            { "shear": [1, 0, 0, 0, 0, 0] }
        ] } ]
    }"#).unwrap();

    let expected = Matrix::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0)
        * Matrix::rotation_z(1.0)
        * Matrix::rotation_y(0.25)
        * Matrix::rotation_x(0.5);
    assert_eq!(scene.world.objects[0].transform(), &expected);
}

#[test]
fn malformed_json_is_a_parse_error() {
    match Scene::from_json("{ \"canvas_width\": ") {
        Err(TraceError::SceneParse(_)) => (),
        other => panic!("expected a parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn unknown_transform_is_a_parse_error() {
    let json = SAMPLE_SCENE.replace("\"translate\"", "\"twist\"");

    match Scene::from_json(&json) {
        Err(TraceError::SceneParse(_)) => (),
        other => panic!("expected a parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn wrong_arity_is_invalid() {
    let json = SAMPLE_SCENE.replace("\"camera_to\": [0, 0, 0]", "\"camera_to\": [0, 0]");

    match Scene::from_json(&json) {
        Err(TraceError::InvalidScene(msg)) => assert!(msg.contains("camera_to")),
        other => panic!("expected an invalid scene, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn empty_canvas_is_invalid() {
    let json = SAMPLE_SCENE.replace("\"canvas_width\": 200", "\"canvas_width\": 0");

    assert!(matches!(Scene::from_json(&json), Err(TraceError::InvalidScene(_))));
}

#[test]
fn flat_sphere_is_invalid() {
    let json = SAMPLE_SCENE.replace("[0.5, 0.5, 0.5]", "[0.5, 0, 0.5]");

    match Scene::from_json(&json) {
        Err(TraceError::InvalidScene(msg)) => assert!(msg.starts_with("sphere 0")),
        other => panic!("expected an invalid scene, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn default_world_scene() {
    let scene = Scene::with_default_world(32, 24, std::f64::consts::PI / 3.0)
        .unwrap();

    assert_eq!(scene.world.objects.len(), 2);
    assert_eq!(scene.world.light_sources.len(), 1);
    assert_eq!(scene.camera.hsize, 32);
    assert_eq!(scene.camera.vsize, 24);
}

#[test]
fn load_missing_file_is_io_error() {
    let path = Path::new("/nonexistent-directory/scene.json");

    assert!(matches!(Scene::load(path), Err(TraceError::Io(_))));
}
