use std::path::Path;

use sphere_tracer::color::Color;
use sphere_tracer::parallel;
use sphere_tracer::scene::Scene;
use sphere_tracer::world::World;

const DEFAULT_WORLD_JSON: &str = r#"{
    "canvas_width": 11,
    "canvas_height": 11,
    "field_of_view": 1.5707963267948966,
    "camera_from": [0, 0, -5],
    "camera_to": [0, 0, 0],
    "camera_up": [0, 1, 0],
    "light": { "position": [-10, 10, -10], "intensity": [1, 1, 1] },
    "spheres": [
        { "material": { "color": [0.8, 1.0, 0.6], "diffuse": 0.7, "specular": 0.2 } },
        { "transforms": [ { "scale": [0.5, 0.5, 0.5] } ] }
    ]
}"#;

fn three_spheres() -> Scene {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenes")
        .join("three_spheres.json");

    Scene::load(&path).unwrap()
}

#[test]
fn json_world_matches_default_world() {
    let scene = Scene::from_json(DEFAULT_WORLD_JSON).unwrap();
    let default_world: World = Default::default();

    for sphere in default_world.objects.iter() {
        assert!(scene.world.contains(sphere));
    }
    assert_eq!(scene.world.light_sources, default_world.light_sources);
}

#[test]
fn render_center_pixel() {
    let scene = Scene::from_json(DEFAULT_WORLD_JSON).unwrap();
    let image = scene.camera.render(&scene.world);

    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn corners_miss_everything() {
    let scene = Scene::from_json(DEFAULT_WORLD_JSON).unwrap();
    let image = scene.camera.render(&scene.world);

    for &(x, y) in [(0, 0), (10, 0), (0, 10), (10, 10)].iter() {
        assert_eq!(image.read_pixel(x, y).unwrap(), Color::black());
    }
}

#[test]
fn parallel_render_of_scene_file() {
    let scene = three_spheres();
    let camera = scene.camera.resized(32, 16);

    let sequential = camera.render(&scene.world);
    let threaded = parallel::render(scene.world, camera, 3);

    assert_eq!(threaded, sequential);
}

#[test]
fn scene_file_renders_to_ppm() {
    let scene = three_spheres();
    let camera = scene.camera.resized(16, 8);
    let image = camera.render(&scene.world);

    let path = std::env::temp_dir().join("sphere_tracer_three_spheres.ppm");
    image.save(&path).unwrap();
    let ppm = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert!(ppm.starts_with("P3\n16 8\n255\n"));
    assert!(ppm.ends_with('\n'));
    assert!(ppm.lines().all(|line| line.len() <= 70));

    // Something in the scene is lit.
    let lit = (0..8).flat_map(|y| (0..16).map(move |x| (x, y)))
        .filter_map(|(x, y)| image.read_pixel(x, y))
        .any(|c| c != Color::black());
    assert!(lit);
}
