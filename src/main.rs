use clap::Parser;
use glam::Vec3A;
use log::info;
use std::sync::Arc;

mod cli;

use cli::Args;
use lumipath::camera::{Camera, CameraConfig};
use lumipath::hittable::GeometryError;
use lumipath::material::Material;
use lumipath::output::save_image_as_png;
use lumipath::plane::Plane;
use lumipath::scene::Scene;
use lumipath::sphere::Sphere;
use lumipath::texture::Texture;

/// Build an 8x8 checkerboard texture in raw sRGB bytes.
fn checker_texture() -> Texture {
    const SIZE: u32 = 8;
    let mut pixels = Vec::with_capacity((SIZE * SIZE * 3) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let bright = (x + y) % 2 == 0;
            let value = if bright { 230 } else { 40 };
            pixels.extend_from_slice(&[value, value, value]);
        }
    }
    Texture::from_raw(SIZE, SIZE, pixels).unwrap_or(Texture::Solid { color: Vec3A::ONE })
}

/// Create the demo scene: a checkered ground plane, three showcase spheres
/// and a small emissive sphere acting as a lamp.
fn create_scene() -> Result<Scene, GeometryError> {
    let mut scene = Scene::new();

    // Checkered ground
    let ground_material = Arc::new(Material::matte_textured(Arc::new(checker_texture())));
    scene.add(Box::new(Plane::new(
        Vec3A::new(0.0, -0.5, 0.0),
        Vec3A::Y,
        20.0,
        20.0,
        ground_material,
    )?));

    // Matte, mirror and brushed-metal spheres
    let matte = Arc::new(Material::matte(Vec3A::new(0.1, 0.2, 0.5)));
    scene.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 0.0, -1.2),
        0.5,
        matte,
    )?));

    let mirror = Arc::new(Material::metal(Vec3A::splat(0.8), 0.0));
    scene.add(Box::new(Sphere::new(
        Vec3A::new(-1.05, 0.0, -1.2),
        0.5,
        mirror,
    )?));

    let brushed = Arc::new(Material::metal(Vec3A::new(0.8, 0.6, 0.2), 0.4));
    scene.add(Box::new(Sphere::new(
        Vec3A::new(1.05, 0.0, -1.2),
        0.5,
        brushed,
    )?));

    // A lamp above the scene
    let lamp = Arc::new(Material::emissive(Vec3A::splat(4.0)));
    scene.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 1.6, -1.0),
        0.3,
        lamp,
    )?));

    Ok(scene)
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.debug_level.into())
        .init();

    // Log application startup with version information
    info!("Lumipath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Image resolution: {}x{}, samples per pixel: {}",
        args.width, args.height, args.samples_per_pixel
    );

    let scene = match create_scene() {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };

    let config = CameraConfig {
        position: Vec3A::new(0.0, 0.6, 2.5),
        look_at: Vec3A::new(0.0, 0.2, -1.0),
        image_resolution: (args.width, args.height),
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        background: args.background.into(),
        seed: args.seed,
        ..CameraConfig::default()
    };
    let mut camera = match Camera::new(config) {
        Ok(camera) => camera,
        Err(e) => {
            log::error!("Invalid camera configuration: {}", e);
            std::process::exit(1);
        }
    };

    camera.capture(&scene);
    camera.apply_gamma(args.gamma);

    if !save_image_as_png(&args.output, camera.resolution(), camera.image_data()) {
        std::process::exit(1);
    }
}
