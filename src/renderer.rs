//! Recursive Monte Carlo radiance estimator.
//!
//! Traces a single ray through the scene, bouncing off surfaces according
//! to their materials and accumulating emitted plus reflected radiance.
//! Direct illumination from emissive surfaces is gathered implicitly by
//! rays that happen to terminate on them.

use glam::Vec3A;

use crate::interval::Interval;
use crate::ray::Ray;
use crate::scene::Scene;

/// RGB color type using Vec3A for SIMD optimization.
type Color = Vec3A;

/// Minimum accepted hit parameter, avoids self-intersection at bounce points.
const T_MIN: f32 = 1e-3;

/// Radiance returned for rays that leave the scene.
///
/// `Sky` is the right default for scenes lit by the environment; scenes
/// lit by emissive surfaces usually want `Dark` so the only light comes
/// from the emitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    /// Blue-white gradient based on the ray's vertical component.
    #[default]
    Sky,
    /// No environment light at all.
    Dark,
}

impl Background {
    /// Radiance seen by a ray that hits nothing.
    pub fn sample(&self, ray: &Ray) -> Color {
        match self {
            Self::Sky => {
                // Blend factor from the Y component: -1 (down) gives 0, +1 (up) gives 1
                let a = 0.5 * (ray.direction.y + 1.0);
                Color::ONE.lerp(Color::new(0.5, 0.7, 1.0), a)
            }
            Self::Dark => Color::ZERO,
        }
    }
}

/// Recursive path-tracing integrator with bounded depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    /// Radiance model for rays that miss every primitive.
    pub background: Background,
}

impl Renderer {
    /// Create a renderer with the given background mode.
    pub fn new(background: Background) -> Self {
        Self { background }
    }

    /// Estimate the radiance arriving along `ray`.
    ///
    /// Recursively follows scattered rays until one is absorbed, leaves the
    /// scene, or the bounce limit is reached.
    pub fn radiance(&self, ray: &Ray, scene: &Scene, depth: u32) -> Color {
        // If we've exceeded the bounce limit, no more light is gathered
        if depth == 0 {
            return Color::ZERO;
        }

        let interval = Interval::new(T_MIN, f32::INFINITY);
        match scene.closest_hit(ray, interval) {
            Some(hit) => {
                let emitted = hit.material.emitted(hit.u, hit.v);
                match hit.material.scatter(ray, &hit) {
                    Some(scatter) => {
                        emitted
                            + scatter.attenuation * self.radiance(&scatter.ray, scene, depth - 1)
                    }
                    None => emitted,
                }
            }
            None => self.background.sample(ray),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::random;
    use crate::sphere::Sphere;
    use std::sync::Arc;

    fn single_sphere_scene(material: Material) -> Scene {
        let mut scene = Scene::new();
        scene.add(Box::new(
            Sphere::new(Vec3A::new(0.0, 0.0, -1.0), 0.5, Arc::new(material)).unwrap(),
        ));
        scene
    }

    #[test]
    fn depth_zero_gathers_no_light() {
        let renderer = Renderer::default();
        let scene = Scene::new();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(renderer.radiance(&ray, &scene, 0), Vec3A::ZERO);
    }

    #[test]
    fn misses_sample_the_sky_gradient() {
        let renderer = Renderer::new(Background::Sky);
        let scene = Scene::new();

        // Horizontal ray: a = 0.5, halfway between white and sky blue
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let c = renderer.radiance(&ray, &scene, 5);
        assert!((c - Vec3A::new(0.75, 0.85, 1.0)).length() < 1e-5);

        // Straight up: pure sky blue
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        let c = renderer.radiance(&ray, &scene, 5);
        assert!((c - Vec3A::new(0.5, 0.7, 1.0)).length() < 1e-5);
    }

    #[test]
    fn dark_background_returns_black_on_miss() {
        let renderer = Renderer::new(Background::Dark);
        let scene = Scene::new();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(renderer.radiance(&ray, &scene, 5), Vec3A::ZERO);
    }

    #[test]
    fn emissive_hits_return_their_radiance() {
        let renderer = Renderer::new(Background::Dark);
        let scene = single_sphere_scene(Material::emissive(Vec3A::splat(10.0)));

        let hit_ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(renderer.radiance(&hit_ray, &scene, 2), Vec3A::splat(10.0));

        let miss_ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0));
        assert_eq!(renderer.radiance(&miss_ray, &scene, 2), Vec3A::ZERO);
    }

    #[test]
    fn mirror_metal_returns_the_reflected_sky() {
        random::reseed(21);
        let renderer = Renderer::new(Background::Sky);
        let scene = single_sphere_scene(Material::metal(Vec3A::ONE, 0.0));

        // Head-on ray reflects straight back to sample the sky at y = 0
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let c = renderer.radiance(&ray, &scene, 2);
        assert!((c - Vec3A::new(0.75, 0.85, 1.0)).length() < 1e-3);
    }

    #[test]
    fn matte_bounce_lifts_the_pixel_from_black() {
        random::reseed(22);
        let renderer = Renderer::new(Background::Sky);
        let scene = single_sphere_scene(Material::matte(Vec3A::ONE));

        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let c = renderer.radiance(&ray, &scene, 2);
        assert!(c.x > 0.0 && c.y > 0.0 && c.z > 0.0);
    }
}
