//! Material system for path tracing.
//!
//! Implements three material kinds: Matte (Lambertian diffuse), Metal
//! (glossy reflection with a roughness blend) and Emissive (light source).
//! Every color-like parameter is a scale optionally modulated by a texture
//! sampled at the hit point's (u, v).

use glam::Vec3A;
use std::sync::Arc;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use crate::texture::Texture;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Result of a successful scatter: the surface color and the next ray.
#[derive(Debug, Clone)]
pub struct Scatter {
    /// Color attenuation applied to the radiance carried by `ray`.
    pub attenuation: Color,
    /// The scattered ray, originating at the hit point.
    pub ray: Ray,
}

/// Surface material deciding how light scatters and what it emits.
#[derive(Debug, Clone)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Matte {
        /// Base color, multiplied with the texture sample when present.
        color_scale: Color,
        /// Optional color texture sampled at the hit's (u, v).
        color_texture: Option<Arc<Texture>>,
    },

    /// Glossy reflector blending a mirror direction with a diffuse one.
    Metal {
        /// Metal color, multiplied with the texture sample when present.
        color_scale: Color,
        /// Optional color texture sampled at the hit's (u, v).
        color_texture: Option<Arc<Texture>>,
        /// Roughness in [0, 1]: 0 is a perfect mirror, 1 fully diffuse.
        roughness_scale: f32,
        /// Optional roughness texture; its red channel scales the roughness.
        roughness_texture: Option<Arc<Texture>>,
    },

    /// Non-scattering light emitter.
    Emissive {
        /// Emitted radiance, multiplied with the texture sample when present.
        emission_scale: Color,
        /// Optional emission texture sampled at the hit's (u, v).
        emission_texture: Option<Arc<Texture>>,
    },
}

impl Material {
    /// Create a matte material with a constant color.
    pub fn matte(color: Color) -> Self {
        Self::Matte {
            color_scale: color,
            color_texture: None,
        }
    }

    /// Create a matte material colored by a texture.
    pub fn matte_textured(texture: Arc<Texture>) -> Self {
        Self::Matte {
            color_scale: Color::ONE,
            color_texture: Some(texture),
        }
    }

    /// Create a metal material with a constant color and roughness.
    pub fn metal(color: Color, roughness: f32) -> Self {
        Self::Metal {
            color_scale: color,
            color_texture: None,
            roughness_scale: roughness,
            roughness_texture: None,
        }
    }

    /// Create an emissive material with a constant radiance.
    pub fn emissive(emission: Color) -> Self {
        Self::Emissive {
            emission_scale: emission,
            emission_texture: None,
        }
    }

    /// Create an emissive material whose radiance comes from a texture.
    pub fn emissive_textured(texture: Arc<Texture>) -> Self {
        Self::Emissive {
            emission_scale: Color::ONE,
            emission_texture: Some(texture),
        }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns the attenuation and the next ray, or `None` when the ray
    /// is absorbed at the surface.
    pub fn scatter(&self, incident: &Ray, hit: &HitRecord) -> Option<Scatter> {
        match self {
            Self::Matte {
                color_scale,
                color_texture,
            } => Some(scatter_matte(*color_scale, color_texture.as_deref(), hit)),
            Self::Metal {
                color_scale,
                color_texture,
                roughness_scale,
                roughness_texture,
            } => scatter_metal(
                *color_scale,
                color_texture.as_deref(),
                *roughness_scale,
                roughness_texture.as_deref(),
                incident,
                hit,
            ),
            Self::Emissive { .. } => None,
        }
    }

    /// Radiance emitted by the surface at the given texture coordinates.
    ///
    /// Zero for everything but [`Material::Emissive`].
    pub fn emitted(&self, u: f32, v: f32) -> Color {
        match self {
            Self::Emissive {
                emission_scale,
                emission_texture,
            } => modulate(*emission_scale, emission_texture.as_deref(), u, v),
            _ => Color::ZERO,
        }
    }
}

/// Lambertian diffuse scattering with cosine-weighted distribution.
fn scatter_matte(color_scale: Color, color_texture: Option<&Texture>, hit: &HitRecord) -> Scatter {
    let mut scatter_direction = hit.normal + random::random_unit_vector();

    // Catch degenerate scatter direction (very close to zero)
    if scatter_direction.length_squared() < 1e-8 {
        scatter_direction = hit.normal;
    }

    Scatter {
        attenuation: modulate(color_scale, color_texture, hit.u, hit.v),
        ray: Ray::new(hit.p, scatter_direction),
    }
}

/// Glossy reflection blending the mirror direction with a hemisphere sample.
fn scatter_metal(
    color_scale: Color,
    color_texture: Option<&Texture>,
    roughness_scale: f32,
    roughness_texture: Option<&Texture>,
    incident: &Ray,
    hit: &HitRecord,
) -> Option<Scatter> {
    let roughness = match roughness_texture {
        Some(texture) => roughness_scale * texture.sample(hit.u, hit.v).x,
        None => roughness_scale,
    }
    .clamp(0.0, 1.0);

    let reflected = reflect(incident.direction, hit.normal);

    // Blend between a hemisphere-coherent random direction and the mirror
    // direction: roughness 0 is a perfect mirror, roughness 1 pure diffuse.
    let mut hemisphere = hit.normal + random::random_unit_vector();
    if hemisphere.length_squared() < 1e-8 {
        hemisphere = hit.normal;
    }
    let direction = hemisphere
        .normalize()
        .lerp(reflected, 1.0 - roughness)
        .normalize();

    // Directions bent below the surface are absorbed
    if direction.dot(hit.normal) > 0.0 {
        Some(Scatter {
            attenuation: modulate(color_scale, color_texture, hit.u, hit.v),
            ray: Ray::new(hit.p, direction),
        })
    } else {
        None
    }
}

/// Combine a scale with an optional texture sample.
fn modulate(scale: Color, texture: Option<&Texture>, u: f32, v: f32) -> Color {
    match texture {
        Some(texture) => scale * texture.sample(u, v),
        None => scale,
    }
}

/// Reflect a vector off a surface using the law of reflection.
fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_on_hit(material: Arc<Material>) -> (Ray, HitRecord) {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = HitRecord::new(
            &ray,
            0.5,
            Vec3A::new(0.0, 0.0, 1.0),
            0.5,
            0.5,
            material,
        );
        (ray, rec)
    }

    #[test]
    fn matte_always_scatters_with_its_color() {
        random::reseed(1);
        let material = Arc::new(Material::matte(Vec3A::new(0.8, 0.5, 0.3)));
        let (ray, rec) = head_on_hit(material.clone());

        for _ in 0..200 {
            let scatter = material.scatter(&ray, &rec).unwrap();
            assert_eq!(scatter.attenuation, Vec3A::new(0.8, 0.5, 0.3));
            assert!(scatter.attenuation.max_element() <= 1.0);
            assert!((scatter.ray.direction.length() - 1.0).abs() < 1e-5);
            assert_eq!(scatter.ray.origin, rec.p);
        }
    }

    #[test]
    fn matte_texture_modulates_the_color_scale() {
        random::reseed(2);
        let texture = Arc::new(Texture::solid(Vec3A::new(0.4, 0.6, 0.8)));
        let material = Arc::new(Material::Matte {
            color_scale: Vec3A::splat(0.5),
            color_texture: Some(texture),
        });
        let (ray, rec) = head_on_hit(material.clone());

        let scatter = material.scatter(&ray, &rec).unwrap();
        assert!((scatter.attenuation - Vec3A::new(0.2, 0.3, 0.4)).length() < 1e-6);
    }

    #[test]
    fn mirror_metal_reflects_head_on_rays_straight_back() {
        random::reseed(3);
        let material = Arc::new(Material::metal(Vec3A::ONE, 0.0));
        let (ray, rec) = head_on_hit(material.clone());

        let scatter = material.scatter(&ray, &rec).unwrap();
        assert!((scatter.ray.direction - Vec3A::new(0.0, 0.0, 1.0)).length() < 1e-4);
        assert_eq!(scatter.attenuation, Vec3A::ONE);
    }

    #[test]
    fn metal_scatter_stays_above_the_surface() {
        random::reseed(4);
        let material = Arc::new(Material::metal(Vec3A::splat(0.9), 1.0));
        let (ray, rec) = head_on_hit(material.clone());

        for _ in 0..500 {
            if let Some(scatter) = material.scatter(&ray, &rec) {
                assert!(scatter.ray.direction.dot(rec.normal) > 0.0);
            }
        }
    }

    #[test]
    fn roughness_texture_scales_roughness_by_its_red_channel() {
        random::reseed(5);
        // Red channel 0 keeps the metal a perfect mirror whatever the scale
        let texture = Arc::new(Texture::solid(Vec3A::new(0.0, 1.0, 1.0)));
        let material = Arc::new(Material::Metal {
            color_scale: Vec3A::ONE,
            color_texture: None,
            roughness_scale: 1.0,
            roughness_texture: Some(texture),
        });
        let (ray, rec) = head_on_hit(material.clone());

        let scatter = material.scatter(&ray, &rec).unwrap();
        assert!((scatter.ray.direction - Vec3A::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn emissive_absorbs_and_emits() {
        let material = Arc::new(Material::emissive(Vec3A::new(10.0, 10.0, 10.0)));
        let (ray, rec) = head_on_hit(material.clone());

        assert!(material.scatter(&ray, &rec).is_none());
        assert_eq!(material.emitted(0.5, 0.5), Vec3A::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn emissive_texture_drives_the_emission() {
        let texture = Arc::new(Texture::solid(Vec3A::new(2.0, 0.0, 0.0)));
        let material = Material::Emissive {
            emission_scale: Vec3A::splat(3.0),
            emission_texture: Some(texture),
        };
        assert!((material.emitted(0.0, 0.0) - Vec3A::new(6.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn matte_and_metal_emit_nothing() {
        assert_eq!(Material::matte(Vec3A::ONE).emitted(0.0, 0.0), Vec3A::ZERO);
        assert_eq!(
            Material::metal(Vec3A::ONE, 0.5).emitted(0.0, 0.0),
            Vec3A::ZERO
        );
    }
}
