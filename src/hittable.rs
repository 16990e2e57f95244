//! Ray-object intersection system.
//!
//! Defines the [`Hittable`] trait for geometric primitives and [`HitRecord`]
//! for storing intersection data used by shading.

use glam::Vec3A;
use std::sync::Arc;
use thiserror::Error;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Errors raised when constructing a primitive with invalid geometry.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// Sphere radius was zero or negative.
    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    /// Plane width or height was zero or negative.
    #[error("plane extent must be positive, got {width}x{height}")]
    NonPositiveExtent {
        /// Requested plane width.
        width: f32,
        /// Requested plane height.
        height: f32,
    },

    /// Plane orientation vector had (near) zero length.
    #[error("plane normal must be a non-zero vector")]
    ZeroNormal,
}

/// Ray-object intersection information.
///
/// Contains the intersection point, oriented surface normal, ray parameter,
/// texture coordinates and a handle to the hit object's material.
#[derive(Debug, Clone)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Unit surface normal at the intersection, oriented against the ray
    pub normal: Vec3A,
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Horizontal texture coordinate in [0, 1]
    pub u: f32,
    /// Vertical texture coordinate in [0, 1]
    pub v: f32,
    /// True if the ray came from outside the object
    pub outside: bool,
    /// Material of the object at the hit point
    pub material: Arc<Material>,
}

impl HitRecord {
    /// Build a record from an outward geometric normal.
    ///
    /// Determines the side the ray came from and flips the stored normal
    /// when the geometric normal faces away from it, so that
    /// `dot(ray.direction, normal) <= 0` always holds.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3A,
        u: f32,
        v: f32,
        material: Arc<Material>,
    ) -> Self {
        let outside = ray.direction.dot(outward_normal) < 0.0;
        Self {
            p: ray.at(t),
            normal: if outside {
                outward_normal
            } else {
                -outward_normal
            },
            t,
            u,
            v,
            outside,
            material,
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Core abstraction for geometric primitives. Must be thread-safe
/// (Sync + Send) so the scene can be shared across render workers.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection within the given parameter range.
    ///
    /// Returns the intersection record of the closest accepted hit, or
    /// `None` when the ray misses.
    fn hit(&self, ray: &Ray, interval: Interval) -> Option<HitRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;

    fn white_matte() -> Arc<Material> {
        Arc::new(Material::matte(Vec3A::ONE))
    }

    #[test]
    fn record_keeps_the_normal_when_ray_is_outside() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = HitRecord::new(&ray, 1.0, Vec3A::new(0.0, 0.0, 1.0), 0.0, 0.0, white_matte());
        assert!(rec.outside);
        assert_eq!(rec.normal, Vec3A::new(0.0, 0.0, 1.0));
        assert!(ray.direction.dot(rec.normal) <= 0.0);
    }

    #[test]
    fn record_flips_the_normal_when_ray_is_inside() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = HitRecord::new(
            &ray,
            1.0,
            Vec3A::new(0.0, 0.0, -1.0),
            0.0,
            0.0,
            white_matte(),
        );
        assert!(!rec.outside);
        assert_eq!(rec.normal, Vec3A::new(0.0, 0.0, 1.0));
        assert!(ray.direction.dot(rec.normal) <= 0.0);
    }
}
