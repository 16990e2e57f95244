//! Sphere primitive for path tracing.
//!
//! Implements ray-sphere intersection by solving the quadratic that results
//! from substituting the ray equation into the sphere equation.

use glam::Vec3A;
use std::f32::consts::PI;
use std::sync::Arc;

use crate::hittable::{GeometryError, HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Discriminant tolerance below which the ray is treated as missing.
const DISCRIMINANT_EPSILON: f32 = 1e-6;

/// Sphere primitive defined by center, radius and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,
    /// Radius of the sphere, always positive.
    pub radius: f32,
    /// Material properties determining light interaction.
    pub material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails when the radius is zero or negative.
    pub fn new(
        center: Vec3A,
        radius: f32,
        material: Arc<Material>,
    ) -> Result<Self, GeometryError> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }

    /// Outward unit normal for a point on the sphere surface.
    pub fn normal_at(&self, p: Vec3A) -> Vec3A {
        (p - self.center) / self.radius
    }

    /// Spherical texture coordinates for a point on the sphere surface.
    ///
    /// Longitude maps to u, latitude to v, with v = 0 at the south pole.
    pub fn uv_at(&self, p: Vec3A) -> (f32, f32) {
        let p_local = (p - self.center) / self.radius;
        let theta = p_local.z.atan2(p_local.x);
        let phi = (-p_local.y).clamp(-1.0, 1.0).acos();
        ((theta + PI) / (2.0 * PI), phi / PI)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, interval: Interval) -> Option<HitRecord> {
        let oc = ray.origin - self.center;

        // Coefficients of the quadratic a*t^2 + b*t + c = 0
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < DISCRIMINANT_EPSILON {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let den = 2.0 * a;

        // Try the nearest root first, then the farther one
        let mut root = (-b - sqrtd) / den;
        if !interval.surrounds(root) {
            root = (-b + sqrtd) / den;
            if !interval.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = self.normal_at(p);
        let (u, v) = self.uv_at(p);
        Some(HitRecord::new(
            ray,
            root,
            outward_normal,
            u,
            v,
            self.material.clone(),
        ))
    }
}
