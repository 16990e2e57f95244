//! Finite plane primitive for path tracing.
//!
//! A plane is characterized by a center point, an orientation normal and a
//! finite rectangular extent. Intersections outside the extent are rejected,
//! and texture coordinates are the hit point projected onto a stable
//! tangent basis, normalized to [0, 1].

use glam::Vec3A;
use std::sync::Arc;

use crate::hittable::{GeometryError, HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Denominator threshold below which the ray counts as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Finite rectangular plane defined by center, normal, extent and material.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Center of the rectangle in world coordinates.
    pub center: Vec3A,
    /// Unit orientation normal of the plane.
    pub normal: Vec3A,
    /// Extent along the tangent direction.
    pub width: f32,
    /// Extent along the bitangent direction.
    pub height: f32,
    /// Material properties determining light interaction.
    pub material: Arc<Material>,
}

impl Plane {
    /// Create a new finite plane.
    ///
    /// The orientation is normalized here. Fails when the normal is (near)
    /// zero or the extent is not positive.
    pub fn new(
        center: Vec3A,
        normal: Vec3A,
        width: f32,
        height: f32,
        material: Arc<Material>,
    ) -> Result<Self, GeometryError> {
        if normal.length_squared() < PARALLEL_EPSILON {
            return Err(GeometryError::ZeroNormal);
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::NonPositiveExtent { width, height });
        }
        Ok(Self {
            center,
            normal: normal.normalize(),
            width,
            height,
            material,
        })
    }

    /// Outward unit normal, identical at every point of the plane.
    pub fn normal_at(&self, _p: Vec3A) -> Vec3A {
        self.normal
    }

    /// Texture coordinates for a point on the plane, normalized so the
    /// rectangle covers [0, 1] on both axes.
    pub fn uv_at(&self, p: Vec3A) -> (f32, f32) {
        let (s_u, s_v) = self.local_coordinates(p);
        (s_u / self.width + 0.5, s_v / self.height + 0.5)
    }

    /// Stable tangent and bitangent for the plane's local coordinate system.
    ///
    /// The branch keeps the basis well-conditioned for any orientation,
    /// including exactly axis-aligned normals.
    fn tangent_basis(&self) -> (Vec3A, Vec3A) {
        let n = self.normal;
        let tangent = if n.x.abs() > n.y.abs() {
            Vec3A::new(n.z, 0.0, -n.x).normalize()
        } else {
            Vec3A::new(0.0, -n.z, n.y).normalize()
        };
        (tangent, n.cross(tangent))
    }

    /// Project a point onto the tangent basis, centered on the rectangle.
    fn local_coordinates(&self, p: Vec3A) -> (f32, f32) {
        let (tangent, bitangent) = self.tangent_basis();
        let local = p - self.center;
        (local.dot(tangent), local.dot(bitangent))
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, interval: Interval) -> Option<HitRecord> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            // Ray is parallel to the plane
            return None;
        }

        let t = (self.center - ray.origin).dot(self.normal) / denom;
        if !interval.surrounds(t) {
            return None;
        }

        // Project the hit point onto the plane's local coordinate system
        let (s_u, s_v) = self.local_coordinates(ray.at(t));

        // Reject hits outside the finite extent
        if s_u.abs() > self.width / 2.0 || s_v.abs() > self.height / 2.0 {
            return None;
        }

        let u = s_u / self.width + 0.5;
        let v = s_v / self.height + 0.5;
        Some(HitRecord::new(
            ray,
            t,
            self.normal,
            u,
            v,
            self.material.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_plane() -> Plane {
        Plane::new(
            Vec3A::ZERO,
            Vec3A::new(0.0, 1.0, 0.0),
            1.0,
            1.0,
            Arc::new(Material::matte(Vec3A::new(1.0, 0.0, 0.0))),
        )
        .unwrap()
    }

    #[test]
    fn construction_rejects_degenerate_planes() {
        let material = Arc::new(Material::matte(Vec3A::ONE));
        assert!(Plane::new(Vec3A::ZERO, Vec3A::ZERO, 1.0, 1.0, material.clone()).is_err());
        assert!(Plane::new(Vec3A::ZERO, Vec3A::Y, 0.0, 1.0, material.clone()).is_err());
        assert!(Plane::new(Vec3A::ZERO, Vec3A::Y, 1.0, -2.0, material).is_err());
    }

    #[test]
    fn center_ray_hits_with_centered_uv() {
        let plane = unit_plane();
        let ray = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));

        let rec = plane.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!((rec.u - 0.5).abs() < 1e-5);
        assert!((rec.v - 0.5).abs() < 1e-5);
        assert!(rec.outside);
        assert!((rec.normal - Vec3A::Y).length() < 1e-5);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn hits_outside_the_extent_are_rejected() {
        let plane = unit_plane();
        let ray = Ray::new(Vec3A::new(0.6, 1.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        assert!(plane.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());

        // Just inside the boundary still counts; for a +Y normal the
        // bitangent captures world X and the tangent captures world Z
        let ray = Ray::new(Vec3A::new(0.49, 1.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        let rec = plane.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.v - 0.99).abs() < 1e-4);
        assert!((rec.u - 0.5).abs() < 1e-4);

        let ray = Ray::new(Vec3A::new(0.0, 1.0, 0.49), Vec3A::new(0.0, -1.0, 0.0));
        let rec = plane.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.u - 0.99).abs() < 1e-4);
        assert!((rec.v - 0.5).abs() < 1e-4);
    }

    #[test]
    fn parallel_rays_miss() {
        let plane = unit_plane();
        let ray = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(1.0, 0.0, 0.0));
        assert!(plane.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn back_side_rays_get_a_flipped_normal() {
        let plane = unit_plane();
        let ray = Ray::new(Vec3A::new(0.0, -1.0, 0.0), Vec3A::new(0.0, 1.0, 0.0));

        let rec = plane.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!(!rec.outside);
        assert!((rec.normal - Vec3A::new(0.0, -1.0, 0.0)).length() < 1e-5);
        assert!(ray.direction.dot(rec.normal) <= 0.0);
    }

    #[test]
    fn tangent_basis_is_pinned_for_axis_normals() {
        let material = Arc::new(Material::matte(Vec3A::ONE));
        let cases = [
            (Vec3A::X, Vec3A::new(0.0, 0.0, -1.0), Vec3A::Y),
            (Vec3A::Y, Vec3A::Z, Vec3A::X),
            (Vec3A::Z, Vec3A::new(0.0, -1.0, 0.0), Vec3A::X),
        ];
        for (normal, expected_tangent, expected_bitangent) in cases {
            let plane = Plane::new(Vec3A::ZERO, normal, 1.0, 1.0, material.clone()).unwrap();
            let (tangent, bitangent) = plane.tangent_basis();
            assert!((tangent - expected_tangent).length() < 1e-6);
            assert!((bitangent - expected_bitangent).length() < 1e-6);
            assert!(tangent.dot(normal).abs() < 1e-6);
            assert!(bitangent.dot(normal).abs() < 1e-6);
        }
    }
}
