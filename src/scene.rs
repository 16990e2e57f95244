//! Scene container and closest-hit query.
//!
//! A scene owns its primitives and is immutable during rendering, so render
//! workers can share it by reference.

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::ray::Ray;

/// Collection of primitives forming a scene.
///
/// Uses a linear scan for intersection testing and supports polymorphic
/// primitives through `Box<dyn Hittable>`.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Number of primitives in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Find the closest intersection along the ray inside the interval.
    ///
    /// Each accepted hit lowers the interval maximum so farther primitives
    /// are pruned early.
    pub fn closest_hit(&self, ray: &Ray, interval: Interval) -> Option<HitRecord> {
        let mut closest_so_far = interval.max;
        let mut closest_hit = None;

        for object in &self.objects {
            if let Some(hit) = object.hit(ray, Interval::new(interval.min, closest_so_far)) {
                closest_so_far = hit.t;
                closest_hit = Some(hit);
            }
        }

        closest_hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use glam::Vec3A;
    use std::sync::Arc;

    #[test]
    fn empty_scene_has_no_hits() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert!(scene
            .closest_hit(&ray, Interval::new(0.001, f32::INFINITY))
            .is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn closest_primitive_wins() {
        let material = Arc::new(Material::matte(Vec3A::ONE));
        let mut scene = Scene::new();
        scene.add(Box::new(
            Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 0.5, material.clone()).unwrap(),
        ));
        scene.add(Box::new(
            Sphere::new(Vec3A::new(0.0, 0.0, -2.0), 0.5, material).unwrap(),
        ));
        assert_eq!(scene.len(), 2);

        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = scene
            .closest_hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();
        assert!((rec.t - 1.5).abs() < 1e-4);
    }
}
