//! Random number generation for path tracing.
//!
//! Provides thread-local random number generation with the ChaCha20 PRNG.
//! Each render worker owns its generator exclusively; [`reseed`] gives a
//! worker a deterministic stream derived from the render's master seed.

use glam::{Vec2, Vec3A};
use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;

thread_local! {
    /// Thread-local ChaCha20 PRNG for quality random numbers.
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_rng(&mut rng()));
}

/// Replace the calling thread's generator with one seeded from `seed`.
///
/// Render workers call this at the start of their row band so that the
/// sample stream for a band depends only on the master seed and the band
/// index, never on which OS thread picked the band up.
pub fn reseed(seed: u64) {
    RNG.with(|rng| *rng.borrow_mut() = ChaCha20Rng::seed_from_u64(seed));
}

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32() -> f32 {
    RNG.with(|rng| rng.borrow_mut().random())
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range(min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32()
}

/// Generate a random Vec2 with both components in [min, max)
pub fn random_vec2_range(min: f32, max: f32) -> Vec2 {
    let v: Vec2 = RNG.with(|rng| rng.borrow_mut().random());
    Vec2::splat(min) + Vec2::splat(max - min) * v
}

/// Generate a random Vec3A with components in [min, max)
pub fn random_vec3_range(min: f32, max: f32) -> Vec3A {
    let v: Vec3A = RNG.with(|rng| rng.borrow_mut().random());
    Vec3A::splat(min) + Vec3A::splat(max - min) * v
}

/// Generate a random unit vector uniformly distributed on the unit sphere.
///
/// Rejection sampling: draw candidates in the unit cube, retry until one
/// lands strictly inside the unit ball and far enough from the origin that
/// normalizing it is numerically safe.
pub fn random_unit_vector() -> Vec3A {
    loop {
        let v = random_vec3_range(-1.0, 1.0);
        let lensq = v.length_squared();
        if lensq <= 1.0 && lensq > 1e-6 {
            return v / lensq.sqrt();
        }
    }
}

/// Generate a random point inside the unit disk using rejection sampling.
///
/// The point lies in the z = 0 plane with x^2 + y^2 < 1.
pub fn random_in_unit_disk() -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_f32_range(-1.0, 1.0),
            random_f32_range(-1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
