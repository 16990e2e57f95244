//! Lumipath path tracer
//!
//! CPU Monte Carlo path tracing over spheres and finite planes with a
//! three-kind material family (matte, metal, emissive), optional image
//! textures, and a pinhole camera that renders row bands in parallel.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod plane;
pub mod random;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod sphere;
pub mod texture;
