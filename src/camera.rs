//! Camera for ray generation and scene rendering.
//!
//! Uses a pinhole camera model with a physical sensor: the imaging surface
//! sits `focal_length` millimeters in front of the lens center and spans
//! `sensor_size` millimeters, which together control the field of view.
//! Capture distributes image rows across worker threads and supersamples
//! each pixel with jittered rays.

use glam::{Vec2, Vec3A};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::ops::Range;
use thiserror::Error;

use crate::random;
use crate::ray::Ray;
use crate::renderer::{Background, Renderer};
use crate::scene::Scene;

/// World up direction used to anchor the camera basis.
const WORLD_UP: Vec3A = Vec3A::Y;

/// Errors raised when constructing a camera from an invalid configuration.
#[derive(Error, Debug)]
pub enum CameraError {
    /// One of the image resolution components was zero.
    #[error("image resolution must be positive, got {width}x{height}")]
    InvalidResolution {
        /// Requested image width in pixels.
        width: u32,
        /// Requested image height in pixels.
        height: u32,
    },

    /// One of the sensor dimensions was zero or negative.
    #[error("sensor size must be positive, got {width}x{height} mm")]
    InvalidSensorSize {
        /// Requested sensor width in mm.
        width: f32,
        /// Requested sensor height in mm.
        height: f32,
    },

    /// The focal length was zero or negative.
    #[error("focal length must be positive, got {0} mm")]
    InvalidFocalLength(f32),

    /// The sample count was zero.
    #[error("samples per pixel must be at least 1")]
    InvalidSampleCount,

    /// The recursion depth was zero.
    #[error("max depth must be at least 1")]
    InvalidMaxDepth,

    /// The view direction is undefined or parallel to the world up axis.
    #[error("look direction is degenerate (zero or parallel to world up)")]
    DegenerateLookDirection,
}

/// Configuration for a [`Camera`].
///
/// Defaults match a 640x480 image shot on a full-frame 36x24 mm sensor
/// with an 18 mm wide-angle lens.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Camera position (lens center) in world space.
    pub position: Vec3A,
    /// Point the camera looks at.
    pub look_at: Vec3A,
    /// Output image resolution in pixels (width, height).
    pub image_resolution: (u32, u32),
    /// Sensor dimensions in mm (width, height).
    pub sensor_size: (f32, f32),
    /// Focal length in mm.
    pub focal_length: f32,
    /// Number of jittered samples per pixel.
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces.
    pub max_depth: u32,
    /// Radiance model for rays that leave the scene.
    pub background: Background,
    /// Master seed; worker band `i` renders with stream `seed + i`.
    pub seed: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3A::ZERO,
            look_at: Vec3A::new(0.0, 0.0, -1.0),
            image_resolution: (640, 480),
            sensor_size: (36.0, 24.0),
            focal_length: 18.0,
            samples_per_pixel: 64,
            max_depth: 10,
            background: Background::Sky,
            seed: 0,
        }
    }
}

/// Pinhole camera with a precomputed basis and owned output buffer.
///
/// The output buffer is 8-bit RGB, row-major with row 0 at the top,
/// tightly packed with stride `width * 3`.
pub struct Camera {
    position: Vec3A,
    image_width: u32,
    image_height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    seed: u64,
    renderer: Renderer,

    /// Sensor width vector: camera right scaled by the sensor width.
    sensor_u: Vec3A,
    /// Sensor height vector: camera up scaled by the sensor height.
    sensor_v: Vec3A,
    /// World position of the imaging surface's top-left corner.
    top_left_corner: Vec3A,

    image: Vec<u8>,
}

impl Camera {
    /// Build a camera, validating the configuration.
    ///
    /// Computes the orthonormal basis (right, up, forward) and the imaging
    /// surface once; both are fixed for the camera's lifetime.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let (width, height) = config.image_resolution;
        if width == 0 || height == 0 {
            return Err(CameraError::InvalidResolution { width, height });
        }
        let (sensor_width, sensor_height) = config.sensor_size;
        if sensor_width <= 0.0 || sensor_height <= 0.0 {
            return Err(CameraError::InvalidSensorSize {
                width: sensor_width,
                height: sensor_height,
            });
        }
        if config.focal_length <= 0.0 {
            return Err(CameraError::InvalidFocalLength(config.focal_length));
        }
        if config.samples_per_pixel == 0 {
            return Err(CameraError::InvalidSampleCount);
        }
        if config.max_depth == 0 {
            return Err(CameraError::InvalidMaxDepth);
        }

        // Orthonormal camera frame; crossing with the right vector keeps
        // up perpendicular to forward even when world up is not.
        let view = config.look_at - config.position;
        if view.length_squared() < 1e-12 {
            return Err(CameraError::DegenerateLookDirection);
        }
        let forward = view.normalize();
        let right = forward.cross(WORLD_UP);
        if right.length_squared() < 1e-12 {
            return Err(CameraError::DegenerateLookDirection);
        }
        let right = right.normalize();
        let up = right.cross(forward);

        // Imaging surface centered focal_length in front of the lens
        let image_center = config.position + config.focal_length * forward;
        let sensor_u = right * sensor_width;
        let sensor_v = up * sensor_height;
        let top_left_corner = image_center - sensor_u * 0.5 + sensor_v * 0.5;

        Ok(Self {
            position: config.position,
            image_width: width,
            image_height: height,
            samples_per_pixel: config.samples_per_pixel,
            max_depth: config.max_depth,
            seed: config.seed,
            renderer: Renderer::new(config.background),
            sensor_u,
            sensor_v,
            top_left_corner,
            image: Vec::new(),
        })
    }

    /// Output resolution in pixels (width, height).
    pub fn resolution(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// The rendered image bytes; empty before the first [`Camera::capture`].
    pub fn image_data(&self) -> &[u8] {
        &self.image
    }

    /// Render the scene into the camera's image buffer.
    ///
    /// The row range is partitioned into one band per worker thread (the
    /// last band absorbs the remainder) and each band renders into its own
    /// disjoint slice of the output buffer, so no synchronization is needed.
    /// Every band reseeds its thread-local generator from the master seed
    /// and the band index, which makes the output deterministic for a
    /// fixed seed and thread count.
    pub fn capture(&mut self, scene: &Scene) {
        let width = self.image_width as usize;
        let mut buffer = vec![0u8; width * self.image_height as usize * 3];

        let band_count = (rayon::current_num_threads() as u32).clamp(1, self.image_height);
        let rows_per_band = self.image_height / band_count;

        info!(
            "Rendering {}x{} at {} spp across {} bands...",
            self.image_width, self.image_height, self.samples_per_pixel, band_count
        );
        let generation_start = std::time::Instant::now();
        let progress = ProgressBar::new(self.image_height as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        // Carve the buffer into disjoint row bands
        let mut bands = Vec::with_capacity(band_count as usize);
        let mut rest = buffer.as_mut_slice();
        for index in 0..band_count {
            let row_start = index * rows_per_band;
            let row_end = if index + 1 == band_count {
                self.image_height
            } else {
                row_start + rows_per_band
            };
            let band_bytes = (row_end - row_start) as usize * width * 3;
            let (band, tail) = std::mem::take(&mut rest).split_at_mut(band_bytes);
            bands.push((index, row_start..row_end, band));
            rest = tail;
        }

        let camera = &*self;
        bands.into_par_iter().for_each(|(index, rows, band)| {
            random::reseed(camera.seed.wrapping_add(index as u64));
            camera.render_band(scene, rows, band, &progress);
        });

        progress.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        self.image = buffer;
    }

    /// Apply gamma correction in place over the captured image.
    ///
    /// Each byte is normalized, raised to `1 / gamma` and requantized.
    /// A gamma of 0 leaves the image untouched.
    pub fn apply_gamma(&mut self, gamma: f32) {
        if gamma == 0.0 {
            return;
        }
        let exponent = 1.0 / gamma;
        for byte in &mut self.image {
            let linear = *byte as f32 / 255.0;
            *byte = (linear.powf(exponent) * 255.999).clamp(0.0, 255.0) as u8;
        }
    }

    /// Render all pixels of one row band into its buffer slice.
    fn render_band(&self, scene: &Scene, rows: Range<u32>, band: &mut [u8], progress: &ProgressBar) {
        let width = self.image_width as usize;
        let sample_scale = 1.0 / self.samples_per_pixel as f32;

        for y in rows.clone() {
            for x in 0..self.image_width {
                let mut color = Vec3A::ZERO;
                for _ in 0..self.samples_per_pixel {
                    let offset = random::random_vec2_range(-0.5, 0.5);
                    let ray = self.generate_ray(x, y, offset);
                    color += self.renderer.radiance(&ray, scene, self.max_depth);
                }
                color *= sample_scale;

                let index = ((y - rows.start) as usize * width + x as usize) * 3;
                band[index] = quantize(color.x);
                band[index + 1] = quantize(color.y);
                band[index + 2] = quantize(color.z);
            }
            progress.inc(1);
        }
    }

    /// Generate a ray through pixel (x, y) with a jitter offset in
    /// [-0.5, 0.5] on both axes.
    fn generate_ray(&self, x: u32, y: u32, offset: Vec2) -> Ray {
        // Pixel center plus jitter, normalized to [0, 1] screen space
        let u = (x as f32 + 0.5 + offset.x) / self.image_width as f32;
        let v = (y as f32 + 0.5 + offset.y) / self.image_height as f32;
        // Walk the imaging surface right and down from the top-left corner
        let image_point = self.top_left_corner + u * self.sensor_u - v * self.sensor_v;
        Ray::new(self.position, image_point - self.position)
    }
}

/// Map a [0, 1] color channel to a byte.
fn quantize(c: f32) -> u8 {
    (c * 255.999).clamp(0.0, 255.0) as u8
}
