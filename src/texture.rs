//! 2D textures for materials.
//!
//! A texture is either a constant linear color or an 8-bit sRGB image
//! sampled by (u, v) coordinates. Image pixels are converted to linear
//! space at sample time; decoding files is delegated to the `image` crate.

use glam::Vec3A;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while constructing a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    /// The underlying image file could not be opened or decoded.
    #[error("failed to decode texture image: {0}")]
    Decode(#[from] image::ImageError),

    /// Raw pixel data does not match the declared dimensions.
    #[error("invalid texture data: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidDimensions {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Byte count implied by the dimensions (width * height * 3).
        expected: usize,
        /// Byte count actually provided.
        actual: usize,
    },
}

/// 2D texture sampled by (u, v) coordinates in [0, 1].
#[derive(Debug, Clone)]
pub enum Texture {
    /// Constant linear color, identical at every (u, v).
    Solid {
        /// The color returned by every sample.
        color: Vec3A,
    },
    /// 8-bit sRGB pixel grid, row 0 at the top of the image.
    Image {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Tightly packed RGB triplets, row-major.
        pixels: Vec<u8>,
    },
}

impl Texture {
    /// Create a solid color texture.
    ///
    /// The triplet is stored as-is in linear space; no transfer curve is
    /// applied to color constants.
    pub fn solid(color: Vec3A) -> Self {
        Self::Solid { color }
    }

    /// Load an image texture from a file on disk.
    ///
    /// Any format the `image` crate understands is accepted; pixels are
    /// converted to 8-bit RGB and kept in sRGB space until sampled.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let decoded = image::open(path)?.to_rgb8();
        let (width, height) = decoded.dimensions();
        Ok(Self::Image {
            width,
            height,
            pixels: decoded.into_raw(),
        })
    }

    /// Create an image texture from raw 8-bit sRGB data.
    ///
    /// `pixels` must hold exactly `width * height` tightly packed RGB
    /// triplets with row 0 at the top.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 3;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(TextureError::InvalidDimensions {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::Image {
            width,
            height,
            pixels,
        })
    }

    /// Sample the texture at (u, v), returning a linear RGB color.
    ///
    /// Coordinates wrap on both axes. For image textures v is flipped so
    /// that v = 0 addresses the bottom of the image, and each channel goes
    /// through the sRGB decoding curve.
    pub fn sample(&self, u: f32, v: f32) -> Vec3A {
        match self {
            Self::Solid { color } => *color,
            Self::Image {
                width,
                height,
                pixels,
            } => {
                // Wrap coordinates to [0, 1], flip v so row 0 stays on top
                let u = u - u.floor();
                let v = 1.0 - (v - v.floor());

                let x = ((u * *width as f32) as u32).min(width - 1);
                let y = ((v * *height as f32) as u32).min(height - 1);

                let index = ((y * width + x) * 3) as usize;
                let r = pixels[index] as f32 / 255.0;
                let g = pixels[index + 1] as f32 / 255.0;
                let b = pixels[index + 2] as f32 / 255.0;
                Vec3A::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
            }
        }
    }
}

/// Decode one sRGB channel to linear space.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
