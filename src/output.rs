//! Image output.
//!
//! The render core produces a tightly packed 8-bit RGB buffer; encoding it
//! to PNG is delegated to the `image` crate here.

use image::RgbImage;
use log::{info, warn};

/// Save an 8-bit RGB buffer as a PNG file.
///
/// `data` must hold `width * height` tightly packed RGB triplets with
/// row 0 at the top, as produced by the camera. Returns whether the file
/// was written; failures are logged rather than panicking.
pub fn save_image_as_png(output_path: &str, resolution: (u32, u32), data: &[u8]) -> bool {
    let (width, height) = resolution;
    let Some(image) = RgbImage::from_raw(width, height, data.to_vec()) else {
        warn!(
            "Image buffer size {} does not match {}x{} RGB",
            data.len(),
            width,
            height
        );
        return false;
    };

    match image.save(output_path) {
        Ok(_) => {
            info!("Image saved as {}", output_path);
            true
        }
        Err(e) => {
            warn!("Failed to save image: {}", e);
            false
        }
    }
}
