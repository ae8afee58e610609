//! Image preprocessing for disease detection
//!
//! Uploads are resized to the training resolution and scaled to [0, 1] in
//! HWC pixel order, reproducing the training-time image loader exactly:
//! the resolution, the nearest-neighbor resampling, and the channel layout
//! are all part of the model contract.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage};

use super::ModelError;

/// Side length the disease model was trained on.
pub const DISEASE_IMAGE_SIZE: u32 = 225;

/// Resize and normalize an image into a flat HWC pixel tensor.
pub fn preprocess(image: &DynamicImage) -> Vec<f64> {
    let resized = image.resize_exact(DISEASE_IMAGE_SIZE, DISEASE_IMAGE_SIZE, FilterType::Nearest);
    let rgb = resized.to_rgb8();

    rgb.pixels()
        .flat_map(|pixel| pixel.0.iter().map(|&channel| channel as f64 / 255.0))
        .collect()
}

/// Load an image from disk and preprocess it.
pub fn load_and_preprocess(path: &Path) -> Result<Vec<f64>, ModelError> {
    let image = image::open(path).map_err(|e| ModelError::Image(e.to_string()))?;
    Ok(preprocess(&image))
}
