//! Input decoding and downscaling.

use crate::error::{Error, Result};
use image::imageops::{resize, FilterType};
use image::RgbImage;
use log::{debug, info};
use std::path::Path;

/// Decodes any format the `image` crate supports and converts it to RGB8.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path)?.to_rgb8();
    info!(
        "loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Dimensions after shrinking so that the longest side is at most `max_side`.
///
/// Images already within bounds, and `max_side == 0`, keep their size. Scaled sides are
/// truncated, not rounded.
pub fn fitted_size(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height);
    if max_side == 0 || longest <= max_side {
        return (width, height);
    }
    let ratio = max_side as f64 / longest as f64;
    (
        (width as f64 * ratio) as u32,
        (height as f64 * ratio) as u32,
    )
}

/// Shrinks `img` with a Lanczos3 filter so its longest side is at most `max_side`.
pub fn fit_to_max_side(img: &RgbImage, max_side: u32) -> Result<RgbImage> {
    let (width, height) = fitted_size(img.width(), img.height(), max_side);
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    if (width, height) == img.dimensions() {
        return Ok(img.clone());
    }
    debug!(
        "resizing {}x{} to {width}x{height}",
        img.width(),
        img.height()
    );
    Ok(resize(img, width, height, FilterType::Lanczos3))
}
