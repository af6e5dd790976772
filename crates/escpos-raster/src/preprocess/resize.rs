//! Aspect-preserving fit to the print head width.

use image::{imageops, RgbImage};
use tracing::debug;

use super::params::RESIZE_FILTER;
use crate::api::{RasterError, RasterResult};

/// Height after scaling `src_width x src_height` to `target_width`.
///
/// Computes `round(src_height * target_width / src_width)` in integer
/// arithmetic, rounding halves up.
pub fn target_height(src_width: u32, src_height: u32, target_width: u32) -> RasterResult<u32> {
    if src_width == 0 || src_height == 0 {
        return Err(RasterError::InvalidImage(format!(
            "zero dimension {src_width}x{src_height}"
        )));
    }
    let num = src_height as u64 * target_width as u64;
    let den = src_width as u64;
    let height = (2 * num + den) / (2 * den);
    if height == 0 {
        return Err(RasterError::InvalidImage(format!(
            "{src_width}x{src_height} scales to zero rows at width {target_width}"
        )));
    }
    u32::try_from(height).map_err(|_| {
        RasterError::InvalidImage(format!(
            "{src_width}x{src_height} scales to {height} rows at width {target_width}"
        ))
    })
}

/// Resize to `target_width` dots, keeping the aspect ratio (Lanczos3).
pub fn resize_to_width(img: &RgbImage, target_width: u32) -> RasterResult<RgbImage> {
    let (width, height) = img.dimensions();
    let new_height = target_height(width, height, target_width)?;

    if (width, height) == (target_width, new_height) {
        return Ok(img.clone());
    }

    debug!(
        from_width = width,
        from_height = height,
        to_width = target_width,
        to_height = new_height,
        "Resizing to head width"
    );
    Ok(imageops::resize(img, target_width, new_height, RESIZE_FILTER))
}
