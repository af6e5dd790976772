//! Core preprocessing logic.
//!
//! The [`Preprocessor`] takes a decoded color image to a grayscale image at
//! print-head width, and [`Preprocessor::render`] finishes the job with
//! Floyd-Steinberg dithering.
//!
//! # Processing Pipeline
//!
//! 1. **Flatten alpha** over white paper
//! 2. **Resize** to the head width (Lanczos3, aspect preserved)
//! 3. **Unsharp mask** (sigma 1.5, 150%, threshold 3)
//! 4. **Sharpness** blend (1.5)
//! 5. **Brightness** (x1.4)
//! 6. **Contrast** (x1.8 around 128)
//! 7. **Grayscale** (BT.601 luma)
//! 8. **Dither** (Floyd-Steinberg, row-major)
//!
//! Every stage consumes the previous stage's output. The pipeline is a pure
//! function of its input: no I/O, no shared state.

use image::{DynamicImage, GrayImage};
use tracing::{debug, trace};

use super::enhance::{enhance_brightness, enhance_contrast};
use super::grayscale::{flatten_alpha, to_luma};
use super::params::{
    BRIGHTNESS, CONTRAST, CONTRAST_MIDPOINT, SHARPNESS, UNSHARP_AMOUNT, UNSHARP_RADIUS,
    UNSHARP_THRESHOLD,
};
use super::resize::{resize_to_width, target_height};
use super::sharpen::{enhance_sharpness, unsharp_mask};
use super::TargetSpec;
use crate::api::{RasterError, RasterResult};
use crate::dither::floyd_steinberg;
use crate::escpos::commands::MAX_DIMENSION;
use crate::output::MonoRaster;

/// Image preprocessor bound to one print head.
///
/// `Preprocessor` is `Copy`, holds no buffers between calls, and can be
/// shared freely across threads.
///
/// # Example
///
/// ```
/// use escpos_raster::{Preprocessor, TargetSpec};
/// use image::{DynamicImage, RgbImage, Rgb};
///
/// let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 10, Rgb([0, 0, 0])));
/// let raster = Preprocessor::new(TargetSpec::new(16).unwrap())
///     .render(&source)
///     .unwrap();
///
/// assert_eq!((raster.width(), raster.height()), (16, 8));
/// assert_eq!(raster.printed_count(), 16 * 8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Preprocessor {
    target: TargetSpec,
}

impl Preprocessor {
    #[inline]
    pub fn new(target: TargetSpec) -> Self {
        Self { target }
    }

    #[inline]
    pub fn target(&self) -> TargetSpec {
        self.target
    }

    /// Run every stage up to and including grayscale conversion.
    ///
    /// # Errors
    ///
    /// - [`RasterError::InvalidTarget`] if the target width is zero
    /// - [`RasterError::InvalidImage`] if the source has a zero dimension or
    ///   would scale to zero rows
    /// - [`RasterError::RasterTooLarge`] if the scaled raster cannot be framed
    ///   as `GS v 0`; checked before any pixel buffer is allocated
    pub fn process(&self, source: &DynamicImage) -> RasterResult<GrayImage> {
        self.target.validate()?;
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidImage(format!(
                "zero dimension {width}x{height}"
            )));
        }

        let out_height = target_height(width, height, self.target.device_width_px)?;
        let width_bytes = self.target.width_bytes();
        if width_bytes > MAX_DIMENSION || out_height > MAX_DIMENSION {
            return Err(RasterError::RasterTooLarge {
                width_bytes,
                height: out_height,
            });
        }

        debug!(
            width,
            height,
            target_width = self.target.device_width_px,
            "Preprocessing image"
        );

        let rgb = flatten_alpha(&source.to_rgba8());
        let rgb = resize_to_width(&rgb, self.target.device_width_px)?;
        trace!(width = rgb.width(), height = rgb.height(), "Resized");

        let rgb = unsharp_mask(&rgb, UNSHARP_RADIUS, UNSHARP_AMOUNT, UNSHARP_THRESHOLD);
        let rgb = enhance_sharpness(&rgb, SHARPNESS);
        trace!("Sharpened");

        let rgb = enhance_brightness(&rgb, BRIGHTNESS);
        let rgb = enhance_contrast(&rgb, CONTRAST, CONTRAST_MIDPOINT);
        trace!("Tone adjusted");

        Ok(to_luma(&rgb))
    }

    /// Preprocess and dither to a 1-bit raster.
    pub fn render(&self, source: &DynamicImage) -> RasterResult<MonoRaster> {
        let gray = self.process(source)?;
        let raster = floyd_steinberg(&gray);
        debug!(
            width = raster.width(),
            height = raster.height(),
            density = raster.density(),
            "Rendered raster"
        );
        Ok(raster)
    }
}

/// Render a source image for the given print head.
///
/// Shorthand for `Preprocessor::new(spec).render(source)`.
pub fn render(source: &DynamicImage, spec: TargetSpec) -> RasterResult<MonoRaster> {
    Preprocessor::new(spec).render(source)
}
