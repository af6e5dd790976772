//! ReceiptRenderer builder: bytes in, print job out.

use image::DynamicImage;

use super::decode::decode_image;
use super::{RasterError, RasterResult};
use crate::escpos::{encode, PrintJob};
use crate::output::MonoRaster;
use crate::preprocess::{Preprocessor, TargetSpec};

/// High-level entry point: decode, render and encode in one call.
///
/// Configuration methods consume and return `self`; the render methods take
/// `&self` so one renderer can be shared across jobs.
///
/// # Example
///
/// ```
/// use escpos_raster::{ReceiptRenderer, TargetSpec};
/// use image::{DynamicImage, Rgb, RgbImage};
///
/// let renderer = ReceiptRenderer::new().target(TargetSpec::RECEIPT_58MM);
/// let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(384, 10, Rgb([0, 0, 0])));
/// let job = renderer.render_job(&source).unwrap();
///
/// assert_eq!(job.dimensions(), (48, 10));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiptRenderer {
    target: TargetSpec,
}

impl ReceiptRenderer {
    /// Renderer for the default 80 mm head.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn target(mut self, target: TargetSpec) -> Self {
        self.target = target;
        self
    }

    /// Set the head width in dots.
    ///
    /// # Errors
    ///
    /// [`RasterError::InvalidTarget`] for a zero width.
    pub fn width(self, device_width_px: u32) -> RasterResult<Self> {
        Ok(self.target(TargetSpec::new(device_width_px)?))
    }

    #[inline]
    pub fn target_spec(&self) -> TargetSpec {
        self.target
    }

    /// Preprocess and dither a decoded image.
    pub fn render(&self, source: &DynamicImage) -> RasterResult<MonoRaster> {
        Preprocessor::new(self.target).render(source)
    }

    /// Render and frame a decoded image.
    pub fn render_job(&self, source: &DynamicImage) -> RasterResult<PrintJob> {
        encode(&self.render(source)?)
    }

    /// Decode, render and frame encoded image bytes.
    pub fn render_bytes(&self, bytes: &[u8]) -> RasterResult<PrintJob> {
        self.render_job(&decode_image(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Luma, GrayImage};
    use std::io::Cursor;

    #[test]
    fn test_default_target_is_80mm() {
        assert_eq!(ReceiptRenderer::new().target_spec(), TargetSpec::RECEIPT_80MM);
    }

    #[test]
    fn test_zero_width_rejected() {
        assert_eq!(
            ReceiptRenderer::new().width(0).unwrap_err(),
            RasterError::InvalidTarget(0)
        );
    }

    #[test]
    fn test_render_bytes_from_png() {
        let mut buf = Cursor::new(Vec::new());
        GrayImage::from_pixel(64, 32, Luma([0]))
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();

        let job = ReceiptRenderer::new()
            .width(32)
            .unwrap()
            .render_bytes(buf.get_ref())
            .unwrap();

        assert_eq!(job.dimensions(), (4, 16));
        assert!(job.payload().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_render_bytes_rejects_garbage() {
        let err = ReceiptRenderer::new().render_bytes(b"GIF89a?").unwrap_err();
        assert!(matches!(err, RasterError::InvalidImage(_)));
    }
}
