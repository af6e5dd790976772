//! Image preprocessing for thermal printing.
//!
//! Thermal heads print pure black dots on white paper and bleed slightly, so
//! source images are pushed toward light, high-contrast, sharp grayscale
//! before dithering. The complete pipeline:
//!
//! 1. **Flatten alpha** - composite over white
//! 2. **Resize** (Lanczos3) - scale to the head width, aspect preserved
//! 3. **Unsharp mask** - recover edges softened by the resize
//! 4. **Sharpness** - a second, milder edge boost
//! 5. **Brightness** - lift midtones so they don't print as solid black
//! 6. **Contrast** - stretch around 128
//! 7. **Grayscale** - BT.601 luma
//!
//! Resize runs before enhancement so the filters operate at print
//! resolution. All tuning constants live in [`params`].
//!
//! # Example
//!
//! ```
//! use escpos_raster::{Preprocessor, TargetSpec};
//! use image::{DynamicImage, Rgb, RgbImage};
//!
//! let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 50, Rgb([255, 255, 255])));
//! let gray = Preprocessor::new(TargetSpec::RECEIPT_58MM).process(&source).unwrap();
//!
//! assert_eq!(gray.dimensions(), (384, 192));
//! assert!(gray.pixels().all(|p| p.0[0] == 255));
//! ```

mod enhance;
mod grayscale;
pub mod params;
mod preprocessor;
mod resize;
mod sharpen;
mod target;

pub use enhance::{enhance_brightness, enhance_contrast};
pub use grayscale::{flatten_alpha, to_luma};
pub use preprocessor::{render, Preprocessor};
pub use resize::{resize_to_width, target_height};
pub use sharpen::{enhance_sharpness, unsharp_mask};
pub use target::TargetSpec;
