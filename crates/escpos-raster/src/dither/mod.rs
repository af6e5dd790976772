//! Error diffusion dithering to 1-bit.
//!
//! A thermal head has two states per dot, so the grayscale image produced by
//! preprocessing is binarized with Floyd-Steinberg error diffusion. Error
//! diffusion keeps perceived tone far better than a fixed threshold on
//! photos and gradients, while solid black and white regions stay solid.
//!
//! # Example
//!
//! ```
//! use escpos_raster::dither::floyd_steinberg;
//! use image::{GrayImage, Luma};
//!
//! let gray = GrayImage::from_pixel(8, 8, Luma([0]));
//! let raster = floyd_steinberg(&gray);
//! assert_eq!(raster.printed_count(), 64);
//! ```

mod floyd_steinberg;
mod kernel;

pub use floyd_steinberg::{dither_with_kernel, floyd_steinberg, THRESHOLD};
pub use kernel::{Kernel, FLOYD_STEINBERG};
