#![allow(clippy::needless_range_loop)]

//! escpos-raster: photographs and graphics to ESC/POS raster jobs
//!
//! This library turns an arbitrary decoded image into the byte stream a
//! thermal receipt printer expects for a `GS v 0` raster bit image. The
//! pipeline is pure: no I/O, no global state, same input same bytes.
//!
//! # Quick Start
//!
//! The [`ReceiptRenderer`] builder is the primary entry point:
//!
//! ```
//! use escpos_raster::ReceiptRenderer;
//! use image::{DynamicImage, Rgb, RgbImage};
//!
//! let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(1152, 864, Rgb([128, 128, 128])));
//! let job = ReceiptRenderer::new().render_job(&source).unwrap();
//!
//! assert_eq!(&job.as_bytes()[..10], &[0x1B, 0x40, 0x1D, 0x76, 0x30, 0x00, 0x48, 0x00, 0xB0, 0x01]);
//! assert!(job.as_bytes().ends_with(&[0x0A, 0x0A, 0x1D, 0x56, 0x00]));
//! ```
//!
//! # Step by Step
//!
//! Each stage is public on its own:
//!
//! ```
//! use escpos_raster::{encode, render, PackedBitmap, TargetSpec};
//! use image::{DynamicImage, Rgb, RgbImage};
//!
//! let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 20, Rgb([0, 0, 0])));
//! let raster = render(&source, TargetSpec::new(12).unwrap()).unwrap();
//! let packed = PackedBitmap::pack(&raster);
//! let job = encode(&raster).unwrap();
//!
//! assert_eq!(packed.width_bytes(), 2);
//! assert_eq!(job.payload(), packed.bytes());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! encoded bytes
//!     |  decode_image()
//!     v
//! DynamicImage
//!     |  flatten alpha, resize, sharpen, tone   (preprocess)
//!     v
//! GrayImage at head width
//!     |  Floyd-Steinberg                         (dither)
//!     v
//! MonoRaster (true = printed dot)
//!     |  pack MSB-first + ESC @ / GS v 0 / LF LF / GS V 0   (escpos)
//!     v
//! PrintJob
//! ```
//!
//! # Conventions
//!
//! `true` in a [`MonoRaster`] means a printed (black) dot; a `1` bit in the
//! packed payload means the same. Rows are packed independently and padded
//! with zero bits, so every row starts on a byte boundary.

pub mod api;
pub mod dither;
pub mod escpos;
pub mod output;
pub mod preprocess;


pub use api::{decode_image, sniff_extension, RasterError, RasterResult, ReceiptRenderer};
pub use escpos::{encode, PrintJob};
pub use output::{MonoRaster, PackedBitmap};
pub use preprocess::{render, Preprocessor, TargetSpec};
