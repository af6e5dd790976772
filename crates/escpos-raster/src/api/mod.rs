//! Public API for the escpos-raster crate.
//!
//! This module provides the high-level API: the [`ReceiptRenderer`] builder,
//! image decoding, and the [`RasterError`] unified error type.

mod builder;
mod decode;
mod error;

pub use builder::ReceiptRenderer;
pub use decode::{decode_image, sniff_extension};
pub use error::{RasterError, RasterResult};
