//! Decoding encoded image bytes.

use image::DynamicImage;

use super::{RasterError, RasterResult};

/// Decode PNG, JPEG, GIF, BMP or WebP bytes.
///
/// The format is sniffed from the content, never from a file name.
///
/// # Errors
///
/// [`RasterError::InvalidImage`] if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> RasterResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| RasterError::InvalidImage(e.to_string()))
}

/// Preferred file extension for the sniffed format, if recognized.
pub fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
}
