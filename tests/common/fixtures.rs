//! Test fixtures and constants.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use std::io::Cursor;

/// Head width used by the test app (small to keep renders fast)
pub const TEST_WIDTH: u32 = 64;

/// ESC @ followed by GS v 0 mode 0
pub const JOB_PREFIX: [u8; 6] = [0x1B, 0x40, 0x1D, 0x76, 0x30, 0x00];

/// LF LF GS V 0
pub const JOB_TRAILER: [u8; 5] = [0x0A, 0x0A, 0x1D, 0x56, 0x00];

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("Failed to encode image");
    buf.into_inner()
}

/// Solid gray PNG
pub fn gray_png(width: u32, height: u32, v: u8) -> Vec<u8> {
    encode(
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([v]))),
        ImageFormat::Png,
    )
}

/// Solid gray JPEG
pub fn gray_jpeg(width: u32, height: u32, v: u8) -> Vec<u8> {
    encode(
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([v]))),
        ImageFormat::Jpeg,
    )
}

/// Fully transparent PNG
pub fn transparent_png(width: u32, height: u32) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))),
        ImageFormat::Png,
    )
}

pub fn base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", base64(bytes))
}

/// JSON body for POST /print
pub fn print_body(image: &str) -> String {
    serde_json::json!({ "image": image }).to_string()
}
