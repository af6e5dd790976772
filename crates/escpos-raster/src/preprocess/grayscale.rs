//! Color to single-channel conversions.

use image::{GrayImage, Luma, Rgb, RgbImage, RgbaImage};

/// Composite RGBA over white paper.
///
/// Fully transparent pixels become white so they are never printed.
pub fn flatten_alpha(img: &RgbaImage) -> RgbImage {
    let (width, height) = img.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let a = a as u32;
        let over_white = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        Rgb([over_white(r), over_white(g), over_white(b)])
    })
}

/// ITU-R BT.601 luma: `(299 R + 587 G + 114 B) / 1000`, rounded.
pub fn to_luma(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = img.get_pixel(x, y).0;
        let l = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114 + 500) / 1000;
        Luma([l as u8])
    })
}
