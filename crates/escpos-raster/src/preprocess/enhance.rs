//! Tone adjustments applied after sharpening.

use image::RgbImage;

use super::sharpen::clamp_u8;

/// Multiply every channel by `factor`.
///
/// Thermal paper reflects less than a screen emits, so receipts are rendered
/// brighter than the source.
pub fn enhance_brightness(img: &RgbImage, factor: f32) -> RgbImage {
    map_channels(img, |v| v * factor)
}

/// Stretch every channel away from `midpoint` by `factor`.
///
/// `out = midpoint + (v - midpoint) * factor`, clamped to 0..=255.
pub fn enhance_contrast(img: &RgbImage, factor: f32, midpoint: f32) -> RgbImage {
    map_channels(img, |v| midpoint + (v - midpoint) * factor)
}

fn map_channels(img: &RgbImage, f: impl Fn(f32) -> f32) -> RgbImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        for c in px.0.iter_mut() {
            *c = clamp_u8(f(*c as f32));
        }
    }
    out
}
