//! Edge sharpening stages.
//!
//! Two passes run back to back: a fine unsharp mask that restores detail
//! lost in resampling, then a coarser 3x3 sharpness blend that mostly helps
//! text survive binarization.

use image::{imageops, Rgb, RgbImage};

/// Unsharp mask with a Gaussian blur of the given sigma.
///
/// For every channel, `detail = original - blurred`. When `|detail|` is
/// larger than `threshold` the channel becomes
/// `original + amount * detail`; otherwise it is kept as is, which stops
/// flat areas from picking up noise.
pub fn unsharp_mask(img: &RgbImage, sigma: f32, amount: f32, threshold: i32) -> RgbImage {
    let blurred = imageops::blur(img, sigma);
    let mut out = img.clone();

    for (x, y, px) in out.enumerate_pixels_mut() {
        let soft = blurred.get_pixel(x, y);
        for c in 0..3 {
            let orig = px.0[c] as i32;
            let detail = orig - soft.0[c] as i32;
            if detail.abs() > threshold {
                px.0[c] = clamp_u8(orig as f32 + amount * detail as f32);
            }
        }
    }
    out
}

/// Sharpness enhancement against a 3x3 smoothed copy.
///
/// The smoothing kernel is
///
/// ```text
/// 1 1 1
/// 1 5 1   / 13
/// 1 1 1
/// ```
///
/// with edge pixels clamped. The result is `smooth + factor * (img - smooth)`:
/// 1.0 returns the input, larger values push edges apart.
pub fn enhance_sharpness(img: &RgbImage, factor: f32) -> RgbImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }
    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;

    RgbImage::from_fn(width, height, |x, y| {
        let mut acc = [0u32; 3];
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                let sx = (x as i64 + dx).clamp(0, max_x) as u32;
                let sy = (y as i64 + dy).clamp(0, max_y) as u32;
                let weight = if dx == 0 && dy == 0 { 5 } else { 1 };
                let p = img.get_pixel(sx, sy);
                for c in 0..3 {
                    acc[c] += p.0[c] as u32 * weight;
                }
            }
        }

        let center = img.get_pixel(x, y);
        Rgb(std::array::from_fn(|c| {
            let smooth = acc[c] as f32 / 13.0;
            clamp_u8(smooth + factor * (center.0[c] as f32 - smooth))
        }))
    })
}

#[inline]
pub(crate) fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
