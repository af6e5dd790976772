//! Floyd-Steinberg error diffusion to a 1-bit raster.
//!
//! Pixels are visited row by row, left to right (no serpentine). Each pixel
//! is compared against the fixed threshold after the error diffused from
//! its already-visited neighbours has been added, so the effective
//! threshold moves with the local error.

use image::GrayImage;
use tracing::debug;

use super::kernel::{Kernel, FLOYD_STEINBERG};
use crate::output::MonoRaster;

/// Quantization threshold on the 0-255 intensity scale.
pub const THRESHOLD: f32 = 128.0;

/// Dither a grayscale image with the classic Floyd-Steinberg kernel.
///
/// Returns a raster where `true` marks a printed (black) dot.
pub fn floyd_steinberg(gray: &GrayImage) -> MonoRaster {
    dither_with_kernel(gray, &FLOYD_STEINBERG)
}

/// Error diffusion with an arbitrary forward-only kernel.
pub fn dither_with_kernel(gray: &GrayImage, kernel: &Kernel) -> MonoRaster {
    let (width, height) = gray.dimensions();
    debug!(width, height, "Applying error diffusion dithering");

    let w = width as usize;
    let h = height as usize;
    let divisor = kernel.divisor as f32;

    // Accumulating buffer: input intensity plus diffused error.
    let mut buffer: Vec<f32> = gray.as_raw().iter().map(|&v| v as f32).collect();
    let mut bits = vec![false; w * h];

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let old = buffer[idx];
            let printed = old < THRESHOLD;
            let new = if printed { 0.0 } else { 255.0 };
            bits[idx] = printed;

            let error = old - new;
            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || nx >= w as i64 || ny >= h as i64 {
                    continue;
                }
                buffer[ny as usize * w + nx as usize] += error * weight as f32 / divisor;
            }
        }
    }

    MonoRaster::from_bits_unchecked(width, height, bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            Luma([((x + y) * 255 / (width + height - 2)) as u8])
        })
    }

    #[test]
    fn test_preserves_dimensions() {
        let raster = floyd_steinberg(&gradient(10, 5));
        assert_eq!((raster.width(), raster.height()), (10, 5));
        assert_eq!(raster.bits().len(), 50);
    }

    #[test]
    fn test_all_black_input_prints_everything() {
        let raster = floyd_steinberg(&GrayImage::from_pixel(4, 4, Luma([0])));
        assert_eq!(raster.printed_count(), 16);
    }

    #[test]
    fn test_all_white_input_prints_nothing() {
        let raster = floyd_steinberg(&GrayImage::from_pixel(4, 4, Luma([255])));
        assert_eq!(raster.printed_count(), 0);
    }

    #[test]
    fn test_threshold_boundary() {
        // A lone pixel has no incoming error: 127 prints, 128 does not.
        let dark = floyd_steinberg(&GrayImage::from_pixel(1, 1, Luma([127])));
        let light = floyd_steinberg(&GrayImage::from_pixel(1, 1, Luma([128])));
        assert!(dark.get(0, 0));
        assert!(!light.get(0, 0));
    }

    #[test]
    fn test_error_carries_to_the_right() {
        // 100 prints (error +100), then 100 + 100*7/16 = 143.75 stays blank.
        let raster = floyd_steinberg(&GrayImage::from_pixel(2, 1, Luma([100])));
        assert!(raster.get(0, 0));
        assert!(!raster.get(1, 0));
    }

    #[test]
    fn test_mid_gray_density_tracks_intensity() {
        let size = 64;
        for level in [64u8, 128, 192] {
            let raster = floyd_steinberg(&GrayImage::from_pixel(size, size, Luma([level])));
            let expected = 1.0 - level as f64 / 255.0;
            assert!(
                (raster.density() - expected).abs() < 0.03,
                "level {level}: density {:.3}, expected ~{expected:.3}",
                raster.density()
            );
        }
    }

    #[test]
    fn test_mid_gray_is_dispersed() {
        // 50% gray must not collapse into solid runs: no row is all one value.
        let raster = floyd_steinberg(&GrayImage::from_pixel(32, 32, Luma([128])));
        for y in 0..32 {
            let row = raster.row(y);
            assert!(row.iter().any(|&b| b) && row.iter().any(|&b| !b), "row {y} is flat");
        }
    }

    #[test]
    fn test_deterministic() {
        let img = gradient(17, 9);
        assert_eq!(floyd_steinberg(&img), floyd_steinberg(&img));
    }
}
