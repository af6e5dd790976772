//! Fixed tuning constants of the receipt pipeline.
//!
//! These are tuned for 203 dpi thermal heads on standard receipt paper and
//! are deliberately not exposed as runtime options.

use image::imageops::FilterType;

/// Resampling filter for the width fit (windowed sinc, 3 lobes).
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Gaussian sigma of the unsharp mask blur, in pixels.
pub const UNSHARP_RADIUS: f32 = 1.5;

/// Unsharp mask strength: 1.5 adds back 150% of the detail layer.
pub const UNSHARP_AMOUNT: f32 = 1.5;

/// Channels whose detail is at most this large are left untouched.
pub const UNSHARP_THRESHOLD: i32 = 3;

/// Sharpness blend factor (1.0 = unchanged).
pub const SHARPNESS: f32 = 1.5;

/// Brightness multiplier (1.0 = unchanged).
pub const BRIGHTNESS: f32 = 1.4;

/// Contrast multiplier around [`CONTRAST_MIDPOINT`] (1.0 = unchanged).
pub const CONTRAST: f32 = 1.8;

/// Pivot of the contrast stretch.
pub const CONTRAST_MIDPOINT: f32 = 128.0;
