//! Unified error type for the escpos-raster public API.
//!
//! [`RasterError`] covers every way a render or an encode can fail. None of
//! them are fatal: the caller decides whether to surface the error, retry
//! with a different target width, or drop the job.

use thiserror::Error;

/// Errors returned by the render and encode pipeline.
///
/// A failed call never produces partial output: there is no half-built
/// [`MonoRaster`](crate::MonoRaster) or [`PrintJob`](crate::PrintJob).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Source image has a zero dimension, cannot be decoded, or resizes to
    /// zero rows.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Target device width is unusable (zero pixels).
    #[error("Invalid target width: {0}px")]
    InvalidTarget(u32),

    /// Bit buffer length disagrees with the declared raster dimensions.
    #[error("Raster dimension mismatch: expected {expected} pixels, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Packed dimensions do not fit the 16-bit fields of `GS v 0`.
    #[error("Raster too large for GS v 0: {width_bytes} bytes x {height} rows (max 65535)")]
    RasterTooLarge { width_bytes: u32, height: u32 },
}

/// Result alias used throughout the crate.
pub type RasterResult<T> = Result<T, RasterError>;
