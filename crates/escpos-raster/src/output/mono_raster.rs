//! MonoRaster: the 1-bit output of the preprocessing pipeline.

use crate::api::{RasterError, RasterResult};

/// A row-major, one-bit-per-pixel raster.
///
/// `true` marks a printed (black) dot, `false` leaves the paper blank.
/// The constructor enforces `bits.len() == width * height`, so every
/// `MonoRaster` in circulation is well formed.
///
/// # Example
///
/// ```
/// use escpos_raster::MonoRaster;
///
/// let raster = MonoRaster::new(2, 2, vec![true, false, false, true]).unwrap();
/// assert!(raster.get(0, 0));
/// assert!(!raster.get(1, 0));
/// assert_eq!(raster.printed_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoRaster {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl MonoRaster {
    /// Wrap a bit buffer, validating its length against the dimensions.
    pub fn new(width: u32, height: u32, bits: Vec<bool>) -> RasterResult<Self> {
        let expected = width as usize * height as usize;
        if bits.len() != expected {
            return Err(RasterError::DimensionMismatch {
                expected,
                actual: bits.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Wrap a buffer whose length is known to match.
    pub(crate) fn from_bits_unchecked(width: u32, height: u32, bits: Vec<bool>) -> Self {
        debug_assert_eq!(
            bits.len(),
            width as usize * height as usize,
            "bits length must match {width}x{height}"
        );
        Self {
            width,
            height,
            bits,
        }
    }

    /// A raster with every dot set to `value`.
    pub fn filled(width: u32, height: u32, value: bool) -> Self {
        Self {
            width,
            height,
            bits: vec![value; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All dots in row-major order.
    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Whether the dot at `(x, y)` is printed.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the raster.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// One row of dots.
    pub fn row(&self, y: u32) -> &[bool] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.bits[start..start + w]
    }

    /// Number of printed dots.
    pub fn printed_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Fraction of dots that are printed, 0.0 for an empty raster.
    pub fn density(&self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        self.printed_count() as f64 / self.bits.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_matching_length() {
        let raster = MonoRaster::new(3, 2, vec![false; 6]).unwrap();
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.bits().len(), 6);
    }

    #[test]
    fn test_new_rejects_mismatched_length() {
        let err = MonoRaster::new(3, 2, vec![false; 5]).unwrap_err();
        assert_eq!(
            err,
            RasterError::DimensionMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_get_is_row_major() {
        // 3x2:
        // . X .
        // X . .
        let raster =
            MonoRaster::new(3, 2, vec![false, true, false, true, false, false]).unwrap();
        assert!(raster.get(1, 0));
        assert!(raster.get(0, 1));
        assert!(!raster.get(2, 1));
        assert_eq!(raster.row(1), &[true, false, false]);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 raster")]
    fn test_get_out_of_bounds_panics() {
        MonoRaster::filled(2, 2, false).get(2, 0);
    }

    #[test]
    fn test_density() {
        let raster = MonoRaster::new(2, 2, vec![true, true, true, false]).unwrap();
        assert_eq!(raster.printed_count(), 3);
        assert!((raster.density() - 0.75).abs() < f64::EPSILON);
        assert_eq!(MonoRaster::filled(0, 0, true).density(), 0.0);
    }
}
