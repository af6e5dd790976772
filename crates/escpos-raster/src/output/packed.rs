//! MSB-first bit packing for raster transfer.

use super::MonoRaster;
use crate::api::{RasterError, RasterResult};

/// A [`MonoRaster`] packed eight dots per byte.
///
/// Rows are `width_bytes` long. Within a byte the most significant bit is the
/// leftmost dot. When the raster width is not a multiple of 8 the trailing
/// bits of each row's last byte are zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    width_bytes: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PackedBitmap {
    /// Pack a raster row by row.
    ///
    /// Output byte `k` of row `y`, bit `b` (0 = MSB) holds column `8k + b`.
    pub fn pack(raster: &MonoRaster) -> Self {
        let width = raster.width();
        let height = raster.height();
        let width_bytes = width.div_ceil(8);
        let mut bytes = Vec::with_capacity(width_bytes as usize * height as usize);

        for y in 0..height {
            let row = raster.row(y);
            for k in 0..width_bytes {
                let mut byte = 0u8;
                for b in 0..8u32 {
                    let x = k * 8 + b;
                    if x < width && row[x as usize] {
                        byte |= 0x80 >> b;
                    }
                }
                bytes.push(byte);
            }
        }

        Self {
            width_bytes,
            height,
            bytes,
        }
    }

    /// Wrap an already packed buffer, validating its length.
    pub fn from_bytes(width_bytes: u32, height: u32, bytes: Vec<u8>) -> RasterResult<Self> {
        let expected = width_bytes as usize * height as usize;
        if bytes.len() != expected {
            return Err(RasterError::DimensionMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width_bytes,
            height,
            bytes,
        })
    }

    /// Expand back into a raster of the given pixel width.
    ///
    /// Padding bits beyond `width` are ignored.
    pub fn unpack(&self, width: u32) -> RasterResult<MonoRaster> {
        if width.div_ceil(8) != self.width_bytes {
            return Err(RasterError::DimensionMismatch {
                expected: self.width_bytes as usize * 8,
                actual: width as usize,
            });
        }
        let mut bits = Vec::with_capacity(width as usize * self.height as usize);
        for row in self.rows() {
            for x in 0..width as usize {
                bits.push(row[x / 8] & (0x80 >> (x % 8)) != 0);
            }
        }
        MonoRaster::new(width, self.height, bits)
    }

    #[inline]
    pub fn width_bytes(&self) -> u32 {
        self.width_bytes
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Iterate over packed rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks() rejects a zero chunk size
        self.bytes.chunks(self.width_bytes.max(1) as usize)
    }
}
