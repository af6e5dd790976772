//! ESC/POS raster job encoder.
//!
//! Frames a packed bitmap as
//!
//! ```text
//! 1B 40                 ESC @
//! 1D 76 30 00           GS v 0, mode 0
//! xL xH yL yH           width in bytes, height in dots (u16 LE)
//! <x * y bytes>         bitmap, MSB = leftmost dot
//! 0A 0A                 feed
//! 1D 56 00              GS V 0, full cut
//! ```

use tracing::debug;

use super::commands::{
    CUT_FULL, HEADER_LEN, INIT, LINE_FEED, MAX_DIMENSION, RASTER_NORMAL, TRAILER_LEN,
    TRAILING_FEEDS,
};
use super::PrintJob;
use crate::api::{RasterError, RasterResult};
use crate::output::{MonoRaster, PackedBitmap};

/// Encode a raster as a complete print job.
///
/// Deterministic: the same raster always yields the same bytes.
///
/// # Errors
///
/// [`RasterError::RasterTooLarge`] if the row width in bytes or the height
/// exceeds 65535. The check happens before anything is packed.
///
/// # Example
///
/// ```
/// use escpos_raster::{encode, MonoRaster};
///
/// let job = encode(&MonoRaster::filled(8, 1, true)).unwrap();
/// assert_eq!(
///     job.as_bytes(),
///     &[0x1B, 0x40, 0x1D, 0x76, 0x30, 0x00, 0x01, 0x00, 0x01, 0x00, 0xFF,
///       0x0A, 0x0A, 0x1D, 0x56, 0x00]
/// );
/// ```
pub fn encode(raster: &MonoRaster) -> RasterResult<PrintJob> {
    check_dimensions(raster.width().div_ceil(8), raster.height())?;
    let bitmap = PackedBitmap::pack(raster);
    encode_packed(&bitmap)
}

/// Frame an already packed bitmap.
pub fn encode_packed(bitmap: &PackedBitmap) -> RasterResult<PrintJob> {
    check_dimensions(bitmap.width_bytes(), bitmap.height())?;

    let mut builder = JobBuilder::with_capacity(HEADER_LEN + bitmap.bytes().len() + TRAILER_LEN);
    builder
        .init()
        .raster(bitmap)
        .feed(TRAILING_FEEDS)
        .cut();
    let job = builder.build();

    debug!(
        width_bytes = bitmap.width_bytes(),
        height = bitmap.height(),
        bytes = job.len(),
        "Encoded ESC/POS raster job"
    );
    Ok(job)
}

fn check_dimensions(width_bytes: u32, height: u32) -> RasterResult<()> {
    if width_bytes > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(RasterError::RasterTooLarge {
            width_bytes,
            height,
        });
    }
    Ok(())
}

/// Appends raster-subset commands to a byte buffer.
struct JobBuilder {
    buf: Vec<u8>,
}

impl JobBuilder {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn init(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&INIT);
        self
    }

    /// Caller guarantees both dimensions fit in u16.
    fn raster(&mut self, bitmap: &PackedBitmap) -> &mut Self {
        self.buf.extend_from_slice(&RASTER_NORMAL);
        self.buf
            .extend_from_slice(&(bitmap.width_bytes() as u16).to_le_bytes());
        self.buf
            .extend_from_slice(&(bitmap.height() as u16).to_le_bytes());
        self.buf.extend_from_slice(bitmap.bytes());
        self
    }

    fn feed(&mut self, lines: usize) -> &mut Self {
        self.buf.extend(std::iter::repeat(LINE_FEED).take(lines));
        self
    }

    fn cut(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&CUT_FULL);
        self
    }

    fn build(self) -> PrintJob {
        PrintJob::from_bytes(self.buf)
    }
}
