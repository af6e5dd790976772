//! PrintJob: the framed byte stream handed to a printer.

use super::commands::{HEADER_LEN, TRAILER_LEN};
use crate::api::RasterResult;
use crate::output::PackedBitmap;

/// A complete ESC/POS job.
///
/// The bytes are binary and must reach the printer unchanged: no newline
/// translation, no character set conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob(Vec<u8>);

impl PrintJob {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Width in bytes and height in dots, as written in the `GS v 0` header.
    pub fn dimensions(&self) -> (u32, u32) {
        let field = |at: usize| u16::from_le_bytes([self.0[at], self.0[at + 1]]) as u32;
        (field(HEADER_LEN - 4), field(HEADER_LEN - 2))
    }

    /// The raster payload between header and trailer.
    pub fn payload(&self) -> &[u8] {
        &self.0[HEADER_LEN..self.0.len() - TRAILER_LEN]
    }

    /// Read the packed bitmap back out of the job.
    pub fn bitmap(&self) -> RasterResult<PackedBitmap> {
        let (width_bytes, height) = self.dimensions();
        PackedBitmap::from_bytes(width_bytes, height, self.payload().to_vec())
    }
}

impl AsRef<[u8]> for PrintJob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<PrintJob> for Vec<u8> {
    fn from(job: PrintJob) -> Self {
        job.0
    }
}
