//! The ESC/POS commands used by raster printing.

/// ESC @ - initialize printer.
pub const INIT: [u8; 2] = [0x1B, 0x40];

/// GS v 0, mode 0 (normal density) - print raster bit image.
///
/// Followed by `xL xH yL yH` and `x * y` bytes of image data.
pub const RASTER_NORMAL: [u8; 4] = [0x1D, 0x76, 0x30, 0x00];

/// LF - print and feed one line.
pub const LINE_FEED: u8 = 0x0A;

/// GS V 0 - full cut.
pub const CUT_FULL: [u8; 3] = [0x1D, 0x56, 0x00];

/// Line feeds between the image and the cut.
pub const TRAILING_FEEDS: usize = 2;

/// Largest value the 16-bit `GS v 0` dimension fields can carry.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Bytes before the bitmap payload: INIT + GS v 0 header + dimensions.
pub const HEADER_LEN: usize = INIT.len() + RASTER_NORMAL.len() + 4;

/// Bytes after the bitmap payload: feeds + cut.
pub const TRAILER_LEN: usize = TRAILING_FEEDS + CUT_FULL.len();
