//! Output types for the rendering pipeline.
//!
//! - [`MonoRaster`]: one `bool` per dot, produced by dithering
//! - [`PackedBitmap`]: the same dots packed MSB-first, eight per byte, as
//!   carried in the `GS v 0` payload

mod mono_raster;
mod packed;

pub use mono_raster::MonoRaster;
pub use packed::PackedBitmap;
