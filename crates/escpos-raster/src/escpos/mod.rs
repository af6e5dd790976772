//! ESC/POS framing for raster images.
//!
//! Only the raster subset of the command set is implemented: initialize,
//! `GS v 0` bit image, line feed and full cut.

pub mod commands;
mod encoder;
mod job;

pub use encoder::{encode, encode_packed};
pub use job::PrintJob;
