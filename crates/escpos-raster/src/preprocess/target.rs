//! Target device description.

use crate::api::{RasterError, RasterResult};

/// The print head a render is aimed at.
///
/// Only the dot width is configurable; every other pipeline parameter is a
/// fixed constant (see [`params`](super::params)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSpec {
    /// Printable dots per line.
    pub device_width_px: u32,
}

impl TargetSpec {
    /// 80 mm paper, 203 dpi head.
    pub const RECEIPT_80MM: Self = Self {
        device_width_px: 576,
    };

    /// 58 mm paper, 203 dpi head.
    pub const RECEIPT_58MM: Self = Self {
        device_width_px: 384,
    };

    /// Create a target, rejecting a zero width.
    pub fn new(device_width_px: u32) -> RasterResult<Self> {
        let spec = Self { device_width_px };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> RasterResult<()> {
        if self.device_width_px == 0 {
            return Err(RasterError::InvalidTarget(self.device_width_px));
        }
        Ok(())
    }

    /// Bytes per raster row for this target.
    pub fn width_bytes(&self) -> u32 {
        self.device_width_px.div_ceil(8)
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::RECEIPT_80MM
    }
}
