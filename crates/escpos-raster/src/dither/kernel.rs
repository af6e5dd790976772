//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry is a `(dx, dy, weight)` triple: the neighbour at offset
/// `(dx, dy)` from the current pixel receives `error * weight / divisor`.
/// Offsets only ever point at pixels that have not been quantized yet
/// (`dy > 0`, or `dy == 0` with `dx > 0`).
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

impl Kernel {
    /// Fraction of the quantization error that is propagated.
    pub fn propagation(&self) -> f32 {
        let sum: u32 = self.entries.iter().map(|&(_, _, w)| w as u32).sum();
        sum as f32 / self.divisor as f32
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// 16/16 of the error is propagated.
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
