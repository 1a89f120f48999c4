//! Driver error type, generic over the transport error.

/// Error type for panel driver operations.
///
/// Transport failures bubble up unchanged; the driver performs no retries.
#[derive(Debug)]
pub enum Error<E: core::fmt::Debug> {
    /// Scratch buffer allocation failed at construction.
    Alloc { bytes: usize },
    /// A fill/text/bitmap operation requested more pixels than the scratch
    /// buffer holds. Raised rather than clamped: truncating would desync
    /// the burst length from the addressed window.
    Overrun { pixels: usize, capacity: usize },
    /// Caller-supplied pixel data shorter than the addressed window needs.
    PixelDataTooShort { needed: usize, len: usize },
    /// The panel pixel path only supports RGB and BGR order.
    UnsupportedColorSpace,
    /// Bit depth other than 16, 18 or 24.
    UnsupportedBitDepth(u8),
    /// A rotation table entry with zero width or height.
    BadOrientation { index: usize },
    /// Bus transport error.
    Transport(E),
}

impl<E: core::fmt::Debug> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Transport(e)
    }
}
