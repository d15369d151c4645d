//! Error types for bit-level buffer access.

use thiserror::Error;

/// Result type alias using [`BitsError`].
pub type Result<T> = std::result::Result<T, BitsError>;

/// Errors raised by bit-level reads.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitsError {
    /// A read reached past the end of the backing buffer.
    #[error("read past the end of the bit buffer")]
    UnexpectedEnd,

    /// A field width larger than 64 bits was requested.
    #[error("bit width {0} exceeds the 64-bit word size")]
    WidthTooLarge(u32),
}
