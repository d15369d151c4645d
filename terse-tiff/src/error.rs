//! TIFF error types.

use thiserror::Error;

/// Result type for TIFF operations.
pub type Result<T> = std::result::Result<T, TifError>;

/// Errors raised while parsing, building or emitting greyscale TIFF data.
#[derive(Error, Debug)]
pub enum TifError {
    /// The byte-order mark or version magic was wrong.
    #[error("invalid TIFF header")]
    BadHeader,

    /// A mandatory IFD tag was absent.
    #[error("missing required tag: {0}")]
    MissingTag(String),

    /// Bits per sample outside the supported 8/16/32/64 set.
    #[error("unsupported bits per sample: {0}")]
    UnsupportedBitDepth(u16),

    /// A feature outside the greyscale baseline subset.
    #[error("unsupported TIFF feature: {0}")]
    Unsupported(String),

    /// The image is not single-sample greyscale.
    #[error("not a greyscale image (photometric interpretation {0})")]
    NotGreyscale(u16),

    /// The image data is split over more than one strip.
    #[error("multi-strip images are not supported")]
    MultiStrip,

    /// A structure or strip reached past the end of the buffer.
    #[error("truncated TIFF: needed {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required to finish the structure.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// Pixel data length does not match the declared dimensions.
    #[error("pixel data is {actual} bytes, dimensions require {expected}")]
    DimensionMismatch {
        /// Bytes implied by dimensions and pixel type.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
