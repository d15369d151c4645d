//! Error types for the Terse codec and container.

use terse_core::BitsError;
use thiserror::Error;

/// Result type alias using [`TerseError`].
pub type Result<T> = std::result::Result<T, TerseError>;

/// Errors raised while encoding, decoding or (de)serialising Terse data.
#[derive(Error, Debug)]
pub enum TerseError {
    /// A block header was structurally invalid.
    #[error("malformed block header: {0}")]
    BadHeader(&'static str),

    /// The bit payload ended before all values were recovered.
    #[error("compressed payload ended early")]
    TruncatedPayload,

    /// The requested integral target is narrower than the encoded values.
    #[error("cannot decode {prolix_bits}-bit values into a {target_bits}-bit integral target")]
    NarrowTarget {
        /// Width of the original elements.
        prolix_bits: u32,
        /// Width of the requested target type.
        target_bits: u32,
    },

    /// Signed data was asked to decode into an unsigned integral target.
    #[error("signed data cannot decode into an unsigned target")]
    SignedIntoUnsigned,

    /// The frame descriptor was missing, malformed or inconsistent.
    #[error("malformed frame descriptor: {0}")]
    BadDescriptor(String),

    /// An I/O error from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BitsError> for TerseError {
    fn from(err: BitsError) -> Self {
        match err {
            BitsError::UnexpectedEnd => TerseError::TruncatedPayload,
            BitsError::WidthTooLarge(_) => TerseError::BadHeader("field wider than 64 bits"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TerseError::NarrowTarget {
            prolix_bits: 32,
            target_bits: 16,
        };
        assert!(err.to_string().contains("32-bit"));
        assert!(err.to_string().contains("16-bit"));
    }

    #[test]
    fn test_bits_error_conversion() {
        let err: TerseError = BitsError::UnexpectedEnd.into();
        assert!(matches!(err, TerseError::TruncatedPayload));
    }
}
