//! # Terse
//!
//! Compression suite for stacks of two-dimensional greyscale scientific
//! images, notably electron-diffraction frames from Medipix-class
//! detectors.
//!
//! The workspace splits into a codec core and a narrow TIFF layer; this
//! crate ties them together and provides the end-to-end pipeline used by
//! the `terse` and `prolix` command-line tools:
//!
//! - [`compress`] — greyscale TIFF bytes to `.trpx` bytes
//! - [`expand`] — `.trpx` bytes back to greyscale TIFF bytes
//!
//! ```
//! let mut tif = terse::GreyTif::new();
//! tif.push_samples(&terse::Samples::U16(vec![42, 1, 2, 3]), [2, 2]).unwrap();
//!
//! let trpx = terse::compress(tif.as_bytes()).unwrap();
//! let restored = terse::expand(&trpx).unwrap();
//! assert_eq!(restored, tif.as_bytes());
//! ```

pub mod pipeline;

pub use pipeline::{compress, expand};
pub use terse_codec::{Terse, TerseError, TerseStack, XmlElement, DEFAULT_BLOCK_SIZE};
pub use terse_core::{BitCursor, BitRange, BitReader, BitWriter, PixelType};
pub use terse_tiff::{Frame, GreyTif, Samples, TifError};

use thiserror::Error;

/// Result type alias using the umbrella [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the TIFF ↔ Terse pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// TIFF container errors.
    #[error("TIFF error: {0}")]
    Tiff(#[from] TifError),

    /// Codec and `.trpx` container errors.
    #[error("Terse error: {0}")]
    Codec(#[from] TerseError),

    /// The input TIFF holds no images.
    #[error("TIFF contains no images")]
    NoImages,

    /// A frame descriptor carries no dimensions and none can be inferred.
    #[error("frame descriptor carries no dimensions")]
    MissingDim,

    /// The descriptor names an element type TIFF cannot represent.
    #[error("{0}-bit integral frames have no TIFF pixel type")]
    UnsupportedProlix(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::NoImages.to_string(), "TIFF contains no images");
        assert!(Error::UnsupportedProlix(64).to_string().contains("64-bit"));
    }

    #[test]
    fn test_error_conversions() {
        let err: Error = TifError::BadHeader.into();
        assert!(matches!(err, Error::Tiff(TifError::BadHeader)));
        let err: Error = TerseError::TruncatedPayload.into();
        assert!(matches!(err, Error::Codec(TerseError::TruncatedPayload)));
    }
}
