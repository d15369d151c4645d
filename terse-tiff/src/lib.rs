//! Greyscale TIFF container for scientific image stacks.
//!
//! This is not a general TIFF library. It reads and writes the narrow
//! baseline subset produced by Medipix-class detectors and similar
//! instruments: single-sample greyscale images, one uncompressed strip per
//! image, 8/16/32/64 bits per sample, unsigned/signed/float pixels, any
//! number of images per file.
//!
//! Not supported (rejected on read): in-TIFF compression, colour and
//! bilevel images, tiled or multi-strip layouts, planar configurations,
//! multiple samples per pixel.
//!
//! The backing buffer is kept in little-endian byte order with an `II`
//! header; big-endian (`MM`) input is converted in place while parsing, so
//! emitted files are identical on every host.

pub mod error;
pub mod ifd;
pub mod stack;
pub mod tags;
pub mod types;

pub use error::{Result, TifError};
pub use stack::{Frame, GreyTif};
pub use types::{SampleFormat, Samples};

/// TIFF byte-order mark, little endian ("II").
pub const TIFF_MAGIC_LE: [u8; 2] = [0x49, 0x49];

/// TIFF byte-order mark, big endian ("MM").
pub const TIFF_MAGIC_BE: [u8; 2] = [0x4D, 0x4D];

/// TIFF version magic (42).
pub const TIFF_VERSION: u16 = 42;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_numbers() {
        assert_eq!(TIFF_MAGIC_LE, [b'I', b'I']);
        assert_eq!(TIFF_MAGIC_BE, [b'M', b'M']);
        assert_eq!(TIFF_VERSION, 42);
    }
}
