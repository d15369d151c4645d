//! # Terse Core
//!
//! Core primitives for the Terse compression suite.
//!
//! This crate provides the building blocks shared by the codec and container
//! layers:
//! - Bit-granular cursors and readers/writers over `u64` word buffers
//! - The runtime pixel-type descriptor used by the TIFF layer and pipeline
//! - Bitstream error types

pub mod bits;
pub mod error;
pub mod pixel;

pub use bits::{BitCursor, BitRange, BitReader, BitWriter};
pub use error::{BitsError, Result};
pub use pixel::PixelType;
