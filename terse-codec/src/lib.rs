//! Terse bit-packed run-length codec.
//!
//! Terse compresses sequences of integral greyscale values (diffraction
//! frames and similar detector output) into a compact, endian-independent
//! bit stream. The input is cut into fixed-size blocks; each block is stored
//! at the smallest bit width that represents every value in it, preceded by
//! a short variable-length header carrying that width. Runs of blocks with
//! the same width pay a single repeat bit per block.
//!
//! Unpacking is only possible into element types at least as wide as the
//! original values, and signed data never unpacks into unsigned targets
//! (the reverse is allowed). Float targets are always accepted.
//!
//! # Example
//!
//! ```
//! use terse_codec::Terse;
//!
//! let values: Vec<i32> = (-500..500).collect();
//! let packed = Terse::from_i32(&values, terse_codec::DEFAULT_BLOCK_SIZE);
//! assert!(packed.terse_size() < values.len() * 4 * 3 / 10);
//! assert_eq!(packed.decode_i32().unwrap(), values);
//! ```

pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod xml;

pub use container::TerseStack;
pub use error::{Result, TerseError};
pub use frame::Terse;
pub use xml::XmlElement;

/// Default number of values per compression block.
pub const DEFAULT_BLOCK_SIZE: usize = 12;

/// Largest value width a block header can describe.
pub const MAX_HEADER_WIDTH: u32 = 73;

/// Tag name of the on-disk frame descriptor.
pub const DESCRIPTOR_TAG: &str = "Terse";
