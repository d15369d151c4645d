//! Block-header state machine and typed decode entry points.

use terse_core::BitReader;

use crate::error::{Result, TerseError};
use crate::frame::Terse;

/// A target element type the decoder can produce.
pub(crate) trait TargetSample: Sized {
    /// Bit width of the target type (unused for floats).
    const BITS: u32;
    /// Whether the target type is signed.
    const SIGNED: bool;
    /// Whether the target type is an integer.
    const INTEGRAL: bool;

    /// Build a target value from an unsigned code word.
    fn from_unsigned(raw: u64) -> Self;

    /// Build a target value from a sign-extended code word.
    fn from_signed(raw: i64) -> Self;
}

macro_rules! integral_target {
    ($t:ty, $signed:expr) => {
        impl TargetSample for $t {
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = $signed;
            const INTEGRAL: bool = true;

            #[inline]
            fn from_unsigned(raw: u64) -> Self {
                // Truncating: a full-width unsigned maximum decoded into a
                // same-width signed target surfaces as -1, as documented.
                raw as $t
            }

            #[inline]
            fn from_signed(raw: i64) -> Self {
                raw as $t
            }
        }
    };
}

macro_rules! float_target {
    ($t:ty) => {
        impl TargetSample for $t {
            const BITS: u32 = 64;
            const SIGNED: bool = true;
            const INTEGRAL: bool = false;

            #[inline]
            fn from_unsigned(raw: u64) -> Self {
                raw as $t
            }

            #[inline]
            fn from_signed(raw: i64) -> Self {
                raw as $t
            }
        }
    };
}

integral_target!(u8, false);
integral_target!(u16, false);
integral_target!(u32, false);
integral_target!(u64, false);
integral_target!(i8, true);
integral_target!(i16, true);
integral_target!(i32, true);
integral_target!(i64, true);
float_target!(f32);
float_target!(f64);

/// Read one block header and return the block's value width.
///
/// A leading repeat bit reuses the previous block's width; a repeat bit with
/// no previous block, or a width above 64, is a malformed header.
pub(crate) fn read_block_header(reader: &mut BitReader<'_>, prev: Option<u32>) -> Result<u32> {
    if reader.read_bit()? {
        return prev.ok_or(TerseError::BadHeader("repeat marker in the first block"));
    }
    let mut width = reader.read_bits(3)? as u32;
    if width == 7 {
        width += reader.read_bits(2)? as u32;
        if width == 10 {
            width += reader.read_bits(6)? as u32;
        }
    }
    if width > 64 {
        return Err(TerseError::BadHeader("value width exceeds 64 bits"));
    }
    Ok(width)
}

impl Terse {
    fn decode<T: TargetSample>(&self) -> Result<Vec<T>> {
        if T::INTEGRAL {
            if self.signed && !T::SIGNED {
                return Err(TerseError::SignedIntoUnsigned);
            }
            if T::BITS < self.prolix_bits {
                return Err(TerseError::NarrowTarget {
                    prolix_bits: self.prolix_bits,
                    target_bits: T::BITS,
                });
            }
        }
        let mut reader = BitReader::with_limit(&self.words, self.payload_bytes as u64 * 8);
        let mut prev: Option<u32> = None;
        // Cap the preallocation so a hostile descriptor cannot demand
        // arbitrary memory up front; growth beyond this is amortised.
        let mut out = Vec::with_capacity(self.count.min(1 << 26));
        while out.len() < self.count {
            let take = self.block.min(self.count - out.len());
            let width = read_block_header(&mut reader, prev)?;
            prev = Some(width);
            if width == 0 {
                out.resize_with(out.len() + take, || T::from_unsigned(0));
            } else if self.signed {
                for _ in 0..take {
                    out.push(T::from_signed(reader.read_signed_clamped(width, T::BITS)?));
                }
            } else {
                for _ in 0..take {
                    out.push(T::from_unsigned(
                        reader.read_unsigned_clamped(width, T::BITS)?,
                    ));
                }
            }
        }
        Ok(out)
    }

    /// Decode into unsigned 8-bit values.
    pub fn decode_u8(&self) -> Result<Vec<u8>> {
        self.decode()
    }

    /// Decode into unsigned 16-bit values.
    pub fn decode_u16(&self) -> Result<Vec<u16>> {
        self.decode()
    }

    /// Decode into unsigned 32-bit values.
    pub fn decode_u32(&self) -> Result<Vec<u32>> {
        self.decode()
    }

    /// Decode into unsigned 64-bit values.
    pub fn decode_u64(&self) -> Result<Vec<u64>> {
        self.decode()
    }

    /// Decode into signed 8-bit values.
    pub fn decode_i8(&self) -> Result<Vec<i8>> {
        self.decode()
    }

    /// Decode into signed 16-bit values.
    pub fn decode_i16(&self) -> Result<Vec<i16>> {
        self.decode()
    }

    /// Decode into signed 32-bit values.
    pub fn decode_i32(&self) -> Result<Vec<i32>> {
        self.decode()
    }

    /// Decode into signed 64-bit values.
    pub fn decode_i64(&self) -> Result<Vec<i64>> {
        self.decode()
    }

    /// Decode into single-precision floats.
    ///
    /// Always permitted; unsigned and signed data both convert exactly up to
    /// the float's precision.
    pub fn decode_f32(&self) -> Result<Vec<f32>> {
        self.decode()
    }

    /// Decode into double-precision floats.
    pub fn decode_f64(&self) -> Result<Vec<f64>> {
        self.decode()
    }
}
