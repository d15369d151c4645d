//! The TIFF ↔ `.trpx` pipeline.

use tracing::debug;

use terse_codec::{Terse, TerseStack, DEFAULT_BLOCK_SIZE};
use terse_tiff::{GreyTif, Samples};

use crate::{Error, Result};

/// Pixel count of a Medipix quad frame, used to infer dimensions for
/// legacy records written without `rows`/`cols` attributes.
const MEDIPIX_QUAD_PIXELS: usize = 512 * 512;

/// Compress a greyscale TIFF byte buffer into `.trpx` bytes.
///
/// Each image in the stack becomes one Terse record carrying the frame
/// dimensions. Integral frames are encoded at their native width and
/// signedness; float frames are converted to signed 32-bit samples at this
/// boundary, since the codec targets integral data.
pub fn compress(tif_bytes: &[u8]) -> Result<Vec<u8>> {
    let tif = GreyTif::from_bytes(tif_bytes.to_vec())?;
    if tif.is_empty() {
        return Err(Error::NoImages);
    }
    let mut stack = TerseStack::new();
    for frame in tif.frames() {
        let packed = match frame.samples() {
            Samples::U8(v) => Terse::from_u8(&v, DEFAULT_BLOCK_SIZE),
            Samples::I8(v) => Terse::from_i8(&v, DEFAULT_BLOCK_SIZE),
            Samples::U16(v) => Terse::from_u16(&v, DEFAULT_BLOCK_SIZE),
            Samples::I16(v) => Terse::from_i16(&v, DEFAULT_BLOCK_SIZE),
            Samples::U32(v) => Terse::from_u32(&v, DEFAULT_BLOCK_SIZE),
            Samples::I32(v) => Terse::from_i32(&v, DEFAULT_BLOCK_SIZE),
            float @ (Samples::F32(_) | Samples::F64(_)) => {
                debug!(
                    pixel = %float.pixel_type(),
                    "converting float frame to i32 before compression"
                );
                // Casting from the float values saturates out-of-range pixels.
                let values: Vec<i32> = float.values_f64().into_iter().map(|v| v as i32).collect();
                Terse::from_i32(&values, DEFAULT_BLOCK_SIZE)
            }
        }
        .with_dim(frame.dim());
        debug!(
            rows = frame.rows(),
            cols = frame.cols(),
            terse_bytes = packed.terse_size(),
            "compressed frame"
        );
        stack.push(packed);
    }
    Ok(stack.to_bytes())
}

/// Expand `.trpx` bytes back into a greyscale TIFF byte buffer.
///
/// Every record becomes one image of the element type named by its
/// descriptor. Records without dimensions fall back to 512×512 when they
/// hold exactly one Medipix quad frame of values.
pub fn expand(trpx_bytes: &[u8]) -> Result<Vec<u8>> {
    let stack = TerseStack::from_bytes(trpx_bytes)?;
    let mut tif = GreyTif::new();
    for frame in stack.frames() {
        let dim = match frame.dim() {
            Some(dim) => dim,
            None if frame.len() == MEDIPIX_QUAD_PIXELS => [512, 512],
            None => return Err(Error::MissingDim),
        };
        let samples = match (frame.bits_per_value(), frame.is_signed()) {
            (8, false) => Samples::U8(frame.decode_u8()?),
            (8, true) => Samples::I8(frame.decode_i8()?),
            (16, false) => Samples::U16(frame.decode_u16()?),
            (16, true) => Samples::I16(frame.decode_i16()?),
            (32, false) => Samples::U32(frame.decode_u32()?),
            (32, true) => Samples::I32(frame.decode_i32()?),
            (bits, _) => return Err(Error::UnsupportedProlix(bits)),
        };
        debug!(rows = dim[0], cols = dim[1], pixel = %samples.pixel_type(), "expanded frame");
        tif.push_samples(&samples, dim)?;
    }
    Ok(tif.into_bytes())
}
