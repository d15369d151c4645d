//! TIFF type mappings and typed sample vectors.

use byteorder::{ByteOrder, LittleEndian};
use terse_core::PixelType;

/// TIFF sample format (tag 339).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Unsigned integer samples.
    Uint,
    /// Two's-complement signed integer samples.
    Int,
    /// IEEE floating point samples.
    Float,
}

impl Default for SampleFormat {
    fn default() -> Self {
        SampleFormat::Uint
    }
}

impl SampleFormat {
    /// Create from the TIFF tag value; `None` for unknown formats.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(SampleFormat::Uint),
            2 => Some(SampleFormat::Int),
            3 => Some(SampleFormat::Float),
            _ => None,
        }
    }

    /// Convert to the TIFF tag value.
    pub fn to_u16(self) -> u16 {
        match self {
            SampleFormat::Uint => 1,
            SampleFormat::Int => 2,
            SampleFormat::Float => 3,
        }
    }

    /// The sample format describing a pixel type.
    pub fn of(pixel: PixelType) -> Self {
        if pixel.is_float() {
            SampleFormat::Float
        } else if pixel.is_signed() {
            SampleFormat::Int
        } else {
            SampleFormat::Uint
        }
    }
}

/// Resolve bits-per-sample and sample format into a pixel type.
///
/// `None` for combinations outside the supported set (64-bit integers,
/// sub-32-bit floats).
pub fn pixel_type_for(bits: u16, format: SampleFormat) -> Option<PixelType> {
    let byte_size = match bits {
        8 | 16 | 32 | 64 => bits as usize / 8,
        _ => return None,
    };
    match format {
        SampleFormat::Uint => PixelType::from_parts(byte_size, false, false),
        SampleFormat::Int => PixelType::from_parts(byte_size, true, false),
        SampleFormat::Float => PixelType::from_parts(byte_size, true, true),
    }
}

/// A frame's pixel values, materialised into a typed vector.
///
/// The variant mirrors the frame's runtime [`PixelType`]; values are in
/// row-major order.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl Samples {
    /// The pixel type of the carried values.
    pub fn pixel_type(&self) -> PixelType {
        match self {
            Samples::U8(_) => PixelType::U8,
            Samples::I8(_) => PixelType::I8,
            Samples::U16(_) => PixelType::U16,
            Samples::I16(_) => PixelType::I16,
            Samples::U32(_) => PixelType::U32,
            Samples::I32(_) => PixelType::I32,
            Samples::F32(_) => PixelType::F32,
            Samples::F64(_) => PixelType::F64,
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Samples::U8(v) => v.len(),
            Samples::I8(v) => v.len(),
            Samples::U16(v) => v.len(),
            Samples::I16(v) => v.len(),
            Samples::U32(v) => v.len(),
            Samples::I32(v) => v.len(),
            Samples::F32(v) => v.len(),
            Samples::F64(v) => v.len(),
        }
    }

    /// Whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode a little-endian strip into typed values.
    ///
    /// Trailing bytes that do not fill a whole element are ignored.
    pub fn from_le_bytes(pixel: PixelType, data: &[u8]) -> Samples {
        match pixel {
            PixelType::U8 => Samples::U8(data.to_vec()),
            PixelType::I8 => Samples::I8(data.iter().map(|&b| b as i8).collect()),
            PixelType::U16 => {
                Samples::U16(data.chunks_exact(2).map(LittleEndian::read_u16).collect())
            }
            PixelType::I16 => {
                Samples::I16(data.chunks_exact(2).map(LittleEndian::read_i16).collect())
            }
            PixelType::U32 => {
                Samples::U32(data.chunks_exact(4).map(LittleEndian::read_u32).collect())
            }
            PixelType::I32 => {
                Samples::I32(data.chunks_exact(4).map(LittleEndian::read_i32).collect())
            }
            PixelType::F32 => {
                Samples::F32(data.chunks_exact(4).map(LittleEndian::read_f32).collect())
            }
            PixelType::F64 => {
                Samples::F64(data.chunks_exact(8).map(LittleEndian::read_f64).collect())
            }
        }
    }

    /// Encode the values as a little-endian strip.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len() * self.pixel_type().byte_size());
        match self {
            Samples::U8(v) => out.extend_from_slice(v),
            Samples::I8(v) => out.extend(v.iter().map(|&x| x as u8)),
            Samples::U16(v) => v.iter().for_each(|x| out.extend(x.to_le_bytes())),
            Samples::I16(v) => v.iter().for_each(|x| out.extend(x.to_le_bytes())),
            Samples::U32(v) => v.iter().for_each(|x| out.extend(x.to_le_bytes())),
            Samples::I32(v) => v.iter().for_each(|x| out.extend(x.to_le_bytes())),
            Samples::F32(v) => v.iter().for_each(|x| out.extend(x.to_le_bytes())),
            Samples::F64(v) => v.iter().for_each(|x| out.extend(x.to_le_bytes())),
        }
        out
    }

    /// Convert the values to another pixel type.
    ///
    /// Integer-to-integer conversions truncate like `as`; float-to-integer
    /// conversions saturate; integer-to-float conversions round to the
    /// nearest representable value.
    pub fn convert_to(&self, pixel: PixelType) -> Samples {
        if pixel == self.pixel_type() {
            return self.clone();
        }
        if pixel.is_float() {
            let values = self.values_f64();
            match pixel {
                PixelType::F32 => Samples::F32(values.into_iter().map(|v| v as f32).collect()),
                _ => Samples::F64(values),
            }
        } else if self.pixel_type().is_float() {
            // Casting from a float source saturates at the target's range.
            let values = self.values_f64();
            match pixel {
                PixelType::U8 => Samples::U8(values.into_iter().map(|v| v as u8).collect()),
                PixelType::I8 => Samples::I8(values.into_iter().map(|v| v as i8).collect()),
                PixelType::U16 => Samples::U16(values.into_iter().map(|v| v as u16).collect()),
                PixelType::I16 => Samples::I16(values.into_iter().map(|v| v as i16).collect()),
                PixelType::U32 => Samples::U32(values.into_iter().map(|v| v as u32).collect()),
                _ => Samples::I32(values.into_iter().map(|v| v as i32).collect()),
            }
        } else {
            let values = self.values_i64();
            match pixel {
                PixelType::U8 => Samples::U8(values.into_iter().map(|v| v as u8).collect()),
                PixelType::I8 => Samples::I8(values.into_iter().map(|v| v as i8).collect()),
                PixelType::U16 => Samples::U16(values.into_iter().map(|v| v as u16).collect()),
                PixelType::I16 => Samples::I16(values.into_iter().map(|v| v as i16).collect()),
                PixelType::U32 => Samples::U32(values.into_iter().map(|v| v as u32).collect()),
                _ => Samples::I32(values.into_iter().map(|v| v as i32).collect()),
            }
        }
    }

    /// The values widened to `f64`.
    pub fn values_f64(&self) -> Vec<f64> {
        match self {
            Samples::U8(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::I8(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::U16(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::I16(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::U32(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::I32(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::F32(v) => v.iter().map(|&x| x as f64).collect(),
            Samples::F64(v) => v.clone(),
        }
    }

    /// The values widened to `i64`; float values saturate.
    pub fn values_i64(&self) -> Vec<i64> {
        match self {
            Samples::U8(v) => v.iter().map(|&x| x as i64).collect(),
            Samples::I8(v) => v.iter().map(|&x| x as i64).collect(),
            Samples::U16(v) => v.iter().map(|&x| x as i64).collect(),
            Samples::I16(v) => v.iter().map(|&x| x as i64).collect(),
            Samples::U32(v) => v.iter().map(|&x| x as i64).collect(),
            Samples::I32(v) => v.iter().map(|&x| x as i64).collect(),
            Samples::F32(v) => v.iter().map(|&x| x as i64).collect(),
            Samples::F64(v) => v.iter().map(|&x| x as i64).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_format_round_trip() {
        for fmt in [SampleFormat::Uint, SampleFormat::Int, SampleFormat::Float] {
            assert_eq!(SampleFormat::from_u16(fmt.to_u16()), Some(fmt));
        }
        assert_eq!(SampleFormat::from_u16(4), None);
    }

    #[test]
    fn test_pixel_type_resolution() {
        assert_eq!(pixel_type_for(16, SampleFormat::Uint), Some(PixelType::U16));
        assert_eq!(pixel_type_for(32, SampleFormat::Int), Some(PixelType::I32));
        assert_eq!(pixel_type_for(32, SampleFormat::Float), Some(PixelType::F32));
        assert_eq!(pixel_type_for(64, SampleFormat::Float), Some(PixelType::F64));
        // 64-bit integers and narrow floats are out.
        assert_eq!(pixel_type_for(64, SampleFormat::Uint), None);
        assert_eq!(pixel_type_for(16, SampleFormat::Float), None);
        assert_eq!(pixel_type_for(12, SampleFormat::Uint), None);
    }

    #[test]
    fn test_le_byte_round_trip() {
        let samples = Samples::I16(vec![-300, 0, 299]);
        let bytes = samples.to_le_bytes();
        assert_eq!(bytes.len(), 6);
        assert_eq!(Samples::from_le_bytes(PixelType::I16, &bytes), samples);

        let samples = Samples::F64(vec![0.5, -2.25]);
        let bytes = samples.to_le_bytes();
        assert_eq!(Samples::from_le_bytes(PixelType::F64, &bytes), samples);
    }

    #[test]
    fn test_conversions() {
        let samples = Samples::F32(vec![-1.75, 0.0, 70000.25]);
        match samples.convert_to(PixelType::I32) {
            Samples::I32(v) => assert_eq!(v, vec![-1, 0, 70000]),
            other => panic!("unexpected variant {other:?}"),
        }
        match samples.convert_to(PixelType::U16) {
            // Float sources saturate at the target's range.
            Samples::U16(v) => assert_eq!(v, vec![0, 0, u16::MAX]),
            other => panic!("unexpected variant {other:?}"),
        }
        match Samples::U16(vec![42]).convert_to(PixelType::F64) {
            Samples::F64(v) => assert_eq!(v, vec![42.0]),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_float_to_integer_saturates() {
        let samples = Samples::F32(vec![5.0e9, -5.0e9, 1.0]);
        match samples.convert_to(PixelType::I32) {
            Samples::I32(v) => assert_eq!(v, vec![i32::MAX, i32::MIN, 1]),
            other => panic!("unexpected variant {other:?}"),
        }
        match Samples::F64(vec![-0.5, 300.0]).convert_to(PixelType::U8) {
            Samples::U8(v) => assert_eq!(v, vec![0, 255]),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_integer_narrowing_truncates() {
        // Integer sources narrow like an `as` cast.
        match Samples::I32(vec![70000, -1]).convert_to(PixelType::U16) {
            Samples::U16(v) => assert_eq!(v, vec![4464, u16::MAX]),
            other => panic!("unexpected variant {other:?}"),
        }
    }
}
