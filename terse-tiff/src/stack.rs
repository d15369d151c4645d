//! The `GreyTif` image stack.

use std::io::{Read, Write};

use byteorder::{ByteOrder, LittleEndian};
use terse_core::PixelType;
use tracing::warn;

use crate::error::{Result, TifError};
use crate::ifd::{swap_strip, write_entry, BufCursor, IfdEntry};
use crate::tags::{field_type, tag, tag_name};
use crate::types::{pixel_type_for, SampleFormat, Samples};
use crate::{TIFF_MAGIC_BE, TIFF_MAGIC_LE, TIFF_VERSION};

/// Ceiling on the IFD chain length, against cyclic next-IFD links.
const MAX_IFD_CHAIN: usize = 65_535;

/// Location and shape of one image inside the backing buffer.
#[derive(Debug, Clone, Copy)]
struct FrameInfo {
    /// `[rows, cols]`.
    dim: [u32; 2],
    pixel: PixelType,
    /// Byte offset of the pixel strip.
    offset: usize,
}

impl FrameInfo {
    fn byte_len(&self) -> usize {
        self.dim[0] as usize * self.dim[1] as usize * self.pixel.byte_size()
    }
}

/// A read-only view of one image in a [`GreyTif`] stack.
///
/// Views are materialised on demand from the container's frame table, so
/// they never dangle across appends. Pixels are row-major:
/// `(i, j) = i * cols + j`.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    data: &'a [u8],
    dim: [u32; 2],
    pixel: PixelType,
}

impl<'a> Frame<'a> {
    /// Dimensions as `[rows, cols]`.
    pub fn dim(&self) -> [u32; 2] {
        self.dim
    }

    /// Number of pixel rows.
    pub fn rows(&self) -> u32 {
        self.dim[0]
    }

    /// Number of pixel columns.
    pub fn cols(&self) -> u32 {
        self.dim[1]
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.dim[0] as usize * self.dim[1] as usize
    }

    /// Whether the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The frame's runtime pixel type.
    pub fn pixel_type(&self) -> PixelType {
        self.pixel
    }

    /// The raw little-endian pixel strip.
    pub fn raw_data(&self) -> &'a [u8] {
        self.data
    }

    /// Decode the strip into a typed sample vector.
    pub fn samples(&self) -> Samples {
        Samples::from_le_bytes(self.pixel, self.data)
    }
}

/// An ordered stack of greyscale images over one contiguous TIFF buffer.
///
/// The container owns the backing bytes; [`GreyTif::frame`] materialises
/// typed views on demand. Appending never invalidates previously returned
/// data because views borrow the container for their lifetime.
#[derive(Debug, Clone)]
pub struct GreyTif {
    buf: Vec<u8>,
    frames: Vec<FrameInfo>,
    /// Offset of the u32 that holds the next-IFD link to patch on append.
    last_link: usize,
}

impl Default for GreyTif {
    fn default() -> Self {
        GreyTif::new()
    }
}

impl GreyTif {
    /// An empty stack: an 8-byte header and no images.
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(8);
        buf.extend_from_slice(&TIFF_MAGIC_LE);
        buf.extend_from_slice(&TIFF_VERSION.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        GreyTif {
            buf,
            frames: Vec::new(),
            last_link: 4,
        }
    }

    /// Parse a TIFF byte buffer, taking ownership of it.
    ///
    /// Big-endian input is converted to little endian in place: header and
    /// IFD fields as the parse visits them, pixel strips by element size.
    pub fn from_bytes(mut buf: Vec<u8>) -> Result<Self> {
        if buf.len() < 8 {
            return Err(TifError::Truncated {
                needed: 8,
                available: buf.len(),
            });
        }
        let order = [buf[0], buf[1]];
        let native = if order == TIFF_MAGIC_LE {
            true
        } else if order == TIFF_MAGIC_BE {
            false
        } else {
            return Err(TifError::BadHeader);
        };

        let first_ifd = {
            let mut cursor = BufCursor::new(&mut buf, 2, native);
            if cursor.read_u16()? != TIFF_VERSION {
                return Err(TifError::BadHeader);
            }
            cursor.read_u32()?
        };
        buf[0] = b'I';
        buf[1] = b'I';

        let mut frames = Vec::new();
        let mut last_link = 4usize;
        let mut offset = first_ifd as usize;
        while offset != 0 {
            if frames.len() >= MAX_IFD_CHAIN {
                return Err(TifError::Unsupported("IFD chain too long".into()));
            }
            let (info, link, next) = Self::parse_ifd(&mut buf, offset, native)?;
            if !native {
                let strip = &mut buf[info.offset..info.offset + info.byte_len()];
                swap_strip(strip, info.pixel.byte_size());
            }
            frames.push(info);
            last_link = link;
            offset = next as usize;
        }

        Ok(GreyTif {
            buf,
            frames,
            last_link,
        })
    }

    /// Walk one IFD, returning the frame it describes, the offset of its
    /// next-IFD link, and the link's value.
    fn parse_ifd(buf: &mut Vec<u8>, offset: usize, native: bool) -> Result<(FrameInfo, usize, u32)> {
        let mut cursor = BufCursor::new(buf, offset, native);
        let entry_count = cursor.read_u16()?;

        let mut cols: Option<u32> = None;
        let mut rows: Option<u32> = None;
        let mut bits: Option<u16> = None;
        let mut format = SampleFormat::default();
        let mut strip_offset: Option<u32> = None;
        let mut strip_bytes: Option<u32> = None;

        for _ in 0..entry_count {
            let entry = IfdEntry::read(&mut cursor)?;
            match entry.tag {
                tag::IMAGE_WIDTH => cols = entry.inline_u32(),
                tag::IMAGE_LENGTH => rows = entry.inline_u32(),
                tag::BITS_PER_SAMPLE => {
                    if entry.count != 1 {
                        return Err(TifError::Unsupported(
                            "more than one sample per pixel".into(),
                        ));
                    }
                    bits = entry.inline_u32().map(|v| v as u16);
                }
                tag::COMPRESSION => {
                    if entry.value != 1 {
                        warn!(compression = entry.value, "rejecting compressed TIFF");
                        return Err(TifError::Unsupported(format!(
                            "compression scheme {}",
                            entry.value
                        )));
                    }
                }
                tag::PHOTOMETRIC_INTERPRETATION => {
                    if entry.value > 1 {
                        warn!(photometric = entry.value, "rejecting non-greyscale TIFF");
                        return Err(TifError::NotGreyscale(entry.value as u16));
                    }
                }
                tag::SAMPLES_PER_PIXEL => {
                    if entry.value != 1 {
                        return Err(TifError::Unsupported(format!(
                            "{} samples per pixel",
                            entry.value
                        )));
                    }
                }
                tag::PLANAR_CONFIGURATION => {
                    if entry.value != 1 {
                        return Err(TifError::Unsupported(format!(
                            "planar configuration {}",
                            entry.value
                        )));
                    }
                }
                tag::SAMPLE_FORMAT => {
                    format = SampleFormat::from_u16(entry.value as u16).ok_or_else(|| {
                        TifError::Unsupported(format!("sample format {}", entry.value))
                    })?;
                }
                tag::STRIP_OFFSETS => {
                    if entry.count != 1 {
                        warn!(strips = entry.count, "rejecting multi-strip TIFF");
                        return Err(TifError::MultiStrip);
                    }
                    strip_offset = entry.inline_u32();
                }
                tag::STRIP_BYTE_COUNTS => {
                    if entry.count != 1 {
                        return Err(TifError::MultiStrip);
                    }
                    strip_bytes = entry.inline_u32();
                }
                _ => {}
            }
        }
        let link = cursor.pos();
        let next = cursor.read_u32()?;

        let cols = cols.ok_or_else(|| TifError::MissingTag(tag_name(tag::IMAGE_WIDTH).into()))?;
        let rows = rows.ok_or_else(|| TifError::MissingTag(tag_name(tag::IMAGE_LENGTH).into()))?;
        let bits = bits.unwrap_or(1);
        if !matches!(bits, 8 | 16 | 32 | 64) {
            return Err(TifError::UnsupportedBitDepth(bits));
        }
        let pixel = pixel_type_for(bits, format).ok_or_else(|| {
            TifError::Unsupported(format!("{bits}-bit samples with format {}", format.to_u16()))
        })?;
        let data_offset = strip_offset
            .ok_or_else(|| TifError::MissingTag(tag_name(tag::STRIP_OFFSETS).into()))?
            as usize;

        let info = FrameInfo {
            dim: [rows, cols],
            pixel,
            offset: data_offset,
        };
        let expected = info.byte_len();
        if let Some(actual) = strip_bytes {
            if actual as usize != expected {
                return Err(TifError::DimensionMismatch {
                    expected,
                    actual: actual as usize,
                });
            }
        }
        if data_offset + expected > buf.len() {
            return Err(TifError::Truncated {
                needed: data_offset + expected,
                available: buf.len(),
            });
        }
        Ok((info, link, next))
    }

    /// Read a stack from a stream as one bulk transfer.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_bytes(buf)
    }

    /// The emitted TIFF bytes: `II`, magic 42, one strip per image.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the stack, returning the TIFF bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Write the TIFF bytes to a stream as one bulk transfer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.buf)?;
        Ok(())
    }

    /// Number of images in the stack.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the stack holds no images.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// View of the image at `index`.
    pub fn frame(&self, index: usize) -> Option<Frame<'_>> {
        self.frames.get(index).map(|info| Frame {
            data: &self.buf[info.offset..info.offset + info.byte_len()],
            dim: info.dim,
            pixel: info.pixel,
        })
    }

    /// Iterate over all image views in stack order.
    pub fn frames(&self) -> impl Iterator<Item = Frame<'_>> {
        (0..self.frames.len()).filter_map(|i| self.frame(i))
    }

    /// Append an image from raw little-endian pixel bytes.
    ///
    /// The buffer is padded to an even length before the strip and before
    /// the new IFD; the previous next-IFD link is patched to the new IFD.
    pub fn push_frame(&mut self, pixel: PixelType, dim: [u32; 2], data: &[u8]) -> Result<()> {
        let [rows, cols] = dim;
        let expected = rows as usize * cols as usize * pixel.byte_size();
        if data.len() != expected {
            return Err(TifError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        let grown = self.buf.len() + expected + 2 + 7 * 12 + 4 + 2;
        if grown > u32::MAX as usize {
            return Err(TifError::Unsupported("TIFF larger than 4 GiB".into()));
        }

        if self.buf.len() % 2 == 1 {
            self.buf.push(0);
        }
        let data_start = self.buf.len();
        self.buf.extend_from_slice(data);
        if self.buf.len() % 2 == 1 {
            self.buf.push(0);
        }
        let ifd_start = self.buf.len();
        LittleEndian::write_u32(
            &mut self.buf[self.last_link..self.last_link + 4],
            ifd_start as u32,
        );

        self.buf.extend_from_slice(&7u16.to_le_bytes());
        write_entry(&mut self.buf, tag::IMAGE_WIDTH, field_type::LONG, cols);
        write_entry(&mut self.buf, tag::IMAGE_LENGTH, field_type::LONG, rows);
        write_entry(
            &mut self.buf,
            tag::BITS_PER_SAMPLE,
            field_type::SHORT,
            pixel.bits(),
        );
        write_entry(&mut self.buf, tag::COMPRESSION, field_type::SHORT, 1);
        write_entry(
            &mut self.buf,
            tag::PHOTOMETRIC_INTERPRETATION,
            field_type::SHORT,
            1,
        );
        write_entry(
            &mut self.buf,
            tag::STRIP_OFFSETS,
            field_type::LONG,
            data_start as u32,
        );
        write_entry(
            &mut self.buf,
            tag::SAMPLE_FORMAT,
            field_type::SHORT,
            SampleFormat::of(pixel).to_u16() as u32,
        );
        self.last_link = self.buf.len();
        self.buf.extend_from_slice(&0u32.to_le_bytes());

        self.frames.push(FrameInfo {
            dim,
            pixel,
            offset: data_start,
        });
        Ok(())
    }

    /// Append an image from a typed sample vector.
    pub fn push_samples(&mut self, samples: &Samples, dim: [u32; 2]) -> Result<()> {
        self.push_frame(samples.pixel_type(), dim, &samples.to_le_bytes())
    }

    /// Rewrite every image to the given pixel type.
    ///
    /// Values are numerically converted; a fresh backing buffer is built,
    /// so element sizes are free to change. A no-op when every frame
    /// already has the target type.
    pub fn regularize(&mut self, pixel: PixelType) -> Result<()> {
        if self.frames.iter().all(|f| f.pixel == pixel) {
            return Ok(());
        }
        let mut out = GreyTif::new();
        for info in &self.frames {
            let data = &self.buf[info.offset..info.offset + info.byte_len()];
            let converted = Samples::from_le_bytes(info.pixel, data).convert_to(pixel);
            out.push_samples(&converted, info.dim)?;
        }
        *self = out;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a little-endian TIFF with one IFD from explicit entries.
    /// Entries are `(tag, type, count, value)`; data sits at offset 8.
    fn build_tiff_le(entries: &[(u16, u16, u32, u32)], data: &[u8]) -> Vec<u8> {
        assert_eq!(data.len() % 2, 0);
        let mut buf = Vec::new();
        buf.extend_from_slice(&TIFF_MAGIC_LE);
        buf.extend_from_slice(&TIFF_VERSION.to_le_bytes());
        buf.extend_from_slice(&((8 + data.len()) as u32).to_le_bytes());
        buf.extend_from_slice(data);
        buf.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        for &(t, ty, count, value) in entries {
            buf.extend_from_slice(&t.to_le_bytes());
            buf.extend_from_slice(&ty.to_le_bytes());
            buf.extend_from_slice(&count.to_le_bytes());
            match ty {
                field_type::SHORT if count == 1 => {
                    buf.extend_from_slice(&(value as u16).to_le_bytes());
                    buf.extend_from_slice(&[0, 0]);
                }
                _ => buf.extend_from_slice(&value.to_le_bytes()),
            }
        }
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf
    }

    fn base_entries(rows: u32, cols: u32, bits: u32, format: u32) -> Vec<(u16, u16, u32, u32)> {
        vec![
            (tag::IMAGE_WIDTH, field_type::LONG, 1, cols),
            (tag::IMAGE_LENGTH, field_type::LONG, 1, rows),
            (tag::BITS_PER_SAMPLE, field_type::SHORT, 1, bits),
            (tag::COMPRESSION, field_type::SHORT, 1, 1),
            (tag::PHOTOMETRIC_INTERPRETATION, field_type::SHORT, 1, 1),
            (tag::STRIP_OFFSETS, field_type::LONG, 1, 8),
            (tag::SAMPLE_FORMAT, field_type::SHORT, 1, format),
        ]
    }

    #[test]
    fn test_empty_stack_round_trip() {
        let tif = GreyTif::new();
        assert!(tif.is_empty());
        let back = GreyTif::from_bytes(tif.as_bytes().to_vec()).unwrap();
        assert_eq!(back.len(), 0);
    }

    #[test]
    fn test_push_and_reparse() {
        let pixels: Vec<u16> = (0..16).map(|i| if i == 0 { 42 } else { i }).collect();
        let mut tif = GreyTif::new();
        tif.push_samples(&Samples::U16(pixels.clone()), [4, 4]).unwrap();

        let bytes = tif.as_bytes().to_vec();
        assert_eq!(&bytes[..2], b"II");
        let back = GreyTif::from_bytes(bytes).unwrap();
        assert_eq!(back.len(), 1);
        let frame = back.frame(0).unwrap();
        assert_eq!(frame.dim(), [4, 4]);
        assert_eq!(frame.pixel_type(), PixelType::U16);
        assert_eq!(frame.samples(), Samples::U16(pixels));
    }

    #[test]
    fn test_foreign_endian_conversion() {
        // The same 4x4 u16 image, hand-written by a big-endian host.
        let pixels: Vec<u16> = (0..16).map(|i| if i == 0 { 42 } else { i }).collect();
        let mut buf = Vec::new();
        buf.extend_from_slice(&TIFF_MAGIC_BE);
        buf.extend_from_slice(&TIFF_VERSION.to_be_bytes());
        buf.extend_from_slice(&40u32.to_be_bytes()); // 8 + 32 bytes of pixels
        for &p in &pixels {
            buf.extend_from_slice(&p.to_be_bytes());
        }
        buf.extend_from_slice(&7u16.to_be_bytes());
        let entries: [(u16, u16, u32); 7] = [
            (tag::IMAGE_WIDTH, field_type::LONG, 4),
            (tag::IMAGE_LENGTH, field_type::LONG, 4),
            (tag::BITS_PER_SAMPLE, field_type::SHORT, 16),
            (tag::COMPRESSION, field_type::SHORT, 1),
            (tag::PHOTOMETRIC_INTERPRETATION, field_type::SHORT, 1),
            (tag::STRIP_OFFSETS, field_type::LONG, 8),
            (tag::SAMPLE_FORMAT, field_type::SHORT, 1),
        ];
        for (t, ty, value) in entries {
            buf.extend_from_slice(&t.to_be_bytes());
            buf.extend_from_slice(&ty.to_be_bytes());
            buf.extend_from_slice(&1u32.to_be_bytes());
            if ty == field_type::SHORT {
                buf.extend_from_slice(&(value as u16).to_be_bytes());
                buf.extend_from_slice(&[0, 0]);
            } else {
                buf.extend_from_slice(&value.to_be_bytes());
            }
        }
        buf.extend_from_slice(&0u32.to_be_bytes());

        let tif = GreyTif::from_bytes(buf).unwrap();
        let frame = tif.frame(0).unwrap();
        assert_eq!(frame.dim(), [4, 4]);
        assert_eq!(frame.samples(), Samples::U16(pixels));
        // The buffer has been normalised to little endian.
        assert_eq!(&tif.as_bytes()[..2], b"II");
        let again = GreyTif::from_bytes(tif.as_bytes().to_vec()).unwrap();
        assert_eq!(again.frame(0).unwrap().samples(), frame.samples());
    }

    #[test]
    fn test_mixed_type_stack() {
        let mut tif = GreyTif::new();
        tif.push_samples(&Samples::U16(vec![1, 2, 3, 4]), [2, 2]).unwrap();
        tif.push_samples(&Samples::U32(vec![5, 6]), [1, 2]).unwrap();
        tif.push_samples(&Samples::I16(vec![-7, 8]), [2, 1]).unwrap();

        let back = GreyTif::from_bytes(tif.into_bytes()).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back.frame(0).unwrap().pixel_type(), PixelType::U16);
        assert_eq!(back.frame(1).unwrap().pixel_type(), PixelType::U32);
        assert_eq!(back.frame(2).unwrap().pixel_type(), PixelType::I16);
        assert_eq!(back.frame(1).unwrap().samples(), Samples::U32(vec![5, 6]));
        assert_eq!(back.frame(2).unwrap().samples(), Samples::I16(vec![-7, 8]));
        assert_eq!(back.frame(2).unwrap().dim(), [2, 1]);
    }

    #[test]
    fn test_float_frames() {
        let mut tif = GreyTif::new();
        tif.push_samples(&Samples::F32(vec![0.5, -1.5]), [1, 2]).unwrap();
        tif.push_samples(&Samples::F64(vec![2.25]), [1, 1]).unwrap();
        let back = GreyTif::from_bytes(tif.into_bytes()).unwrap();
        assert_eq!(back.frame(0).unwrap().samples(), Samples::F32(vec![0.5, -1.5]));
        assert_eq!(back.frame(1).unwrap().samples(), Samples::F64(vec![2.25]));
    }

    #[test]
    fn test_bad_header_rejected() {
        assert!(matches!(
            GreyTif::from_bytes(b"PK\x03\x04....".to_vec()),
            Err(TifError::BadHeader)
        ));
        let mut buf = GreyTif::new().into_bytes();
        buf[2] = 43;
        assert!(matches!(
            GreyTif::from_bytes(buf),
            Err(TifError::BadHeader)
        ));
        assert!(matches!(
            GreyTif::from_bytes(vec![b'I', b'I']),
            Err(TifError::Truncated { .. })
        ));
    }

    #[test]
    fn test_compressed_tiff_rejected() {
        let mut entries = base_entries(1, 2, 8, 1);
        entries[3] = (tag::COMPRESSION, field_type::SHORT, 1, 5);
        let buf = build_tiff_le(&entries, &[0, 0]);
        assert!(matches!(
            GreyTif::from_bytes(buf),
            Err(TifError::Unsupported(_))
        ));
    }

    #[test]
    fn test_colour_tiff_rejected() {
        let mut entries = base_entries(1, 2, 8, 1);
        entries[4] = (tag::PHOTOMETRIC_INTERPRETATION, field_type::SHORT, 1, 2);
        let buf = build_tiff_le(&entries, &[0, 0]);
        assert!(matches!(
            GreyTif::from_bytes(buf),
            Err(TifError::NotGreyscale(2))
        ));
    }

    #[test]
    fn test_multi_strip_rejected() {
        let mut entries = base_entries(1, 2, 8, 1);
        entries[5] = (tag::STRIP_OFFSETS, field_type::LONG, 2, 8);
        let buf = build_tiff_le(&entries, &[0, 0]);
        assert!(matches!(GreyTif::from_bytes(buf), Err(TifError::MultiStrip)));
    }

    #[test]
    fn test_odd_bit_depth_rejected() {
        let entries = base_entries(1, 2, 12, 1);
        let buf = build_tiff_le(&entries, &[0, 0]);
        assert!(matches!(
            GreyTif::from_bytes(buf),
            Err(TifError::UnsupportedBitDepth(12))
        ));
    }

    #[test]
    fn test_truncated_strip_rejected() {
        // Dimensions promise 100 pixels but only 2 bytes follow.
        let entries = base_entries(10, 10, 8, 1);
        let buf = build_tiff_le(&entries, &[0, 0]);
        assert!(matches!(
            GreyTif::from_bytes(buf),
            Err(TifError::Truncated { .. })
        ));
    }

    #[test]
    fn test_strip_byte_count_mismatch_rejected() {
        let mut entries = base_entries(1, 2, 8, 1);
        entries.push((tag::STRIP_BYTE_COUNTS, field_type::LONG, 1, 7));
        let buf = build_tiff_le(&entries, &[0, 0]);
        assert!(matches!(
            GreyTif::from_bytes(buf),
            Err(TifError::DimensionMismatch {
                expected: 2,
                actual: 7,
            })
        ));
    }

    #[test]
    fn test_push_dimension_mismatch() {
        let mut tif = GreyTif::new();
        let err = tif
            .push_frame(PixelType::U16, [2, 2], &[0u8; 6])
            .unwrap_err();
        assert!(matches!(
            err,
            TifError::DimensionMismatch {
                expected: 8,
                actual: 6,
            }
        ));
    }

    #[test]
    fn test_regularize_mixed_stack() {
        let mut tif = GreyTif::new();
        tif.push_samples(&Samples::U16(vec![1, 2]), [1, 2]).unwrap();
        tif.push_samples(&Samples::F32(vec![3.75, -2.25]), [1, 2]).unwrap();
        tif.regularize(PixelType::I32).unwrap();

        assert_eq!(tif.len(), 2);
        assert_eq!(tif.frame(0).unwrap().samples(), Samples::I32(vec![1, 2]));
        assert_eq!(tif.frame(1).unwrap().samples(), Samples::I32(vec![3, -2]));

        // Already-regular stacks are left alone.
        let before = tif.as_bytes().to_vec();
        tif.regularize(PixelType::I32).unwrap();
        assert_eq!(tif.as_bytes(), &before[..]);
    }

    #[test]
    fn test_append_after_reparse() {
        // Re-parsing leaves the next-IFD link ready for further appends.
        let mut tif = GreyTif::new();
        tif.push_samples(&Samples::U16(vec![1, 2]), [1, 2]).unwrap();
        let mut back = GreyTif::from_bytes(tif.into_bytes()).unwrap();
        back.push_samples(&Samples::U16(vec![3, 4]), [1, 2]).unwrap();

        let again = GreyTif::from_bytes(back.into_bytes()).unwrap();
        assert_eq!(again.len(), 2);
        assert_eq!(again.frame(0).unwrap().samples(), Samples::U16(vec![1, 2]));
        assert_eq!(again.frame(1).unwrap().samples(), Samples::U16(vec![3, 4]));
    }

    #[test]
    fn test_even_padding_between_frames() {
        let mut tif = GreyTif::new();
        tif.push_samples(&Samples::U8(vec![1, 2, 3]), [1, 3]).unwrap();
        tif.push_samples(&Samples::U8(vec![4]), [1, 1]).unwrap();
        let back = GreyTif::from_bytes(tif.into_bytes()).unwrap();
        assert_eq!(back.frame(0).unwrap().samples(), Samples::U8(vec![1, 2, 3]));
        assert_eq!(back.frame(1).unwrap().samples(), Samples::U8(vec![4]));
    }
}
