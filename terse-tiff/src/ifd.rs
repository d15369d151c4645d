//! IFD entry access over the in-memory TIFF buffer.
//!
//! Parsing works directly on the backing byte buffer. When the file arrived
//! in foreign (big-endian) order, every integer field is rewritten to little
//! endian as it is visited, so one parse pass leaves the whole structure
//! native; pixel strips are swapped separately by element size.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Result, TifError};
use crate::tags::field_type;

/// A cursor over the TIFF buffer that normalises fields as it reads them.
///
/// With `native == false` each read also writes the value back in little
/// endian, converting the buffer in place.
pub(crate) struct BufCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
    native: bool,
}

impl<'a> BufCursor<'a> {
    pub(crate) fn new(buf: &'a mut [u8], pos: usize, native: bool) -> Self {
        BufCursor { buf, pos, native }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn need(&self, bytes: usize) -> Result<()> {
        if self.pos + bytes > self.buf.len() {
            return Err(TifError::Truncated {
                needed: self.pos + bytes,
                available: self.buf.len(),
            });
        }
        Ok(())
    }

    /// Skip `bytes` without interpretation.
    pub(crate) fn skip(&mut self, bytes: usize) -> Result<()> {
        self.need(bytes)?;
        self.pos += bytes;
        Ok(())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        self.need(1)?;
        let v = self.buf[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16> {
        self.need(2)?;
        let field = &mut self.buf[self.pos..self.pos + 2];
        let v = if self.native {
            LittleEndian::read_u16(field)
        } else {
            let v = BigEndian::read_u16(field);
            LittleEndian::write_u16(field, v);
            v
        };
        self.pos += 2;
        Ok(v)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        self.need(4)?;
        let field = &mut self.buf[self.pos..self.pos + 4];
        let v = if self.native {
            LittleEndian::read_u32(field)
        } else {
            let v = BigEndian::read_u32(field);
            LittleEndian::write_u32(field, v);
            v
        };
        self.pos += 4;
        Ok(v)
    }
}

/// One 12-byte IFD entry, with its value field decoded.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IfdEntry {
    pub tag: u16,
    pub type_id: u16,
    pub count: u32,
    /// The inline value, when the field fits in the 4-byte slot;
    /// otherwise the offset of the externally stored data.
    pub value: u32,
    /// Whether `value` is an offset rather than the value itself.
    pub external: bool,
}

impl IfdEntry {
    /// Read one entry, normalising its fields in place.
    pub(crate) fn read(cursor: &mut BufCursor<'_>) -> Result<IfdEntry> {
        let tag = cursor.read_u16()?;
        let type_id = cursor.read_u16()?;
        let count = cursor.read_u32()?;
        let total = field_type::size(type_id) * count as usize;
        let external = total > 4;

        let value = if external {
            cursor.read_u32()?
        } else {
            // Inline values are left-justified in the 4-byte slot.
            match type_id {
                field_type::BYTE | field_type::ASCII | field_type::SBYTE
                | field_type::UNDEFINED => {
                    let v = cursor.read_u8()? as u32;
                    cursor.skip(3)?;
                    v
                }
                field_type::SHORT | field_type::SSHORT => {
                    let v = cursor.read_u16()? as u32;
                    // Two packed values fill the slot; the second must go
                    // through read_u16 so a foreign entry is normalised.
                    if count == 2 {
                        cursor.read_u16()?;
                    } else {
                        cursor.skip(2)?;
                    }
                    v
                }
                _ => cursor.read_u32()?,
            }
        };

        Ok(IfdEntry {
            tag,
            type_id,
            count,
            value,
            external,
        })
    }

    /// The entry's inline scalar value; `None` when stored externally.
    pub(crate) fn inline_u32(&self) -> Option<u32> {
        (!self.external).then_some(self.value)
    }
}

/// Append one 12-byte entry with a single inline value to `out`.
pub(crate) fn write_entry(out: &mut Vec<u8>, tag: u16, type_id: u16, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&type_id.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    match type_id {
        field_type::SHORT => {
            out.extend_from_slice(&(value as u16).to_le_bytes());
            out.extend_from_slice(&[0, 0]);
        }
        _ => out.extend_from_slice(&value.to_le_bytes()),
    }
}

/// Byte-swap a strip of pixels of the given element size in place.
pub(crate) fn swap_strip(strip: &mut [u8], element_size: usize) {
    match element_size {
        2 => strip.chunks_exact_mut(2).for_each(|c| c.swap(0, 1)),
        4 => strip.chunks_exact_mut(4).for_each(|c| c.reverse()),
        8 => strip.chunks_exact_mut(8).for_each(|c| c.reverse()),
        _ => {}
    }
}
