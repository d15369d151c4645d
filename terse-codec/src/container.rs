//! The `.trpx` container: a record stream of compressed frames.
//!
//! Each record is an ASCII descriptor element followed immediately by the
//! frame's bit payload as little-endian bytes:
//!
//! ```text
//! <Terse prolix_bits="16" signed="0" block="12" memory_size="1234"
//!        number_of_values="262144" rows="512" cols="512"/>
//! ```
//!
//! Records are simply concatenated; there is no central index and readers
//! scan sequentially. Because the payload is serialised byte-wise, the file
//! is identical regardless of the writing host's endianness.

use std::io::{Read, Write};

use crate::error::{Result, TerseError};
use crate::frame::Terse;
use crate::xml::XmlElement;
use crate::DESCRIPTOR_TAG;

/// An ordered stack of compressed frames backing one `.trpx` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerseStack {
    frames: Vec<Terse>,
}

impl TerseStack {
    /// An empty stack.
    pub fn new() -> Self {
        TerseStack::default()
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the stack holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Append a compressed frame.
    pub fn push(&mut self, frame: Terse) {
        self.frames.push(frame);
    }

    /// All frames in file order.
    pub fn frames(&self) -> &[Terse] {
        &self.frames
    }

    /// Frame by index.
    pub fn frame(&self, index: usize) -> Option<&Terse> {
        self.frames.get(index)
    }

    /// Parse a complete `.trpx` byte buffer.
    ///
    /// A buffer containing no frame record at all is an error, so truncated
    /// or foreign files cannot silently produce an empty stack.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut frames = Vec::new();
        let mut pos = 0;
        while let Some((frame, consumed)) = Terse::parse_record(&data[pos..])? {
            frames.push(frame);
            pos += consumed;
        }
        if frames.is_empty() {
            return Err(TerseError::BadDescriptor(
                "no Terse frame records found".into(),
            ));
        }
        Ok(TerseStack { frames })
    }

    /// Serialise all frames to a byte buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self
            .frames
            .iter()
            .map(|f| f.payload_bytes + 160)
            .sum::<usize>();
        let mut out = Vec::with_capacity(total);
        for frame in &self.frames {
            frame.write_record(&mut out);
        }
        out
    }

    /// Read a stack from a stream as one bulk transfer.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Write the stack to a stream as one bulk transfer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }
}

impl Terse {
    /// Parse one record from the head of `data`.
    ///
    /// Returns the frame and the number of bytes consumed, or `None` when no
    /// further descriptor occurs.
    pub(crate) fn parse_record(data: &[u8]) -> Result<Option<(Terse, usize)>> {
        let elem = match XmlElement::scan(data, DESCRIPTOR_TAG)? {
            Some(elem) => elem,
            None => return Ok(None),
        };

        let attr_u64 = |name: &str| -> Result<u64> {
            let raw = elem.attribute(name).ok_or_else(|| {
                TerseError::BadDescriptor(format!("missing attribute {name:?}"))
            })?;
            raw.trim().parse::<u64>().map_err(|_| {
                TerseError::BadDescriptor(format!("attribute {name}={raw:?} is not a number"))
            })
        };

        let prolix_bits = attr_u64("prolix_bits")? as u32;
        if !matches!(prolix_bits, 8 | 16 | 32 | 64) {
            return Err(TerseError::BadDescriptor(format!(
                "unsupported prolix_bits {prolix_bits}"
            )));
        }
        let signed = match attr_u64("signed")? {
            0 => false,
            1 => true,
            other => {
                return Err(TerseError::BadDescriptor(format!(
                    "signed must be 0 or 1, got {other}"
                )))
            }
        };
        let block = attr_u64("block")? as usize;
        if block == 0 {
            return Err(TerseError::BadDescriptor("block size is zero".into()));
        }
        let payload_bytes = attr_u64("memory_size")? as usize;
        let count = attr_u64("number_of_values")? as usize;
        let dim = match (elem.attribute("rows"), elem.attribute("cols")) {
            (Some(rows), Some(cols)) => {
                let rows = rows.trim().parse::<u32>().map_err(|_| {
                    TerseError::BadDescriptor(format!("rows={rows:?} is not a number"))
                })?;
                let cols = cols.trim().parse::<u32>().map_err(|_| {
                    TerseError::BadDescriptor(format!("cols={cols:?} is not a number"))
                })?;
                Some([rows, cols])
            }
            _ => None,
        };

        let payload_start = elem.end_offset();
        let payload_end = payload_start
            .checked_add(payload_bytes)
            .filter(|&end| end <= data.len())
            .ok_or(TerseError::TruncatedPayload)?;
        let payload = &data[payload_start..payload_end];

        let mut words = vec![0u64; payload_bytes.div_ceil(8)];
        for (i, chunk) in payload.chunks(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes[..chunk.len()].copy_from_slice(chunk);
            words[i] = u64::from_le_bytes(bytes);
        }

        Ok(Some((
            Terse {
                prolix_bits,
                signed,
                block,
                count,
                dim,
                words,
                payload_bytes,
            },
            payload_end,
        )))
    }

    /// Append one record — descriptor plus payload bytes — to `out`.
    pub(crate) fn write_record(&self, out: &mut Vec<u8>) {
        use std::fmt::Write as _;

        let mut descriptor = format!(
            "<{} prolix_bits=\"{}\" signed=\"{}\" block=\"{}\" memory_size=\"{}\" number_of_values=\"{}\"",
            DESCRIPTOR_TAG,
            self.prolix_bits,
            self.signed as u8,
            self.block,
            self.payload_bytes,
            self.count,
        );
        if let Some([rows, cols]) = self.dim {
            let _ = write!(descriptor, " rows=\"{rows}\" cols=\"{cols}\"");
        }
        descriptor.push_str("/>");
        out.extend_from_slice(descriptor.as_bytes());

        let mut remaining = self.payload_bytes;
        for word in &self.words {
            if remaining == 0 {
                break;
            }
            let bytes = word.to_le_bytes();
            let take = remaining.min(8);
            out.extend_from_slice(&bytes[..take]);
            remaining -= take;
        }
    }
}
