//! Cursor that walks a borrowed elementary-stream buffer one NAL unit at a time.

use crate::error::{NalError, Result};
use crate::header::{NalHeader, NalUnitType};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Annex-B start code prefix.
pub const START_CODE: [u8; 3] = [0x00, 0x00, 0x01];

/// How NAL units are delimited in the scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Framing {
    /// `00 00 01` start codes.
    #[default]
    AnnexB,
    /// Big-endian length field of the given size (1..=4 bytes) before each unit.
    LengthPrefixed(u8),
}

impl Framing {
    /// Length-prefixed framing, rejecting sizes outside 1..=4.
    pub fn length_prefixed(size: u8) -> Result<Self> {
        Framing::LengthPrefixed(size).validate()
    }

    fn validate(self) -> Result<Self> {
        match self {
            Framing::LengthPrefixed(size) if !(1..=4).contains(&size) => {
                Err(NalError::InvalidLengthSize(size))
            }
            framing => Ok(framing),
        }
    }
}

/// Location and header of one NAL unit inside the scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct NalUnit {
    /// First byte of the start code or length prefix.
    pub start_offset: usize,
    /// The header byte.
    pub data_offset: usize,
    /// Where the following unit is expected to begin.
    pub next_unit_hint_offset: usize,
    pub forbidden_bit: bool,
    pub nal_ref_idc: u8,
    pub nal_unit_type: NalUnitType,
}

impl NalUnit {
    pub fn header(&self) -> NalHeader {
        NalHeader {
            forbidden_bit: self.forbidden_bit,
            nal_ref_idc: self.nal_ref_idc,
            nal_unit_type: self.nal_unit_type,
        }
    }

    /// Bytes from the header byte up to the next unit hint.
    pub fn data_len(&self) -> usize {
        self.next_unit_hint_offset.saturating_sub(self.data_offset)
    }

    /// Bytes including the start code or length prefix.
    pub fn total_len(&self) -> usize {
        self.next_unit_hint_offset.saturating_sub(self.start_offset)
    }
}

/// Scanner over a caller-owned buffer.
///
/// The buffer is borrowed for the lifetime of the scanner; units are reported
/// as offsets and never copied. Once the end of the buffer is reached (or an
/// error is returned) the scanner stays exhausted until [`set_buffer`] is
/// called again.
///
/// [`set_buffer`]: NalScanner::set_buffer
#[derive(Debug, Clone, Default)]
pub struct NalScanner<'a> {
    buffer: &'a [u8],
    framing: Framing,
    cursor: usize,
    /// Offset of the next length prefix; only used for length-prefixed framing.
    next_boundary: Option<usize>,
}

impl<'a> NalScanner<'a> {
    pub fn new(buffer: &'a [u8], framing: Framing) -> Result<Self> {
        let mut scanner = Self::default();
        scanner.set_buffer(buffer, framing)?;
        Ok(scanner)
    }

    /// Bind a new buffer and rewind to its first byte.
    pub fn set_buffer(&mut self, buffer: &'a [u8], framing: Framing) -> Result<()> {
        let framing = framing.validate()?;
        self.buffer = buffer;
        self.framing = framing;
        self.cursor = 0;
        self.next_boundary = match framing {
            Framing::AnnexB => None,
            Framing::LengthPrefixed(_) => Some(0),
        };
        Ok(())
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Current cursor offset.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Payload bytes of a unit produced by this scanner, header byte included.
    pub fn unit_data(&self, unit: &NalUnit) -> &'a [u8] {
        let end = unit.next_unit_hint_offset.min(self.buffer.len());
        self.buffer.get(unit.data_offset..end).unwrap_or(&[])
    }

    /// Advance to the next unit.
    ///
    /// Returns `Ok(None)` once the cursor has reached the end of the buffer.
    pub fn read_next(&mut self) -> Result<Option<NalUnit>> {
        if self.cursor >= self.buffer.len() {
            return Ok(None);
        }

        let result = self.advance();
        if let Err(ref e) = result {
            debug!("Stopping NAL scan: {}", e);
            self.cursor = self.buffer.len();
        }
        result
    }

    fn advance(&mut self) -> Result<Option<NalUnit>> {
        let len = self.buffer.len();

        let (start_offset, data_offset) = match (self.framing, self.next_boundary) {
            (Framing::LengthPrefixed(size), Some(boundary)) if boundary == self.cursor => {
                let size = usize::from(size);
                let start = self.cursor;
                let prefix = self
                    .buffer
                    .get(start..start + size)
                    .ok_or_else(|| NalError::truncated(start, size, len))?;
                let unit_len = prefix
                    .iter()
                    .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));

                let data = start + size;
                // An empty unit has no header byte.
                if unit_len == 0 || unit_len > len - data {
                    return Err(NalError::truncated(data, unit_len.max(1), len));
                }
                self.next_boundary = Some(data + unit_len);
                (start, data)
            }
            _ => match find_start_code(self.buffer, self.cursor, len) {
                Some(start) => {
                    let data = start + START_CODE.len();
                    // A start code closing a record has no header byte before the next prefix.
                    if let Some(boundary) = self.next_boundary {
                        if data >= boundary {
                            return Err(NalError::truncated(data, 1, boundary));
                        }
                    }
                    (start, data)
                }
                None => {
                    trace!("No start code after offset {}", self.cursor);
                    self.cursor = len;
                    return Ok(None);
                }
            },
        };

        let header_byte = *self
            .buffer
            .get(data_offset)
            .ok_or_else(|| NalError::truncated(data_offset, 1, len))?;

        self.cursor = self.next_unit_hint(data_offset);
        let header = NalHeader::from_byte(header_byte);

        let unit = NalUnit {
            start_offset,
            data_offset,
            next_unit_hint_offset: self.cursor,
            forbidden_bit: header.forbidden_bit,
            nal_ref_idc: header.nal_ref_idc,
            nal_unit_type: header.nal_unit_type,
        };
        trace!(
            "NAL {} at {} ({} bytes, ref_idc {})",
            unit.nal_unit_type,
            unit.start_offset,
            unit.data_len(),
            unit.nal_ref_idc
        );
        Ok(Some(unit))
    }

    /// Next start code after `from`, bounded by the pending length boundary;
    /// falls back to that boundary or the end of the buffer.
    fn next_unit_hint(&self, from: usize) -> usize {
        let len = self.buffer.len();
        let limit = self.next_boundary.map_or(len, |b| b.min(len));

        match find_start_code(self.buffer, from, limit) {
            Some(pos) => pos,
            None => match self.next_boundary {
                Some(boundary) if boundary < len => boundary,
                _ => len,
            },
        }
    }
}

impl<'a> Iterator for NalScanner<'a> {
    type Item = Result<NalUnit>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

impl<'a> FusedIterator for NalScanner<'a> {}

/// Offset of the first complete `00 00 01` in `buffer[from..limit]`.
fn find_start_code(buffer: &[u8], from: usize, limit: usize) -> Option<usize> {
    buffer
        .get(from..limit)?
        .windows(START_CODE.len())
        .position(|w| w == START_CODE)
        .map(|pos| from + pos)
}
