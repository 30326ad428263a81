//! Bounds-checked big-endian cursor over a seekable source.

use crate::error::{BdmvError, Result};
use std::io::{Read, Seek, SeekFrom};

/// Big-endian reader that refuses to read past the end of the source or of
/// the record it is currently inside.
pub struct BinaryReader<R> {
    inner: R,
    pos: u64,
    len: u64,
    /// End of the innermost open record, or `len`.
    limit: u64,
}

impl<R: Read + Seek> BinaryReader<R> {
    /// Wrap a source; the cursor starts at offset 0.
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner,
            pos: 0,
            len,
            limit: len,
        })
    }

    /// Total length of the source.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Bytes left before the current limit.
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.pos)
    }

    /// Move to an absolute offset within the current limit.
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        if pos > self.limit {
            return Err(BdmvError::TruncatedRecord {
                offset: self.limit,
                needed: pos - self.limit,
                available: 0,
            });
        }
        if pos != self.pos {
            self.inner.seek(SeekFrom::Start(pos))?;
            self.pos = pos;
        }
        Ok(())
    }

    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.ensure(count)?;
        self.seek(self.pos + count)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N as u64)?;
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        self.pos += N as u64;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Read a 4-byte tag and compare it with `expected`.
    pub fn expect_tag(&mut self, expected: &'static str) -> Result<()> {
        let found = self.read_array::<4>()?;
        if found != expected.as_bytes() {
            return Err(BdmvError::bad_magic(expected, &found));
        }
        Ok(())
    }

    /// Run `f` on the next `len` bytes, then continue right after them.
    ///
    /// Inside `f` the limit is narrowed to the record, so reads cannot spill
    /// into the following data. The cursor always ends up at the record end,
    /// however much `f` consumed.
    pub fn bounded<T>(&mut self, len: u64, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.ensure(len)?;
        let end = self.pos + len;

        let outer = std::mem::replace(&mut self.limit, end);
        let result = f(self);
        self.limit = outer;

        let value = result?;
        self.seek(end)?;
        Ok(value)
    }

    /// Record preceded by a 1-byte length.
    pub fn read_record<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let len = self.read_u8()?;
        self.bounded(u64::from(len), f)
    }

    /// Record preceded by a 2-byte length.
    pub fn read_long_record<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let len = self.read_u16()?;
        self.bounded(u64::from(len), f)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn ensure(&self, needed: u64) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(BdmvError::TruncatedRecord {
                offset: self.pos,
                needed,
                available,
            });
        }
        Ok(())
    }
}
