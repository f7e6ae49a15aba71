//! # Stream Reader
//!
//! A bounds-checked read cursor over one record's bytes.
//!
//! All integers are little-endian. Every read either consumes exactly the
//! bytes it decodes or fails with [`DecodeError::OutOfBounds`] and leaves
//! the cursor where it was. Input comes straight off the wire and may be
//! truncated or hostile, so nothing here ever indexes past `len()`.
//!
//! Text is Latin-1: each byte maps to the code point of the same value,
//! which makes every byte sequence decodable.
//!
//! # Example
//!
//! ```
//! use seq_protocol::NetStream;
//!
//! let data = [0x2a, 0x00, 0x00, 0x00, b'h', b'i', 0x00];
//! let mut stream = NetStream::new(&data);
//!
//! assert_eq!(stream.read_u32().unwrap(), 42);
//! assert_eq!(stream.read_cstring().unwrap(), "hi");
//! assert!(stream.read_u8().is_err());
//! ```

use crate::error::{DecodeError, Result};
use crate::text::latin1_to_string;
use bytes::Buf;

/// Read cursor over a borrowed byte buffer
#[derive(Debug, Clone)]
pub struct NetStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> NetStream<'a> {
    /// Wrap a buffer with the cursor at offset 0
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total buffer length
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the buffer holds no bytes at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor offset
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Take the next `n` bytes, advancing the cursor
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(DecodeError::OutOfBounds {
                offset: self.pos,
                wanted: n,
                available: self.data.len(),
            })?;

        let span = &self.data[self.pos..end];
        self.pos = end;
        Ok(span)
    }

    /// Move the cursor to an absolute offset
    ///
    /// Seeking to `len()` is allowed; it leaves nothing to read.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(DecodeError::OutOfBounds {
                offset: pos,
                wanted: 0,
                available: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Skip `n` bytes without interpreting them
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?.get_u8())
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?.get_i8())
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.take(2)?.get_u16_le())
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.take(2)?.get_i16_le())
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.take(4)?.get_u32_le())
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.take(4)?.get_i32_le())
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(self.take(8)?.get_u64_le())
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.take(8)?.get_i64_le())
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(self.take(4)?.get_f32_le())
    }

    /// Borrow a raw span of `n` bytes
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Copy a raw span into a fixed-size array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.take(N)?.copy_to_slice(&mut out);
        Ok(out)
    }

    /// Read a fixed-size character buffer
    ///
    /// Always consumes `n` bytes; the text ends at the first NUL or at the
    /// end of the buffer if none is present.
    pub fn read_fixed_text(&mut self, n: usize) -> Result<String> {
        let span = self.take(n)?;
        let end = span.iter().position(|&b| b == 0).unwrap_or(span.len());
        Ok(latin1_to_string(&span[..end]))
    }

    /// Read a NUL-terminated string, consuming the terminator
    pub fn read_cstring(&mut self) -> Result<String> {
        let rest = &self.data[self.pos..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(DecodeError::Unterminated { offset: self.pos })?;

        let text = latin1_to_string(&rest[..len]);
        self.pos += len + 1;
        Ok(text)
    }

    /// Read text preceded by a `u32` byte count
    ///
    /// Exactly `count` bytes are consumed. The text stops early at an
    /// embedded NUL.
    pub fn read_prefixed_text(&mut self) -> Result<String> {
        let start = self.pos;
        let count = self.read_u32()? as usize;
        match self.read_fixed_text(count) {
            Ok(text) => Ok(text),
            Err(err) => {
                self.pos = start;
                Err(err)
            }
        }
    }

    /// Read a `u32` element count for a repeating group
    ///
    /// The returned value is safe to use as a `Vec` capacity hint: it is
    /// clamped to how many elements of `min_element_len` bytes could
    /// possibly still fit in the buffer.
    pub fn read_count(&mut self, min_element_len: usize) -> Result<(usize, usize)> {
        let count = self.read_u32()? as usize;
        let fit = self.remaining() / min_element_len.max(1);
        Ok((count, count.min(fit)))
    }
}
