use super::limits::CodecLimits;
use crate::core::{HealthError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Append-only writer for the wire format.
#[derive(Debug, Default)]
pub struct StreamOutput {
    buf: BytesMut,
}

impl StreamOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn write_byte(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    /// Writes `value` in 7-bit groups, low group first; at most 5 bytes.
    pub fn write_vint(&mut self, mut value: u32) {
        while value >= 0x80 {
            self.buf.put_u8((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.buf.put_u8(value as u8);
    }

    /// Writes a collection length as a vint.
    pub fn write_len(&mut self, len: usize) {
        debug_assert!(len <= u32::MAX as usize, "length {} does not fit the wire format", len);
        self.write_vint(len as u32);
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_len(value.len());
        self.buf.put_slice(value.as_bytes());
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Reader for the wire format.
///
/// Every read checks the remaining input first; truncated or malformed input surfaces as
/// [`HealthError::CorruptData`]. Collection lengths are checked against the remaining input
/// before anything is allocated for them.
#[derive(Debug)]
pub struct StreamInput {
    buf: Bytes,
    limits: CodecLimits,
}

impl StreamInput {
    /// Creates a reader bounded only by the input itself.
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self::with_limits(buf, CodecLimits::unbounded())
    }

    pub fn with_limits(buf: impl Into<Bytes>, limits: CodecLimits) -> Self {
        Self {
            buf: buf.into(),
            limits,
        }
    }

    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        if !self.buf.has_remaining() {
            return Err(HealthError::corrupt("unexpected end of stream"));
        }
        Ok(self.buf.get_u8())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(HealthError::corrupt(format!(
                "invalid boolean byte {}",
                other
            ))),
        }
    }

    pub fn read_vint(&mut self) -> Result<u32> {
        let mut value = 0u32;
        let mut shift = 0u32;
        loop {
            let byte = self.read_byte()?;
            if shift == 28 && byte & 0xf0 != 0 {
                return Err(HealthError::corrupt("variable-length integer overflows 32 bits"));
            }
            value |= u32::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Reads a collection length and checks it against `max` and the remaining input.
    ///
    /// `min_item_bytes` is the smallest encoding of one item; a length whose items cannot
    /// fit in what is left is truncated input.
    pub fn read_len(&mut self, max: u32, min_item_bytes: usize, what: &str) -> Result<usize> {
        let len = self.read_vint()?;
        if len > max {
            return Err(HealthError::corrupt(format!(
                "{} count {} exceeds limit {}",
                what, len, max
            )));
        }
        let len = len as usize;
        if len.saturating_mul(min_item_bytes) > self.remaining() {
            return Err(HealthError::corrupt(format!(
                "{} count {} truncated at {} bytes",
                what,
                len,
                self.remaining()
            )));
        }
        Ok(len)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let max = self.limits.max_string_bytes;
        let len = self.read_len(max, 1, "string byte")?;
        let raw = self.buf.split_to(len);
        String::from_utf8(raw.to_vec())
            .map_err(|e| HealthError::corrupt(format!("string is not valid UTF-8: {}", e)))
    }

    /// Fails if any input is left unread.
    pub fn finish(self) -> Result<()> {
        if self.buf.has_remaining() {
            return Err(HealthError::corrupt(format!(
                "{} trailing bytes after snapshot",
                self.buf.remaining()
            )));
        }
        Ok(())
    }
}
