// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR cursor (input stream) for reading CDR-encoded data with proper alignment.

use std::borrow::Cow;

use super::byte_order::{padding, ByteOrder};
use crate::core::{OrbError, Result};

/// CDR cursor that tracks the read position over a fixed byte sequence.
///
/// Alignment is computed from offset 0 of the data the cursor was created
/// over, never from the start of an enclosing structure. The byte order is
/// fixed for the lifetime of the cursor. Padding bytes are skipped without
/// being checked.
///
/// The cursor either borrows its bytes ([`CdrCursor::new`]) or owns a
/// private copy ([`CdrCursor::from_vec`], used by
/// [`CdrEncoder::create_input_stream`](super::CdrEncoder::create_input_stream)).
///
/// # Example
///
/// ```
/// use orbcodec::encoding::cdr::{ByteOrder, CdrCursor};
///
/// let data = [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2A];
/// let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
/// assert_eq!(cursor.read_octet().unwrap(), 1);
/// assert_eq!(cursor.read_long().unwrap(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct CdrCursor<'a> {
    /// The data buffer
    data: Cow<'a, [u8]>,
    /// Current read position
    offset: usize,
    /// Byte order for multi-byte primitives
    byte_order: ByteOrder,
}

impl<'a> CdrCursor<'a> {
    /// Create a cursor over borrowed bytes.
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self {
            data: Cow::Borrowed(data),
            offset: 0,
            byte_order,
        }
    }

    /// Create a cursor over an encapsulation.
    ///
    /// The first octet carries the byte-order flag; the cursor is positioned
    /// just after it, with alignment still measured from the flag octet.
    pub fn from_encapsulation(data: &'a [u8]) -> Result<Self> {
        let Some(&flag) = data.first() else {
            return Err(OrbError::malformed(
                "encapsulation",
                "empty encapsulation has no byte-order flag",
            ));
        };
        Ok(Self {
            data: Cow::Borrowed(data),
            offset: 1,
            byte_order: ByteOrder::from_flag(flag),
        })
    }

    /// Get the byte order of this stream.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Get the current position relative to the data start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// The whole underlying buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Skip padding up to the next multiple of `size`.
    pub fn align(&mut self, size: usize) -> Result<()> {
        let pad = padding(self.offset, size);
        if pad > self.remaining() {
            return Err(OrbError::underflow(pad, self.remaining(), self.offset));
        }
        self.offset += pad;
        Ok(())
    }

    /// Align to `size` and take the next `size` bytes.
    fn take_aligned(&mut self, size: usize) -> Result<&[u8]> {
        self.align(size)?;
        self.take(size)
    }

    fn take(&mut self, count: usize) -> Result<&[u8]> {
        if count > self.remaining() {
            return Err(OrbError::underflow(count, self.remaining(), self.offset));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Read a single octet.
    pub fn read_octet(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a boolean octet; any non-zero value is true.
    pub fn read_boolean(&mut self) -> Result<bool> {
        Ok(self.read_octet()? != 0)
    }

    /// Read a narrow character.
    pub fn read_char(&mut self) -> Result<u8> {
        self.read_octet()
    }

    /// Read a 16-bit unsigned integer.
    pub fn read_ushort(&mut self) -> Result<u16> {
        let order = self.byte_order;
        Ok(order.read_u16(self.take_aligned(2)?))
    }

    /// Read a 16-bit signed integer.
    pub fn read_short(&mut self) -> Result<i16> {
        Ok(self.read_ushort()? as i16)
    }

    /// Read a 32-bit unsigned integer.
    pub fn read_ulong(&mut self) -> Result<u32> {
        let order = self.byte_order;
        Ok(order.read_u32(self.take_aligned(4)?))
    }

    /// Read a 32-bit signed integer.
    pub fn read_long(&mut self) -> Result<i32> {
        Ok(self.read_ulong()? as i32)
    }

    /// Read a 64-bit unsigned integer.
    pub fn read_ulonglong(&mut self) -> Result<u64> {
        let order = self.byte_order;
        Ok(order.read_u64(self.take_aligned(8)?))
    }

    /// Read a 64-bit signed integer.
    pub fn read_longlong(&mut self) -> Result<i64> {
        Ok(self.read_ulonglong()? as i64)
    }

    /// Read a 32-bit float.
    pub fn read_float(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_ulong()?))
    }

    /// Read a 64-bit double.
    pub fn read_double(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_ulonglong()?))
    }

    /// Read `count` raw octets, no alignment.
    pub fn read_bytes(&mut self, count: usize) -> Result<&[u8]> {
        self.take(count)
    }

    /// Skip `count` octets.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Read a length-prefixed, NUL-terminated string.
    ///
    /// The declared length counts the terminator, so it is at least 1.
    pub fn read_string(&mut self) -> Result<String> {
        let position = self.offset;
        let len = self.read_ulong()? as usize;
        if len == 0 {
            return Err(OrbError::malformed(
                "string",
                format!("declared length 0 at position {position} leaves no room for the terminator"),
            ));
        }

        let bytes = self.take(len)?;
        let (contents, terminator) = bytes.split_at(len - 1);
        if terminator[0] != 0 {
            return Err(OrbError::malformed(
                "string",
                format!("missing null terminator for string of declared length {len} at position {position}"),
            ));
        }

        std::str::from_utf8(contents)
            .map(str::to_owned)
            .map_err(|e| OrbError::malformed("string", format!("invalid UTF-8: {e}")))
    }

    /// Read an octet sequence: ulong length followed by the octets.
    pub fn read_octet_sequence(&mut self) -> Result<Vec<u8>> {
        let len = self.read_ulong()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    /// Read an encapsulation and return an independent cursor over it.
    pub fn read_encapsulation(&mut self) -> Result<CdrCursor<'static>> {
        let bytes = self.read_octet_sequence()?;
        let Some(&flag) = bytes.first() else {
            return Err(OrbError::malformed(
                "encapsulation",
                "empty encapsulation has no byte-order flag",
            ));
        };
        Ok(CdrCursor {
            data: Cow::Owned(bytes),
            offset: 1,
            byte_order: ByteOrder::from_flag(flag),
        })
    }
}

impl CdrCursor<'static> {
    /// Create a cursor owning `data`.
    pub fn from_vec(data: Vec<u8>, byte_order: ByteOrder) -> Self {
        Self {
            data: Cow::Owned(data),
            offset: 0,
            byte_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_new() {
        let data = [0x01, 0x02];
        let cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.remaining(), 2);
        assert!(!cursor.is_at_end());
    }

    #[test]
    fn test_read_octet() {
        let data = [0x42, 0xFF];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert_eq!(cursor.read_octet().unwrap(), 0x42);
        assert_eq!(cursor.read_octet().unwrap(), 0xFF);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_boolean() {
        let data = [0, 1, 7];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert!(!cursor.read_boolean().unwrap());
        assert!(cursor.read_boolean().unwrap());
        assert!(cursor.read_boolean().unwrap());
    }

    #[test]
    fn test_read_short_skips_padding() {
        // octet, pad, short (BE)
        let data = [0x01, 0xAA, 0x80, 0x00];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        cursor.read_octet().unwrap();
        assert_eq!(cursor.read_short().unwrap(), i16::MIN);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_read_long_little_endian() {
        let data = 0x1234_5678u32.to_le_bytes();
        let mut cursor = CdrCursor::new(&data, ByteOrder::LittleEndian);
        assert_eq!(cursor.read_ulong().unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_read_longlong_after_long() {
        let mut data = vec![0, 0, 0, 5, 0xEE, 0xEE, 0xEE, 0xEE];
        data.extend_from_slice(&(-9i64).to_be_bytes());
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert_eq!(cursor.read_long().unwrap(), 5);
        assert_eq!(cursor.read_longlong().unwrap(), -9);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_float_double() {
        let mut data = Vec::new();
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&(-0.25f64).to_le_bytes());
        let mut cursor = CdrCursor::new(&data, ByteOrder::LittleEndian);
        assert_eq!(cursor.read_float().unwrap(), 1.5);
        assert_eq!(cursor.read_double().unwrap(), -0.25);
    }

    #[test]
    fn test_read_u16_underflow() {
        let data = [0x01];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        let err = cursor.read_ushort().unwrap_err();
        assert!(matches!(err, OrbError::Underflow { .. }));
    }

    #[test]
    fn test_padding_past_end_underflows() {
        let data = [0x01, 0x02];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        cursor.read_octet().unwrap();
        let err = cursor.read_ulong().unwrap_err();
        assert_eq!(err, OrbError::underflow(3, 1, 1));
    }

    #[test]
    fn test_read_string() {
        let data = [0, 0, 0, 3, b'h', b'i', 0];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert_eq!(cursor.read_string().unwrap(), "hi");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_empty_string() {
        let data = [0, 0, 0, 1, 0];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert_eq!(cursor.read_string().unwrap(), "");
    }

    #[test]
    fn test_read_string_zero_length_is_malformed() {
        let data = [0, 0, 0, 0];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert!(matches!(
            cursor.read_string().unwrap_err(),
            OrbError::Malformed { .. }
        ));
    }

    #[test]
    fn test_read_string_missing_terminator() {
        let data = [0, 0, 0, 2, b'h', b'i'];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert!(matches!(
            cursor.read_string().unwrap_err(),
            OrbError::Malformed { .. }
        ));
    }

    #[test]
    fn test_read_string_length_beyond_data() {
        let data = [0, 0, 0, 10, b'h', 0];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert!(matches!(
            cursor.read_string().unwrap_err(),
            OrbError::Underflow { .. }
        ));
    }

    #[test]
    fn test_read_string_invalid_utf8() {
        let data = [0, 0, 0, 2, 0xFF, 0];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert!(matches!(
            cursor.read_string().unwrap_err(),
            OrbError::Malformed { .. }
        ));
    }

    #[test]
    fn test_read_bytes_and_skip() {
        let data = [1, 2, 3, 4, 5];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        cursor.skip(1).unwrap();
        assert_eq!(cursor.read_bytes(3).unwrap(), &[2, 3, 4]);
        assert!(cursor.skip(2).is_err());
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_read_octet_sequence() {
        let data = [0, 0, 0, 2, 0xAA, 0xBB];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert_eq!(cursor.read_octet_sequence().unwrap(), vec![0xAA, 0xBB]);
    }

    #[test]
    fn test_read_encapsulation_uses_its_own_byte_order() {
        // BE outer stream: length 4, then LE encapsulation: flag, pad, 0x0102
        let data = [0, 0, 0, 4, 1, 0, 0x02, 0x01];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        let mut inner = cursor.read_encapsulation().unwrap();
        assert_eq!(inner.byte_order(), ByteOrder::LittleEndian);
        assert_eq!(inner.position(), 1);
        assert_eq!(inner.read_ushort().unwrap(), 0x0102);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_empty_encapsulation_is_malformed() {
        let data = [0, 0, 0, 0];
        let mut cursor = CdrCursor::new(&data, ByteOrder::BigEndian);
        assert!(matches!(
            cursor.read_encapsulation().unwrap_err(),
            OrbError::Malformed { .. }
        ));
        assert!(CdrCursor::from_encapsulation(&[]).is_err());
    }

    #[test]
    fn test_from_encapsulation() {
        let data = [0, 0, 0x12, 0x34];
        let mut cursor = CdrCursor::from_encapsulation(&data).unwrap();
        assert_eq!(cursor.byte_order(), ByteOrder::BigEndian);
        assert_eq!(cursor.read_ushort().unwrap(), 0x1234);
    }
}
