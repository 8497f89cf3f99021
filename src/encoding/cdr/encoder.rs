// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR encoder (output stream) for writing CDR-encoded data.

use super::byte_order::{padding, ByteOrder};
use super::cursor::CdrCursor;

/// Default initial capacity for the encoder buffer.
const DEFAULT_CAPACITY: usize = 64;

/// CDR encoder for writing CDR-encoded data.
///
/// The encoder handles:
/// - Alignment of every primitive to its natural boundary, measured from
///   offset 0 of this stream
/// - A byte order fixed at creation
///
/// Writing never fails; the buffer grows as needed.
///
/// # Example
///
/// ```
/// use orbcodec::encoding::cdr::{ByteOrder, CdrEncoder};
///
/// let mut encoder = CdrEncoder::new(ByteOrder::BigEndian);
/// encoder.write_octet(1).write_long(42).write_string("hello");
///
/// let mut input = encoder.create_input_stream();
/// assert_eq!(input.read_octet().unwrap(), 1);
/// assert_eq!(input.read_long().unwrap(), 42);
/// assert_eq!(input.read_string().unwrap(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct CdrEncoder {
    /// Output buffer, always exactly `position` bytes long
    buffer: Vec<u8>,
    /// Byte order for multi-byte primitives
    byte_order: ByteOrder,
}

impl Default for CdrEncoder {
    fn default() -> Self {
        Self::new(ByteOrder::default())
    }
}

impl CdrEncoder {
    /// Create a new empty stream with the given byte order.
    #[must_use]
    pub fn new(byte_order: ByteOrder) -> Self {
        Self::with_capacity(byte_order, DEFAULT_CAPACITY)
    }

    /// Create a new stream with the specified initial capacity.
    #[must_use]
    pub fn with_capacity(byte_order: ByteOrder, capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            byte_order,
        }
    }

    /// Create a stream for an encapsulation.
    ///
    /// The first octet is the byte-order flag, so the encapsulated payload
    /// starts at offset 1 of its own stream.
    #[must_use]
    pub fn encapsulation(byte_order: ByteOrder) -> Self {
        let mut encoder = Self::new(byte_order);
        encoder.buffer.push(byte_order.flag());
        encoder
    }

    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Current write offset (number of bytes written, padding included).
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Get a reference to the encoded data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the encoder and return the encoded data.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Discard everything written, keeping the allocation and byte order.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Snapshot the bytes written so far as an independent input stream.
    ///
    /// The cursor starts at offset 0 and uses this stream's byte order.
    /// Later writes to the encoder are not visible to the returned cursor.
    #[must_use]
    pub fn create_input_stream(&self) -> CdrCursor<'static> {
        CdrCursor::from_vec(self.buffer.clone(), self.byte_order)
    }

    /// Write zero padding up to the next multiple of `size`.
    fn align(&mut self, size: usize) {
        let pad = padding(self.buffer.len(), size);
        self.buffer.resize(self.buffer.len() + pad, 0);
    }

    /// Write a single octet.
    pub fn write_octet(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    /// Write a boolean as one octet (0 or 1).
    pub fn write_boolean(&mut self, value: bool) -> &mut Self {
        self.write_octet(u8::from(value))
    }

    /// Write a narrow character.
    pub fn write_char(&mut self, value: u8) -> &mut Self {
        self.write_octet(value)
    }

    /// Write a 16-bit unsigned integer.
    pub fn write_ushort(&mut self, value: u16) -> &mut Self {
        self.align(2);
        let start = self.buffer.len();
        self.buffer.resize(start + 2, 0);
        self.byte_order.write_u16(&mut self.buffer[start..], value);
        self
    }

    /// Write a 16-bit signed integer.
    pub fn write_short(&mut self, value: i16) -> &mut Self {
        self.write_ushort(value as u16)
    }

    /// Write a 32-bit unsigned integer.
    pub fn write_ulong(&mut self, value: u32) -> &mut Self {
        self.align(4);
        let start = self.buffer.len();
        self.buffer.resize(start + 4, 0);
        self.byte_order.write_u32(&mut self.buffer[start..], value);
        self
    }

    /// Write a 32-bit signed integer.
    pub fn write_long(&mut self, value: i32) -> &mut Self {
        self.write_ulong(value as u32)
    }

    /// Write a 64-bit unsigned integer.
    pub fn write_ulonglong(&mut self, value: u64) -> &mut Self {
        self.align(8);
        let start = self.buffer.len();
        self.buffer.resize(start + 8, 0);
        self.byte_order.write_u64(&mut self.buffer[start..], value);
        self
    }

    /// Write a 64-bit signed integer.
    pub fn write_longlong(&mut self, value: i64) -> &mut Self {
        self.write_ulonglong(value as u64)
    }

    /// Write a 32-bit float.
    pub fn write_float(&mut self, value: f32) -> &mut Self {
        self.write_ulong(value.to_bits())
    }

    /// Write a 64-bit double.
    pub fn write_double(&mut self, value: f64) -> &mut Self {
        self.write_ulonglong(value.to_bits())
    }

    /// Write raw octets with no alignment and no length prefix.
    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);
        self
    }

    /// Write `length` raw octets of `data` starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + length` is out of bounds of `data`.
    pub fn write_bytes_range(&mut self, data: &[u8], offset: usize, length: usize) -> &mut Self {
        self.write_bytes(&data[offset..offset + length])
    }

    /// Write a length or element count as a ulong.
    ///
    /// # Panics
    ///
    /// Panics if `len` does not fit in 32 bits.
    pub(crate) fn write_length(&mut self, len: usize) -> &mut Self {
        let len = u32::try_from(len)
            .unwrap_or_else(|_| panic!("length {len} does not fit in a CDR ulong"));
        self.write_ulong(len)
    }

    /// Write a string: ulong length (bytes + 1), the UTF-8 bytes, then NUL.
    ///
    /// # Panics
    ///
    /// Panics if the string is 4 GiB or longer.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        let bytes = value.as_bytes();
        self.write_length(bytes.len() + 1);
        self.buffer.reserve(bytes.len() + 1);
        self.buffer.extend_from_slice(bytes);
        self.buffer.push(0);
        self
    }

    /// Write an octet sequence: ulong length followed by the octets.
    ///
    /// # Panics
    ///
    /// Panics if `data` holds more than `u32::MAX` octets.
    pub fn write_octet_sequence(&mut self, data: &[u8]) -> &mut Self {
        self.write_length(data.len());
        self.write_bytes(data)
    }

    /// Embed another stream as an encapsulation (an octet sequence).
    ///
    /// `inner` is normally created with [`CdrEncoder::encapsulation`] so that
    /// it starts with its own byte-order flag.
    pub fn write_encapsulation(&mut self, inner: &CdrEncoder) -> &mut Self {
        self.write_octet_sequence(inner.data())
    }
}
