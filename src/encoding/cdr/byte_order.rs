// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte order and alignment rules shared by the CDR encoder and cursor.
//!
//! The byte order is chosen once when a stream is created and travels with
//! the stream as a plain value; nothing here is global.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use serde::{Deserialize, Serialize};

/// Byte order of a CDR stream.
///
/// On the wire an encapsulation announces its byte order in its first octet:
/// `0` for big endian, `1` for little endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Network byte order (flag 0)
    #[default]
    #[serde(rename = "big", alias = "be")]
    BigEndian,
    /// Flag 1
    #[serde(rename = "little", alias = "le")]
    LittleEndian,
}

impl ByteOrder {
    /// Decode the encapsulation flag octet. Any non-zero value is little endian.
    pub const fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    /// Encapsulation flag octet for this byte order.
    pub const fn flag(self) -> u8 {
        match self {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        }
    }

    #[inline]
    pub(crate) fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            ByteOrder::BigEndian => BigEndian::read_u16(buf),
            ByteOrder::LittleEndian => LittleEndian::read_u16(buf),
        }
    }

    #[inline]
    pub(crate) fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            ByteOrder::BigEndian => BigEndian::read_u32(buf),
            ByteOrder::LittleEndian => LittleEndian::read_u32(buf),
        }
    }

    #[inline]
    pub(crate) fn read_u64(self, buf: &[u8]) -> u64 {
        match self {
            ByteOrder::BigEndian => BigEndian::read_u64(buf),
            ByteOrder::LittleEndian => LittleEndian::read_u64(buf),
        }
    }

    #[inline]
    pub(crate) fn write_u16(self, buf: &mut [u8], value: u16) {
        match self {
            ByteOrder::BigEndian => BigEndian::write_u16(buf, value),
            ByteOrder::LittleEndian => LittleEndian::write_u16(buf, value),
        }
    }

    #[inline]
    pub(crate) fn write_u32(self, buf: &mut [u8], value: u32) {
        match self {
            ByteOrder::BigEndian => BigEndian::write_u32(buf, value),
            ByteOrder::LittleEndian => LittleEndian::write_u32(buf, value),
        }
    }

    #[inline]
    pub(crate) fn write_u64(self, buf: &mut [u8], value: u64) {
        match self {
            ByteOrder::BigEndian => BigEndian::write_u64(buf, value),
            ByteOrder::LittleEndian => LittleEndian::write_u64(buf, value),
        }
    }
}

impl std::str::FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "big" | "be" | "big-endian" => Ok(ByteOrder::BigEndian),
            "little" | "le" | "little-endian" => Ok(ByteOrder::LittleEndian),
            other => Err(format!(
                "invalid byte order '{other}', expected 'big' or 'little'"
            )),
        }
    }
}

/// Padding needed at `position` to reach the next multiple of `alignment`.
///
/// Positions are absolute offsets from the start of the stream.
#[inline]
pub const fn padding(position: usize, alignment: usize) -> usize {
    if alignment <= 1 {
        return 0;
    }
    let remainder = position % alignment;
    if remainder == 0 {
        0
    } else {
        alignment - remainder
    }
}
