// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR (Common Data Representation) module.
//!
//! Provides the GIOP CDR output stream ([`CdrEncoder`]), input stream
//! ([`CdrCursor`]) and object reference marshalling ([`ior`]).
//!
//! All multi-byte primitives are aligned to their natural size relative to
//! the start of the stream. Encapsulations are independent streams carried
//! as octet sequences and announce their own byte order.

pub mod byte_order;
pub mod cursor;
pub mod encoder;
pub mod ior;

pub use byte_order::{padding, ByteOrder};
pub use cursor::CdrCursor;
pub use encoder::CdrEncoder;
pub use ior::{read_object_reference, write_object_reference, IOR_PREFIX};
