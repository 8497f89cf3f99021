// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire encoding/decoding implementations.
//!
//! - [`cdr`] - CDR (Common Data Representation) streams and IOR marshalling

pub mod cdr;

pub use cdr::{ByteOrder, CdrCursor, CdrEncoder};
