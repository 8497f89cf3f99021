// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Orbcodec
//!
//! CORBA wire-level library: a CDR (Common Data Representation) codec and a
//! `corbaloc:` locator parser producing Interoperable Object References.
//!
//! ## Architecture
//!
//! - `core/` - Error taxonomy and the object reference model
//! - `encoding/cdr/` - CDR encoder, cursor and IOR marshalling
//! - `locator/` - corbaloc tokenizer, parser and initial-reference resolution
//! - `config` - TOML configuration
//!
//! ## Example: Parsing a locator
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use orbcodec::{parse_locator, Locator};
//!
//! let Locator::Iiop(reference) = parse_locator("corbaloc:iiop:1.2@example.com:2809/NameService")? else {
//!     unreachable!();
//! };
//! let profile = reference.primary_profile().unwrap();
//! assert_eq!(profile.host(), "example.com");
//! assert_eq!(reference.object_key(), b"NameService");
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Encoding to CDR
//!
//! ```rust
//! use orbcodec::{ByteOrder, CdrEncoder};
//!
//! let mut encoder = CdrEncoder::new(ByteOrder::BigEndian);
//! encoder.write_octet(1).write_ulong(42).write_string("hi");
//!
//! let mut input = encoder.create_input_stream();
//! assert_eq!(input.read_octet().unwrap(), 1);
//! assert_eq!(input.read_ulong().unwrap(), 42);
//! assert_eq!(input.read_string().unwrap(), "hi");
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    GiopVersion, IiopProfile, ObjectReference, OrbError, Profile, Result, TaggedComponent,
};

// Encoding/decoding
pub mod encoding;

pub use encoding::cdr::{read_object_reference, write_object_reference};
pub use encoding::{ByteOrder, CdrCursor, CdrEncoder};

// corbaloc parsing
pub mod locator;

pub use locator::{
    parse_locator, string_to_object, AddressPolicy, InitialReferenceResolver, InitialReferences,
    Locator, LocatorParser,
};

// Configuration
pub mod config;

pub use config::{ConfigError, OrbConfig};
