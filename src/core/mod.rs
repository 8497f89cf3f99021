// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout orbcodec.
//!
//! This module provides the foundational types for the library:
//! - [`OrbError`] - Error taxonomy shared by the codec and the parser
//! - [`ObjectReference`] - Interoperable Object Reference model

pub mod error;
pub mod reference;

pub use error::{OrbError, Result};
pub use reference::{
    GiopVersion, IiopProfile, ObjectReference, Profile, TaggedComponent, DEFAULT_IIOP_PORT,
    TAG_INTERNET_IOP, TAG_MULTIPLE_COMPONENTS,
};
