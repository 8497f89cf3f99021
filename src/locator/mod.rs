// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `corbaloc:` locator parsing.
//!
//! - [`tokenizer`] - Pest grammar splitting a locator into tokens
//! - [`parser`] - Address/key parser producing a [`Locator`]
//! - [`resolver`] - Initial-reference lookup for `rir:` locators
//! - [`escape`] - Percent escaping of object keys

pub mod escape;
pub mod parser;
pub mod resolver;
pub mod tokenizer;

pub use parser::{AddressPolicy, Locator, LocatorParser, DEFAULT_INITIAL_REFERENCE};
pub use resolver::{InitialReferenceResolver, InitialReferences};

use std::fmt;

use crate::core::{IiopProfile, ObjectReference, Result};
use crate::encoding::cdr::IOR_PREFIX;
use escape::percent_encode;

/// Parse a corbaloc string with the default parser.
pub fn parse_locator(input: &str) -> Result<Locator> {
    LocatorParser::new().parse(input)
}

/// Turn a `corbaloc:` locator or a stringified `IOR:` into a reference.
///
/// `rir:` locators are resolved through `resolver`.
pub fn string_to_object(
    input: &str,
    parser: &LocatorParser,
    resolver: &dyn InitialReferenceResolver,
) -> Result<ObjectReference> {
    let input = input.trim_start();
    let is_ior = input
        .get(..IOR_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IOR_PREFIX));
    if is_ior {
        ObjectReference::from_ior_string(input)
    } else {
        parser.resolve(input, resolver)
    }
}

impl ObjectReference {
    /// Render as a `corbaloc:` URI listing every IIOP address.
    ///
    /// Returns `None` when the reference has no IIOP profile. Type id,
    /// components and non-IIOP profiles have no corbaloc form and are lost.
    pub fn to_corbaloc(&self) -> Option<String> {
        let addresses: Vec<String> = self.iiop_profiles().map(IiopProfile::to_address).collect();
        if addresses.is_empty() {
            return None;
        }
        Some(format!(
            "corbaloc:{}/{}",
            addresses.join(","),
            percent_encode(self.object_key())
        ))
    }
}

/// Prefers the corbaloc form, falling back to a big-endian `IOR:` string.
impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_corbaloc() {
            Some(locator) => f.write_str(&locator),
            None => f.write_str(&self.to_ior_string(Default::default())),
        }
    }
}
