// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Object reference marshalling over CDR.
//!
//! Wire layout:
//!
//! ```text
//! IOR             := string type_id, ulong count, TaggedProfile[count]
//! TaggedProfile   := ulong tag, sequence<octet> profile_data
//! IIOP body       := encapsulation {
//!                        octet major, octet minor, string host, ushort port,
//!                        sequence<octet> object_key,
//!                        [1.1+] ulong count, TaggedComponent[count] }
//! TaggedComponent := ulong tag, sequence<octet> component_data
//! ```
//!
//! The stringified form is `IOR:` followed by the hex digits of an
//! encapsulation holding the IOR.

use tracing::debug;

use super::{ByteOrder, CdrCursor, CdrEncoder};
use crate::core::{
    GiopVersion, IiopProfile, ObjectReference, OrbError, Profile, Result, TaggedComponent,
    TAG_INTERNET_IOP,
};

/// Prefix of a stringified object reference.
pub const IOR_PREFIX: &str = "IOR:";

/// Write `reference` as an IOR at the current stream position.
///
/// The reference's object key is written into every IIOP profile body.
///
/// # Panics
///
/// Panics if a length or count does not fit in 32 bits.
pub fn write_object_reference(encoder: &mut CdrEncoder, reference: &ObjectReference) {
    encoder.write_string(reference.type_id());
    encoder.write_length(reference.profiles().len());
    for profile in reference.profiles() {
        encoder.write_ulong(profile.tag());
        match profile {
            Profile::Internet(iiop) => {
                let body = encode_iiop_body(iiop, reference.object_key(), encoder.byte_order());
                encoder.write_encapsulation(&body);
            }
            Profile::Tagged { data, .. } => {
                encoder.write_octet_sequence(data);
            }
        }
    }
}

fn encode_iiop_body(profile: &IiopProfile, object_key: &[u8], byte_order: ByteOrder) -> CdrEncoder {
    let mut body = CdrEncoder::encapsulation(byte_order);
    let version = profile.version();
    body.write_octet(version.major)
        .write_octet(version.minor)
        .write_string(profile.host())
        .write_ushort(profile.port())
        .write_octet_sequence(object_key);

    if version.has_components() {
        body.write_length(profile.components().len());
        for component in profile.components() {
            body.write_ulong(component.tag)
                .write_octet_sequence(&component.data);
        }
    }
    body
}

/// Read an IOR from the current stream position.
///
/// The object key comes from the first IIOP profile; profiles with other
/// tags are kept as opaque bytes.
pub fn read_object_reference(cursor: &mut CdrCursor<'_>) -> Result<ObjectReference> {
    let type_id = cursor.read_string()?;
    let count = cursor.read_ulong()? as usize;

    // Each profile needs at least a tag and a length.
    if count > cursor.remaining() / 8 {
        return Err(OrbError::malformed(
            "IOR",
            format!(
                "{count} profiles declared but only {} bytes remain",
                cursor.remaining()
            ),
        ));
    }

    let mut profiles = Vec::with_capacity(count);
    let mut object_key: Option<Vec<u8>> = None;

    for _ in 0..count {
        let tag = cursor.read_ulong()?;
        if tag == TAG_INTERNET_IOP {
            let mut body = cursor.read_encapsulation()?;
            let (profile, key) = decode_iiop_body(&mut body)?;
            object_key.get_or_insert(key);
            profiles.push(Profile::Internet(profile));
        } else {
            let data = cursor.read_octet_sequence()?;
            profiles.push(Profile::Tagged { tag, data });
        }
    }

    let reference = ObjectReference::new(type_id, profiles, object_key.unwrap_or_default());
    debug!(
        type_id = reference.type_id(),
        profiles = reference.profiles().len(),
        key_len = reference.object_key().len(),
        "decoded object reference"
    );
    Ok(reference)
}

fn decode_iiop_body(body: &mut CdrCursor<'_>) -> Result<(IiopProfile, Vec<u8>)> {
    let major = body.read_octet()?;
    let minor = body.read_octet()?;
    let version = GiopVersion::new(major, minor);
    let host = body.read_string()?;
    let port = body.read_ushort()?;
    let key = body.read_octet_sequence()?;

    let mut components = Vec::new();
    if version.has_components() && !body.is_at_end() {
        let count = body.read_ulong()? as usize;
        if count > body.remaining() / 8 {
            return Err(OrbError::malformed(
                "IIOP profile",
                format!(
                    "{count} components declared but only {} bytes remain",
                    body.remaining()
                ),
            ));
        }
        for _ in 0..count {
            let tag = body.read_ulong()?;
            let data = body.read_octet_sequence()?;
            components.push(TaggedComponent::new(tag, data));
        }
    }

    let profile = IiopProfile::new(host, port)
        .with_version(version)
        .with_components(components);
    Ok((profile, key))
}

impl ObjectReference {
    /// Stringify as `IOR:<hex>` using an encapsulation in `byte_order`.
    pub fn to_ior_string(&self, byte_order: ByteOrder) -> String {
        let mut encapsulation = CdrEncoder::encapsulation(byte_order);
        write_object_reference(&mut encapsulation, self);
        format!("{IOR_PREFIX}{}", hex::encode(encapsulation.data()))
    }

    /// Parse a stringified `IOR:<hex>` reference. The prefix is case-insensitive.
    pub fn from_ior_string(input: &str) -> Result<Self> {
        let input = input.trim();
        let digits = input
            .get(..IOR_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(IOR_PREFIX))
            .map(|_| &input[IOR_PREFIX.len()..])
            .ok_or_else(|| OrbError::invalid_argument("must start with IOR:"))?;

        let bytes = hex::decode(digits)
            .map_err(|e| OrbError::invalid_token(format!("invalid IOR hex: {e}"), digits))?;
        let mut cursor = CdrCursor::from_encapsulation(&bytes)?;
        read_object_reference(&mut cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ObjectReference {
        ObjectReference::iiop(
            "IDL:omg.org/CosNaming/NamingContext:1.0",
            IiopProfile::new("example.com", 2809).with_version(GiopVersion::new(1, 2)),
            b"NameService".to_vec(),
        )
    }

    #[test]
    fn test_iiop_1_0_body_layout() {
        let reference = ObjectReference::iiop("", IiopProfile::new("h", 0x0102), vec![0xAB]);
        let mut encoder = CdrEncoder::new(ByteOrder::BigEndian);
        write_object_reference(&mut encoder, &reference);

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 1, 0,          // type id ""
            0, 0, 0,                // pad
            0, 0, 0, 1,             // one profile
            0, 0, 0, 0,             // TAG_INTERNET_IOP
            0, 0, 0, 17,            // encapsulation length
            0, 1, 0,                // flag, version 1.0
            0,                      // pad
            0, 0, 0, 2, b'h', 0,    // host
            0x01, 0x02,             // port
            0, 0, 0, 1, 0xAB,       // object key
        ];
        assert_eq!(encoder.data(), &expected);
    }

    #[test]
    fn test_round_trip_big_endian() {
        let reference = sample();
        let mut encoder = CdrEncoder::new(ByteOrder::BigEndian);
        write_object_reference(&mut encoder, &reference);
        let mut input = encoder.create_input_stream();
        assert_eq!(read_object_reference(&mut input).unwrap(), reference);
        assert!(input.is_at_end());
    }

    #[test]
    fn test_round_trip_with_components_and_foreign_profile() {
        let profile = IiopProfile::new("10.0.0.1", 683)
            .with_version(GiopVersion::new(1, 1))
            .with_components(vec![TaggedComponent::new(0, vec![0, 0, 0, 0, 0, 1, 0, 0x20])]);
        let reference = ObjectReference::new(
            "IDL:Test:1.0",
            vec![
                profile.into(),
                Profile::Tagged {
                    tag: 1,
                    data: vec![1, 0, 0, 0],
                },
            ],
            vec![1, 2, 3],
        );
        let mut encoder = CdrEncoder::new(ByteOrder::LittleEndian);
        write_object_reference(&mut encoder, &reference);
        let mut input = encoder.create_input_stream();
        assert_eq!(read_object_reference(&mut input).unwrap(), reference);
    }

    #[test]
    fn test_ior_string_round_trip() {
        let reference = sample();
        for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
            let ior = reference.to_ior_string(order);
            assert!(ior.starts_with("IOR:"));
            assert_eq!(ObjectReference::from_ior_string(&ior).unwrap(), reference);
        }
    }

    #[test]
    fn test_ior_string_prefix_case_insensitive() {
        let ior = sample().to_ior_string(ByteOrder::BigEndian);
        let lower = format!("ior:{}", &ior[4..]);
        assert_eq!(ObjectReference::from_ior_string(&lower).unwrap(), sample());
    }

    #[test]
    fn test_nil_reference_string() {
        let nil = ObjectReference::nil();
        let ior = nil.to_ior_string(ByteOrder::BigEndian);
        // flag, pad, length 1, "", pad, count 0
        assert_eq!(ior, "IOR:00000000000000010000000000000000");
        assert!(ObjectReference::from_ior_string(&ior).unwrap().is_nil());
    }

    #[test]
    fn test_ior_string_errors() {
        assert!(matches!(
            ObjectReference::from_ior_string("corbaloc::h/k").unwrap_err(),
            OrbError::InvalidArgument { .. }
        ));
        assert!(matches!(
            ObjectReference::from_ior_string("IOR:0g").unwrap_err(),
            OrbError::InvalidArgument { .. }
        ));
        assert!(matches!(
            ObjectReference::from_ior_string("IOR:").unwrap_err(),
            OrbError::Malformed { .. }
        ));
        assert!(matches!(
            ObjectReference::from_ior_string("IOR:0000").unwrap_err(),
            OrbError::Underflow { .. }
        ));
    }

    #[test]
    fn test_excessive_profile_count_is_malformed() {
        let mut encoder = CdrEncoder::new(ByteOrder::BigEndian);
        encoder.write_string("").write_ulong(u32::MAX);
        let mut input = encoder.create_input_stream();
        assert!(matches!(
            read_object_reference(&mut input).unwrap_err(),
            OrbError::Malformed { .. }
        ));
    }
}
