// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! corbaloc locator parsing tests.

use orbcodec::{
    parse_locator, AddressPolicy, GiopVersion, IiopProfile, InitialReferenceResolver,
    InitialReferences, Locator, LocatorParser, ObjectReference, OrbError,
};

fn parse_reference(input: &str) -> ObjectReference {
    match parse_locator(input).expect("parse locator") {
        Locator::Iiop(reference) => reference,
        other => panic!("expected an addressed reference, got {other:?}"),
    }
}

fn only_profile(reference: &ObjectReference) -> &IiopProfile {
    assert_eq!(reference.profiles().len(), 1, "{reference:?}");
    reference.primary_profile().expect("iiop profile")
}

// ============================================================================
// Literal Cases
// ============================================================================

#[test]
fn test_iiop_with_version() {
    let reference = parse_reference("corbaloc:iiop:1.3@155axyz.com/Prod/aTradingService");
    let profile = only_profile(&reference);
    assert_eq!(profile.host(), "155axyz.com");
    assert_eq!(profile.port(), 2809);
    assert_eq!(profile.version(), GiopVersion::new(1, 3));
    assert_eq!(reference.object_key(), b"Prod/aTradingService");
    assert!(reference.type_id().is_empty());
}

#[test]
fn test_iiop_with_port() {
    let reference = parse_reference("corbaloc:iiop:355cxyz.com:7777/Prod/cTradingService");
    let profile = only_profile(&reference);
    assert_eq!(profile.host(), "355cxyz.com");
    assert_eq!(profile.port(), 7777);
    assert_eq!(profile.version(), GiopVersion::new(1, 0));
    assert_eq!(reference.object_key(), b"Prod/cTradingService");
}

#[test]
fn test_bare_protocol() {
    let reference = parse_reference("corbaloc::556xyz.com:80/Dev/NameService");
    let profile = only_profile(&reference);
    assert_eq!(profile.host(), "556xyz.com");
    assert_eq!(profile.port(), 80);
    assert_eq!(reference.object_key(), b"Dev/NameService");
}

#[test]
fn test_rir_triggers_resolution() {
    assert_eq!(
        parse_locator("corbaloc:rir:/NameService").unwrap(),
        Locator::InitialReference {
            name: "NameService".to_string()
        }
    );

    let naming = ObjectReference::iiop(
        "IDL:omg.org/CosNaming/NamingContextExt:1.0",
        IiopProfile::new("ns.internal", 2809),
        b"NameService".to_vec(),
    );
    let registry = InitialReferences::new();
    registry.register("NameService", naming.clone());

    let resolved = LocatorParser::new()
        .resolve("corbaloc:rir:/NameService", &registry)
        .unwrap();
    assert_eq!(resolved, naming);
}

#[test]
fn test_address_list_keeps_last_by_default() {
    let reference = parse_reference("corbaloc::555xyz.com,:556xyz.com:80/Dev/NameService");
    let profile = only_profile(&reference);
    assert_eq!(profile.host(), "556xyz.com");
    assert_eq!(profile.port(), 80);
    assert_eq!(reference.object_key(), b"Dev/NameService");
}

#[test]
fn test_missing_prefix() {
    let err = parse_locator("corbalocX:iiop:host/key").unwrap_err();
    assert!(matches!(err, OrbError::InvalidArgument { .. }));
    assert!(err.to_string().contains("must start with corbaloc:"));

    for input in ["", "iiop:host/key", "corbaloc", "IOR:00"] {
        assert!(
            matches!(
                parse_locator(input).unwrap_err(),
                OrbError::InvalidArgument { .. }
            ),
            "{input}"
        );
    }
}

// ============================================================================
// Address Policies
// ============================================================================

#[test]
fn test_fallback_keeps_every_address() {
    let parser = LocatorParser::new().with_policy(AddressPolicy::Fallback);
    let Locator::Iiop(reference) = parser
        .parse("corbaloc::555xyz.com,:556xyz.com:80,iiop:1.2@557xyz.com:81/Dev/NameService")
        .unwrap()
    else {
        panic!("expected an addressed reference");
    };

    let hosts: Vec<(&str, u16, GiopVersion)> = reference
        .iiop_profiles()
        .map(|p| (p.host(), p.port(), p.version()))
        .collect();
    assert_eq!(
        hosts,
        vec![
            ("555xyz.com", 2809, GiopVersion::V1_0),
            ("556xyz.com", 80, GiopVersion::V1_0),
            ("557xyz.com", 81, GiopVersion::new(1, 2)),
        ]
    );
    assert_eq!(reference.primary_profile().unwrap().host(), "555xyz.com");
}

#[test]
fn test_policies_agree_on_single_address() {
    let input = "corbaloc:iiop:1.1@host:9/key";
    let last = LocatorParser::new().parse(input).unwrap();
    let fallback = LocatorParser::new()
        .with_policy(AddressPolicy::Fallback)
        .parse(input)
        .unwrap();
    assert_eq!(last, fallback);
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_key_is_percent_decoded() {
    let reference = parse_reference("corbaloc::host/My%20Service%00%FF");
    assert_eq!(reference.object_key(), b"My Service\x00\xFF");
}

#[test]
fn test_key_keeps_structural_characters() {
    let reference = parse_reference("corbaloc::host/a:b@c.d,e#f");
    assert_eq!(reference.object_key(), b"a:b@c.d,e#f");
}

#[test]
fn test_malformed_escape_kept() {
    let reference = parse_reference("corbaloc::host/100%zz%");
    assert_eq!(reference.object_key(), b"100%zz%");
}

#[test]
fn test_missing_key() {
    for input in ["corbaloc::host", "corbaloc:iiop:host:80", "corbaloc::a,:b"] {
        let err = parse_locator(input).unwrap_err();
        assert!(matches!(err, OrbError::InvalidArgument { .. }), "{input}");
    }
}

#[test]
fn test_empty_key_allowed() {
    let reference = parse_reference("corbaloc::host/");
    assert!(reference.object_key().is_empty());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unsupported_protocol() {
    let err = parse_locator("corbaloc:ssliop:host/key").unwrap_err();
    assert_eq!(err, OrbError::unsupported_protocol("ssliop"));
    assert!(err.is_input_error());
}

#[test]
fn test_bad_numbers_quote_the_token() {
    let err = parse_locator("corbaloc::host:99999/key").unwrap_err();
    assert_eq!(err, OrbError::invalid_token("invalid port", "99999"));

    let err = parse_locator("corbaloc:iiop:one.2@host/key").unwrap_err();
    assert_eq!(err, OrbError::invalid_token("invalid major version", "one"));
}

#[test]
fn test_rir_in_address_list() {
    let err = parse_locator("corbaloc::host,rir:/NameService").unwrap_err();
    assert!(matches!(err, OrbError::InvalidArgument { .. }));
}

#[test]
fn test_unknown_initial_reference() {
    let registry = InitialReferences::new();
    let err = LocatorParser::new()
        .resolve("corbaloc:rir:/Trader", &registry)
        .unwrap_err();
    assert_eq!(err, OrbError::unknown_initial_reference("Trader"));
    assert!(err.is_resolution_error());
    assert!(registry.list_initial_services().is_empty());
}

// ============================================================================
// Idempotence and Inverse
// ============================================================================

#[test]
fn test_parsing_is_idempotent() {
    let inputs = [
        "corbaloc:iiop:1.3@155axyz.com/Prod/aTradingService",
        "corbaloc:iiop:355cxyz.com:7777/Prod/cTradingService",
        "corbaloc::556xyz.com:80/Dev/NameService",
        "corbaloc::555xyz.com,:556xyz.com:80/Dev/NameService",
        "corbaloc:rir:/NameService",
    ];
    for input in inputs {
        assert_eq!(parse_locator(input).unwrap(), parse_locator(input).unwrap());
    }
}

#[test]
fn test_to_corbaloc_parses_back() {
    let parser = LocatorParser::new().with_policy(AddressPolicy::Fallback);
    let inputs = [
        "corbaloc:iiop:1.3@155axyz.com/Prod/aTradingService",
        "corbaloc::[::1]:9999/a%20key",
        "corbaloc::a.example.com:1,iiop:1.2@b.example.com:2/k%2Fx",
    ];
    for input in inputs {
        let Locator::Iiop(reference) = parser.parse(input).unwrap() else {
            panic!("expected an addressed reference");
        };
        let rendered = reference.to_corbaloc().unwrap();
        assert_eq!(parser.parse(&rendered).unwrap(), Locator::Iiop(reference.clone()));
        assert_eq!(reference.to_string(), rendered);
    }
}

#[test]
fn test_leading_whitespace_ignored() {
    assert_eq!(
        parse_locator("  \tcorbaloc::h/k").unwrap(),
        parse_locator("corbaloc::h/k").unwrap()
    );
}

#[test]
fn test_trailing_whitespace_belongs_to_key() {
    let reference = parse_reference("corbaloc::h/My Key \n");
    assert_eq!(reference.object_key(), b"My Key \n");
}
