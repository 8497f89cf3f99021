// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Interoperable Object Reference (IOR) data model.
//!
//! An [`ObjectReference`] is produced either by the locator parser (from a
//! `corbaloc:` string) or by the CDR codec (from wire bytes). It is immutable
//! once constructed and is handed to an external transport to open a
//! connection.

use std::fmt;

/// Profile tag of the Internet Inter-ORB Protocol.
pub const TAG_INTERNET_IOP: u32 = 0;

/// Profile tag of the multiple-components profile.
pub const TAG_MULTIPLE_COMPONENTS: u32 = 1;

/// Well-known IIOP port used when a locator omits one.
pub const DEFAULT_IIOP_PORT: u16 = 2809;

/// GIOP/IIOP protocol version (major.minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GiopVersion {
    pub major: u8,
    pub minor: u8,
}

impl GiopVersion {
    /// IIOP 1.0, the version assumed when none is given.
    pub const V1_0: GiopVersion = GiopVersion::new(1, 0);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Profile bodies carry tagged components from IIOP 1.1 onwards.
    pub const fn has_components(self) -> bool {
        self.major > 1 || (self.major == 1 && self.minor >= 1)
    }
}

impl Default for GiopVersion {
    fn default() -> Self {
        Self::V1_0
    }
}

impl fmt::Display for GiopVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A tagged component inside an IIOP 1.1+ profile body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedComponent {
    pub tag: u32,
    pub data: Vec<u8>,
}

impl TaggedComponent {
    pub fn new(tag: u32, data: Vec<u8>) -> Self {
        Self { tag, data }
    }
}

/// Internet (IIOP) transport profile: where the object lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IiopProfile {
    version: GiopVersion,
    host: String,
    port: u16,
    components: Vec<TaggedComponent>,
}

impl IiopProfile {
    /// Create an IIOP 1.0 profile for `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            version: GiopVersion::V1_0,
            host: host.into(),
            port,
            components: Vec::new(),
        }
    }

    /// Set the protocol version.
    #[must_use]
    pub fn with_version(mut self, version: GiopVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the tagged components. Ignored on the wire for IIOP 1.0.
    #[must_use]
    pub fn with_components(mut self, components: Vec<TaggedComponent>) -> Self {
        self.components = components;
        self
    }

    pub fn version(&self) -> GiopVersion {
        self.version
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn components(&self) -> &[TaggedComponent] {
        &self.components
    }

    /// Render as a corbaloc address (`iiop:1.2@host:port`).
    ///
    /// The version is omitted when it is the 1.0 default and IPv6 literals
    /// are bracketed.
    pub fn to_address(&self) -> String {
        let mut out = String::from("iiop:");
        if self.version != GiopVersion::V1_0 {
            out.push_str(&format!("{}@", self.version));
        }
        if self.host.contains(':') {
            out.push_str(&format!("[{}]", self.host));
        } else {
            out.push_str(&self.host);
        }
        out.push_str(&format!(":{}", self.port));
        out
    }
}

/// One transport profile of an object reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Profile {
    /// `TAG_INTERNET_IOP` profile
    Internet(IiopProfile),
    /// Any other profile, kept as opaque encapsulated bytes
    Tagged { tag: u32, data: Vec<u8> },
}

impl Profile {
    /// Wire tag of this profile.
    pub fn tag(&self) -> u32 {
        match self {
            Profile::Internet(_) => TAG_INTERNET_IOP,
            Profile::Tagged { tag, .. } => *tag,
        }
    }

    /// The IIOP profile, if this is one.
    pub fn as_iiop(&self) -> Option<&IiopProfile> {
        match self {
            Profile::Internet(profile) => Some(profile),
            Profile::Tagged { .. } => None,
        }
    }
}

impl From<IiopProfile> for Profile {
    fn from(profile: IiopProfile) -> Self {
        Profile::Internet(profile)
    }
}

/// Interoperable Object Reference.
///
/// Holds the repository type id, the ordered transport profiles and the
/// opaque object key. A reference with no profiles and a non-empty key is
/// only meaningful for local resolution; [`ObjectReference::is_addressed`]
/// tells whether a transport can connect to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ObjectReference {
    type_id: String,
    profiles: Vec<Profile>,
    object_key: Vec<u8>,
}

impl ObjectReference {
    /// Create a reference from its parts.
    pub fn new(type_id: impl Into<String>, profiles: Vec<Profile>, object_key: Vec<u8>) -> Self {
        Self {
            type_id: type_id.into(),
            profiles,
            object_key,
        }
    }

    /// Create a reference with a single IIOP profile.
    pub fn iiop(type_id: impl Into<String>, profile: IiopProfile, object_key: Vec<u8>) -> Self {
        Self::new(type_id, vec![Profile::Internet(profile)], object_key)
    }

    /// Create a profile-less reference for local resolution.
    pub fn local(type_id: impl Into<String>, object_key: Vec<u8>) -> Self {
        Self::new(type_id, Vec::new(), object_key)
    }

    /// The nil reference.
    pub fn nil() -> Self {
        Self::default()
    }

    /// Copy of this reference carrying a different type id.
    #[must_use]
    pub fn with_type_id(&self, type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            profiles: self.profiles.clone(),
            object_key: self.object_key.clone(),
        }
    }

    /// Repository id of the remote interface; empty when unknown.
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn object_key(&self) -> &[u8] {
        &self.object_key
    }

    /// IIOP profiles in preference order.
    pub fn iiop_profiles(&self) -> impl Iterator<Item = &IiopProfile> {
        self.profiles.iter().filter_map(Profile::as_iiop)
    }

    /// The first IIOP profile, the one a transport tries first.
    pub fn primary_profile(&self) -> Option<&IiopProfile> {
        self.iiop_profiles().next()
    }

    /// True if a transport can connect to this reference.
    pub fn is_addressed(&self) -> bool {
        self.iiop_profiles().any(|p| !p.host().is_empty())
    }

    /// True for a reference that can only be resolved locally.
    pub fn is_local(&self) -> bool {
        self.profiles.is_empty() && !self.object_key.is_empty()
    }

    pub fn is_nil(&self) -> bool {
        self.type_id.is_empty() && self.profiles.is_empty() && self.object_key.is_empty()
    }
}
