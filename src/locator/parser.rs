// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! corbaloc parser.
//!
//! Walks the token stream produced by [`tokenize`] with an explicit cursor.
//! Supported forms:
//!
//! ```text
//! corbaloc:rir:/NameService
//! corbaloc:iiop:1.2@host.example.com:2809/Some/Key
//! corbaloc::host1,:host2:80/Some/Key
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::escape::percent_decode;
use super::resolver::InitialReferenceResolver;
use super::tokenizer::{tokenize, Token, TokenKind};
use crate::core::{
    GiopVersion, IiopProfile, ObjectReference, OrbError, Profile, Result, DEFAULT_IIOP_PORT,
};

/// Name resolved by `corbaloc:rir:` when the key is empty.
pub const DEFAULT_INITIAL_REFERENCE: &str = "NameService";

/// Host used when an address leaves it empty.
const DEFAULT_HOST: &str = "localhost";

/// What to do with a comma-separated address list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AddressPolicy {
    /// Keep only the last address. Earlier ones are dropped with a warning.
    #[default]
    #[serde(rename = "last")]
    LastOnly,
    /// Keep every address as a profile, in source order.
    #[serde(rename = "fallback")]
    Fallback,
}

impl std::str::FromStr for AddressPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "last" | "last-only" => Ok(Self::LastOnly),
            "fallback" => Ok(Self::Fallback),
            other => Err(format!("unknown address policy '{other}'")),
        }
    }
}

/// Result of parsing a corbaloc string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A transport-addressed reference.
    Iiop(ObjectReference),
    /// `rir:` form naming an initial reference to look up.
    InitialReference { name: String },
}

/// Parser for `corbaloc:` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorParser {
    policy: AddressPolicy,
    default_port: u16,
}

impl Default for LocatorParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LocatorParser {
    /// Create a parser with the legacy last-address policy and port 2809.
    pub fn new() -> Self {
        Self {
            policy: AddressPolicy::LastOnly,
            default_port: DEFAULT_IIOP_PORT,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: AddressPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Port used by addresses that do not name one.
    #[must_use]
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    pub fn policy(&self) -> AddressPolicy {
        self.policy
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// Parse a corbaloc string. Never performs resolution.
    ///
    /// Leading whitespace is skipped. Everything after the `/` belongs to
    /// the object key, trailing whitespace included.
    pub fn parse(&self, input: &str) -> Result<Locator> {
        let input = input.trim_start();
        let tokens = tokenize(input)?;
        let mut walker = TokenWalker::new(&tokens);

        match (walker.peek(0), walker.peek(1)) {
            (Some(scheme), Some(colon)) if scheme.is_keyword("corbaloc") && colon.is(':') => {
                walker.advance(2);
            }
            _ => {
                let found = tokens.first().map(|t| t.text).unwrap_or_default();
                return Err(OrbError::invalid_token("must start with corbaloc:", found));
            }
        }

        if walker.peek(0).is_some_and(|t| t.is_keyword("rir")) {
            return self.parse_rir(&mut walker);
        }

        let mut addresses = Vec::new();
        loop {
            addresses.push(self.parse_address(&mut walker)?);
            match walker.peek(0) {
                Some(t) if t.is(',') => walker.advance(1),
                _ => break,
            }
        }

        match walker.bump() {
            Some(t) if t.is('/') => {}
            Some(t) => {
                return Err(OrbError::invalid_token("expected '/' before object key", t.text));
            }
            None => return Err(OrbError::invalid_argument("missing '/' and object key")),
        }
        let object_key = percent_decode(&walker.rest());

        for profile in &addresses {
            debug!(address = %profile.to_address(), "parsed corbaloc address");
        }
        let profiles = self.apply_policy(addresses);
        Ok(Locator::Iiop(ObjectReference::new("", profiles, object_key)))
    }

    /// Parse `input` and resolve a `rir:` locator through `resolver`.
    pub fn resolve(
        &self,
        input: &str,
        resolver: &dyn InitialReferenceResolver,
    ) -> Result<ObjectReference> {
        match self.parse(input)? {
            Locator::Iiop(reference) => Ok(reference),
            Locator::InitialReference { name } => resolver.resolve_initial_reference(&name),
        }
    }

    fn parse_rir(&self, walker: &mut TokenWalker<'_, '_>) -> Result<Locator> {
        walker.advance(1);
        match walker.bump() {
            Some(t) if t.is(':') => {}
            Some(t) => return Err(OrbError::invalid_token("expected ':' after rir", t.text)),
            None => return Err(OrbError::invalid_argument("expected ':' after rir")),
        }

        let name = match walker.bump() {
            None => String::new(),
            Some(t) if t.is('/') => String::from_utf8_lossy(&percent_decode(&walker.rest()))
                .into_owned(),
            Some(t) if t.is(',') => {
                return Err(OrbError::invalid_token(
                    "rir cannot be combined with other addresses",
                    "rir",
                ));
            }
            Some(t) => return Err(OrbError::invalid_token("expected '/' after rir:", t.text)),
        };

        let name = if name.is_empty() {
            DEFAULT_INITIAL_REFERENCE.to_string()
        } else {
            name
        };
        debug!(name = %name, "parsed rir locator");
        Ok(Locator::InitialReference { name })
    }

    fn parse_address(&self, walker: &mut TokenWalker<'_, '_>) -> Result<IiopProfile> {
        // Protocol: ':' (bare) or "iiop:".
        match (walker.peek(0), walker.peek(1)) {
            (Some(t), _) if t.is(':') => walker.advance(1),
            (Some(t), Some(colon)) if t.is_keyword("iiop") && colon.is(':') => walker.advance(2),
            (Some(t), next) if t.is_keyword("iiop") => {
                return Err(match next {
                    Some(n) => OrbError::invalid_token("expected ':' after iiop", n.text),
                    None => OrbError::invalid_argument("expected ':' after iiop"),
                });
            }
            (Some(t), _) if t.is_keyword("rir") => {
                return Err(OrbError::invalid_token(
                    "rir cannot be combined with other addresses",
                    t.text,
                ));
            }
            (Some(t), _) if t.kind == TokenKind::Word => {
                return Err(OrbError::unsupported_protocol(t.text));
            }
            (Some(t), _) => {
                return Err(OrbError::invalid_token("expected address", t.text));
            }
            (None, _) => return Err(OrbError::invalid_argument("missing address")),
        }

        let version = self.parse_version(walker)?;

        let mut host = String::new();
        while let Some(t) = walker.peek(0) {
            if t.is(':') || t.is(',') || t.is('/') {
                break;
            }
            if t.is('@') || t.is('#') {
                return Err(OrbError::invalid_token("unexpected character in host", t.text));
            }
            host.push_str(t.host_text());
            walker.advance(1);
        }
        if host.is_empty() {
            host.push_str(DEFAULT_HOST);
        }

        let port = match walker.peek(0) {
            Some(t) if t.is(':') => {
                walker.advance(1);
                self.parse_port(walker)?
            }
            _ => self.default_port,
        };

        Ok(IiopProfile::new(host, port).with_version(version))
    }

    /// Look ahead for `major "." minor "@"`.
    fn parse_version(&self, walker: &mut TokenWalker<'_, '_>) -> Result<GiopVersion> {
        let (Some(major), Some(dot), Some(minor), Some(at)) =
            (walker.peek(0), walker.peek(1), walker.peek(2), walker.peek(3))
        else {
            return Ok(GiopVersion::V1_0);
        };
        if !(dot.is('.') && at.is('@')) {
            return Ok(GiopVersion::V1_0);
        }

        let major = parse_number::<u8>(major, "invalid major version")?;
        let minor = parse_number::<u8>(minor, "invalid minor version")?;
        walker.advance(4);
        Ok(GiopVersion::new(major, minor))
    }

    fn parse_port(&self, walker: &mut TokenWalker<'_, '_>) -> Result<u16> {
        let port = match walker.peek(0) {
            Some(t) if t.kind == TokenKind::Word => parse_number::<u16>(t, "invalid port")?,
            Some(t) => return Err(OrbError::invalid_token("missing port after ':'", t.text)),
            None => return Err(OrbError::invalid_argument("missing port after ':'")),
        };
        walker.advance(1);

        match walker.peek(0) {
            None => Ok(port),
            Some(t) if t.is(',') || t.is('/') => Ok(port),
            Some(t) => Err(OrbError::invalid_token("unexpected token after port", t.text)),
        }
    }

    fn apply_policy(&self, mut addresses: Vec<IiopProfile>) -> Vec<Profile> {
        match self.policy {
            AddressPolicy::Fallback => addresses.into_iter().map(Profile::from).collect(),
            AddressPolicy::LastOnly => {
                let Some(last) = addresses.pop() else {
                    return Vec::new();
                };
                if !addresses.is_empty() {
                    let dropped: Vec<String> =
                        addresses.iter().map(IiopProfile::to_address).collect();
                    warn!(
                        kept = %last.to_address(),
                        dropped = %dropped.join(","),
                        "corbaloc lists several addresses; only the last is kept"
                    );
                }
                vec![Profile::from(last)]
            }
        }
    }
}

fn parse_number<T: std::str::FromStr>(token: &Token<'_>, message: &str) -> Result<T> {
    if token.kind != TokenKind::Word {
        return Err(OrbError::invalid_token(message, token.text));
    }
    token
        .text
        .parse::<T>()
        .map_err(|_| OrbError::invalid_token(message, token.text))
}

/// Cursor over the token slice.
struct TokenWalker<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> TokenWalker<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self, offset: usize) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos + offset)
    }

    fn bump(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.tokens.len());
    }

    /// Concatenated text of every remaining token. Consumes them.
    fn rest(&mut self) -> String {
        let rest: String = self.tokens[self.pos..].iter().map(|t| t.text).collect();
        self.pos = self.tokens.len();
        rest
    }
}
