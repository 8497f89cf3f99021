// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ORB configuration loaded from TOML.
//!
//! ```toml
//! byte_order = "big"
//! default_port = 2809
//! address_policy = "last"
//!
//! [initial_references]
//! NameService = "corbaloc::localhost:2809/NameService"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ObjectReference, OrbError, DEFAULT_IIOP_PORT};
use crate::encoding::cdr::IOR_PREFIX;
use crate::encoding::ByteOrder;
use crate::locator::{AddressPolicy, InitialReferences, Locator, LocatorParser};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid initial reference '{name}': {source}")]
    Reference {
        name: String,
        #[source]
        source: OrbError,
    },
}

/// Codec and locator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrbConfig {
    /// Byte order for encoded streams (default: big)
    #[serde(default)]
    pub byte_order: ByteOrder,

    /// Port used by corbaloc addresses without one (default: 2809)
    #[serde(default = "default_port")]
    pub default_port: u16,

    /// Handling of comma-separated address lists (default: last)
    #[serde(default)]
    pub address_policy: AddressPolicy,

    /// Initial references by name, as corbaloc or IOR strings
    #[serde(default)]
    pub initial_references: BTreeMap<String, String>,
}

fn default_port() -> u16 {
    DEFAULT_IIOP_PORT
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::default(),
            default_port: default_port(),
            address_policy: AddressPolicy::default(),
            initial_references: BTreeMap::new(),
        }
    }
}

impl OrbConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: OrbConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_port == 0 {
            return Err(ConfigError::InvalidValue("default_port cannot be 0".into()));
        }
        for (name, value) in &self.initial_references {
            if name.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "initial reference name cannot be empty".into(),
                ));
            }
            self.parse_reference(name, value)?;
        }
        Ok(())
    }

    /// Parser configured with this port and address policy.
    pub fn locator_parser(&self) -> LocatorParser {
        LocatorParser::new()
            .with_default_port(self.default_port)
            .with_policy(self.address_policy)
    }

    /// Build the initial-reference registry.
    pub fn initial_references(&self) -> Result<InitialReferences, ConfigError> {
        self.initial_references
            .iter()
            .map(|(name, value)| Ok((name.clone(), self.parse_reference(name, value)?)))
            .collect()
    }

    fn parse_reference(&self, name: &str, value: &str) -> Result<ObjectReference, ConfigError> {
        let reference_error = |source| ConfigError::Reference {
            name: name.to_string(),
            source,
        };

        let value = value.trim_start();
        let is_ior = value
            .get(..IOR_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IOR_PREFIX));
        if is_ior {
            return ObjectReference::from_ior_string(value).map_err(reference_error);
        }

        match self.locator_parser().parse(value).map_err(reference_error)? {
            Locator::Iiop(reference) => Ok(reference),
            Locator::InitialReference { .. } => Err(ConfigError::InvalidValue(format!(
                "initial reference '{name}' cannot itself be a rir: locator"
            ))),
        }
    }
}
