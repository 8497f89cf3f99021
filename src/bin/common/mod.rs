// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;
use tracing::debug;

use orbcodec::locator::escape::percent_encode;
use orbcodec::{InitialReferences, LocatorParser, ObjectReference, OrbConfig, Profile};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Configuration shared by every command.
pub struct Context {
    pub config: OrbConfig,
}

impl Context {
    /// Load the configuration file, or use defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                OrbConfig::from_file(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?
            }
            None => OrbConfig::default(),
        };
        Ok(Self { config })
    }

    /// Locator parser, optionally forcing the fallback address policy.
    pub fn parser(&self, fallback: bool) -> LocatorParser {
        let parser = self.config.locator_parser();
        if fallback {
            parser.with_policy(orbcodec::AddressPolicy::Fallback)
        } else {
            parser
        }
    }

    pub fn initial_references(&self) -> Result<InitialReferences> {
        Ok(self.config.initial_references()?)
    }
}

/// Print `value` as pretty JSON, or run `human_fn`.
pub fn output_json_or<T>(
    json: bool,
    value: &T,
    human_fn: impl FnOnce() -> std::io::Result<()>,
) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}

// Output types

#[derive(Serialize)]
pub struct ReferenceView {
    pub type_id: String,
    pub object_key: String,
    pub object_key_hex: String,
    pub profiles: Vec<ProfileView>,
    pub corbaloc: Option<String>,
}

#[derive(Serialize)]
pub struct ProfileView {
    pub tag: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_hex: Option<String>,
}

impl From<&ObjectReference> for ReferenceView {
    fn from(reference: &ObjectReference) -> Self {
        let profiles = reference
            .profiles()
            .iter()
            .map(|profile| match profile {
                Profile::Internet(iiop) => ProfileView {
                    tag: profile.tag(),
                    version: Some(iiop.version().to_string()),
                    host: Some(iiop.host().to_string()),
                    port: Some(iiop.port()),
                    components: Some(iiop.components().iter().map(|c| c.tag).collect()),
                    data_hex: None,
                },
                Profile::Tagged { tag, data } => ProfileView {
                    tag: *tag,
                    version: None,
                    host: None,
                    port: None,
                    components: None,
                    data_hex: Some(hex::encode(data)),
                },
            })
            .collect();

        Self {
            type_id: reference.type_id().to_string(),
            object_key: percent_encode(reference.object_key()),
            object_key_hex: hex::encode(reference.object_key()),
            profiles,
            corbaloc: reference.to_corbaloc(),
        }
    }
}

/// Print a reference in human-readable form.
pub fn print_reference(view: &ReferenceView) {
    let type_id = if view.type_id.is_empty() {
        "<none>"
    } else {
        view.type_id.as_str()
    };
    println!("Type ID:    {type_id}");
    println!("Object key: {}", view.object_key);
    println!("Profiles:   {}", view.profiles.len());
    for (i, profile) in view.profiles.iter().enumerate() {
        match (&profile.host, profile.port, &profile.version) {
            (Some(host), Some(port), Some(version)) => {
                println!("  [{i}] iiop {version} {host}:{port}");
                if let Some(components) = profile.components.as_ref().filter(|c| !c.is_empty()) {
                    println!("      components: {components:?}");
                }
            }
            _ => println!(
                "  [{i}] tag {} ({} bytes)",
                profile.tag,
                profile.data_hex.as_ref().map_or(0, |d| d.len() / 2)
            ),
        }
    }
    if let Some(corbaloc) = &view.corbaloc {
        println!("corbaloc:   {corbaloc}");
    }
}
