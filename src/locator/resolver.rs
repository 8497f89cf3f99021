// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Initial-reference resolution for `corbaloc:rir:` locators.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::trace;

use crate::core::{ObjectReference, OrbError, Result};

/// Looks up well-known object references by name.
///
/// The locator parser calls this for `rir:` locators only. Implementations
/// may block; no timeout is imposed by the caller.
pub trait InitialReferenceResolver {
    /// Resolve `name`, failing with [`OrbError::UnknownInitialReference`]
    /// when it is not known.
    fn resolve_initial_reference(&self, name: &str) -> Result<ObjectReference>;

    /// Names this resolver can resolve.
    fn list_initial_services(&self) -> Vec<String>;
}

/// Thread-safe name to reference registry.
///
/// Uses RwLock for concurrent read access with exclusive write access, so
/// one registry can serve several parsers.
#[derive(Debug, Default)]
pub struct InitialReferences {
    inner: RwLock<HashMap<String, ObjectReference>>,
}

impl InitialReferences {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `reference` under `name`, returning the one it replaces.
    pub fn register(
        &self,
        name: impl Into<String>,
        reference: ObjectReference,
    ) -> Option<ObjectReference> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.insert(name.into(), reference)
    }

    pub fn get(&self, name: &str) -> Option<ObjectReference> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.contains_key(name)
    }

    /// Remove a registration. Returns true if `name` was present.
    pub fn remove(&self, name: &str) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(String, ObjectReference)> for InitialReferences {
    fn from_iter<I: IntoIterator<Item = (String, ObjectReference)>>(iter: I) -> Self {
        Self {
            inner: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl InitialReferenceResolver for InitialReferences {
    fn resolve_initial_reference(&self, name: &str) -> Result<ObjectReference> {
        let found = self.get(name);
        trace!(name, found = found.is_some(), "initial reference lookup");
        found.ok_or_else(|| OrbError::unknown_initial_reference(name))
    }

    /// Registered names, sorted.
    fn list_initial_services(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = inner.keys().cloned().collect();
        names.sort();
        names
    }
}
