// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The program registry: a fixed mapping from program names to locators.
//!
//! The registry is built once at startup from the host configuration and is
//! read-only afterwards, so it can be shared across tasks behind an `Arc`
//! without any locking.

use crate::error::RegistryError;
use crate::program::{Locator, ProgramName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The runtime representation of the configured program set.
///
/// Lookups are O(1). Registration order is preserved and exposed through
/// [`AssetRegistry::names`], which is what the interpreter gets to choose from.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    entries: Vec<(ProgramName, Locator)>,
    index: HashMap<ProgramName, usize>,
}

impl AssetRegistry {
    /// Builds a registry from ordered `(name, locator)` pairs.
    ///
    /// # Errors
    /// Returns a [`RegistryError`] on a duplicate name, an empty name, or an
    /// empty locator. A registry is never partially built.
    pub fn from_entries<I, N, L>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (N, L)>,
        N: Into<ProgramName>,
        L: Into<Locator>,
    {
        let mut registry = Self::default();
        for (name, locator) in entries {
            let name = name.into();
            let locator = locator.into();

            if name.as_str().is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if locator.as_str().is_empty() {
                return Err(RegistryError::EmptyLocator(name.to_string()));
            }
            if registry.index.contains_key(&name) {
                return Err(RegistryError::DuplicateName(name.to_string()));
            }

            registry.index.insert(name.clone(), registry.entries.len());
            registry.entries.push((name, locator));
        }
        log::debug!("Program registry built with {} entries.", registry.len());
        Ok(registry)
    }

    /// Looks up the locator for a program.
    ///
    /// `None` is the normal "not found" outcome. Callers deliver empty content
    /// for it and never treat it as fatal.
    pub fn resolve(&self, name: &ProgramName) -> Option<&Locator> {
        self.index
            .get(name)
            .map(|&position| &self.entries[position].1)
    }

    /// Whether a program with this name is registered.
    pub fn contains(&self, name: &ProgramName) -> bool {
        self.index.contains_key(name)
    }

    /// The registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &ProgramName> + '_ {
        self.entries.iter().map(|(name, _)| name)
    }

    /// Number of registered programs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no program is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the interpreter is told when it starts: the programs it may request.
///
/// Locators stay on the host side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Program names in registration order.
    pub programs: Vec<ProgramName>,
}

impl StartupConfig {
    /// Captures the key set of a registry.
    pub fn from_registry(registry: &AssetRegistry) -> Self {
        Self {
            programs: registry.names().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AssetRegistry {
        AssetRegistry::from_entries([
            ("Puzzle", "roms/PUZZLE"),
            ("Missile", "https://example.org/roms/MISSILE"),
        ])
        .expect("sample registry is valid")
    }

    #[test]
    fn resolves_registered_names() {
        let registry = sample();
        assert_eq!(
            registry.resolve(&"Missile".into()),
            Some(&Locator::from("https://example.org/roms/MISSILE"))
        );
        assert_eq!(
            registry.resolve(&"Puzzle".into()).map(Locator::as_str),
            Some("roms/PUZZLE")
        );
    }

    #[test]
    fn unknown_names_are_not_found() {
        let registry = sample();
        assert!(registry.resolve(&"Unknown".into()).is_none());
        assert!(!registry.contains(&"missile".into()), "lookups are case-sensitive");
    }

    #[test]
    fn names_keep_registration_order() {
        let registry = sample();
        let names: Vec<&str> = registry.names().map(ProgramName::as_str).collect();
        assert_eq!(names, ["Puzzle", "Missile"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = AssetRegistry::from_entries([("Pong", "a"), ("Pong", "b")]);
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateName("Pong".to_string())
        );
    }

    #[test]
    fn empty_entries_are_rejected() {
        assert_eq!(
            AssetRegistry::from_entries([("", "roms/X")]).unwrap_err(),
            RegistryError::EmptyName
        );
        assert_eq!(
            AssetRegistry::from_entries([("X", "")]).unwrap_err(),
            RegistryError::EmptyLocator("X".to_string())
        );
    }

    #[test]
    fn startup_config_lists_names_only() {
        let config = StartupConfig::from_registry(&sample());
        assert_eq!(
            config.programs,
            vec![ProgramName::from("Puzzle"), ProgramName::from("Missile")]
        );
    }

    #[test]
    fn empty_registry_is_valid() {
        let registry = AssetRegistry::from_entries(Vec::<(&str, &str)>::new()).unwrap();
        assert!(registry.is_empty());
        assert!(StartupConfig::from_registry(&registry).programs.is_empty());
    }
}
