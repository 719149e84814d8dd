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

//! The asset loader: locator in, program bytes out, failures never escape.
//!
//! [`AssetLoader::try_load`] and [`AssetLoader::try_load_program`] expose the
//! internal [`LoadOutcome`] so failures stay visible to logs and tests.
//! [`AssetLoader::load`] and [`AssetLoader::load_program`] are the public
//! contract: they always resolve, and anything but a successful retrieval
//! resolves to empty bytes.

use romlink_core::{AssetFetcher, AssetRegistry, LoadOutcome, Locator, ProgramBytes, ProgramName};
use std::sync::atomic::{AtomicU64, Ordering};

/// A snapshot of what the loader has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Loads that produced content.
    pub loaded: u64,
    /// Requests for names missing from the registry.
    pub not_found: u64,
    /// Loads whose retrieval failed.
    pub failed: u64,
}

#[derive(Debug, Default)]
struct LoadCounters {
    loaded: AtomicU64,
    not_found: AtomicU64,
    failed: AtomicU64,
}

/// Retrieves program images through an [`AssetFetcher`] and decodes them.
///
/// The loader keeps no cache: every load hits the fetcher and ownership of the
/// bytes passes to the caller.
pub struct AssetLoader {
    fetcher: Box<dyn AssetFetcher>,
    counters: LoadCounters,
}

impl AssetLoader {
    /// Creates a loader on top of a retrieval back-end.
    pub fn new(fetcher: impl AssetFetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            counters: LoadCounters::default(),
        }
    }

    /// Retrieves and decodes the content behind `locator`.
    pub async fn try_load(&self, locator: &Locator) -> LoadOutcome {
        log::debug!("Fetching program from '{locator}'.");
        match self.fetcher.fetch(locator).await {
            Ok(raw) => {
                let bytes = decode(raw);
                self.counters.loaded.fetch_add(1, Ordering::Relaxed);
                log::debug!("Loaded {} bytes from '{locator}'.", bytes.len());
                LoadOutcome::Loaded(bytes)
            }
            Err(err) => {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Resolves `name` in the registry, then loads it.
    ///
    /// An unknown name yields [`LoadOutcome::NotFound`] without touching the
    /// fetcher.
    pub async fn try_load_program(
        &self,
        registry: &AssetRegistry,
        name: &ProgramName,
    ) -> LoadOutcome {
        match registry.resolve(name) {
            Some(locator) => self.try_load(locator).await,
            None => {
                self.counters.not_found.fetch_add(1, Ordering::Relaxed);
                log::debug!("Program '{name}' is not registered.");
                LoadOutcome::NotFound
            }
        }
    }

    /// Loads the content behind `locator`, empty on failure.
    pub async fn load(&self, locator: &Locator) -> ProgramBytes {
        settle(self.try_load(locator).await)
    }

    /// Loads a registered program by name, empty when unknown or on failure.
    pub async fn load_program(&self, registry: &AssetRegistry, name: &ProgramName) -> ProgramBytes {
        settle(self.try_load_program(registry, name).await)
    }

    /// Returns the counters accumulated since creation.
    pub fn stats(&self) -> LoadStats {
        LoadStats {
            loaded: self.counters.loaded.load(Ordering::Relaxed),
            not_found: self.counters.not_found.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for AssetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetLoader")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// The payload is taken byte-for-byte; this cannot fail.
fn decode(raw: Vec<u8>) -> ProgramBytes {
    ProgramBytes::from(raw)
}

fn settle(outcome: LoadOutcome) -> ProgramBytes {
    if let LoadOutcome::Failed(err) = &outcome {
        log::warn!("Program retrieval failed, delivering empty content: {err}");
    }
    outcome.into_bytes()
}
