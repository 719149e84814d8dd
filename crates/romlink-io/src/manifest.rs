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

//! The `Roms.toml` manifest that configures the host.
//!
//! ```toml
//! [http]
//! timeout_secs = 10
//!
//! [sound]
//! path = "assets/beep.wav"
//!
//! [[rom]]
//! name = "Missile"
//! locator = "roms/MISSILE"
//! ```
//!
//! Relative paths (rom locators without a scheme, the sound path) are
//! resolved against the directory holding the manifest.

use romlink_core::{AssetRegistry, Locator, RegistryError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A manifest that could not be turned into configuration.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest '{path}'")]
    Read {
        /// The manifest path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The manifest is not valid TOML for this schema.
    #[error("invalid manifest")]
    Parse(#[from] toml::de::Error),
}

/// Network settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Where the host's sound clip lives.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SoundSettings {
    /// Path to a WAV file.
    pub path: PathBuf,
}

/// One registered program.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RomEntry {
    /// The name shown to the interpreter.
    pub name: String,
    /// Where to retrieve it from.
    pub locator: String,
}

/// Represents the structure of the `Roms.toml` manifest file.
#[derive(Deserialize, Debug, Clone)]
pub struct RomManifest {
    /// Network settings.
    #[serde(default)]
    pub http: HttpSettings,
    /// The optional sound clip.
    #[serde(default)]
    pub sound: Option<SoundSettings>,
    /// Registered programs, in presentation order.
    #[serde(default, rename = "rom")]
    pub roms: Vec<RomEntry>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl RomManifest {
    /// Reads and parses a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_str_at(&text, base_dir)
    }

    /// Parses manifest text, resolving relative paths against `base_dir`.
    pub fn from_str_at(text: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let mut manifest: RomManifest = toml::from_str(text)?;
        manifest.base_dir = base_dir.into();
        log::debug!(
            "Manifest parsed: {} programs, sound {}.",
            manifest.roms.len(),
            if manifest.sound.is_some() { "configured" } else { "absent" }
        );
        Ok(manifest)
    }

    /// Builds the program registry.
    pub fn to_registry(&self) -> Result<AssetRegistry, RegistryError> {
        AssetRegistry::from_entries(
            self.roms
                .iter()
                .map(|rom| (rom.name.as_str(), self.resolve_locator(&rom.locator))),
        )
    }

    /// Turns a raw manifest locator into a [`Locator`].
    ///
    /// URIs and absolute paths are kept; relative paths are anchored at the
    /// manifest directory.
    pub fn resolve_locator(&self, raw: &str) -> Locator {
        let locator = Locator::from(raw);
        if raw.is_empty() || locator.scheme().is_some() || Path::new(raw).is_absolute() {
            locator
        } else {
            Locator::new(self.base_dir.join(raw).to_string_lossy())
        }
    }

    /// The resolved sound clip path, if one is configured.
    pub fn sound_path(&self) -> Option<PathBuf> {
        self.sound.as_ref().map(|sound| self.base_dir.join(&sound.path))
    }

    /// The per-request network timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}
