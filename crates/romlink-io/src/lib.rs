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

//! # Romlink IO
//!
//! I/O services of the host: retrieving program images behind locators,
//! applying the fail-open load policy, reading the `Roms.toml` manifest, and
//! decoding the sound clip.

#![warn(missing_docs)]

pub mod fetcher;
pub mod loader;
pub mod manifest;
pub mod sound;

pub use fetcher::{FileFetcher, HttpFetcher, SchemeFetcher};
pub use loader::{AssetLoader, LoadStats};
pub use manifest::{ManifestError, RomManifest};
pub use sound::{decode_wav, load_sound_clip};
