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

//! Wires the host services together from a manifest.

use anyhow::{Context, Result};
use romlink_agents::ClipPlayer;
use romlink_core::audio::{AudioSink, MutedSink};
use romlink_core::AssetRegistry;
use romlink_infra::CpalAudioDevice;
use romlink_io::{load_sound_clip, AssetLoader, FileFetcher, HttpFetcher, RomManifest, SchemeFetcher};
use std::path::Path;
use std::sync::Arc;

/// The shared, read-only services of a running host.
pub struct Host {
    pub registry: Arc<AssetRegistry>,
    pub loader: Arc<AssetLoader>,
    pub audio: Arc<dyn AudioSink>,
}

impl Host {
    pub fn new(registry: AssetRegistry, loader: AssetLoader, audio: Arc<dyn AudioSink>) -> Self {
        Self {
            registry: Arc::new(registry),
            loader: Arc::new(loader),
            audio,
        }
    }

    /// Builds the host described by the manifest at `path`.
    ///
    /// An unreadable manifest or an invalid registry is fatal. Audio problems
    /// are not: the host falls back to a muted sink.
    pub async fn from_manifest(path: &Path, with_audio: bool) -> Result<Self> {
        let manifest = RomManifest::from_path(path)
            .with_context(|| format!("Failed to load manifest '{}'", path.display()))?;
        let registry = manifest
            .to_registry()
            .context("The manifest does not describe a valid program registry")?;
        log::info!(
            "Loaded manifest '{}' with {} program(s).",
            path.display(),
            registry.len()
        );

        let http = HttpFetcher::new(manifest.http_timeout()).context("Failed to build HTTP client")?;
        let loader = AssetLoader::new(SchemeFetcher::new(http, FileFetcher::new()));

        let audio: Arc<dyn AudioSink> = if with_audio {
            open_audio(&manifest).await
        } else {
            Arc::new(MutedSink)
        };

        Ok(Self::new(registry, loader, audio))
    }
}

async fn open_audio(manifest: &RomManifest) -> Arc<dyn AudioSink> {
    let Some(path) = manifest.sound_path() else {
        log::info!("No sound clip configured; playSound is muted.");
        return Arc::new(MutedSink);
    };

    let clip = match load_sound_clip(&path).await {
        Ok(clip) => clip,
        Err(err) => {
            log::warn!("{err:#}; playSound is muted.");
            return Arc::new(MutedSink);
        }
    };

    let player = ClipPlayer::new(clip, Box::new(CpalAudioDevice::new()));
    if let Err(err) = player.start() {
        log::warn!("Audio output unavailable: {err:#}");
    }
    Arc::new(player)
}
