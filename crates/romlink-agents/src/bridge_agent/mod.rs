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

//! The agent connecting the interpreter's events to the loader and the sink.
//!
//! Every `fetch` becomes its own task that resolves, loads, and answers with
//! exactly one `deliver`. Every `playSound` becomes its own fire-and-forget
//! task. Nothing is serialized: answers go out in completion order, and a
//! playback failure cannot touch the load pipeline.

use romlink_core::audio::AudioSink;
use romlink_core::channel::{HostEndpoint, OutboundEvent};
use romlink_core::{AssetRegistry, StartupConfig};
use romlink_io::AssetLoader;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};

/// What a bridge handled over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeSummary {
    /// `fetch` events received, each answered by one `deliver`.
    pub fetches: usize,
    /// `playSound` events received.
    pub sounds: usize,
}

/// Dispatches interpreter events until the interpreter goes away.
pub struct MessageBridge {
    registry: Arc<AssetRegistry>,
    loader: Arc<AssetLoader>,
    audio: Arc<dyn AudioSink>,
    endpoint: HostEndpoint,
}

impl MessageBridge {
    /// Creates a bridge over the host end of a message channel.
    pub fn new(
        registry: Arc<AssetRegistry>,
        loader: Arc<AssetLoader>,
        audio: Arc<dyn AudioSink>,
        endpoint: HostEndpoint,
    ) -> Self {
        Self {
            registry,
            loader,
            audio,
            endpoint,
        }
    }

    /// The program list handed to the interpreter at initialization.
    pub fn startup_config(&self) -> StartupConfig {
        StartupConfig::from_registry(&self.registry)
    }

    /// Runs the bridge.
    ///
    /// Returns once the interpreter side of the channel is closed and every
    /// task already started has settled. In-flight loads are never cancelled;
    /// their answers are dropped if nobody is listening anymore.
    pub async fn run(self) -> BridgeSummary {
        let mut tasks = JoinSet::new();
        let mut summary = BridgeSummary::default();
        log::info!(
            "Message bridge running with {} registered program(s).",
            self.registry.len()
        );

        loop {
            tokio::select! {
                event = self.endpoint.next_event() => match event {
                    Some(event) => self.dispatch(event, &mut tasks, &mut summary),
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => report(joined),
            }
        }

        if !tasks.is_empty() {
            log::debug!(
                "Interpreter closed the channel; settling {} outstanding task(s).",
                tasks.len()
            );
        }
        while let Some(joined) = tasks.join_next().await {
            report(joined);
        }

        log::info!(
            "Message bridge stopped after {} fetch(es) and {} sound request(s).",
            summary.fetches,
            summary.sounds
        );
        summary
    }

    fn dispatch(&self, event: OutboundEvent, tasks: &mut JoinSet<()>, summary: &mut BridgeSummary) {
        match event {
            OutboundEvent::Fetch { name } => {
                summary.fetches += 1;
                log::debug!("fetch '{name}'");

                let registry = self.registry.clone();
                let loader = self.loader.clone();
                let deliver = self.endpoint.deliver_handle();
                tasks.spawn(async move {
                    let bytes = loader.load_program(&registry, &name).await;
                    deliver.deliver(bytes);
                });
            }
            OutboundEvent::PlaySound => {
                summary.sounds += 1;

                let audio = self.audio.clone();
                tasks.spawn(async move {
                    if let Err(err) = audio.play() {
                        log::trace!("Playback skipped: {err}");
                    }
                });
            }
        }
    }
}

fn report(joined: Result<(), JoinError>) {
    if let Err(err) = joined {
        log::error!("Bridge task ended abnormally: {err}");
    }
}
