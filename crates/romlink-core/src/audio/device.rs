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

//! The speaker side of the sound path: an output stream pulling mixed samples.

use anyhow::Result;

/// Format of the output stream, as negotiated by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    /// Interleaved output channels.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
}

impl StreamInfo {
    /// Whether a buffer in this format can carry any sound at all.
    pub fn is_audible(&self) -> bool {
        self.channels > 0 && self.sample_rate > 0
    }
}

/// Fills an interleaved output buffer with the next stretch of sound.
///
/// Runs on the backend's audio thread and must never block on the bridge.
pub type MixCallback = Box<dyn FnMut(&mut [f32], &StreamInfo) + Send>;

/// An output stream that can be opened once and then pulls from a [`MixCallback`].
///
/// The sound clip player owns one of these. Backends open the stream in
/// [`start`](AudioDevice::start) and keep it alive for the rest of the process.
pub trait AudioDevice: Send + Sync {
    /// Opens the stream. An error means no sound will ever be produced.
    fn start(self: Box<Self>, on_mix_needed: MixCallback) -> Result<()>;
}
