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

use crate::error::PlaybackError;

/// Plays the host's single sound clip on request.
///
/// Playback is best-effort: a failed attempt is not retried or queued. The
/// next request is the only recovery path.
pub trait AudioSink: Send + Sync {
    /// Attempts to start playback. Calling it while the clip is already
    /// playing restarts it.
    fn play(&self) -> Result<(), PlaybackError>;
}

/// The sink used when no sound clip is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutedSink;

impl AudioSink for MutedSink {
    fn play(&self) -> Result<(), PlaybackError> {
        Err(PlaybackError::NoClip)
    }
}
