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

//! The agent responsible for the host's single sound clip.

use anyhow::{anyhow, Result};
use romlink_core::audio::{AudioDevice, AudioSink, MixCallback, SoundClip, StreamInfo};
use romlink_core::PlaybackError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Plays one pre-loaded [`SoundClip`] through an [`AudioDevice`].
///
/// There is no queue and no mixing of overlapping requests: a `play` while
/// the clip is sounding rewinds it, so the last call wins.
pub struct ClipPlayer {
    clip: Arc<SoundClip>,
    /// Read position in clip frames; `None` when silent.
    cursor: Arc<Mutex<Option<f32>>>,
    device: Mutex<Option<Box<dyn AudioDevice>>>,
    started: AtomicBool,
}

impl ClipPlayer {
    /// Creates a player. Nothing is audible until [`ClipPlayer::start`].
    pub fn new(clip: SoundClip, device: Box<dyn AudioDevice>) -> Self {
        Self {
            clip: Arc::new(clip),
            cursor: Arc::new(Mutex::new(None)),
            device: Mutex::new(Some(device)),
            started: AtomicBool::new(false),
        }
    }

    /// Starts the output stream.
    /// This consumes the device: once started, further calls are no-ops, and
    /// after a failed start every call reports the device as gone.
    pub fn start(&self) -> Result<()> {
        let device = self
            .device
            .lock()
            .map_err(|_| anyhow!("Audio device slot is poisoned"))?
            .take();

        let Some(device) = device else {
            if self.started.load(Ordering::Acquire) {
                return Ok(());
            }
            return Err(anyhow!("Audio device was consumed by a failed start"));
        };

        let clip = self.clip.clone();
        let cursor = self.cursor.clone();
        let on_mix_needed: MixCallback = Box::new(move |output_buffer: &mut [f32], stream_info: &StreamInfo| {
            match cursor.lock() {
                Ok(mut cursor) => mix(&clip, &mut cursor, output_buffer, stream_info),
                Err(_) => output_buffer.fill(0.0),
            }
        });

        device.start(on_mix_needed)?;
        self.started.store(true, Ordering::Release);
        log::debug!("Clip player started ({} frames).", self.clip.frames());
        Ok(())
    }

    /// Whether the clip is currently sounding.
    pub fn is_playing(&self) -> bool {
        self.cursor
            .lock()
            .map(|cursor| cursor.is_some())
            .unwrap_or(false)
    }
}

impl AudioSink for ClipPlayer {
    fn play(&self) -> Result<(), PlaybackError> {
        if !self.started.load(Ordering::Acquire) || self.clip.is_empty() {
            return Err(PlaybackError::NotReady);
        }
        let mut cursor = self
            .cursor
            .lock()
            .map_err(|_| PlaybackError::StateUnavailable)?;
        *cursor = Some(0.0);
        Ok(())
    }
}

/// Renders the next chunk of the clip into `output_buffer`.
///
/// Resamples linearly to the stream rate. A mono clip is copied to every
/// output channel.
fn mix(clip: &SoundClip, cursor: &mut Option<f32>, output_buffer: &mut [f32], stream_info: &StreamInfo) {
    output_buffer.fill(0.0);

    let num_frames = clip.frames();
    if num_frames == 0 || !stream_info.is_audible() {
        *cursor = None;
        return;
    }

    let out_channels = stream_info.channels as usize;
    let clip_channels = clip.channels as usize;
    let resample_ratio = clip.sample_rate as f32 / stream_info.sample_rate as f32;

    for frame in output_buffer.chunks_exact_mut(out_channels) {
        let Some(position) = cursor.as_mut() else {
            break;
        };
        if *position >= num_frames as f32 {
            *cursor = None;
            break;
        }

        let current = position.floor() as usize;
        let next = (current + 1).min(num_frames - 1);
        let fract = position.fract();

        for (channel, out) in frame.iter_mut().enumerate() {
            let source_channel = channel % clip_channels;
            let s1 = clip.samples[current * clip_channels + source_channel];
            let s2 = clip.samples[next * clip_channels + source_channel];
            *out = (s1 + (s2 - s1) * fract).clamp(-1.0, 1.0);
        }

        *position += resample_ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A device that hands its callback to the test instead of a sound card.
    struct CapturingDevice {
        slot: Arc<Mutex<Option<MixCallback>>>,
        fail: bool,
    }

    impl AudioDevice for CapturingDevice {
        fn start(self: Box<Self>, on_mix_needed: MixCallback) -> Result<()> {
            if self.fail {
                return Err(anyhow!("no output device"));
            }
            *self.slot.lock().unwrap() = Some(on_mix_needed);
            Ok(())
        }
    }

    const MONO: StreamInfo = StreamInfo {
        channels: 1,
        sample_rate: 8000,
    };

    fn clip(samples: Vec<f32>) -> SoundClip {
        SoundClip {
            samples,
            channels: 1,
            sample_rate: 8000,
        }
    }

    fn player(clip: SoundClip) -> (ClipPlayer, Arc<Mutex<Option<MixCallback>>>) {
        let slot = Arc::new(Mutex::new(None));
        let device = CapturingDevice {
            slot: slot.clone(),
            fail: false,
        };
        (ClipPlayer::new(clip, Box::new(device)), slot)
    }

    fn pump(slot: &Arc<Mutex<Option<MixCallback>>>, len: usize, info: StreamInfo) -> Vec<f32> {
        let mut buffer = vec![9.0; len];
        let mut guard = slot.lock().unwrap();
        let callback = guard.as_mut().expect("device was started");
        callback(&mut buffer, &info);
        buffer
    }

    #[test]
    fn play_before_start_is_not_ready() {
        let (player, _) = player(clip(vec![0.5; 4]));
        assert_eq!(player.play(), Err(PlaybackError::NotReady));
    }

    #[test]
    fn played_clip_reaches_the_device() {
        let (player, slot) = player(clip(vec![0.1, 0.2, 0.3, 0.4]));
        player.start().unwrap();

        assert_eq!(pump(&slot, 4, MONO), vec![0.0; 4], "silent until played");

        player.play().unwrap();
        assert!(player.is_playing());
        assert_eq!(pump(&slot, 2, MONO), vec![0.1, 0.2]);
        assert_eq!(pump(&slot, 4, MONO), vec![0.3, 0.4, 0.0, 0.0]);
        assert!(!player.is_playing());
    }

    #[test]
    fn replay_rewinds_the_clip() {
        let (player, slot) = player(clip(vec![0.1, 0.2, 0.3, 0.4]));
        player.start().unwrap();

        player.play().unwrap();
        pump(&slot, 3, MONO);
        player.play().unwrap();
        assert_eq!(pump(&slot, 2, MONO), vec![0.1, 0.2]);
    }

    #[test]
    fn mono_clip_fills_every_output_channel() {
        let (player, slot) = player(clip(vec![0.25, -0.25]));
        player.start().unwrap();
        player.play().unwrap();

        let stereo = StreamInfo {
            channels: 2,
            sample_rate: 8000,
        };
        assert_eq!(pump(&slot, 4, stereo), vec![0.25, 0.25, -0.25, -0.25]);
    }

    #[test]
    fn clip_is_resampled_to_stream_rate() {
        let (player, slot) = player(clip(vec![0.0, 0.5]));
        player.start().unwrap();
        player.play().unwrap();

        let double_rate = StreamInfo {
            channels: 1,
            sample_rate: 16000,
        };
        let out = pump(&slot, 4, double_rate);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 0.25).abs() < 1e-6);
        assert_eq!(out[2], 0.5);
    }

    #[test]
    fn empty_clip_never_plays() {
        let (player, _) = player(clip(Vec::new()));
        player.start().unwrap();
        assert_eq!(player.play(), Err(PlaybackError::NotReady));
    }

    #[test]
    fn failed_device_start_leaves_player_not_ready() {
        let device = CapturingDevice {
            slot: Arc::new(Mutex::new(None)),
            fail: true,
        };
        let player = ClipPlayer::new(clip(vec![0.5]), Box::new(device));

        assert!(player.start().is_err());
        assert_eq!(player.play(), Err(PlaybackError::NotReady));
        assert!(player.start().is_err(), "a failed device cannot be restarted");
        assert_eq!(player.play(), Err(PlaybackError::NotReady));
    }

    #[test]
    fn repeated_start_after_success_is_a_no_op() {
        let (player, slot) = player(clip(vec![0.5]));

        assert!(player.start().is_ok());
        assert!(player.start().is_ok());
        assert!(slot.lock().unwrap().is_some());
        assert_eq!(player.play(), Ok(()));
    }
}
