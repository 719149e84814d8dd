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

//! Contains the `CpalAudioDevice` struct.

use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use romlink_core::audio::{AudioDevice, MixCallback, StreamInfo};

/// An `AudioDevice` implementation that uses the host's default audio output device via CPAL.
#[derive(Default)]
pub struct CpalAudioDevice;

impl CpalAudioDevice {
    /// Creates a new instance of the CPAL audio device backend.
    pub fn new() -> Self {
        Self
    }
}

impl AudioDevice for CpalAudioDevice {
    fn start(self: Box<Self>, mut on_mix_needed: MixCallback) -> Result<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No default output device available"))?;
        let config = device
            .default_output_config()
            .context("Failed to query the default output configuration")?;

        let stream_info = StreamInfo {
            channels: config.channels(),
            sample_rate: config.sample_rate(),
        };
        log::info!(
            "Audio output: {} channel(s) at {} Hz.",
            stream_info.channels,
            stream_info.sample_rate
        );

        let error_callback = |err| {
            log::error!("An error occurred on the audio stream: {}", err);
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &config.into(),
                move |output_buffer: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    on_mix_needed(output_buffer, &stream_info);
                },
                error_callback,
                None,
            )?,
            cpal::SampleFormat::I16 => {
                let mut scratch: Vec<f32> = Vec::new();
                device.build_output_stream(
                    &config.into(),
                    move |output_buffer: &mut [i16], _: &cpal::OutputCallbackInfo| {
                        scratch.resize(output_buffer.len(), 0.0);
                        on_mix_needed(&mut scratch, &stream_info);
                        for (out, sample) in output_buffer.iter_mut().zip(&scratch) {
                            *out = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                        }
                    },
                    error_callback,
                    None,
                )?
            }
            format => return Err(anyhow!("Unsupported sample format: {}", format)),
        };

        stream.play()?;

        // Detach the stream to keep it running for the lifetime of the application.
        std::mem::forget(stream);

        Ok(())
    }
}
