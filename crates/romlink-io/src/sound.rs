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

//! Decodes the host's sound clip from the WAV format.

use anyhow::{bail, Context, Result};
use hound::{SampleFormat, WavReader};
use romlink_core::audio::SoundClip;
use std::path::Path;

/// Decodes a `.wav` image into a [`SoundClip`] of interleaved `f32` samples.
///
/// Integer PCM of up to 32 bits is scaled into `[-1.0, 1.0]`; float PCM is
/// taken as is.
pub fn decode_wav(bytes: &[u8]) -> Result<SoundClip> {
    let mut reader = WavReader::new(bytes).context("Sound clip is not a WAV image")?;
    let format = reader.spec();

    let samples = match format.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .context("Sound clip has a truncated float sample")?,
        SampleFormat::Int => {
            let full_scale = int_full_scale(format.bits_per_sample)?;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / full_scale))
                .collect::<Result<Vec<_>, _>>()
                .context("Sound clip has a truncated integer sample")?
        }
    };

    Ok(SoundClip {
        samples,
        channels: format.channels,
        sample_rate: format.sample_rate,
    })
}

/// Magnitude of the most negative value at `bits` of signed PCM.
fn int_full_scale(bits: u16) -> Result<f32> {
    if !(1..=32).contains(&bits) {
        bail!("Unsupported PCM depth of {bits} bits");
    }
    Ok(2f32.powi(i32::from(bits) - 1))
}

/// Reads and decodes the WAV file at `path`.
pub async fn load_sound_clip(path: impl AsRef<Path>) -> Result<SoundClip> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read sound clip '{}'", path.display()))?;
    decode_wav(&bytes).with_context(|| format!("Failed to decode sound clip '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wav_bytes(samples: &[i16]) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &sample in samples {
                writer.write_sample(sample).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn decodes_int_wav() {
        let clip = decode_wav(&wav_bytes(&[0, 16384, -16384, i16::MAX])).unwrap();

        assert_eq!(clip.sample_rate, 44100, "The sample rate is incorrect");
        assert_eq!(clip.channels, 1, "The number of channels is incorrect");
        assert_eq!(clip.samples.len(), 4);
        assert!((clip.samples[1] - 0.5).abs() < 1e-6);
        assert!((clip.samples[2] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn float_samples_pass_through() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for sample in [0.25f32, -0.75, 1.0, 0.0] {
                writer.write_sample(sample).unwrap();
            }
            writer.finalize().unwrap();
        }

        let clip = decode_wav(&cursor.into_inner()).unwrap();
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.frames(), 2);
        assert_eq!(clip.samples, vec![0.25, -0.75, 1.0, 0.0]);
    }

    #[test]
    fn pcm_depth_sets_full_scale() {
        assert_eq!(int_full_scale(8).unwrap(), 128.0);
        assert_eq!(int_full_scale(16).unwrap(), 32768.0);
        assert!(int_full_scale(0).is_err());
        assert!(int_full_scale(33).is_err());
    }

    #[test]
    fn rejects_invalid_bytes() {
        assert!(decode_wav(&[0, 1, 2, 3, 4]).is_err());
    }

    #[tokio::test]
    async fn loads_clip_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beep.wav");
        std::fs::write(&path, wav_bytes(&[100, -100])).unwrap();

        let clip = load_sound_clip(&path).await.unwrap();
        assert_eq!(clip.frames(), 2);

        assert!(load_sound_clip(dir.path().join("missing.wav")).await.is_err());
    }
}
