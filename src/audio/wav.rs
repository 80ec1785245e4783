//! Canonical WAV reading for transcription.
//!
//! The normalizer already emits mono 16kHz WAV, but callers may point the
//! transcriber at WAV files produced elsewhere, so stereo input is downmixed
//! and other sample rates are linearly resampled.

use crate::defaults::SAMPLE_RATE;
use crate::error::{MeetscribeError, Result};
use crate::scan::display_name;
use std::path::Path;

/// Read all samples from a WAV file as 16-bit PCM at 16kHz mono.
pub fn read_samples(path: &Path) -> Result<Vec<i16>> {
    let file = display_name(path);
    let mut reader =
        hound::WavReader::open(path).map_err(|e| MeetscribeError::TranscriptionFailed {
            file: file.clone(),
            message: format!("failed to parse WAV file: {e}"),
        })?;

    let spec = reader.spec();
    let raw_samples: Vec<i16> = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| MeetscribeError::TranscriptionFailed {
            file,
            message: format!("failed to read WAV samples: {e}"),
        })?;

    // Downmix stereo by averaging channels
    let mono_samples = if spec.channels == 2 {
        raw_samples
            .chunks_exact(2)
            .map(|chunk| {
                let left = chunk[0] as i32;
                let right = chunk[1] as i32;
                ((left + right) / 2) as i16
            })
            .collect()
    } else {
        raw_samples
    };

    if spec.sample_rate != SAMPLE_RATE {
        Ok(resample(&mono_samples, spec.sample_rate, SAMPLE_RATE))
    } else {
        Ok(mono_samples)
    }
}

/// Convert i16 audio samples to f32 normalized to [-1.0, 1.0].
///
/// Whisper expects audio in f32 format normalized to [-1.0, 1.0]; input is
/// 16-bit PCM where samples range from -32768 to 32767.
pub fn to_f32(samples: &[i16]) -> Vec<f32> {
    samples
        .iter()
        .map(|&sample| sample as f32 / 32768.0)
        .collect()
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[samples.len() - 1]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction).round() as i16
            }
        })
        .collect()
}
