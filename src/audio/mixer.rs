// Channel down-mixing
//
// Every upload is reduced to a single channel before encoding. Each output
// sample is the mean of the frame's channel samples, computed in i32,
// rounded half away from zero and clamped to the i16 range. Mono input is
// passed through untouched. Neither the sample rate nor the frame count
// changes.

use tracing::debug;

use super::decoder::DecodedAudio;

/// Single-channel PCM ready for encoding
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAudio {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl NormalizedAudio {
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Always 1
    pub fn channels(&self) -> u16 {
        1
    }

    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Down-mix decoded audio to mono
pub fn normalize(audio: DecodedAudio) -> NormalizedAudio {
    let channels = audio.channels() as usize;
    let sample_rate = audio.sample_rate();

    let samples = if channels == 1 {
        audio.into_samples()
    } else {
        audio
            .samples()
            .chunks_exact(channels)
            .map(mix_frame)
            .collect()
    };

    debug!(
        "Down-mixed {} channels to mono: {} frames at {}Hz",
        channels,
        samples.len(),
        sample_rate
    );

    NormalizedAudio {
        samples,
        sample_rate,
    }
}

fn mix_frame(frame: &[i16]) -> i16 {
    let n = frame.len() as i32;
    let sum: i32 = frame.iter().map(|&s| s as i32).sum();

    // Integer division truncates, so bias by half the divisor first
    let half = n / 2;
    let mean = if sum >= 0 {
        (sum + half) / n
    } else {
        (sum - half) / n
    };

    mean.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}
