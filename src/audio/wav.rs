use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;
use tracing::debug;

use super::mixer::NormalizedAudio;
use crate::error::EncodeError;

/// Mono 16-bit WAV bytes plus the sample rate they were written at
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedWaveform {
    bytes: Vec<u8>,
    sample_rate: u32,
    frames: usize,
}

impl EncodedWaveform {
    /// Complete RIFF/WAVE container
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Read the samples back out of the container
    pub fn read_samples(&self) -> Result<Vec<i16>, hound::Error> {
        let reader = WavReader::new(Cursor::new(self.bytes.as_slice()))?;
        reader.into_samples::<i16>().collect()
    }
}

/// Frame mono PCM as a 16-bit linear WAV file in memory
pub fn encode(audio: &NormalizedAudio) -> Result<EncodedWaveform, EncodeError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    // 44-byte canonical header
    let mut bytes = Vec::with_capacity(44 + audio.samples().len() * 2);
    {
        let mut writer = WavWriter::new(Cursor::new(&mut bytes), spec)?;
        for &sample in audio.samples() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }

    debug!(
        "Encoded {} frames at {}Hz into {} WAV bytes",
        audio.frames(),
        audio.sample_rate(),
        bytes.len()
    );

    Ok(EncodedWaveform {
        bytes,
        sample_rate: audio.sample_rate(),
        frames: audio.frames(),
    })
}
