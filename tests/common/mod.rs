// Shared helpers for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use babelx_transcriber::error::RecognitionError;
use babelx_transcriber::speech::{
    RecognitionRequest, RecognitionResult, SpeechAlternative, SpeechRecognizer, SpeechSegment,
};
use std::io::Cursor;
use std::sync::Mutex;

/// Build an in-memory 16-bit WAV file from interleaved samples
pub fn wav_bytes(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    bytes
}

/// Interleaved silence
pub fn silence(seconds: f64, sample_rate: u32, channels: u16) -> Vec<i16> {
    let frames = (seconds * sample_rate as f64) as usize;
    vec![0; frames * channels as usize]
}

/// A deterministic stereo signal where left and right differ
pub fn stereo_ramp(frames: usize) -> Vec<i16> {
    (0..frames)
        .flat_map(|i| {
            let left = ((i * 37) % 20000) as i16 - 10000;
            let right = ((i * 91) % 30000) as i16 - 15000;
            [left, right]
        })
        .collect()
}

/// MPEG-1 Layer III frames (128 kbps, 44.1 kHz, joint stereo) whose headers
/// are valid but whose payloads are noise
pub fn corrupt_mp3_frames(count: usize) -> Vec<u8> {
    const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
    const FRAME_LEN: usize = 417;

    let mut state: u32 = 0x1234_5678;
    let mut bytes = Vec::with_capacity(count * FRAME_LEN);
    for _ in 0..count {
        bytes.extend_from_slice(&HEADER);
        for _ in 4..FRAME_LEN {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            // Keep 0xFF out of the payload so no false sync words appear
            bytes.push(((state >> 16) % 0xFF) as u8);
        }
    }
    bytes
}

pub fn segment(alternatives: &[&str]) -> SpeechSegment {
    SpeechSegment {
        alternatives: alternatives
            .iter()
            .enumerate()
            .map(|(rank, text)| SpeechAlternative {
                transcript: text.to_string(),
                confidence: Some(0.9 - rank as f32 * 0.1),
            })
            .collect(),
    }
}

/// Recognizer that answers with a canned result and records every request
pub struct StubRecognizer {
    response: Result<RecognitionResult, String>,
    pub requests: Mutex<Vec<RecognitionRequest>>,
}

impl StubRecognizer {
    pub fn returning(result: RecognitionResult) -> Self {
        Self {
            response: Ok(result),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self::returning(RecognitionResult::default())
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SpeechRecognizer for StubRecognizer {
    async fn recognize(
        &self,
        request: &RecognitionRequest,
    ) -> Result<RecognitionResult, RecognitionError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Ok(result) => Ok(result.clone()),
            Err(message) => Err(RecognitionError::Request(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}
