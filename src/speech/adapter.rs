use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::recognizer::{AudioEncoding, RecognitionRequest, RecognitionResult, SpeechRecognizer};
use crate::audio::EncodedWaveform;
use crate::error::RecognitionError;

/// Returned when the backend found nothing to transcribe
pub const NO_TRANSCRIPTION: &str = "No transcription";

pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// The single transcript handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOutcome {
    Transcript(String),
    NoTranscription,
}

impl TranscriptOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            TranscriptOutcome::Transcript(text) => text,
            TranscriptOutcome::NoTranscription => NO_TRANSCRIPTION,
        }
    }

    /// Pick the top alternative of the first segment.
    ///
    /// Later segments and lower-ranked alternatives are ignored. No segments
    /// at all means no transcription; a first segment without any
    /// alternative is a malformed response.
    pub fn from_result(result: &RecognitionResult) -> Result<Self, RecognitionError> {
        let Some(first) = result.results.first() else {
            return Ok(TranscriptOutcome::NoTranscription);
        };

        first
            .alternatives
            .first()
            .map(|best| TranscriptOutcome::Transcript(best.transcript.clone()))
            .ok_or_else(|| {
                RecognitionError::InvalidResponse("first result has no alternatives".to_string())
            })
    }
}

impl Serialize for TranscriptOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Turns an encoded waveform into a transcript using a speech backend
#[derive(Clone)]
pub struct RecognizerAdapter {
    recognizer: Arc<dyn SpeechRecognizer>,
    language_code: String,
}

impl RecognizerAdapter {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, language_code: impl Into<String>) -> Self {
        Self {
            recognizer,
            language_code: language_code.into(),
        }
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Build the request for a waveform; the sample rate always comes from
    /// the waveform itself.
    pub fn build_request(&self, waveform: &EncodedWaveform) -> RecognitionRequest {
        RecognitionRequest {
            audio: waveform.bytes().to_vec(),
            encoding: AudioEncoding::Linear16,
            sample_rate_hertz: waveform.sample_rate(),
            language_code: self.language_code.clone(),
        }
    }

    /// Single-shot recognition, no retries.
    pub async fn recognize(
        &self,
        waveform: &EncodedWaveform,
    ) -> Result<TranscriptOutcome, RecognitionError> {
        if waveform.is_empty() {
            debug!("Empty waveform, skipping {}", self.recognizer.name());
            return Ok(TranscriptOutcome::NoTranscription);
        }

        let request = self.build_request(waveform);
        let result = self.recognizer.recognize(&request).await?;
        let outcome = TranscriptOutcome::from_result(&result)?;

        info!(
            "{} returned {} segments, transcript: {:?}",
            self.recognizer.name(),
            result.results.len(),
            outcome.as_str()
        );

        Ok(outcome)
    }
}
