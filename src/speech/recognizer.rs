use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;

/// Encoding of the audio payload sent for recognition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioEncoding {
    /// Uncompressed 16-bit signed little-endian samples
    #[serde(rename = "LINEAR16")]
    Linear16,
}

/// One synchronous recognition call
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionRequest {
    /// LINEAR16 payload (WAV container)
    pub audio: Vec<u8>,
    pub encoding: AudioEncoding,
    /// Must match the rate the payload was encoded at
    pub sample_rate_hertz: u32,
    /// BCP-47 tag, e.g. "en-US"
    pub language_code: String,
}

/// One candidate transcript for a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechAlternative {
    #[serde(default)]
    pub transcript: String,

    /// Confidence score (0.0 to 1.0), if the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// A consecutive portion of the audio with its ranked alternatives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechSegment {
    /// Best first, in the backend's own ranking
    #[serde(default)]
    pub alternatives: Vec<SpeechAlternative>,
}

/// Everything the backend recognized, segments in audio order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub results: Vec<SpeechSegment>,
}

impl RecognitionResult {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Remote speech-to-text capability
///
/// Implementations are shared across concurrent requests, so they must not
/// keep per-call state.
#[async_trait::async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Run recognition on a complete clip
    async fn recognize(
        &self,
        request: &RecognitionRequest,
    ) -> Result<RecognitionResult, RecognitionError>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}
