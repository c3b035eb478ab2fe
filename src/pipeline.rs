//! Per-request transcription pipeline
//!
//! decode -> down-mix -> encode -> recognize, each stage either feeding the
//! next or failing the whole run. Nothing is shared between runs apart from
//! the recognizer, which is stateless.

use tracing::info;

use crate::audio::{self, AudioFormat, EncodedWaveform};
use crate::error::PipelineError;
use crate::speech::{RecognizerAdapter, TranscriptOutcome};

/// An uploaded clip, alive for one request only
#[derive(Debug, Clone)]
pub struct RawAudioUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl RawAudioUpload {
    pub fn declared_format(&self, default: AudioFormat) -> Result<AudioFormat, PipelineError> {
        Ok(AudioFormat::resolve(
            self.file_name.as_deref(),
            self.content_type.as_deref(),
            default,
        )?)
    }
}

/// Decode, down-mix and encode an upload into a LINEAR16 waveform.
///
/// CPU bound; callers on an async runtime should run it on a blocking thread.
pub fn prepare_waveform(
    bytes: Vec<u8>,
    format: AudioFormat,
) -> Result<EncodedWaveform, PipelineError> {
    let decoded = audio::decode(bytes, format)?;
    let normalized = audio::normalize(decoded);
    let waveform = audio::encode(&normalized)?;

    info!(
        "Prepared waveform: {:.1}s mono at {}Hz ({} bytes)",
        normalized.duration_seconds(),
        waveform.sample_rate(),
        waveform.bytes().len()
    );

    Ok(waveform)
}

#[derive(Clone)]
pub struct TranscriptionPipeline {
    adapter: RecognizerAdapter,
    default_format: AudioFormat,
}

impl TranscriptionPipeline {
    pub fn new(adapter: RecognizerAdapter, default_format: AudioFormat) -> Self {
        Self {
            adapter,
            default_format,
        }
    }

    pub fn default_format(&self) -> AudioFormat {
        self.default_format
    }

    pub async fn transcribe(
        &self,
        upload: RawAudioUpload,
    ) -> Result<TranscriptOutcome, PipelineError> {
        let format = upload.declared_format(self.default_format)?;

        let waveform = tokio::task::spawn_blocking(move || prepare_waveform(upload.bytes, format))
            .await
            .map_err(|e| PipelineError::Internal(format!("audio task failed: {}", e)))??;

        Ok(self.adapter.recognize(&waveform).await?)
    }
}
