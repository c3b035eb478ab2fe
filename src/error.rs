use thiserror::Error;

/// The uploaded audio could not be turned into PCM samples.
///
/// Always the client's fault: the bytes are malformed, truncated, or in a
/// format we do not decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("unrecognized audio container: {0}")]
    Probe(String),

    #[error("no audio track found")]
    NoAudioTrack,

    #[error("unsupported codec: {0}")]
    Codec(String),

    #[error("failed to read packet: {0}")]
    Packet(String),

    #[error("failed to decode audio: {0}")]
    Decode(String),

    #[error("sample rate is unknown")]
    MissingSampleRate,

    #[error("channel count is unknown")]
    MissingChannelCount,

    #[error("invalid audio layout: {0}")]
    InvalidLayout(String),
}

/// Serializing the normalized samples into the WAV container failed.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write WAV data: {0}")]
    Wav(#[from] hound::Error),
}

/// Anything that went wrong while building, sending, or interpreting a
/// recognition request.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("no credentials configured for the speech service")]
    MissingCredentials,

    #[error("speech request failed: {0}")]
    Request(String),

    #[error("speech service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid speech service response: {0}")]
    InvalidResponse(String),
}

/// Failure of a whole transcription run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error("{0}")]
    Internal(String),
}

impl PipelineError {
    /// Client-input failures map to 400, everything else to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::Decode(_))
    }
}
