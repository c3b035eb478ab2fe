pub mod audio;
pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod server;
pub mod speech;

pub use audio::{AudioFormat, DecodedAudio, EncodedWaveform, NormalizedAudio};
pub use config::Config;
pub use error::{DecodeError, EncodeError, PipelineError, RecognitionError};
pub use http::{create_router, AppState};
pub use pipeline::{RawAudioUpload, TranscriptionPipeline};
pub use speech::{
    Credentials, GoogleSpeechRecognizer, RecognitionRequest, RecognitionResult, RecognizerAdapter,
    SpeechRecognizer, TranscriptOutcome,
};
