//! Speech recognition
//!
//! - `recognizer` - the backend-agnostic capability and its request/result types
//! - `google` - Google Cloud Speech-to-Text implementation
//! - `adapter` - request construction and best-transcript selection

pub mod adapter;
pub mod google;
pub mod recognizer;

pub use adapter::{RecognizerAdapter, TranscriptOutcome, DEFAULT_LANGUAGE_CODE, NO_TRANSCRIPTION};
pub use google::{Credentials, GoogleSpeechRecognizer};
pub use recognizer::{
    AudioEncoding, RecognitionRequest, RecognitionResult, SpeechAlternative, SpeechRecognizer,
    SpeechSegment,
};
