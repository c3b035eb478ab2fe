use base64::Engine;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use super::recognizer::{
    AudioEncoding, RecognitionRequest, RecognitionResult, SpeechRecognizer,
};
use crate::error::RecognitionError;

pub const DEFAULT_ENDPOINT: &str = "https://speech.googleapis.com";

/// Identity presented to the speech service.
///
/// Resolved once at start-up and never changed afterwards.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as the `key` query parameter
    ApiKey(String),
    /// OAuth access token, sent as a bearer token
    AccessToken(String),
    /// Nothing configured; every call fails with `MissingCredentials`
    None,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret itself
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(***)"),
            Credentials::None => f.write_str("None"),
        }
    }
}

// ============================================================================
// Wire types for v1 speech:recognize
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeBody<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: AudioEncoding,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    /// Base64 of the full payload
    content: String,
}

impl<'a> RecognizeBody<'a> {
    fn from_request(request: &'a RecognitionRequest) -> Self {
        Self {
            config: RecognitionConfig {
                encoding: request.encoding,
                sample_rate_hertz: request.sample_rate_hertz,
                language_code: &request.language_code,
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(&request.audio),
            },
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Google Cloud Speech-to-Text over REST
pub struct GoogleSpeechRecognizer {
    client: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl GoogleSpeechRecognizer {
    pub fn new(
        endpoint: Option<String>,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, RecognitionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RecognitionError::Request(format!("client: {}", e)))?;

        let endpoint = endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        info!("Google speech recognizer targeting {} ({:?})", endpoint, credentials);

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    fn recognize_url(&self) -> String {
        format!("{}/v1/speech:recognize", self.endpoint)
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for GoogleSpeechRecognizer {
    async fn recognize(
        &self,
        request: &RecognitionRequest,
    ) -> Result<RecognitionResult, RecognitionError> {
        let url = self.recognize_url();
        let mut http = self
            .client
            .post(&url)
            .json(&RecognizeBody::from_request(request));

        http = match &self.credentials {
            Credentials::ApiKey(key) => http.query(&[("key", key)]),
            Credentials::AccessToken(token) => http.bearer_auth(token),
            Credentials::None => return Err(RecognitionError::MissingCredentials),
        };

        debug!(
            "Sending {} bytes to {} ({}Hz, {})",
            request.audio.len(),
            url,
            request.sample_rate_hertz,
            request.language_code
        );

        let response = http
            .send()
            .await
            .map_err(|e| RecognitionError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RecognitionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: RecognitionResult = response
            .json()
            .await
            .map_err(|e| RecognitionError::InvalidResponse(e.to_string()))?;

        info!("Google speech returned {} segments", result.results.len());

        Ok(result)
    }

    fn name(&self) -> &str {
        "google-speech"
    }
}
