use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::audio::AudioFormat;
use crate::speech::google::{Credentials, DEFAULT_ENDPOINT};
use crate::speech::DEFAULT_LANGUAGE_CODE;

/// Prefix for environment overrides, e.g. `BABELX__SPEECH__API_KEY`
pub const ENV_PREFIX: &str = "BABELX";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub speech: SpeechConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize)]
pub struct SpeechConfig {
    pub endpoint: String,
    pub language_code: String,
    pub api_key: Option<String>,
    /// File holding an OAuth access token
    pub access_token_file: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    /// Assumed when an upload declares no format
    pub default_format: AudioFormat,
}

impl Config {
    /// Defaults, then the optional file at `path`, then `BABELX__*` env vars.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "babelx-transcriber")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 5000)?
            .set_default("service.http.max_upload_bytes", 25 * 1024 * 1024)?
            .set_default("speech.endpoint", DEFAULT_ENDPOINT)?
            .set_default("speech.language_code", DEFAULT_LANGUAGE_CODE)?
            .set_default("audio.default_format", "m4a")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl SpeechConfig {
    /// Resolve the configured identity once.
    ///
    /// An API key wins over a token file. A token file that is configured but
    /// unreadable or empty is an error; nothing configured yields
    /// `Credentials::None`.
    pub fn resolve_credentials(&self) -> Result<Credentials> {
        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            return Ok(Credentials::ApiKey(key.to_string()));
        }

        match self.access_token_file.as_deref() {
            Some(path) => {
                let token = std::fs::read_to_string(Path::new(path))
                    .with_context(|| format!("Failed to read access token file: {}", path))?;
                let token = token.trim();
                if token.is_empty() {
                    anyhow::bail!("Access token file is empty: {}", path);
                }
                Ok(Credentials::AccessToken(token.to_string()))
            }
            None => Ok(Credentials::None),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
