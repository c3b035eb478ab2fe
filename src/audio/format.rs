use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::DecodeError;

/// Container/codec an upload claims to be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// AAC in an MP4 container, what the mobile app records
    #[default]
    M4a,
    Mp3,
    Wav,
    Flac,
    Ogg,
    Aac,
}

impl AudioFormat {
    /// File extension used as a probe hint
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::M4a => "m4a",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Aac => "aac",
        }
    }

    /// Canonical media type used as a probe hint
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::M4a => "audio/mp4",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Aac => "audio/aac",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "m4a" | "mp4" => Some(AudioFormat::M4a),
            "mp3" => Some(AudioFormat::Mp3),
            "wav" | "wave" => Some(AudioFormat::Wav),
            "flac" => Some(AudioFormat::Flac),
            "ogg" | "oga" => Some(AudioFormat::Ogg),
            "aac" => Some(AudioFormat::Aac),
            _ => None,
        }
    }

    pub fn from_mime_type(mime: &str) -> Option<Self> {
        // Strip parameters such as "; codecs=mp4a.40.2"
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "audio/mp4" | "audio/m4a" | "audio/x-m4a" => Some(AudioFormat::M4a),
            "audio/mpeg" | "audio/mp3" => Some(AudioFormat::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => Some(AudioFormat::Wav),
            "audio/flac" | "audio/x-flac" => Some(AudioFormat::Flac),
            "audio/ogg" => Some(AudioFormat::Ogg),
            "audio/aac" | "audio/x-aac" => Some(AudioFormat::Aac),
            _ => None,
        }
    }

    /// Work out the declared format of an upload.
    ///
    /// The filename extension wins over the media type. Missing or generic
    /// declarations fall back to `default`; a declaration naming anything
    /// we cannot decode is rejected.
    pub fn resolve(
        file_name: Option<&str>,
        content_type: Option<&str>,
        default: AudioFormat,
    ) -> Result<Self, DecodeError> {
        if let Some(ext) = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
        {
            return Self::from_extension(ext)
                .ok_or_else(|| DecodeError::UnsupportedFormat(format!(".{}", ext)));
        }

        match content_type.map(str::trim) {
            None | Some("") => Ok(default),
            Some(mime) if mime.eq_ignore_ascii_case("application/octet-stream") => Ok(default),
            Some(mime) => Self::from_mime_type(mime)
                .ok_or_else(|| DecodeError::UnsupportedFormat(mime.to_string())),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| DecodeError::UnsupportedFormat(s.to_string()))
    }
}
