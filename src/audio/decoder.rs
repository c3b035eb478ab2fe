use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, info, warn};

use super::format::AudioFormat;
use crate::error::DecodeError;

/// Interleaved 16-bit PCM decoded from an upload
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: u16,
}

impl DecodedAudio {
    /// Build a buffer, checking that the layout is usable downstream.
    ///
    /// Sample rate and channel count must be positive and the sample count
    /// must hold a whole number of frames. Zero frames is allowed.
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Result<Self, DecodeError> {
        if sample_rate == 0 {
            return Err(DecodeError::MissingSampleRate);
        }
        if channels == 0 {
            return Err(DecodeError::MissingChannelCount);
        }
        if samples.len() % channels as usize != 0 {
            return Err(DecodeError::InvalidLayout(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }

        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }
}

/// Decode a complete compressed clip into interleaved 16-bit PCM.
///
/// `format` is only a hint for the prober; the container is still sniffed
/// from the bytes themselves.
pub fn decode(bytes: Vec<u8>, format: AudioFormat) -> Result<DecodedAudio, DecodeError> {
    debug!("Decoding {} bytes declared as {}", bytes.len(), format);

    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(format.extension());
    hint.mime_type(format.mime_type());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::Probe(e.to_string()))?;

    let mut reader = probed.format;

    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params
        .sample_rate
        .ok_or(DecodeError::MissingSampleRate)?;
    let declared_channels = codec_params.channels.map(|c| c.count() as u16);
    // Decoded buffers are authoritative over the container header
    let mut channels: Option<u16> = None;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Codec(e.to_string()))?;

    let mut samples: Vec<i16> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            // Chained streams are not expected from a single recording
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(DecodeError::Packet(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                warn!("Skipping corrupt audio packet: {}", e);
                skipped_packets += 1;
                continue;
            }
            Err(e) => return Err(DecodeError::Decode(e.to_string())),
        };

        let spec = *decoded.spec();
        let buffer_channels = spec.channels.count() as u16;
        match channels {
            None => channels = Some(buffer_channels),
            Some(expected) if expected != buffer_channels => {
                return Err(DecodeError::InvalidLayout(format!(
                    "channel count changed from {} to {} mid-stream",
                    expected, buffer_channels
                )));
            }
            Some(_) => {}
        }

        if decoded.frames() == 0 {
            continue;
        }

        let mut sample_buf = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    ensure_audio_recovered(samples.len(), skipped_packets)?;

    let channels = channels
        .or(declared_channels)
        .ok_or(DecodeError::MissingChannelCount)?;
    let audio = DecodedAudio::new(samples, sample_rate, channels)?;

    info!(
        "Audio decoded: {:.1}s, {}Hz, {} channels, {} samples",
        audio.duration_seconds(),
        audio.sample_rate(),
        audio.channels(),
        audio.samples().len()
    );

    Ok(audio)
}

/// A stream with packets that all failed to decode is malformed, not silent.
/// Streams that carry no packets at all stay valid.
fn ensure_audio_recovered(decoded_samples: usize, skipped_packets: usize) -> Result<(), DecodeError> {
    if decoded_samples == 0 && skipped_packets > 0 {
        return Err(DecodeError::Decode(format!(
            "all {} audio packets were corrupt",
            skipped_packets
        )));
    }
    Ok(())
}
