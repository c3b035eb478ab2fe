// HTTP API tests driving the router directly, no socket involved

mod common;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use babelx_transcriber::audio::AudioFormat;
use babelx_transcriber::http::{create_router, AppState};
use babelx_transcriber::pipeline::TranscriptionPipeline;
use babelx_transcriber::speech::{RecognitionResult, RecognizerAdapter};
use common::{segment, silence, wav_bytes, StubRecognizer};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "babelx-test-boundary";

fn app(stub: Arc<StubRecognizer>) -> Router {
    app_with_limit(stub, 10 * 1024 * 1024)
}

fn app_with_limit(stub: Arc<StubRecognizer>, max_upload_bytes: usize) -> Router {
    let pipeline = TranscriptionPipeline::new(RecognizerAdapter::new(stub, "en-US"), AudioFormat::M4a);
    create_router(AppState::new(pipeline, max_upload_bytes))
}

fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_health_check() -> Result<()> {
    let response = app(Arc::new(StubRecognizer::silent()))
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"OK");

    Ok(())
}

#[tokio::test]
async fn test_silent_clip_returns_sentinel() -> Result<()> {
    let wav = wav_bytes(&silence(3.0, 44100, 2), 44100, 2);
    let body = multipart_body("file", "silence.wav", "audio/wav", &wav);

    let response = app(Arc::new(StubRecognizer::silent()))
        .oneshot(upload_request(body))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await?,
        serde_json::json!({ "transcript": "No transcription" })
    );

    Ok(())
}

#[tokio::test]
async fn test_transcript_returned() -> Result<()> {
    let stub = Arc::new(StubRecognizer::returning(RecognitionResult {
        results: vec![segment(&["hello world", "hello word"]), segment(&["again"])],
    }));
    let wav = wav_bytes(&vec![250; 16000], 16000, 1);
    let body = multipart_body("file", "clip.wav", "audio/wav", &wav);

    let response = app(stub).oneshot(upload_request(body)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await?["transcript"], "hello world");

    Ok(())
}

#[tokio::test]
async fn test_malformed_audio_is_bad_request() -> Result<()> {
    let stub = Arc::new(StubRecognizer::silent());
    let body = multipart_body("file", "clip.m4a", "audio/x-m4a", b"not really an m4a");

    let response = app(stub.clone()).oneshot(upload_request(body)).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    let message = json["error"].as_str().unwrap_or_default();
    assert!(message.starts_with("Audio conversion failed: "));
    assert!(message.len() > "Audio conversion failed: ".len());
    assert_eq!(stub.calls(), 0);

    Ok(())
}

#[tokio::test]
async fn test_recognition_failure_is_server_error() -> Result<()> {
    let stub = Arc::new(StubRecognizer::failing("permission denied"));
    let wav = wav_bytes(&vec![1; 8000], 8000, 1);
    let body = multipart_body("file", "clip.wav", "audio/wav", &wav);

    let response = app(stub).oneshot(upload_request(body)).await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await?;
    let message = json["error"].as_str().unwrap_or_default();
    assert!(message.starts_with("An unexpected error occurred: "));
    assert!(message.contains("permission denied"));

    Ok(())
}

#[tokio::test]
async fn test_missing_file_field_is_bad_request() -> Result<()> {
    let body = multipart_body("audio", "clip.wav", "audio/wav", b"RIFF");

    let response = app(Arc::new(StubRecognizer::silent()))
        .oneshot(upload_request(body))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    let message = json["error"].as_str().unwrap_or_default();
    assert!(message.starts_with("Invalid upload: "));
    assert!(message.contains("file"));
    assert!(!message.contains("Audio conversion failed"));

    Ok(())
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() -> Result<()> {
    let stub = Arc::new(StubRecognizer::silent());
    let wav = wav_bytes(&silence(1.0, 16000, 1), 16000, 1);
    let body = multipart_body("file", "clip.wav", "audio/wav", &wav);

    let response = app_with_limit(stub.clone(), 1024)
        .oneshot(upload_request(body))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    assert!(json["error"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Invalid upload: "));
    assert_eq!(stub.calls(), 0);

    Ok(())
}

#[tokio::test]
async fn test_non_multipart_body_is_bad_request() -> Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))?;

    let response = app(Arc::new(StubRecognizer::silent())).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    assert!(json["error"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Invalid upload: "));

    Ok(())
}

#[tokio::test]
async fn test_corrupt_codec_data_is_bad_request() -> Result<()> {
    let stub = Arc::new(StubRecognizer::silent());
    let body = multipart_body("file", "clip.mp3", "audio/mpeg", &common::corrupt_mp3_frames(100));

    let response = app(stub.clone()).oneshot(upload_request(body)).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    assert!(json["error"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Audio conversion failed: "));
    assert_eq!(stub.calls(), 0);

    Ok(())
}
