use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::{create_router, AppState};
use crate::pipeline::TranscriptionPipeline;
use crate::speech::{GoogleSpeechRecognizer, RecognizerAdapter};

/// Wire the Google recognizer and pipeline from configuration.
///
/// Credentials are resolved here, once, before any request is served.
pub fn build_state(cfg: &Config) -> Result<AppState> {
    let credentials = cfg
        .speech
        .resolve_credentials()
        .context("Failed to resolve speech credentials")?;

    let recognizer = GoogleSpeechRecognizer::new(
        Some(cfg.speech.endpoint.clone()),
        credentials,
        cfg.speech.request_timeout(),
    )
    .context("Failed to create speech client")?;

    let adapter = RecognizerAdapter::new(Arc::new(recognizer), cfg.speech.language_code.clone());
    let pipeline = TranscriptionPipeline::new(adapter, cfg.audio.default_format);

    Ok(AppState::new(pipeline, cfg.service.http.max_upload_bytes))
}

pub async fn serve(cfg: &Config, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("{} listening on {}", cfg.service.name, addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
