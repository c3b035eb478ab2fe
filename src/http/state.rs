use crate::pipeline::TranscriptionPipeline;

/// Shared application state for HTTP handlers
///
/// Read-only after start-up; every request gets its own pipeline run.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: TranscriptionPipeline,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(pipeline: TranscriptionPipeline, max_upload_bytes: usize) -> Self {
        Self {
            pipeline,
            max_upload_bytes,
        }
    }
}
