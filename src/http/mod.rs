//! HTTP API server for the mobile client
//!
//! - POST /transcribe - Multipart upload (`file` field), returns `{"transcript": ...}`
//! - GET /health - Health check
//!
//! Failures come back as `{"error": ...}` with 400 for bad audio and 500 for
//! everything else.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{TranscriptResponse, FILE_FIELD};
pub use routes::create_router;
pub use state::AppState;
