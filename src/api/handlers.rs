//! HTTP endpoint handlers

use std::sync::Arc;
use axum::extract::State;
use tracing::{debug, error};

use super::StorageState;

/// Handle POST /timers - Overwrite the saved document with the request body
///
/// The body is stored verbatim; nothing checks that it is a timer document.
/// The answer is `ok` whether or not the write succeeded, a failed write is
/// only logged.
pub async fn save_timers_handler(
    State(state): State<Arc<StorageState>>,
    body: String,
) -> &'static str {
    match tokio::fs::write(&state.document_path, body.as_bytes()).await {
        Ok(()) => debug!("Stored {} bytes to {}", body.len(), state.document_path.display()),
        Err(e) => error!("Failed to write {}: {}", state.document_path.display(), e),
    }
    "ok"
}
