//! Persistence backends for the timer document
//!
//! The persisted document is a JSON array of [`TimerRecord`]s. A store either
//! holds one or has never been written, in which case `load` yields `None`.

pub mod file;
pub mod http;

use std::future::Future;

use crate::{error::Result, state::TimerRecord};

pub use file::FileStore;
pub use http::HttpStore;

/// Somewhere the whole timer document can be loaded from and saved to
pub trait TimerStore: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<Option<Vec<TimerRecord>>>> + Send;

    fn save(&self, records: &[TimerRecord]) -> impl Future<Output = Result<()>> + Send;
}

/// Parse a persisted document; blank text counts as absent
pub fn parse_document(text: &str) -> Result<Option<Vec<TimerRecord>>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(text)?))
}

pub fn encode_document(records: &[TimerRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}
