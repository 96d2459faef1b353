//! Error types shared across the library

use crate::state::TimerId;

#[derive(Debug, thiserror::Error)]
pub enum TimesheetError {
    #[error("Timer not found: {0}")]
    NotFound(TimerId),

    #[error("No timer at position {0}")]
    NoTimerAt(usize),

    #[error("Failed to lock timer state: {0}")]
    LockPoisoned(String),

    #[error("Invalid timer document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP store error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

pub type Result<T> = std::result::Result<T, TimesheetError>;
