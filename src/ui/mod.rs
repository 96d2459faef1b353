//! Terminal presentation module
//! 
//! Stands in for the browser page: parses line commands and prints
//! readouts from state change notifications.

pub mod commands;
pub mod terminal;

// Re-export main types
pub use commands::Command;
pub use terminal::{execute, run_session, Outcome, SessionConfig};
