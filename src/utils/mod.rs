//! Utility functions module
//! 
//! Process-level helpers shared by the server and the terminal session.

pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
