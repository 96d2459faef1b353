//! Timesheet - multi-timer stopwatch with hourly billing
//! 
//! This library provides the timer model and its ordered collection, the
//! stores the timer document is saved to, the periodic session tasks, the
//! two-route storage server and a terminal front end.

pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod api;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TimesheetError};
pub use state::{AppState, Timer, TimerManager, TimerRecord};
pub use api::{create_router, StorageState};
pub use utils::signals::shutdown_signal;
