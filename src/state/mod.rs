//! State management module
//! 
//! This module contains the timer model, the ordered timer collection and the
//! shared session state that serializes all mutations.

pub mod app_state;
pub mod clock;
pub mod events;
pub mod manager;
pub mod timer;

// Re-export main types
pub use app_state::AppState;
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::TimerEvent;
pub use manager::TimerManager;
pub use timer::{Readout, Timer, TimerId, TimerRecord};
