//! State change notifications for presentation adapters

use super::timer::{Timer, TimerId};

#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// A timer was appended to the sequence
    Added(Timer),
    /// A timer's state was changed by a user action
    Changed(Timer),
    Removed(TimerId),
    Cleared,
    /// The whole sequence was replaced from a persisted document
    Loaded(usize),
}
