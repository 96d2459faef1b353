//! Time sources for the timer model
//!
//! Timestamps are floating-point Unix seconds, matching the persisted
//! document and the arithmetic in [`Timer`](super::Timer).

use std::sync::Mutex;

use chrono::Utc;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}

/// Wall clock backed by chrono
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        Utc::now().timestamp_millis() as f64 / 1000.0
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn set(&self, now: f64) {
        if let Ok(mut current) = self.now.lock() {
            *current = now;
        }
    }

    pub fn advance(&self, seconds: f64) {
        if let Ok(mut current) = self.now.lock() {
            *current += seconds;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }
}
