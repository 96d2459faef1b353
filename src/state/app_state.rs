//! Session state shared between the tick, the autosave loop and the UI

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{Clock, SystemClock, Timer, TimerEvent, TimerId, TimerManager, TimerRecord};
use crate::error::{Result, TimesheetError};

/// Owns the timer sequence and serializes every mutation to it
pub struct AppState {
    manager: Mutex<TimerManager>,
    clock: Arc<dyn Clock>,
    /// Channel for state change notifications
    pub event_tx: broadcast::Sender<TimerEvent>,
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            manager: Mutex::new(TimerManager::new()),
            clock,
            event_tx,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    fn lock(&self) -> Result<MutexGuard<'_, TimerManager>> {
        self.manager
            .lock()
            .map_err(|e| TimesheetError::LockPoisoned(e.to_string()))
    }

    fn notify(&self, event: TimerEvent) {
        if let Err(e) = self.event_tx.send(event) {
            debug!("No listeners for timer event: {:?}", e.0);
        }
    }

    /// Create a blank timer, optionally titled
    pub fn add_timer(&self, title: Option<String>) -> Result<TimerId> {
        let now = self.now();
        let mut manager = self.lock()?;
        let record = title.map(|title| TimerRecord {
            title: Some(title),
            ..TimerRecord::default()
        });
        let id = manager.create(record.as_ref(), now);
        let timer = manager.get(id).cloned();
        drop(manager);

        debug!("Added timer {}", id);
        if let Some(timer) = timer {
            self.notify(TimerEvent::Added(timer));
        }
        Ok(id)
    }

    /// Apply `action` to one timer and announce the result
    fn modify<F>(&self, id: TimerId, action: &str, action_fn: F) -> Result<Timer>
    where
        F: FnOnce(&mut Timer, f64),
    {
        let now = self.now();
        let mut manager = self.lock()?;
        let timer = manager.get_mut(id).ok_or(TimesheetError::NotFound(id))?;
        action_fn(timer, now);
        let updated = timer.clone();
        drop(manager);

        debug!("Timer {} {}", id, action);
        self.notify(TimerEvent::Changed(updated.clone()));
        Ok(updated)
    }

    pub fn start(&self, id: TimerId) -> Result<Timer> {
        self.modify(id, "started", |timer, now| timer.start(now))
    }

    pub fn pause(&self, id: TimerId) -> Result<Timer> {
        self.modify(id, "paused", |timer, now| timer.pause(now))
    }

    pub fn reset(&self, id: TimerId) -> Result<Timer> {
        self.modify(id, "reset", |timer, now| timer.reset(now))
    }

    pub fn adjust(&self, id: TimerId, delta_seconds: f64) -> Result<Timer> {
        self.modify(id, "adjusted", |timer, _| timer.adjust(delta_seconds))
    }

    pub fn set_rate(&self, id: TimerId, rate: f64) -> Result<Timer> {
        self.modify(id, "rate changed", |timer, _| timer.set_rate(rate))
    }

    pub fn set_title(&self, id: TimerId, title: String) -> Result<Timer> {
        self.modify(id, "renamed", |timer, _| timer.set_title(title))
    }

    /// Remove a timer; absent timers are ignored
    pub fn remove(&self, id: TimerId) -> Result<Option<Timer>> {
        let removed = self.lock()?.remove(id);
        if removed.is_some() {
            debug!("Removed timer {}", id);
            self.notify(TimerEvent::Removed(id));
        }
        Ok(removed)
    }

    pub fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        info!("Cleared all timers");
        self.notify(TimerEvent::Cleared);
        Ok(())
    }

    /// Periodic tick: recompute every total at one instant
    pub fn update_all(&self) -> Result<()> {
        let now = self.now();
        self.lock()?.update_all(now);
        Ok(())
    }

    pub fn serialize_all(&self) -> Result<Vec<TimerRecord>> {
        Ok(self.lock()?.serialize_all())
    }

    /// Replace the whole sequence from a persisted document
    pub fn deserialize_all(&self, records: &[TimerRecord]) -> Result<usize> {
        let now = self.now();
        let mut manager = self.lock()?;
        manager.deserialize_all(records, now);
        manager.update_all(now);
        let count = manager.count();
        drop(manager);

        info!("Loaded {} timers", count);
        self.notify(TimerEvent::Loaded(count));
        Ok(count)
    }

    /// Copies of every timer in display order
    pub fn snapshot(&self) -> Result<Vec<Timer>> {
        Ok(self.lock()?.iter().cloned().collect())
    }

    /// Identity of the timer at a 1-based display position
    pub fn id_at(&self, position: usize) -> Result<TimerId> {
        let manager = self.lock()?;
        position
            .checked_sub(1)
            .and_then(|index| manager.id_at(index))
            .ok_or(TimesheetError::NoTimerAt(position))
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.lock()?.count())
    }
}
