//! Ordered collection of timers

use super::timer::{Timer, TimerId, TimerRecord};

/// Owns every timer; insertion order is display order
#[derive(Debug, Default)]
pub struct TimerManager {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title given to a timer created without one
    pub fn default_title(&self) -> String {
        format!("Timer {}", self.timers.len() + 1)
    }

    /// Append a timer and hand back its identity
    pub fn add(&mut self, mut timer: Timer) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        timer.set_id(id);
        self.timers.push(timer);
        id
    }

    /// Construct a timer from a record (or a blank one) and register it
    pub fn create(&mut self, record: Option<&TimerRecord>, now: f64) -> TimerId {
        let default_title = self.default_title();
        let timer = match record {
            Some(record) => Timer::deserialize(record, default_title, now),
            None => Timer::new(default_title, 0.0, 0.0, false, now),
        };
        self.add(timer)
    }

    pub fn remove(&mut self, id: TimerId) -> Option<Timer> {
        let index = self.timers.iter().position(|t| t.id() == id)?;
        Some(self.timers.remove(index))
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn serialize_all(&self) -> Vec<TimerRecord> {
        self.timers.iter().map(Timer::serialize).collect()
    }

    /// Replace every timer with the ones described by `records`
    pub fn deserialize_all(&mut self, records: &[TimerRecord], now: f64) -> Vec<TimerId> {
        self.clear();
        records
            .iter()
            .map(|record| self.create(Some(record), now))
            .collect()
    }

    /// Bring every timer up to the same instant
    pub fn update_all(&mut self, now: f64) {
        for timer in &mut self.timers {
            timer.update(now);
        }
    }

    pub fn count(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id() == id)
    }

    pub fn get_mut(&mut self, id: TimerId) -> Option<&mut Timer> {
        self.timers.iter_mut().find(|t| t.id() == id)
    }

    /// Identity of the timer at a display position (0-based)
    pub fn id_at(&self, index: usize) -> Option<TimerId> {
        self.timers.get(index).map(Timer::id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter()
    }
}
