//! Stopwatch state, its persisted record and the display readout

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identity of a timer inside a [`TimerManager`](super::TimerManager)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One element of the persisted document
///
/// Decoding is lenient: numeric fields accept numbers or numeric strings and
/// fall back to zero, `started` follows JSON truthiness, and a missing or
/// empty title is replaced by the default title when the timer is created.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimerRecord {
    #[serde(default, deserialize_with = "lenient_title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub time: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rate: f64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub started: bool,
}

impl TimerRecord {
    pub fn new(title: impl Into<String>, time: f64, rate: f64, started: bool) -> Self {
        Self {
            title: Some(title.into()),
            time,
            rate,
            started,
        }
    }
}

fn lenient_title<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(title)) if !title.is_empty() => Some(title),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        Some(Value::Bool(b)) => Some(if b { 1.0 } else { 0.0 }),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()).unwrap_or(0.0))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    })
}

/// A single stopwatch with a billing rate
///
/// `total_seconds` is a cached value: it reflects the running segment only as
/// of the last [`update`](Timer::update) or [`pause`](Timer::pause).
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    id: TimerId,
    title: String,
    accumulated_seconds: f64,
    total_seconds: f64,
    started_at: Option<f64>,
    rate: f64,
}

impl Timer {
    /// Create a timer; when `started` it runs from `floor(now)`
    pub fn new(title: impl Into<String>, time: f64, rate: f64, started: bool, now: f64) -> Self {
        Self {
            id: TimerId::default(),
            title: title.into(),
            accumulated_seconds: time,
            total_seconds: time,
            started_at: started.then(|| now.floor()),
            rate,
        }
    }

    /// Build a timer from a persisted record, using `default_title` when the
    /// record has none
    pub fn deserialize(record: &TimerRecord, default_title: impl Into<String>, now: f64) -> Self {
        let title = match &record.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => default_title.into(),
        };
        Self::new(title, record.time, record.rate, record.started, now)
    }

    pub fn serialize(&self) -> TimerRecord {
        TimerRecord {
            title: Some(self.title.clone()),
            time: self.total_seconds,
            rate: self.rate,
            started: self.is_started(),
        }
    }

    pub(crate) fn set_id(&mut self, id: TimerId) {
        self.id = id;
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    pub fn accumulated_seconds(&self) -> f64 {
        self.accumulated_seconds
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Anchor the running segment at `floor(now)`. Calling this while running
    /// moves the anchor and discards the segment so far.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now.floor());
    }

    /// Fold the running segment into the accumulated time. No-op when paused.
    pub fn pause(&mut self, now: f64) {
        if let Some(start) = self.started_at.take() {
            self.accumulated_seconds += now.floor() - start;
            self.total_seconds = self.accumulated_seconds;
        }
    }

    /// Zero the timer; a running timer keeps running from zero
    pub fn reset(&mut self, now: f64) {
        self.accumulated_seconds = 0.0;
        self.total_seconds = 0.0;
        if self.started_at.is_some() {
            self.started_at = Some(now.floor());
        }
    }

    /// Shift both the accumulated baseline and the displayed total
    pub fn adjust(&mut self, delta_seconds: f64) {
        self.accumulated_seconds += delta_seconds;
        self.total_seconds += delta_seconds;
    }

    /// Recompute the total as of `now`
    pub fn update(&mut self, now: f64) {
        self.total_seconds = self.accumulated_seconds;
        if let Some(start) = self.started_at {
            self.total_seconds += now - start;
        }
    }

    pub fn readout(&self) -> Readout {
        Readout::render(self.total_seconds, self.rate)
    }
}

/// Display values derived from a total and a rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub time_text: String,
    pub billed_text: String,
    pub negative: bool,
}

impl Readout {
    pub fn render(total_seconds: f64, rate: f64) -> Self {
        let negative = total_seconds < 0.0;
        let absolute = total_seconds.abs();

        let mut remaining = absolute;
        let hours = (remaining / 3600.0).floor();
        remaining -= hours * 3600.0;
        let minutes = (remaining / 60.0).floor();
        remaining -= minutes * 60.0;
        let seconds = remaining.floor();

        let sign = if negative { "-" } else { "" };
        // adding 0.0 turns -0.0 into 0.0
        let billed = absolute / 3600.0 * rate + 0.0;

        Self {
            time_text: format!(
                "{}{:02}:{:02}:{:02}",
                sign, hours as u64, minutes as u64, seconds as u64
            ),
            billed_text: format!("{}{:.2}", sign, billed),
            negative,
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.time_text, self.billed_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.0;

    #[test]
    fn test_new_paused_timer() {
        let timer = Timer::new("Timer 1", 0.0, 0.0, false, NOW);
        assert!(!timer.is_started());
        assert_eq!(timer.total_seconds(), 0.0);
        assert_eq!(timer.readout().time_text, "00:00:00");
    }

    #[test]
    fn test_new_started_timer_floors_anchor() {
        let timer = Timer::new("Work", 30.0, 10.0, true, NOW + 0.75);
        assert_eq!(timer.started_at(), Some(NOW));
        assert_eq!(timer.accumulated_seconds(), 30.0);
    }

    #[test]
    fn test_run_and_pause_accumulates() {
        let mut timer = Timer::new("Work", 0.0, 0.0, false, NOW);
        timer.start(NOW + 0.4);
        timer.update(NOW + 90.0);
        assert_eq!(timer.total_seconds(), 90.0);

        timer.pause(NOW + 120.9);
        assert!(!timer.is_started());
        assert_eq!(timer.accumulated_seconds(), 120.0);
        assert_eq!(timer.total_seconds(), 120.0);

        // paused timers ignore the tick
        timer.update(NOW + 500.0);
        assert_eq!(timer.total_seconds(), 120.0);
    }

    #[test]
    fn test_pause_when_paused_is_noop() {
        let mut timer = Timer::new("Work", 42.0, 0.0, false, NOW);
        timer.pause(NOW + 1000.0);
        assert_eq!(timer.accumulated_seconds(), 42.0);
        assert_eq!(timer.total_seconds(), 42.0);
    }

    #[test]
    fn test_start_while_running_moves_anchor() {
        let mut timer = Timer::new("Work", 0.0, 0.0, true, NOW);
        timer.start(NOW + 50.0);
        timer.update(NOW + 60.0);
        assert_eq!(timer.total_seconds(), 10.0);
    }

    #[test]
    fn test_pause_start_update_same_instant_keeps_total() {
        let mut timer = Timer::new("Work", 0.0, 0.0, true, NOW);
        let t = NOW + 75.0;
        timer.update(t);
        let before = timer.total_seconds();

        timer.pause(t);
        timer.start(t);
        timer.update(t);
        assert_eq!(timer.total_seconds(), before);
    }

    #[test]
    fn test_reset_running_keeps_running_from_zero() {
        let mut timer = Timer::new("Work", 500.0, 0.0, true, NOW);
        timer.update(NOW + 30.0);
        timer.reset(NOW + 30.0);
        assert!(timer.is_started());
        assert_eq!(timer.total_seconds(), 0.0);

        timer.update(NOW + 45.0);
        assert_eq!(timer.total_seconds(), 15.0);
    }

    #[test]
    fn test_reset_paused_stays_paused() {
        let mut timer = Timer::new("Work", 500.0, 0.0, false, NOW);
        timer.reset(NOW);
        assert!(!timer.is_started());
        assert_eq!(timer.total_seconds(), 0.0);
    }

    #[test]
    fn test_adjust_while_paused_is_order_independent() {
        let deltas = [3600.0, -60.0, 5.0, -7200.0, 42.0];

        let mut forward = Timer::new("A", 100.0, 0.0, false, NOW);
        deltas.iter().for_each(|d| forward.adjust(*d));

        let mut backward = Timer::new("B", 100.0, 0.0, false, NOW);
        deltas.iter().rev().for_each(|d| backward.adjust(*d));

        let expected = 100.0 + deltas.iter().sum::<f64>();
        assert_eq!(forward.total_seconds(), expected);
        assert_eq!(backward.total_seconds(), expected);
        assert_eq!(forward.accumulated_seconds(), expected);
    }

    #[test]
    fn test_adjust_while_running_shifts_baseline() {
        let mut timer = Timer::new("Work", 0.0, 0.0, true, NOW);
        timer.update(NOW + 10.0);
        timer.adjust(60.0);
        assert_eq!(timer.total_seconds(), 70.0);

        timer.update(NOW + 20.0);
        assert_eq!(timer.total_seconds(), 80.0);
    }

    #[test]
    fn test_round_trip_preserves_paused_state() {
        let mut timer = Timer::new("Client work", 0.0, 85.5, false, NOW);
        timer.adjust(5025.0);

        let record = timer.serialize();
        assert_eq!(record.title.as_deref(), Some("Client work"));
        assert!(!record.started);

        let restored = Timer::deserialize(&record, "Timer 9", NOW + 999.0);
        assert_eq!(restored.title(), "Client work");
        assert_eq!(restored.total_seconds(), timer.total_seconds());
        assert_eq!(restored.rate(), timer.rate());
        assert!(!restored.is_started());
    }

    #[test]
    fn test_serialize_uses_last_updated_total() {
        let mut timer = Timer::new("Work", 10.0, 0.0, true, NOW);
        timer.update(NOW + 5.0);
        let record = timer.serialize();
        assert_eq!(record.time, 15.0);
        assert!(record.started);
    }

    #[test]
    fn test_deserialize_started_resumes_from_now() {
        let record = TimerRecord::new("Work", 120.0, 0.0, true);
        let mut timer = Timer::deserialize(&record, "unused", NOW);
        assert_eq!(timer.started_at(), Some(NOW));
        timer.update(NOW + 30.0);
        assert_eq!(timer.total_seconds(), 150.0);
    }

    #[test]
    fn test_deserialize_empty_title_uses_default() {
        let record = TimerRecord {
            title: Some(String::new()),
            ..TimerRecord::default()
        };
        let timer = Timer::deserialize(&record, "Timer 3", NOW);
        assert_eq!(timer.title(), "Timer 3");
    }

    #[test]
    fn test_render_negative_time() {
        let readout = Readout::render(-3661.0, 0.0);
        assert_eq!(readout.time_text, "-01:01:01");
        assert_eq!(readout.billed_text, "-0.00");
        assert!(readout.negative);
    }

    #[test]
    fn test_render_billed_total() {
        let readout = Readout::render(7200.0, 10.0);
        assert_eq!(readout.time_text, "02:00:00");
        assert_eq!(readout.billed_text, "20.00");
    }

    #[test]
    fn test_render_zero_with_negative_rate_is_unsigned() {
        let readout = Readout::render(0.0, -25.0);
        assert_eq!(readout.time_text, "00:00:00");
        assert_eq!(readout.billed_text, "0.00");
    }

    #[test]
    fn test_render_fractional_and_long_durations() {
        assert_eq!(Readout::render(59.99, 0.0).time_text, "00:00:59");
        assert_eq!(Readout::render(360_000.0, 0.0).time_text, "100:00:00");
        assert_eq!(Readout::render(5400.0, 30.0).billed_text, "45.00");
    }

    #[test]
    fn test_record_decoding_is_lenient() {
        let records: Vec<TimerRecord> = serde_json::from_str(
            r#"[
                {"title": "A", "time": "90", "rate": "12.5", "started": 1},
                {"time": "abc", "rate": null, "started": ""},
                {"title": "", "time": 3.5},
                {"title": 7, "started": "yes"},
                {"title": true}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0], TimerRecord::new("A", 90.0, 12.5, true));
        assert_eq!(records[1], TimerRecord::default());
        assert_eq!(records[2].title, None);
        assert_eq!(records[2].time, 3.5);
        assert_eq!(records[3].title.as_deref(), Some("7"));
        assert!(records[3].started);
        assert_eq!(records[4].title.as_deref(), Some("true"));
    }

    #[test]
    fn test_record_encoding_shape() {
        let json = serde_json::to_value(TimerRecord::new("A", 1.5, 2.0, false)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "A", "time": 1.5, "rate": 2.0, "started": false})
        );
    }
}
