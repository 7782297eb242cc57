// THEORY:
// Telemetry is the locator's side channel to whoever persists measurements.
// A detector fills a small record of named metrics every time it runs; an
// external collector reads the latest record whenever it likes.
//
// Key architectural principles:
// 1.  **Latest value, not history**: The record is a snapshot of the most
//     recent `locate` call. Older snapshots are dropped when replaced.
// 2.  **Whole-record publish**: The writer builds a complete new record and
//     swaps it in behind a lock in one step. A reader holding an `Arc` to a
//     record keeps a consistent view even while the writer publishes the next
//     one: it sees either the previous or the current record, never a mix of
//     the two.
// 3.  **Placeholders**: A channel starts with every key present and no value,
//     so a collector can tell "never ran" apart from "ran and found nothing".

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// Area of the winning region in px², 0.0 when nothing was accepted.
pub const BEST_AREA: &str = "best_area";
/// Number of regions that passed the area threshold.
pub const CANDIDATES: &str = "candidates";
pub const UNIT_PIXELS: &str = "px";

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum MetricValue {
    Float(f64),
    Count(u64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            MetricValue::Float(value) => value,
            MetricValue::Count(count) => count as f64,
        }
    }
}

/// One timestamped, optionally unit-tagged metric value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Measurement {
    pub timestamp: DateTime<Utc>,
    pub value: MetricValue,
    pub unit: Option<&'static str>,
}

impl Measurement {
    pub fn new(timestamp: DateTime<Utc>, value: MetricValue, unit: Option<&'static str>) -> Self {
        Self {
            timestamp,
            value,
            unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct TelemetryRecord {
    metrics: BTreeMap<&'static str, Option<Measurement>>,
}

impl TelemetryRecord {
    /// A record holding the given keys with no values yet.
    pub fn with_keys(keys: &[&'static str]) -> Self {
        Self {
            metrics: keys.iter().map(|&key| (key, None)).collect(),
        }
    }

    pub fn set(&mut self, key: &'static str, measurement: Measurement) {
        self.metrics.insert(key, Some(measurement));
    }

    /// The measurement under `key`, `None` if the key is unknown or still a placeholder.
    pub fn get(&self, key: &str) -> Option<&Measurement> {
        self.metrics.get(key).and_then(Option::as_ref)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.metrics.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&Measurement>)> + '_ {
        self.metrics.iter().map(|(&key, value)| (key, value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Shared slot holding the latest published record.
///
/// Cloning a channel yields another handle onto the same slot. Only the crate
/// publishes; collectors call [`TelemetryChannel::snapshot`].
#[derive(Debug, Clone)]
pub struct TelemetryChannel {
    latest: Arc<RwLock<Arc<TelemetryRecord>>>,
}

impl TelemetryChannel {
    pub fn new(initial: TelemetryRecord) -> Self {
        Self {
            latest: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// The most recently published record.
    pub fn snapshot(&self) -> Arc<TelemetryRecord> {
        // The slot only ever holds whole records, poisoned or not.
        let guard = self.latest.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub(crate) fn publish(&self, record: TelemetryRecord) {
        let record = Arc::new(record);
        let mut guard = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *guard = record;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn placeholders_read_as_absent() {
        let record = TelemetryRecord::with_keys(&[BEST_AREA, CANDIDATES]);
        assert_eq!(record.len(), 2);
        assert!(record.contains_key(BEST_AREA));
        assert!(record.get(BEST_AREA).is_none());
        assert!(record.get("unknown").is_none());
        assert!(record.iter().all(|(_, value)| value.is_none()));
    }

    #[test]
    fn publish_replaces_the_whole_record() {
        let channel = TelemetryChannel::new(TelemetryRecord::with_keys(&[BEST_AREA, CANDIDATES]));
        let reader = channel.clone();
        let before = reader.snapshot();

        let now = Utc::now();
        let mut record = TelemetryRecord::with_keys(&[BEST_AREA, CANDIDATES]);
        record.set(BEST_AREA, Measurement::new(now, MetricValue::Float(42.0), Some(UNIT_PIXELS)));
        record.set(CANDIDATES, Measurement::new(now, MetricValue::Count(3), None));
        channel.publish(record);

        let after = reader.snapshot();
        assert!(before.get(BEST_AREA).is_none());
        assert_eq!(after.get(BEST_AREA).map(|m| m.value), Some(MetricValue::Float(42.0)));
        assert_eq!(after.get(CANDIDATES).map(|m| m.value.as_f64()), Some(3.0));
        assert_eq!(after.get(BEST_AREA).and_then(|m| m.unit), Some("px"));
    }

    #[test]
    fn concurrent_readers_never_see_torn_records() {
        let channel = TelemetryChannel::new(TelemetryRecord::with_keys(&[BEST_AREA, CANDIDATES]));
        let reader = channel.clone();

        let collector = thread::spawn(move || {
            for _ in 0..5_000 {
                let snapshot = reader.snapshot();
                match (snapshot.get(BEST_AREA), snapshot.get(CANDIDATES)) {
                    (Some(area), Some(candidates)) => {
                        assert_eq!(area.value.as_f64(), candidates.value.as_f64() * 10.0);
                        assert_eq!(area.timestamp, candidates.timestamp);
                    }
                    (None, None) => {}
                    _ => panic!("half-populated record"),
                }
            }
        });

        for i in 0..5_000u64 {
            let now = Utc::now();
            let mut record = TelemetryRecord::with_keys(&[BEST_AREA, CANDIDATES]);
            let value = MetricValue::Float(i as f64 * 10.0);
            record.set(BEST_AREA, Measurement::new(now, value, Some(UNIT_PIXELS)));
            record.set(CANDIDATES, Measurement::new(now, MetricValue::Count(i), None));
            channel.publish(record);
        }

        collector.join().unwrap();
    }
}
