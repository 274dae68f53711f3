//! Log Entry - one payload as stored by the benchmark store

use chrono::{DateTime, Utc};

use super::RunRecord;
use crate::metrics::{MeasureType, Payload};

/// Log Entry is a single `log` call recorded by [`BenchmarkStore`](super::BenchmarkStore).
///
/// Entries are stored per measure type in append order and carry a copy
/// of the owning run's identity so reads need no join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    run_id: String,
    run_started_at: DateTime<Utc>,
    description: String,
    measure_type: MeasureType,
    payload: Payload,
    unit: Option<String>,
    logged_at: DateTime<Utc>,
}

impl LogEntry {
    /// Create a new entry logged now on behalf of `run`.
    #[must_use]
    pub fn new(
        run: &RunRecord,
        description: impl Into<String>,
        measure_type: MeasureType,
        payload: Payload,
        unit: Option<&str>,
    ) -> Self {
        Self {
            run_id: run.run_id().to_string(),
            run_started_at: run.started_at(),
            description: description.into(),
            measure_type,
            payload,
            unit: unit.map(str::to_string),
            logged_at: Utc::now(),
        }
    }

    /// Get the ID of the run that logged the entry.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the start timestamp of the run that logged the entry.
    #[must_use]
    pub const fn run_started_at(&self) -> DateTime<Utc> {
        self.run_started_at
    }

    /// Get the description passed to `log`.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the measure type tag.
    #[must_use]
    pub const fn measure_type(&self) -> MeasureType {
        self.measure_type
    }

    /// Get the encoded payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Get the unit, if one was logged.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Get the wall-clock time of the `log` call.
    #[must_use]
    pub const fn logged_at(&self) -> DateTime<Utc> {
        self.logged_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_new() {
        let run = RunRecord::new("run-1", "baseline");
        let entry = LogEntry::new(
            &run,
            "val acc",
            MeasureType::Tta,
            Payload::from_bytes(b"{}".to_vec()),
            Some("accuracy"),
        );

        assert_eq!(entry.run_id(), "run-1");
        assert_eq!(entry.run_started_at(), run.started_at());
        assert_eq!(entry.description(), "val acc");
        assert_eq!(entry.measure_type(), MeasureType::Tta);
        assert_eq!(entry.unit(), Some("accuracy"));
        assert!(entry.logged_at() >= run.started_at());
    }
}
