//! Benchmark Store - in-memory reference sink
//!
//! Data is lost on process restart. Production setups plug their own
//! [`BenchmarkSink`]/[`BenchmarkSource`] in front of a database.

use dashmap::DashMap;
use tracing::debug;

use super::{BenchmarkSink, BenchmarkSource, LogEntry, LoggedPayload, RunRecord};
use crate::metrics::{MeasureType, Payload};
use crate::Result;

/// In-memory benchmark log.
///
/// ## Design
///
/// Entries are kept in one append-only vector per measure type inside a
/// `DashMap`, so `read(measure_type)` touches only the relevant log and
/// several [`Run`] handles can log through `&self`.
#[derive(Debug, Default)]
pub struct BenchmarkStore {
    runs: DashMap<String, RunRecord>,
    entries: DashMap<MeasureType, Vec<LogEntry>>,
}

impl BenchmarkStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a run and return a sink handle that logs on its behalf.
    ///
    /// Registering a run ID twice replaces the earlier record; entries
    /// already logged keep the identity they were stamped with.
    pub fn start_run(&self, run: RunRecord) -> Run<'_> {
        debug!(run_id = run.run_id(), started_at = %run.started_at_iso(), "run started");
        self.runs.insert(run.run_id().to_string(), run.clone());
        Run {
            store: self,
            record: run,
        }
    }

    /// Check if the store holds no runs and no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() && self.entries.is_empty()
    }

    /// Get the number of registered runs.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Get the total number of logged entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.iter().map(|log| log.value().len()).sum()
    }

    /// Get a run by ID.
    #[must_use]
    pub fn get_run(&self, run_id: &str) -> Option<RunRecord> {
        self.runs.get(run_id).map(|r| r.value().clone())
    }

    /// Get every entry of one measure type, in append order.
    #[must_use]
    pub fn entries(&self, measure_type: MeasureType) -> Vec<LogEntry> {
        self.entries
            .get(&measure_type)
            .map(|log| log.value().clone())
            .unwrap_or_default()
    }

    /// Get every entry logged by one run, grouped by measure type.
    #[must_use]
    pub fn entries_for_run(&self, run_id: &str) -> Vec<LogEntry> {
        MeasureType::ALL
            .into_iter()
            .flat_map(|mt| self.entries(mt))
            .filter(|entry| entry.run_id() == run_id)
            .collect()
    }

    /// Read payloads of one measure type logged with the given description.
    ///
    /// Ordered like [`BenchmarkSource::read`].
    #[must_use]
    pub fn read_described(
        &self,
        measure_type: MeasureType,
        description: &str,
    ) -> Vec<LoggedPayload> {
        Self::to_replay(
            self.entries(measure_type)
                .into_iter()
                .filter(|entry| entry.description() == description),
        )
    }

    fn append(&self, entry: LogEntry) {
        self.entries
            .entry(entry.measure_type())
            .or_default()
            .push(entry);
    }

    // Oldest run first; stable, so one run's entries keep their log order.
    fn to_replay(entries: impl Iterator<Item = LogEntry>) -> Vec<LoggedPayload> {
        let mut logged: Vec<LoggedPayload> = entries
            .map(|entry| LoggedPayload {
                run_started_at: entry.run_started_at(),
                payload: entry.payload().clone(),
            })
            .collect();
        logged.sort_by_key(|l| l.run_started_at);
        logged
    }
}

impl BenchmarkSource for BenchmarkStore {
    fn read(&self, measure_type: MeasureType) -> Result<Vec<LoggedPayload>> {
        Ok(Self::to_replay(self.entries(measure_type).into_iter()))
    }
}

/// Sink handle for one run of a [`BenchmarkStore`].
#[derive(Debug, Clone)]
pub struct Run<'a> {
    store: &'a BenchmarkStore,
    record: RunRecord,
}

impl Run<'_> {
    /// Get the run's record.
    #[must_use]
    pub const fn record(&self) -> &RunRecord {
        &self.record
    }

    /// Get the run ID.
    #[must_use]
    pub fn run_id(&self) -> &str {
        self.record.run_id()
    }
}

impl BenchmarkSink for Run<'_> {
    fn log(
        &self,
        description: &str,
        measure_type: MeasureType,
        payload: Payload,
        unit: Option<&str>,
    ) -> Result<()> {
        self.store.append(LogEntry::new(
            &self.record,
            description,
            measure_type,
            payload,
            unit,
        ));
        Ok(())
    }
}
