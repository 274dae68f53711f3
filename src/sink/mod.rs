//! Benchmark Log Sink - where payloads go and where replay reads them from
//!
//! The sink is an external collaborator: it owns persistence, run identity
//! and timestamps. The crate only talks to it through two traits:
//!
//! ```text
//! Tracker ──log(description, measure_type, payload, unit?)──> BenchmarkSink
//! Visualizer <──read(measure_type) = [(payload, run start)]── BenchmarkSource
//! ```
//!
//! [`BenchmarkStore`] is an in-memory reference implementation of both.
//!
//! ## Usage
//!
//! ```rust
//! use e2ebench::metrics::TtaTracker;
//! use e2ebench::sink::{BenchmarkSource, BenchmarkStore, RunRecord};
//! use e2ebench::MeasureType;
//!
//! let store = BenchmarkStore::new();
//! let run = store.start_run(RunRecord::new("run-001", "resnet baseline"));
//!
//! TtaTracker::new(&run).track(&[0.4, 0.7, 0.9], "validation accuracy")?;
//!
//! let logged = store.read(MeasureType::Tta)?;
//! assert_eq!(logged.len(), 1);
//! # Ok::<(), e2ebench::Error>(())
//! ```

mod log_entry;
mod run_record;
mod store;

pub use log_entry::LogEntry;
pub use run_record::{RunRecord, RunRecordBuilder};
pub use store::{BenchmarkStore, Run};

use chrono::{DateTime, Utc};

use crate::metrics::{MeasureType, Payload};
use crate::Result;

/// Append-only destination for encoded measurements.
///
/// Implementations report their own failures as [`crate::Error::Sink`];
/// trackers propagate them unchanged and never retry.
pub trait BenchmarkSink {
    /// Append one payload.
    ///
    /// # Errors
    /// Returns a sink-defined error if the payload cannot be stored.
    fn log(
        &self,
        description: &str,
        measure_type: MeasureType,
        payload: Payload,
        unit: Option<&str>,
    ) -> Result<()>;
}

impl<S: BenchmarkSink + ?Sized> BenchmarkSink for &S {
    fn log(
        &self,
        description: &str,
        measure_type: MeasureType,
        payload: Payload,
        unit: Option<&str>,
    ) -> Result<()> {
        (**self).log(description, measure_type, payload, unit)
    }
}

/// A payload retrieved for replay, with the start time of the run it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedPayload {
    /// Encoded measurement
    pub payload: Payload,
    /// Start timestamp of the run that logged it
    pub run_started_at: DateTime<Utc>,
}

/// Read side of a benchmark log, used by visualizers.
pub trait BenchmarkSource {
    /// All payloads logged under `measure_type`.
    ///
    /// Filtering by description or run is up to the implementation.
    ///
    /// # Errors
    /// Returns a sink-defined error if the log cannot be read.
    fn read(&self, measure_type: MeasureType) -> Result<Vec<LoggedPayload>>;
}
