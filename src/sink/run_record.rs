//! Run Record - identity and start time of one experiment run

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Run Record identifies one execution of an experiment.
///
/// Every payload logged through a [`Run`](super::Run) is stamped with the
/// run's ID and start time, which visualizers later use as the legend of
/// the run's series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRecord {
    run_id: String,
    description: String,
    started_at: DateTime<Utc>,
}

impl RunRecord {
    /// Create a new run record started now.
    ///
    /// # Arguments
    ///
    /// * `run_id` - Unique identifier for the run (typically a UUID)
    /// * `description` - Human-readable description of the experiment
    #[must_use]
    pub fn new(run_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            description: description.into(),
            started_at: Utc::now(),
        }
    }

    /// Create a builder for constructing a run record with optional fields.
    #[must_use]
    pub fn builder(run_id: impl Into<String>, description: impl Into<String>) -> RunRecordBuilder {
        RunRecordBuilder::new(run_id, description)
    }

    /// Get the run ID.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the run description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the start timestamp.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Start timestamp as ISO-8601 with second precision.
    #[must_use]
    pub fn started_at_iso(&self) -> String {
        self.started_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Builder for `RunRecord`.
#[derive(Debug)]
pub struct RunRecordBuilder {
    run_id: String,
    description: String,
    started_at: DateTime<Utc>,
}

impl RunRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(run_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            description: description.into(),
            started_at: Utc::now(),
        }
    }

    /// Set a custom start timestamp (useful for replaying imported runs).
    #[must_use]
    pub const fn started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Build the `RunRecord`.
    #[must_use]
    pub fn build(self) -> RunRecord {
        RunRecord {
            run_id: self.run_id,
            description: self.description,
            started_at: self.started_at,
        }
    }
}
