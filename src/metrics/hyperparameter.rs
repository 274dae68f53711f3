//! Hyperparameter sweep tracking
//!
//! A [`HyperparameterTracker`] accumulates one row per evaluated
//! configuration and logs the whole table exactly once, when it is closed.
//! Closing is guaranteed: [`HyperparameterTracker::close`] consumes the
//! tracker, dropping an unclosed tracker closes it, and
//! [`with_hyperparameter_tracker`] closes on every exit path of its closure.
//!
//! ## Usage
//!
//! ```rust
//! use e2ebench::metrics::{with_hyperparameter_tracker, HyperValue, HyperparameterConfig};
//! use e2ebench::sink::{BenchmarkStore, RunRecord};
//!
//! let store = BenchmarkStore::new();
//! let run = store.start_run(RunRecord::new("run-001", "lr sweep"));
//! let config = HyperparameterConfig::builder("lr sweep", "accuracy")
//!     .hyperparameters(["lr", "batch_size"])
//!     .low_means_good(false)
//!     .build();
//!
//! with_hyperparameter_tracker(&run, config, |tracker| {
//!     for lr in [0.1, 0.01] {
//!         tracker.track([
//!             ("lr", HyperValue::from(lr)),
//!             ("batch_size", HyperValue::from(32)),
//!             ("accuracy", HyperValue::from(0.9)),
//!         ])?;
//!     }
//!     Ok(())
//! })?;
//! # Ok::<(), e2ebench::Error>(())
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::iter;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::codec::WireFloat;
use super::{payload, Codec, MeasureType, Payload};
use crate::sink::BenchmarkSink;
use crate::{Error, Result};

/// One scalar cell of a hyperparameter table.
///
/// On the wire a cell is a bare JSON scalar, except non-finite floats,
/// which are written as `{"float": "NaN"}` (or `"inf"`, `"-inf"`) so they
/// stay distinct from text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireValue", into = "WireValue")]
pub enum HyperValue {
    /// Boolean flag (e.g. `use_dropout`)
    Bool(bool),
    /// Integer value (e.g. `batch_size`)
    Int(i64),
    /// Real value (e.g. `lr`), NaN and infinities included
    Float(f64),
    /// Categorical value (e.g. `optimizer`)
    Text(String),
}

impl HyperValue {
    /// Numeric view of the value, if it has one.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    NonFinite { float: WireFloat },
}

impl From<HyperValue> for WireValue {
    fn from(value: HyperValue) -> Self {
        match value {
            HyperValue::Bool(v) => Self::Bool(v),
            HyperValue::Int(v) => Self::Int(v),
            HyperValue::Float(v) if v.is_finite() => Self::Float(v),
            HyperValue::Float(v) => Self::NonFinite {
                float: WireFloat::from(v),
            },
            HyperValue::Text(v) => Self::Text(v),
        }
    }
}

impl TryFrom<WireValue> for HyperValue {
    type Error = String;

    fn try_from(value: WireValue) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            WireValue::Bool(v) => Self::Bool(v),
            WireValue::Int(v) => Self::Int(v),
            WireValue::Float(v) => Self::Float(v),
            WireValue::Text(v) => Self::Text(v),
            WireValue::NonFinite { float } => Self::Float(f64::try_from(float)?),
        })
    }
}

impl From<bool> for HyperValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for HyperValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for HyperValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for HyperValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f32> for HyperValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for HyperValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for HyperValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for HyperValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

const fn default_low_means_good() -> bool {
    true
}

/// Fixed shape of a hyperparameter sweep.
///
/// `low_means_good` says whether smaller target values are better. It is
/// carried into the payload for downstream readers and never consulted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperparameterConfig {
    /// Description logged with the table
    pub description: String,
    /// Declared hyperparameter names, in column order
    pub hyperparameters: Vec<String>,
    /// Name of the target column
    pub target: String,
    /// Whether smaller target values are better
    #[serde(default = "default_low_means_good")]
    pub low_means_good: bool,
}

impl HyperparameterConfig {
    /// Create a config with `low_means_good = true`.
    #[must_use]
    pub fn new<N: Into<String>>(
        description: impl Into<String>,
        hyperparameters: impl IntoIterator<Item = N>,
        target: impl Into<String>,
    ) -> Self {
        Self::builder(description, target)
            .hyperparameters(hyperparameters)
            .build()
    }

    /// Create a builder with required fields.
    #[must_use]
    pub fn builder(
        description: impl Into<String>,
        target: impl Into<String>,
    ) -> HyperparameterConfigBuilder {
        HyperparameterConfigBuilder::new(description, target)
    }

    /// Check that column names are usable.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the target is empty, a name is
    /// declared twice, or the target is also declared as a hyperparameter.
    pub fn validate(&self) -> Result<()> {
        if self.target.is_empty() {
            return Err(Error::InvalidInput("target name must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for name in &self.hyperparameters {
            if !seen.insert(name.as_str()) {
                return Err(Error::InvalidInput(format!(
                    "hyperparameter '{name}' declared twice"
                )));
            }
        }
        if seen.contains(self.target.as_str()) {
            return Err(Error::InvalidInput(format!(
                "target '{}' is also declared as a hyperparameter",
                self.target
            )));
        }
        Ok(())
    }
}

/// Builder for `HyperparameterConfig`.
#[derive(Debug)]
pub struct HyperparameterConfigBuilder {
    description: String,
    hyperparameters: Vec<String>,
    target: String,
    low_means_good: bool,
}

impl HyperparameterConfigBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(description: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            hyperparameters: Vec::new(),
            target: target.into(),
            low_means_good: default_low_means_good(),
        }
    }

    /// Declare one more hyperparameter column.
    #[must_use]
    pub fn hyperparameter(mut self, name: impl Into<String>) -> Self {
        self.hyperparameters.push(name.into());
        self
    }

    /// Declare several hyperparameter columns, in order.
    #[must_use]
    pub fn hyperparameters<N: Into<String>>(mut self, names: impl IntoIterator<Item = N>) -> Self {
        self.hyperparameters.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set whether smaller target values are better.
    #[must_use]
    pub const fn low_means_good(mut self, low_means_good: bool) -> Self {
        self.low_means_good = low_means_good;
        self
    }

    /// Build the `HyperparameterConfig`.
    #[must_use]
    pub fn build(self) -> HyperparameterConfig {
        HyperparameterConfig {
            description: self.description,
            hyperparameters: self.hyperparameters,
            target: self.target,
            low_means_good: self.low_means_good,
        }
    }
}

/// Column-major table of tracked rows.
///
/// Columns are the declared hyperparameters followed by the target, all
/// of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperparameterTable {
    hyperparameters: Vec<String>,
    rows: BTreeMap<String, Vec<HyperValue>>,
    target: String,
    low_means_good: bool,
}

impl HyperparameterTable {
    /// Create an empty table for the given config.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the config fails
    /// [`validate`](HyperparameterConfig::validate).
    pub fn new(config: &HyperparameterConfig) -> Result<Self> {
        config.validate()?;
        let rows = config
            .hyperparameters
            .iter()
            .chain(iter::once(&config.target))
            .map(|name| (name.clone(), Vec::new()))
            .collect();
        Ok(Self {
            hyperparameters: config.hyperparameters.clone(),
            rows,
            target: config.target.clone(),
            low_means_good: config.low_means_good,
        })
    }

    /// Get the declared hyperparameter names.
    #[must_use]
    pub fn hyperparameters(&self) -> &[String] {
        &self.hyperparameters
    }

    /// Get the target column name.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether smaller target values are better.
    #[must_use]
    pub const fn low_means_good(&self) -> bool {
        self.low_means_good
    }

    /// Column names: hyperparameters first, target last.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.hyperparameters
            .iter()
            .chain(iter::once(&self.target))
            .map(String::as_str)
    }

    /// Values of one column, in insertion order.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[HyperValue]> {
        self.rows.get(name).map(Vec::as_slice)
    }

    /// Values of row `index`, in column order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<&HyperValue>> {
        self.columns()
            .map(|name| self.rows.get(name).and_then(|col| col.get(index)))
            .collect()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.get(&self.target).map_or(0, Vec::len)
    }

    /// True if no row has been tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // `values` must be in column order.
    fn push_row(&mut self, values: Vec<HyperValue>) {
        let names = self.hyperparameters.iter().chain(iter::once(&self.target));
        for (name, value) in names.zip(values) {
            self.rows.entry(name.clone()).or_default().push(value);
        }
    }

    fn check_consistent(&self) -> std::result::Result<(), String> {
        let expected: HashSet<&str> = self.columns().collect();
        if expected.len() != self.hyperparameters.len() + 1 {
            return Err("duplicate column names".into());
        }
        if self.rows.len() != expected.len()
            || self.rows.keys().any(|k| !expected.contains(k.as_str()))
        {
            return Err("row columns do not match declared hyperparameters and target".into());
        }
        let len = self.len();
        if let Some((name, col)) = self.rows.iter().find(|(_, col)| col.len() != len) {
            return Err(format!(
                "column '{name}' has {} values, expected {len}",
                col.len()
            ));
        }
        Ok(())
    }
}

impl Codec for HyperparameterTable {
    const MEASURE_TYPE: MeasureType = MeasureType::Hyperparameters;

    fn encode(&self) -> Result<Payload> {
        payload::seal(Self::MEASURE_TYPE, self)
    }

    fn decode(payload: &Payload) -> Result<Self> {
        let table: Self = payload::open(Self::MEASURE_TYPE, payload)?;
        table
            .check_consistent()
            .map_err(|reason| Error::corrupt(Self::MEASURE_TYPE.as_str(), reason))?;
        Ok(table)
    }
}

/// Scoped tracker for a hyperparameter sweep.
///
/// Logs its table under `"hyperparameters"` exactly once: on
/// [`close`](Self::close), or on drop if never closed.
pub struct HyperparameterTracker<'a, S: BenchmarkSink> {
    sink: &'a S,
    description: String,
    table: HyperparameterTable,
    closed: bool,
}

impl<'a, S: BenchmarkSink> HyperparameterTracker<'a, S> {
    /// Open a tracker bound to `sink`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the config fails validation.
    pub fn new(sink: &'a S, config: HyperparameterConfig) -> Result<Self> {
        let table = HyperparameterTable::new(&config)?;
        Ok(Self {
            sink,
            description: config.description,
            table,
            closed: false,
        })
    }

    /// Append one row.
    ///
    /// The measurement is projected onto the declared hyperparameters and
    /// the target; extra fields are dropped.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] if a declared name or the target is
    /// absent. A rejected row leaves the table unchanged.
    pub fn track<K, V>(&mut self, measurement: impl IntoIterator<Item = (K, V)>) -> Result<()>
    where
        K: Into<String>,
        V: Into<HyperValue>,
    {
        let mut measurement: HashMap<String, HyperValue> = measurement
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut row = Vec::with_capacity(self.table.hyperparameters.len() + 1);
        for name in self.table.columns() {
            let Some(value) = measurement.remove(name) else {
                warn!(field = name, "hyperparameter row rejected");
                return Err(Error::MissingField(name.to_string()));
            };
            row.push(value);
        }

        if !measurement.is_empty() {
            debug!(dropped = measurement.len(), "extra measurement fields dropped");
        }
        self.table.push_row(row);
        Ok(())
    }

    /// The table accumulated so far.
    #[must_use]
    pub const fn table(&self) -> &HyperparameterTable {
        &self.table
    }

    /// Number of rows tracked so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True if nothing has been tracked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Encode the table and log it.
    ///
    /// An empty table is logged too.
    ///
    /// # Errors
    /// Returns the encode or sink error. The tracker is finished either way.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        self.closed = true;
        super::log_measurement(self.sink, &self.table, &self.description)?;
        info!(
            description = %self.description,
            rows = self.table.len(),
            "hyperparameter table logged"
        );
        Ok(())
    }
}

impl<S: BenchmarkSink> Drop for HyperparameterTracker<'_, S> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.finish() {
                error!(
                    error = %e,
                    description = %self.description,
                    "hyperparameter table lost on drop"
                );
            }
        }
    }
}

/// Run `f` with an open tracker and close it exactly once afterwards.
///
/// The table is logged whether `f` succeeds or fails. If `f` fails its
/// error is returned (a close failure on that path is only logged);
/// otherwise the close result decides.
///
/// # Errors
/// Returns the config validation error, the closure's error, or the close
/// error, in that order of precedence.
pub fn with_hyperparameter_tracker<'a, S, T, F>(
    sink: &'a S,
    config: HyperparameterConfig,
    f: F,
) -> Result<T>
where
    S: BenchmarkSink,
    F: FnOnce(&mut HyperparameterTracker<'a, S>) -> Result<T>,
{
    let mut tracker = HyperparameterTracker::new(sink, config)?;
    match f(&mut tracker) {
        Ok(value) => tracker.close().map(|()| value),
        Err(e) => {
            if let Err(close_err) = tracker.close() {
                error!(error = %close_err, "hyperparameter table not logged after failure");
            }
            Err(e)
        }
    }
}
