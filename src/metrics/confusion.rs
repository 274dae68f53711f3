//! Confusion Matrix - square class matrix with labels
//!
//! Rows are predicted classes, columns are actual classes. The label at
//! index `i` names both row `i` and column `i`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::codec::{from_wire, to_wire, WireFloat};
use super::{payload, Codec, MeasureType, Payload};
use crate::sink::BenchmarkSink;
use crate::{Error, Result};

/// A validated confusion matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl ConfusionMatrix {
    /// Create a confusion matrix, checking its shape.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if `matrix` is not square or its side
    /// differs from `labels.len()`.
    pub fn new<L: Into<String>>(
        matrix: Vec<Vec<f64>>,
        labels: impl IntoIterator<Item = L>,
    ) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        check_shape(&matrix, labels.len())?;
        Ok(Self { matrix, labels })
    }

    /// Get the matrix rows (predicted class major).
    #[must_use]
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Get the class labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of classes.
    #[must_use]
    pub fn side(&self) -> usize {
        self.labels.len()
    }

    /// Cell for (`predicted`, `actual`), if in range.
    #[must_use]
    pub fn get(&self, predicted: usize, actual: usize) -> Option<f64> {
        self.matrix.get(predicted)?.get(actual).copied()
    }
}

fn check_shape(matrix: &[Vec<f64>], labels: usize) -> Result<()> {
    let rows = matrix.len();
    if let Some(bad) = matrix.iter().find(|row| row.len() != rows) {
        return Err(Error::ShapeMismatch {
            rows,
            columns: bad.len(),
            labels,
        });
    }
    if rows != labels {
        return Err(Error::ShapeMismatch {
            rows,
            columns: rows,
            labels,
        });
    }
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct ConfusionWire {
    matrix: Vec<Vec<WireFloat>>,
    labels: Vec<String>,
}

impl Codec for ConfusionMatrix {
    const MEASURE_TYPE: MeasureType = MeasureType::ConfusionMatrix;

    fn encode(&self) -> Result<Payload> {
        let wire = ConfusionWire {
            matrix: self.matrix.iter().map(|row| to_wire(row)).collect(),
            labels: self.labels.clone(),
        };
        payload::seal(Self::MEASURE_TYPE, &wire)
    }

    fn decode(payload: &Payload) -> Result<Self> {
        let wire: ConfusionWire = payload::open(Self::MEASURE_TYPE, payload)?;
        let matrix = wire
            .matrix
            .into_iter()
            .map(|row| from_wire(Self::MEASURE_TYPE, row))
            .collect::<Result<Vec<_>>>()?;

        // A malformed body is corruption, not a caller shape error.
        check_shape(&matrix, wire.labels.len())
            .map_err(|e| Error::corrupt(Self::MEASURE_TYPE.as_str(), e.to_string()))?;

        Ok(Self {
            matrix,
            labels: wire.labels,
        })
    }
}

/// Logs confusion matrices under `"confusion-matrix"` with no unit.
#[derive(Debug)]
pub struct ConfusionMatrixTracker<'a, S: BenchmarkSink> {
    sink: &'a S,
}

impl<'a, S: BenchmarkSink> ConfusionMatrixTracker<'a, S> {
    /// Bind a tracker to a sink.
    #[must_use]
    pub const fn new(sink: &'a S) -> Self {
        Self { sink }
    }

    /// Validate, encode and log a matrix.
    ///
    /// `matrix` rows are predicted classes, columns are actual classes.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] before anything is logged if the
    /// shape is wrong, or the sink's error if logging fails.
    pub fn track<L: Into<String>>(
        &self,
        matrix: Vec<Vec<f64>>,
        labels: impl IntoIterator<Item = L>,
        description: &str,
    ) -> Result<()> {
        let cm = ConfusionMatrix::new(matrix, labels)?;
        self.track_matrix(&cm, description)
    }

    /// Encode and log an already validated matrix.
    ///
    /// # Errors
    /// Returns the sink's error if logging fails.
    pub fn track_matrix(&self, cm: &ConfusionMatrix, description: &str) -> Result<()> {
        super::log_measurement(self.sink, cm, description)?;
        debug!(classes = cm.side(), "confusion matrix tracked");
        Ok(())
    }
}
