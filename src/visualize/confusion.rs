//! Confusion matrix replay as a heatmap

use super::chart::{Axis, Heatmap};
use crate::metrics::{Codec, ConfusionMatrix, Payload};
use crate::Result;

/// Decoded confusion matrix ready to be drawn.
#[derive(Debug, Clone)]
pub struct ConfusionMatrixVisualizer {
    matrix: ConfusionMatrix,
}

impl ConfusionMatrixVisualizer {
    /// Decode one confusion-matrix payload.
    ///
    /// # Errors
    /// Returns [`Error::CorruptPayload`](crate::Error::CorruptPayload) if the
    /// payload is not a valid confusion matrix.
    pub fn new(payload: &Payload) -> Result<Self> {
        Ok(Self {
            matrix: ConfusionMatrix::decode(payload)?,
        })
    }

    /// Decoded matrix.
    #[must_use]
    pub const fn matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    /// Columns are actual classes, rows are predicted classes.
    #[must_use]
    pub fn visualize(&self, description: &str) -> Heatmap {
        Heatmap {
            title: "Confusion matrix".to_string(),
            subtitle: Some(description.to_string()),
            x_axis: Axis::new("actual"),
            y_axis: Axis::new("predicted"),
            x_labels: self.matrix.labels().to_vec(),
            y_labels: self.matrix.labels().to_vec(),
            cells: self.matrix.matrix().to_vec(),
        }
    }
}
