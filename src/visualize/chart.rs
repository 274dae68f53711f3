//! Logical chart descriptions
//!
//! Pixel rendering is left to whatever plotting library the caller uses;
//! these types only fix what must be shown. They serialize to JSON so a
//! frontend can render them directly.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Axis of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis title
    pub label: String,
}

impl Axis {
    /// Create an axis with the given title.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Where the legend is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    /// Top-left corner of the plot area
    UpperLeft,
    /// Top-right corner of the plot area
    UpperRight,
}

/// One line of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend entry
    pub label: String,
    /// X values, 1-based indices
    pub x: Vec<usize>,
    /// Y values, same length as `x`
    pub y: Vec<f64>,
}

impl Series {
    /// Build a series from values implicitly indexed 1..=N.
    #[must_use]
    pub fn indexed(label: impl Into<String>, values: &[f64]) -> Self {
        Self {
            label: label.into(),
            x: (1..=values.len()).collect(),
            y: values.to_vec(),
        }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// True if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Line chart with one series per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Chart title
    pub title: String,
    /// Secondary title (description and benchmark ID)
    pub subtitle: Option<String>,
    /// Horizontal axis
    pub x_axis: Axis,
    /// Vertical axis
    pub y_axis: Axis,
    /// Series in legend order
    pub series: Vec<Series>,
    /// Legend anchor
    pub legend: LegendPosition,
}

impl Chart {
    /// Legend labels, in series order.
    pub fn legend_labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.label.as_str())
    }

    /// Serialize for a rendering frontend.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Other(format!("chart serialization: {e}")))
    }
}

/// Annotated grid, used for confusion matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    /// Chart title
    pub title: String,
    /// Secondary title
    pub subtitle: Option<String>,
    /// Horizontal axis (columns)
    pub x_axis: Axis,
    /// Vertical axis (rows)
    pub y_axis: Axis,
    /// Column labels, left to right
    pub x_labels: Vec<String>,
    /// Row labels, top to bottom
    pub y_labels: Vec<String>,
    /// Cell values, `cells[row][column]`
    pub cells: Vec<Vec<f64>>,
}

impl Heatmap {
    /// Serialize for a rendering frontend.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Other(format!("heatmap serialization: {e}")))
    }
}
