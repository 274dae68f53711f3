//! Replay of logged payloads as logical charts
//!
//! ```text
//! BenchmarkSource::read ──> [Payload] ──Codec::decode──> Visualizer ──> Chart / Heatmap
//! ```
//!
//! Decoding is all-or-nothing: one corrupt payload fails the whole
//! visualization, because a chart silently missing a run misreports the
//! benchmark.
//!
//! ## Usage
//!
//! ```rust
//! use e2ebench::metrics::TtaTracker;
//! use e2ebench::sink::{BenchmarkStore, RunRecord};
//! use e2ebench::visualize::TtaVisualizer;
//!
//! let store = BenchmarkStore::new();
//! for (id, accs) in [("run-1", vec![0.3, 0.8]), ("run-2", vec![0.4, 0.7, 0.9])] {
//!     let run = store.start_run(RunRecord::new(id, "cifar10"));
//!     TtaTracker::new(&run).track(&accs, "val accuracy")?;
//! }
//!
//! let (visualizer, starts) = TtaVisualizer::from_source(&store)?;
//! let chart = visualizer.visualize("bench-42", "cifar10", &starts)?;
//! assert_eq!(chart.series.len(), 2);
//! # Ok::<(), e2ebench::Error>(())
//! ```

mod chart;
mod confusion;
mod curve;

pub use chart::{Axis, Chart, Heatmap, LegendPosition, Series};
pub use confusion::ConfusionMatrixVisualizer;
pub use curve::{CurveVisualizer, LossVisualizer, TtaVisualizer};
