//! # e2ebench: Benchmark Metric Tracking and Replay
//!
//! e2ebench records heterogeneous measurements produced while training and
//! evaluating ML models (confusion matrices, hyperparameter sweeps,
//! time-to-accuracy curves, loss trajectories) and replays them later as
//! charts.
//!
//! ## Design
//!
//! - **Closed tag set**: every measurement kind has a [`MeasureType`] tag and
//!   a [`Codec`](metrics::Codec) with an explicit, versioned JSON schema.
//! - **Opaque payloads**: the benchmark sink only ever sees
//!   `(description, measure_type, payload bytes, unit?)`.
//! - **No silent loss**: shape errors fail at `track`, corrupt payloads fail
//!   the whole visualization, and the hyperparameter table is logged exactly
//!   once on every exit path.
//!
//! ## Example Usage
//!
//! ```rust
//! use e2ebench::metrics::{ConfusionMatrixTracker, LossTracker, TtaTracker};
//! use e2ebench::sink::{BenchmarkStore, RunRecord};
//! use e2ebench::visualize::TtaVisualizer;
//!
//! let store = BenchmarkStore::new();
//! let run = store.start_run(RunRecord::new("run-001", "mnist mlp"));
//!
//! TtaTracker::new(&run).track(&[0.62, 0.81, 0.93], "test accuracy")?;
//! LossTracker::new(&run).track(&[1.9, 0.8, 0.4], "train loss")?;
//! ConfusionMatrixTracker::new(&run).track(
//!     vec![vec![50.0, 2.0], vec![3.0, 45.0]],
//!     ["even", "odd"],
//!     "parity head",
//! )?;
//!
//! let (tta, starts) = TtaVisualizer::from_source(&store)?;
//! let chart = tta.visualize("run-001", "mnist mlp", &starts)?;
//! assert_eq!(chart.series[0].x, vec![1, 2, 3]);
//! # Ok::<(), e2ebench::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod logging;
pub mod metrics;
pub mod sink;
pub mod visualize;

pub use error::{Error, Result};
pub use logging::init_logging;
pub use metrics::{Measurement, MeasureType, Payload};
