//! Metric trackers and payload codecs
//!
//! Four measurement kinds, one closed tag set:
//!
//! ```text
//! MeasureType          Measurement              Tracker                      Unit
//! confusion-matrix     ConfusionMatrix          ConfusionMatrixTracker       -
//! hyperparameters      HyperparameterTable      HyperparameterTracker        -
//! tta                  TimeToAccuracy           TtaTracker                   accuracy
//! loss                 LossCurve                LossTracker                  loss
//! ```
//!
//! Every measurement implements [`Codec`]. The sink only ever sees the
//! measure-type string and opaque [`Payload`] bytes; choosing the matching
//! decoder on the way back is the caller's contract, and a mismatch is
//! reported as [`Error::CorruptPayload`](crate::Error::CorruptPayload).

mod codec;
mod confusion;
mod curve;
mod hyperparameter;
mod measure_type;
mod payload;

pub use codec::Codec;
pub use confusion::{ConfusionMatrix, ConfusionMatrixTracker};
pub use curve::{Curve, CurveTracker, LossCurve, LossTracker, TimeToAccuracy, TtaTracker};
pub use hyperparameter::{
    with_hyperparameter_tracker, HyperValue, HyperparameterConfig, HyperparameterConfigBuilder,
    HyperparameterTable, HyperparameterTracker,
};
pub use measure_type::MeasureType;
pub use payload::{Payload, WIRE_VERSION};

use tracing::debug;

use crate::sink::BenchmarkSink;
use crate::Result;

/// Encode `measurement` and log it under its own tag and unit.
pub(crate) fn log_measurement<S, M>(sink: &S, measurement: &M, description: &str) -> Result<()>
where
    S: BenchmarkSink + ?Sized,
    M: Codec,
{
    let payload = measurement.encode()?;
    debug!(
        measure_type = %M::MEASURE_TYPE,
        description,
        bytes = payload.len(),
        "logging payload"
    );
    sink.log(description, M::MEASURE_TYPE, payload, M::MEASURE_TYPE.unit())
}

/// Any measurement, tagged by kind.
///
/// Use this when the kind is only known at runtime, e.g. when replaying a
/// log whose entries carry their measure type.
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    /// Confusion matrix
    ConfusionMatrix(ConfusionMatrix),
    /// Hyperparameter table
    Hyperparameters(HyperparameterTable),
    /// Time-to-accuracy curve
    Tta(TimeToAccuracy),
    /// Loss curve
    Loss(LossCurve),
}

impl Measurement {
    /// Tag of the wrapped measurement.
    #[must_use]
    pub const fn measure_type(&self) -> MeasureType {
        match self {
            Self::ConfusionMatrix(_) => MeasureType::ConfusionMatrix,
            Self::Hyperparameters(_) => MeasureType::Hyperparameters,
            Self::Tta(_) => MeasureType::Tta,
            Self::Loss(_) => MeasureType::Loss,
        }
    }

    /// Encode with the codec of the wrapped kind.
    ///
    /// # Errors
    /// Returns error if the measurement cannot be serialized.
    pub fn encode(&self) -> Result<Payload> {
        match self {
            Self::ConfusionMatrix(m) => m.encode(),
            Self::Hyperparameters(m) => m.encode(),
            Self::Tta(m) => m.encode(),
            Self::Loss(m) => m.encode(),
        }
    }

    /// Decode `payload` with the codec selected by `measure_type`.
    ///
    /// # Errors
    /// Returns [`Error::CorruptPayload`](crate::Error::CorruptPayload) if the
    /// payload is not a valid encoding of `measure_type`.
    pub fn decode(measure_type: MeasureType, payload: &Payload) -> Result<Self> {
        Ok(match measure_type {
            MeasureType::ConfusionMatrix => {
                Self::ConfusionMatrix(ConfusionMatrix::decode(payload)?)
            }
            MeasureType::Hyperparameters => {
                Self::Hyperparameters(HyperparameterTable::decode(payload)?)
            }
            MeasureType::Tta => Self::Tta(TimeToAccuracy::decode(payload)?),
            MeasureType::Loss => Self::Loss(LossCurve::decode(payload)?),
        })
    }

    /// Encode and log under the wrapped kind's tag and unit.
    ///
    /// # Errors
    /// Returns the encode error or the sink's error.
    pub fn record<S: BenchmarkSink + ?Sized>(&self, sink: &S, description: &str) -> Result<()> {
        match self {
            Self::ConfusionMatrix(m) => log_measurement(sink, m, description),
            Self::Hyperparameters(m) => log_measurement(sink, m, description),
            Self::Tta(m) => log_measurement(sink, m, description),
            Self::Loss(m) => log_measurement(sink, m, description),
        }
    }
}

impl From<ConfusionMatrix> for Measurement {
    fn from(m: ConfusionMatrix) -> Self {
        Self::ConfusionMatrix(m)
    }
}

impl From<HyperparameterTable> for Measurement {
    fn from(m: HyperparameterTable) -> Self {
        Self::Hyperparameters(m)
    }
}

impl From<TimeToAccuracy> for Measurement {
    fn from(m: TimeToAccuracy) -> Self {
        Self::Tta(m)
    }
}

impl From<LossCurve> for Measurement {
    fn from(m: LossCurve) -> Self {
        Self::Loss(m)
    }
}
