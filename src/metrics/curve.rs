//! Curves - per-epoch accuracy and per-step loss sequences
//!
//! Both kinds share one shape (an ordered `f64` sequence, implicitly
//! indexed from 1) and differ only in tag, unit and axis labels.

use std::marker::PhantomData;

use tracing::debug;

use super::codec::{from_wire, to_wire, WireFloat};
use super::{payload, Codec, MeasureType, Payload};
use crate::sink::BenchmarkSink;
use crate::{Error, Result};

/// A measurement that is an ordered sequence of values.
pub trait Curve: Codec {
    /// Chart title used when replaying the curve.
    const TITLE: &'static str;
    /// Label of the implicit x axis.
    const X_LABEL: &'static str;

    /// Wrap values.
    fn from_values(values: Vec<f64>) -> Self;

    /// Borrow the values, index 0 being x = 1.
    fn values(&self) -> &[f64];
}

fn encode_curve<C: Curve>(curve: &C) -> Result<Payload> {
    payload::seal(C::MEASURE_TYPE, &to_wire(curve.values()))
}

fn decode_curve<C: Curve>(payload: &Payload) -> Result<C> {
    let wire: Vec<WireFloat> = payload::open(C::MEASURE_TYPE, payload)?;
    from_wire(C::MEASURE_TYPE, wire).map(C::from_values)
}

/// Time-to-accuracy curve: one accuracy per epoch, nominally in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeToAccuracy {
    accuracies: Vec<f64>,
}

impl TimeToAccuracy {
    /// Wrap a sequence of accuracies. The range is not enforced.
    #[must_use]
    pub const fn new(accuracies: Vec<f64>) -> Self {
        Self { accuracies }
    }

    /// Get the accuracies.
    #[must_use]
    pub fn accuracies(&self) -> &[f64] {
        &self.accuracies
    }

    /// First 1-based epoch reaching `threshold`, if any.
    #[must_use]
    pub fn epochs_to(&self, threshold: f64) -> Option<usize> {
        self.accuracies
            .iter()
            .position(|&a| a >= threshold)
            .map(|i| i + 1)
    }
}

impl Codec for TimeToAccuracy {
    const MEASURE_TYPE: MeasureType = MeasureType::Tta;

    fn encode(&self) -> Result<Payload> {
        encode_curve(self)
    }

    fn decode(payload: &Payload) -> Result<Self> {
        decode_curve(payload)
    }
}

impl Curve for TimeToAccuracy {
    const TITLE: &'static str = "Time to accuracy";
    const X_LABEL: &'static str = "epoch";

    fn from_values(values: Vec<f64>) -> Self {
        Self::new(values)
    }

    fn values(&self) -> &[f64] {
        &self.accuracies
    }
}

/// Loss trajectory: one value per step or epoch, unrestricted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LossCurve {
    losses: Vec<f64>,
}

impl LossCurve {
    /// Wrap a sequence of loss values.
    #[must_use]
    pub const fn new(losses: Vec<f64>) -> Self {
        Self { losses }
    }

    /// Get the loss values.
    #[must_use]
    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    /// Smallest finite loss and its 1-based index.
    #[must_use]
    pub fn best(&self) -> Option<(usize, f64)> {
        self.losses
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, l)| l.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, l)| (i + 1, l))
    }
}

impl Codec for LossCurve {
    const MEASURE_TYPE: MeasureType = MeasureType::Loss;

    fn encode(&self) -> Result<Payload> {
        encode_curve(self)
    }

    fn decode(payload: &Payload) -> Result<Self> {
        decode_curve(payload)
    }
}

impl Curve for LossCurve {
    const TITLE: &'static str = "Loss";
    const X_LABEL: &'static str = "step";

    fn from_values(values: Vec<f64>) -> Self {
        Self::new(values)
    }

    fn values(&self) -> &[f64] {
        &self.losses
    }
}

/// Logs whole curves of one kind.
#[derive(Debug)]
pub struct CurveTracker<'a, S: BenchmarkSink, C: Curve> {
    sink: &'a S,
    curve: PhantomData<C>,
}

/// Logs accuracies under `"tta"` with unit `"accuracy"`.
pub type TtaTracker<'a, S> = CurveTracker<'a, S, TimeToAccuracy>;

/// Logs loss values under `"loss"` with unit `"loss"`.
pub type LossTracker<'a, S> = CurveTracker<'a, S, LossCurve>;

impl<'a, S: BenchmarkSink, C: Curve> CurveTracker<'a, S, C> {
    /// Bind a tracker to a sink.
    #[must_use]
    pub const fn new(sink: &'a S) -> Self {
        Self {
            sink,
            curve: PhantomData,
        }
    }

    /// Encode and log a sequence verbatim.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] for an empty sequence, or the sink's
    /// error if logging fails.
    pub fn track(&self, values: &[f64], description: &str) -> Result<()> {
        if values.is_empty() {
            return Err(Error::InvalidInput(format!(
                "{} sequence must not be empty",
                C::MEASURE_TYPE
            )));
        }
        self.track_curve(&C::from_values(values.to_vec()), description)
    }

    /// Encode and log an existing curve.
    ///
    /// # Errors
    /// Returns the sink's error if logging fails.
    pub fn track_curve(&self, curve: &C, description: &str) -> Result<()> {
        super::log_measurement(self.sink, curve, description)?;
        debug!(
            measure_type = %C::MEASURE_TYPE,
            points = curve.values().len(),
            "curve tracked"
        );
        Ok(())
    }
}
