//! Curve replay - one series per historical run

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use super::chart::{Axis, Chart, LegendPosition, Series};
use crate::metrics::{Curve, LossCurve, Payload, TimeToAccuracy};
use crate::sink::BenchmarkSource;
use crate::{Error, Result};

/// Replays time-to-accuracy curves.
pub type TtaVisualizer = CurveVisualizer<TimeToAccuracy>;

/// Replays loss curves.
pub type LossVisualizer = CurveVisualizer<LossCurve>;

/// Decoded curves of several runs, in the order their payloads were given.
#[derive(Debug, Clone)]
pub struct CurveVisualizer<C: Curve> {
    runs: Vec<C>,
}

impl<C: Curve> CurveVisualizer<C> {
    /// Decode one payload per run.
    ///
    /// # Errors
    /// Returns [`Error::CorruptPayload`] naming the first run whose payload
    /// does not decode as `C`. No run is ever skipped.
    pub fn new<'p>(payloads: impl IntoIterator<Item = &'p Payload>) -> Result<Self> {
        let runs = payloads
            .into_iter()
            .enumerate()
            .map(|(i, payload)| C::decode(payload).map_err(|e| tag_run(e, i)))
            .collect::<Result<Vec<_>>>()?;
        debug!(measure_type = %C::MEASURE_TYPE, runs = runs.len(), "curves decoded");
        Ok(Self { runs })
    }

    /// Read every run of this kind from `source`.
    ///
    /// Returns the visualizer together with the run start timestamps,
    /// index-aligned with its runs.
    ///
    /// # Errors
    /// Returns the source's error or [`Error::CorruptPayload`].
    pub fn from_source<S: BenchmarkSource + ?Sized>(
        source: &S,
    ) -> Result<(Self, Vec<DateTime<Utc>>)> {
        let logged = source.read(C::MEASURE_TYPE)?;
        let visualizer = Self::new(logged.iter().map(|l| &l.payload))?;
        let starts = logged.iter().map(|l| l.run_started_at).collect();
        Ok((visualizer, starts))
    }

    /// Decoded runs.
    #[must_use]
    pub fn runs(&self) -> &[C] {
        &self.runs
    }

    /// Number of runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// True if there are no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Build the chart: one series per run, legend labelled with each run's
    /// start time (ISO-8601, second precision).
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if `starts` is not index-aligned
    /// with the runs.
    pub fn visualize(
        &self,
        uuid: &str,
        description: &str,
        starts: &[DateTime<Utc>],
    ) -> Result<Chart> {
        if starts.len() != self.runs.len() {
            return Err(Error::InvalidInput(format!(
                "{} runs but {} start timestamps",
                self.runs.len(),
                starts.len()
            )));
        }

        let series = self
            .runs
            .iter()
            .zip(starts)
            .map(|(run, start)| {
                let label = format!(
                    "Run from {}",
                    start.to_rfc3339_opts(SecondsFormat::Secs, true)
                );
                Series::indexed(label, run.values())
            })
            .collect();

        Ok(Chart {
            title: C::TITLE.to_string(),
            subtitle: Some(format!("{description} ({uuid})")),
            x_axis: Axis::new(C::X_LABEL),
            y_axis: Axis::new(C::MEASURE_TYPE.unit().unwrap_or("value")),
            series,
            legend: LegendPosition::UpperLeft,
        })
    }
}

fn tag_run(error: Error, index: usize) -> Error {
    match error {
        Error::CorruptPayload {
            measure_type,
            reason,
        } => Error::CorruptPayload {
            measure_type,
            reason: format!("run {}: {reason}", index + 1),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Codec;
    use chrono::TimeZone;

    #[test]
    fn test_tta_visualize() {
        let payloads = [
            TimeToAccuracy::new(vec![0.1, 0.5, 0.9]).encode().unwrap(),
            TimeToAccuracy::new(vec![0.2, 0.6]).encode().unwrap(),
        ];
        let t1 = Utc.with_ymd_and_hms(2021, 5, 1, 12, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2021, 5, 2, 8, 30, 15).unwrap();

        let chart = TtaVisualizer::new(&payloads)
            .unwrap()
            .visualize("uuid-1", "mnist", &[t1, t2])
            .unwrap();

        assert_eq!(chart.title, "Time to accuracy");
        assert_eq!(chart.subtitle.as_deref(), Some("mnist (uuid-1)"));
        assert_eq!(chart.x_axis.label, "epoch");
        assert_eq!(chart.y_axis.label, "accuracy");
        assert_eq!(chart.series[0].x, vec![1, 2, 3]);
        assert_eq!(chart.series[1].x, vec![1, 2]);
        assert_eq!(
            chart.legend_labels().collect::<Vec<_>>(),
            vec![
                "Run from 2021-05-01T12:00:00Z",
                "Run from 2021-05-02T08:30:15Z"
            ]
        );
    }

    #[test]
    fn test_corrupt_run_aborts() {
        let payloads = [
            TimeToAccuracy::new(vec![0.1]).encode().unwrap(),
            LossCurve::new(vec![0.4]).encode().unwrap(),
        ];
        let err = TtaVisualizer::new(&payloads).unwrap_err();
        match err {
            Error::CorruptPayload { reason, .. } => assert!(reason.starts_with("run 2:")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_misaligned_starts() {
        let payloads = [LossCurve::new(vec![0.4]).encode().unwrap()];
        let vis = LossVisualizer::new(&payloads).unwrap();
        assert!(matches!(
            vis.visualize("u", "d", &[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_loss_labels() {
        let payloads = [LossCurve::new(vec![2.0, 1.0]).encode().unwrap()];
        let chart = LossVisualizer::new(&payloads)
            .unwrap()
            .visualize("u", "d", &[Utc::now()])
            .unwrap();
        assert_eq!(chart.title, "Loss");
        assert_eq!(chart.x_axis.label, "step");
        assert_eq!(chart.y_axis.label, "loss");
    }
}
