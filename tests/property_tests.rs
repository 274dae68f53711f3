//! Property-based tests for e2ebench codecs and trackers
//!
//! - decode(encode(m)) == m for every measure type
//! - encoding is repeatable (semantic identity)
//! - a payload never decodes under another measure type
//! - hyperparameter tables keep one row per accepted `track`, in order
//! - Run with ProptestConfig::with_cases(100)

use e2ebench::metrics::{
    Codec, ConfusionMatrix, HyperValue, HyperparameterConfig, HyperparameterTable,
    HyperparameterTracker, LossCurve, TimeToAccuracy,
};
use e2ebench::sink::{BenchmarkStore, RunRecord};
use e2ebench::{MeasureType, Measurement};
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Finite floats, including extreme magnitudes
fn arb_finite() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6f64..1.0e6,
        prop::num::f64::NORMAL,
        Just(0.0),
        Just(-0.0),
    ]
}

/// Square matrix with matching labels
fn arb_confusion_matrix() -> impl Strategy<Value = ConfusionMatrix> {
    (0usize..6).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::collection::vec(0.0f64..1000.0, n), n),
            prop::collection::vec("[a-z]{1,8}", n),
        )
            .prop_map(|(matrix, labels)| ConfusionMatrix::new(matrix, labels).unwrap())
    })
}

fn arb_hyper_value() -> impl Strategy<Value = HyperValue> {
    prop_oneof![
        any::<bool>().prop_map(HyperValue::Bool),
        any::<i64>().prop_map(HyperValue::Int),
        arb_finite().prop_map(HyperValue::Float),
        "[a-z]{0,10}".prop_map(HyperValue::Text),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: TTA curves round-trip exactly
    #[test]
    fn prop_tta_round_trip(values in prop::collection::vec(0.0f64..=1.0, 1..64)) {
        let tta = TimeToAccuracy::new(values);
        prop_assert_eq!(TimeToAccuracy::decode(&tta.encode().unwrap()).unwrap(), tta);
    }

    /// Property: loss curves round-trip exactly, whatever the magnitude
    #[test]
    fn prop_loss_round_trip(values in prop::collection::vec(arb_finite(), 1..64)) {
        let loss = LossCurve::new(values);
        prop_assert_eq!(LossCurve::decode(&loss.encode().unwrap()).unwrap(), loss);
    }

    /// Property: confusion matrices keep cells and label order
    #[test]
    fn prop_confusion_round_trip(cm in arb_confusion_matrix()) {
        prop_assert_eq!(ConfusionMatrix::decode(&cm.encode().unwrap()).unwrap(), cm);
    }

    /// Property: a matrix whose side differs from the label count is rejected
    #[test]
    fn prop_confusion_shape_mismatch(n in 1usize..6, extra in 1usize..3) {
        let matrix = vec![vec![0.0; n]; n];
        let labels: Vec<String> = (0..n + extra).map(|i| format!("c{i}")).collect();
        let is_shape_mismatch = matches!(
            ConfusionMatrix::new(matrix, labels),
            Err(e2ebench::Error::ShapeMismatch { .. })
        );
        prop_assert!(is_shape_mismatch);
    }

    /// Property: every accepted row lands in the logged table, in order
    #[test]
    fn prop_hyperparameter_rows_preserved(
        rows in prop::collection::vec((arb_hyper_value(), arb_hyper_value(), arb_finite()), 0..20)
    ) {
        let store = BenchmarkStore::new();
        let run = store.start_run(RunRecord::new("run-1", "sweep"));
        let config = HyperparameterConfig::new("sweep", ["optimizer", "depth"], "score");

        let mut tracker = HyperparameterTracker::new(&run, config).unwrap();
        for (optimizer, depth, score) in &rows {
            tracker.track([
                ("optimizer", optimizer.clone()),
                ("depth", depth.clone()),
                ("score", HyperValue::Float(*score)),
            ]).unwrap();
        }
        tracker.close().unwrap();

        let entries = store.entries(MeasureType::Hyperparameters);
        prop_assert_eq!(entries.len(), 1);
        let table = HyperparameterTable::decode(entries[0].payload()).unwrap();
        prop_assert_eq!(table.len(), rows.len());
        for (i, (optimizer, depth, score)) in rows.iter().enumerate() {
            let expected = HyperValue::Float(*score);
            prop_assert_eq!(table.row(i).unwrap(), vec![optimizer, depth, &expected]);
        }
    }

    /// Property: encoding twice yields payloads that decode equal
    #[test]
    fn prop_encoding_is_repeatable(values in prop::collection::vec(arb_finite(), 1..32)) {
        let m = Measurement::from(LossCurve::new(values));
        let a = Measurement::decode(MeasureType::Loss, &m.encode().unwrap()).unwrap();
        let b = Measurement::decode(MeasureType::Loss, &m.encode().unwrap()).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &m);
    }

    /// Property: no payload decodes under a different measure type
    #[test]
    fn prop_cross_kind_decode_fails(values in prop::collection::vec(0.0f64..1.0, 1..16)) {
        let payload = TimeToAccuracy::new(values).encode().unwrap();
        for mt in MeasureType::ALL.into_iter().filter(|&mt| mt != MeasureType::Tta) {
            prop_assert!(Measurement::decode(mt, &payload).is_err());
        }
    }
}
