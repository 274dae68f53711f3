//! Experiment Replay Example
//!
//! Tracks three simulated training runs (accuracy, loss, a confusion matrix
//! and a learning-rate sweep), then replays the time-to-accuracy curves as
//! a chart description.
//!
//! Run with: cargo run --example experiment_replay

use chrono::{Duration, Utc};
use e2ebench::metrics::{
    with_hyperparameter_tracker, ConfusionMatrixTracker, HyperValue, HyperparameterConfig,
    LossTracker, TtaTracker,
};
use e2ebench::sink::{BenchmarkStore, RunRecord};
use e2ebench::visualize::{ConfusionMatrixVisualizer, TtaVisualizer};
use e2ebench::MeasureType;
use rand::Rng;

fn main() -> anyhow::Result<()> {
    e2ebench::init_logging("e2ebench=debug")?;
    let mut rng = rand::thread_rng();

    println!("=== e2ebench Experiment Replay ===\n");

    let store = BenchmarkStore::new();
    let first_start = Utc::now() - Duration::days(3);

    // -------------------------------------------------------------------------
    // 1. Simulate three training runs
    // -------------------------------------------------------------------------
    println!("1. Tracking runs...");

    for (i, lr) in [0.1_f64, 0.03, 0.01].into_iter().enumerate() {
        let run = store.start_run(
            RunRecord::builder(format!("run-{:03}", i + 1), "cifar10 resnet18")
                .started_at(first_start + Duration::days(i64::try_from(i)?))
                .build(),
        );

        let epochs = 5 + i * 2;
        let mut accuracies = Vec::with_capacity(epochs);
        let mut losses = Vec::with_capacity(epochs);
        for epoch in 0..epochs {
            #[allow(clippy::cast_precision_loss)]
            let progress = (epoch + 1) as f64 / epochs as f64;
            accuracies.push((0.5 + 0.45 * progress + rng.gen_range(-0.02..0.02)).min(1.0));
            losses.push(2.3 * (1.0 - progress) + 0.1 + rng.gen_range(0.0..0.05));
        }

        TtaTracker::new(&run).track(&accuracies, "test accuracy")?;
        LossTracker::new(&run).track(&losses, "train loss")?;

        with_hyperparameter_tracker(
            &run,
            HyperparameterConfig::builder("lr sweep", "accuracy")
                .hyperparameters(["lr", "batch_size"])
                .low_means_good(false)
                .build(),
            |tracker| {
                for batch_size in [64, 128] {
                    tracker.track([
                        ("lr", HyperValue::from(lr)),
                        ("batch_size", HyperValue::from(batch_size)),
                        ("accuracy", HyperValue::from(accuracies[epochs - 1])),
                    ])?;
                }
                Ok(())
            },
        )?;

        println!("   {} started {}", run.run_id(), run.record().started_at_iso());
    }

    ConfusionMatrixTracker::new(&store.start_run(RunRecord::new("run-eval", "cifar10 resnet18")))
        .track(
            vec![vec![91.0, 9.0], vec![6.0, 94.0]],
            ["animal", "vehicle"],
            "coarse classes",
        )?;

    println!("   {} entries logged", store.entry_count());

    // -------------------------------------------------------------------------
    // 2. Replay time-to-accuracy
    // -------------------------------------------------------------------------
    println!("\n2. Replaying time to accuracy...");

    let (tta, starts) = TtaVisualizer::from_source(&store)?;
    let chart = tta.visualize("bench-cifar10", "cifar10 resnet18", &starts)?;

    println!("   {} ({} series)", chart.title, chart.series.len());
    for series in &chart.series {
        println!(
            "   {:<32} epochs={} final={:.3}",
            series.label,
            series.len(),
            series.y.last().copied().unwrap_or_default()
        );
    }

    // -------------------------------------------------------------------------
    // 3. Replay the confusion matrix
    // -------------------------------------------------------------------------
    println!("\n3. Replaying confusion matrix...");

    let entries = store.entries(MeasureType::ConfusionMatrix);
    let heatmap = ConfusionMatrixVisualizer::new(entries[0].payload())?.visualize("coarse classes");
    println!("   {}", heatmap.to_json()?);

    println!("\n=== Done ===");
    Ok(())
}
