use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use sortviz_core::{driver, AlgorithmKind, RunOutcome, VisualizationStep};

/// Everything a run delivered.
pub struct TestRun {
    pub outcome: RunOutcome,
    pub steps: Vec<VisualizationStep>,
}

impl TestRun {
    pub fn last(&self) -> &VisualizationStep {
        self.steps.last().expect("the run delivered no step")
    }
}

/// Runs `kind` over `sequence` with no delay and no cancellation.
pub async fn record(sequence: &[u32], kind: AlgorithmKind) -> TestRun {
    let mut steps = Vec::new();
    let outcome = driver::run(
        sequence,
        kind,
        Duration::ZERO,
        |step| steps.push(step),
        || false,
    )
    .await;

    TestRun { outcome, steps }
}

/// Runs `kind` over `sequence` and cancels it as soon as `limit` steps were delivered.
pub async fn record_until(sequence: &[u32], kind: AlgorithmKind, limit: usize) -> TestRun {
    let delivered = AtomicUsize::new(0);
    let mut steps = Vec::new();
    let outcome = driver::run(
        sequence,
        kind,
        Duration::ZERO,
        |step| {
            delivered.fetch_add(1, Ordering::SeqCst);
            steps.push(step);
        },
        || delivered.load(Ordering::SeqCst) >= limit,
    )
    .await;

    TestRun { outcome, steps }
}

/// `count` reproducible sequences of assorted lengths. Narrow value ranges make sure duplicates
/// show up.
pub fn random_sequences(seed: u64, count: usize) -> Vec<Vec<u32>> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let length = rng.gen_range(0..=40);
            let max = rng.gen_range(1..=300);
            (0..length).map(|_| rng.gen_range(0..=max)).collect()
        })
        .collect()
}

/// Value -> number of occurrences.
pub fn multiset(values: &[u32]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for &value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}
