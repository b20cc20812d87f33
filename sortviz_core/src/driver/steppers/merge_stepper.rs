use futures::future::{BoxFuture, FutureExt};

use crate::driver::{Flow, Stepper, Tracer};
use crate::step::VisualizationStep;

/// An instrumented top-down [Merge Sort](https://en.wikipedia.org/wiki/Merge_sort)
///
/// # Explanation
///
/// The range `[left, right]` is split at its midpoint, both halves are sorted recursively and the
/// two sorted runs are merged back into place.
///
/// # Steps
///
/// - `comparing = [left + i, mid + 1 + j]` for every comparison between the heads of the two
///   runs. These are positions in the working copy, which the merge overwrites as it goes.
/// - Once a run is exhausted the rest of the other one is copied without reports, still polling
///   for cancellation.
/// - Every finished merge emits a snapshot with no active pair.
/// - Nothing is marked sorted before the final snapshot, which marks every index.
pub struct MergeStepper;

impl Stepper for MergeStepper {
    fn steps<'a, F, C>(&self, tracer: &'a mut Tracer<F, C>) -> BoxFuture<'a, Flow>
    where
        F: FnMut(VisualizationStep) + Send,
        C: Fn() -> bool + Send + Sync,
    {
        async move {
            if !tracer.is_empty() {
                let right = tracer.len() - 1;
                merge_sort(tracer, 0, right).await?;
            }

            tracer.mark_all_sorted();
            tracer.settle().await
        }
        .boxed()
    }
}

fn merge_sort<'a, F, C>(
    tracer: &'a mut Tracer<F, C>,
    left: usize,
    right: usize,
) -> BoxFuture<'a, Flow>
where
    F: FnMut(VisualizationStep) + Send,
    C: Fn() -> bool + Send + Sync,
{
    async move {
        if left < right {
            tracer.check()?;

            let mid = left + (right - left) / 2;
            merge_sort(tracer, left, mid).await?;
            merge_sort(tracer, mid + 1, right).await?;
            merge(tracer, left, mid, right).await?;
        }
        Ok(())
    }
    .boxed()
}

async fn merge<F, C>(tracer: &mut Tracer<F, C>, left: usize, mid: usize, right: usize) -> Flow
where
    F: FnMut(VisualizationStep) + Send,
    C: Fn() -> bool + Send + Sync,
{
    let left_run = tracer.values()[left..=mid].to_vec();
    let right_run = tracer.values()[mid + 1..=right].to_vec();

    let (mut i, mut j, mut k) = (0, 0, left);

    while i < left_run.len() && j < right_run.len() {
        tracer.compare(left + i, mid + 1 + j).await?;

        // `<=` keeps equal values in their original order
        if left_run[i] <= right_run[j] {
            tracer.set(k, left_run[i]);
            i += 1;
        } else {
            tracer.set(k, right_run[j]);
            j += 1;
        }
        k += 1;
    }

    for &value in left_run[i..].iter().chain(&right_run[j..]) {
        tracer.check()?;
        tracer.set(k, value);
        k += 1;
    }

    tracer.settle().await
}
