use futures::future::{BoxFuture, FutureExt};

use crate::driver::{Cancelled, Flow, Stepper, Tracer};
use crate::step::VisualizationStep;

/// An instrumented [Quick Sort](https://en.wikipedia.org/wiki/Quicksort) using the Lomuto
/// partition scheme.
///
/// # Explanation
///
/// Quicksort is a divide-and-conquer algorithm. The last element of the range is taken as the
/// pivot, every smaller element is moved to the front of the range, and the pivot is then swapped
/// into the slot right after them. Both sides of the pivot are sorted recursively.
///
/// # Steps
///
/// - `comparing = [j, high]` for every element checked against the pivot.
/// - `swapping = [i, j]` when an element smaller than the pivot is moved to the boundary `i`,
///   including the no-op case `i == j`.
/// - `swapping = [i, high]` when the pivot is moved into place.
/// - Nothing is marked sorted before the final snapshot, which marks every index.
///
/// A cancellation observed inside a partition unwinds the whole recursion.
pub struct QuickStepper;

impl Stepper for QuickStepper {
    fn steps<'a, F, C>(&self, tracer: &'a mut Tracer<F, C>) -> BoxFuture<'a, Flow>
    where
        F: FnMut(VisualizationStep) + Send,
        C: Fn() -> bool + Send + Sync,
    {
        async move {
            if !tracer.is_empty() {
                let high = tracer.len() - 1;
                quicksort(tracer, 0, high).await?;
            }

            tracer.mark_all_sorted();
            tracer.settle().await
        }
        .boxed()
    }
}

fn quicksort<'a, F, C>(
    tracer: &'a mut Tracer<F, C>,
    low: usize,
    high: usize,
) -> BoxFuture<'a, Flow>
where
    F: FnMut(VisualizationStep) + Send,
    C: Fn() -> bool + Send + Sync,
{
    async move {
        if low < high {
            tracer.check()?;

            let pivot = partition(tracer, low, high).await?;
            if pivot > low {
                quicksort(tracer, low, pivot - 1).await?;
            }
            quicksort(tracer, pivot + 1, high).await?;
        }
        Ok(())
    }
    .boxed()
}

/// Partitions `[low, high]` around the value at `high` and returns the pivot's final index.
async fn partition<F, C>(
    tracer: &mut Tracer<F, C>,
    low: usize,
    high: usize,
) -> Result<usize, Cancelled>
where
    F: FnMut(VisualizationStep) + Send,
    C: Fn() -> bool + Send + Sync,
{
    let pivot = tracer.value(high);
    let mut boundary = low;

    for j in low..high {
        tracer.compare(j, high).await?;

        if tracer.value(j) < pivot {
            tracer.swap(boundary, j);
            tracer.swapped(boundary, j).await?;
            boundary += 1;
        }
    }

    tracer.swap(boundary, high);
    tracer.swapped(boundary, high).await?;

    Ok(boundary)
}

#[cfg(test)]
mod tests {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::driver::steppers::test_support::{record, sorted};
    use crate::step::StepKind;

    #[tokio::test]
    async fn arbitrary_array() {
        assert_eq!(sorted(QuickStepper, &[1, 5, 4, 2, 3]).await, [1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn sorted_array() {
        let slice = (1..10).collect::<Vec<_>>();
        assert_eq!(sorted(QuickStepper, &slice).await, slice);
    }

    #[tokio::test]
    async fn very_unsorted() {
        let slice = (1..100).rev().collect::<Vec<_>>();
        assert_eq!(
            sorted(QuickStepper, &slice).await,
            (1..100).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn simple_edge_cases() {
        assert_eq!(sorted(QuickStepper, &[1]).await, [1]);
        assert_eq!(sorted(QuickStepper, &[1, 2]).await, [1, 2]);
        assert_eq!(sorted(QuickStepper, &[2, 1]).await, [1, 2]);
        assert_eq!(sorted(QuickStepper, &[3, 1, 2]).await, [1, 2, 3]);
    }

    #[tokio::test]
    async fn first_partition() {
        let mut steps = Vec::new();
        let mut tracer = Tracer::new(
            vec![3, 6, 2, 5],
            Duration::ZERO,
            |s| steps.push(s),
            || false,
        );
        let pivot = partition(&mut tracer, 0, 3).await.unwrap();
        assert_eq!(pivot, 2);
        assert_eq!(tracer.values(), &[3, 2, 5, 6]);
        drop(tracer);

        let trace = steps
            .iter()
            .map(|s| (s.kind(), s.active_indices().to_vec()))
            .collect::<Vec<_>>();
        assert_eq!(
            trace,
            vec![
                (StepKind::Compare, vec![0, 3]),
                (StepKind::Swap, vec![0, 0]),
                (StepKind::Compare, vec![1, 3]),
                (StepKind::Compare, vec![2, 3]),
                (StepKind::Swap, vec![1, 2]),
                (StepKind::Swap, vec![2, 3]),
            ]
        );
    }

    #[tokio::test]
    async fn recursion_covers_both_sides() {
        let steps = record(QuickStepper, &[3, 6, 2, 5]).await;

        // left side [3, 2] is partitioned around 2 after the first partition
        assert_eq!(steps[6].kind(), StepKind::Compare);
        assert_eq!(steps[6].comparing(), &[0, 1]);

        let last = steps.last().unwrap();
        assert_eq!(last.sequence(), &[2, 3, 5, 6]);
        assert!(last.is_final());
    }

    #[tokio::test]
    async fn cancellation_inside_partition_stops_recursion() {
        let delivered = AtomicUsize::new(0);
        let mut tracer = Tracer::new(
            vec![3, 6, 2, 5],
            Duration::ZERO,
            |_| {
                delivered.fetch_add(1, Ordering::SeqCst);
            },
            || delivered.load(Ordering::SeqCst) >= 2,
        );

        assert_eq!(QuickStepper.steps(&mut tracer).await, Err(Cancelled));
        drop(tracer);
        assert_eq!(delivered.load(Ordering::SeqCst), 2);
    }
}
