use futures::future::{BoxFuture, FutureExt};

use crate::driver::{Flow, Stepper, Tracer};
use crate::step::VisualizationStep;

/// An instrumented [Selection Sort](https://en.wikipedia.org/wiki/Selection_sort)
///
/// # Explanation
///
/// The list is divided into a sorted prefix, built up from left to right, and the remaining
/// unsorted items. Each round scans the unsorted part for its smallest element and exchanges it
/// with the leftmost unsorted element, moving the boundary one element to the right.
///
/// # Steps
///
/// - `comparing = [min, j]` for every candidate `j` checked against the running minimum. Moving
///   the minimum is not reported on its own.
/// - `swapping = [i, min]` when the minimum was not already in place.
/// - Index `i` is marked sorted at the end of every round and `n - 1` after the last one.
pub struct SelectionStepper;

impl Stepper for SelectionStepper {
    fn steps<'a, F, C>(&self, tracer: &'a mut Tracer<F, C>) -> BoxFuture<'a, Flow>
    where
        F: FnMut(VisualizationStep) + Send,
        C: Fn() -> bool + Send + Sync,
    {
        async move {
            let n = tracer.len();

            for unsorted in 0..n.saturating_sub(1) {
                let mut smallest_in_rest = unsorted;
                for i in (unsorted + 1)..n {
                    tracer.compare(smallest_in_rest, i).await?;

                    if tracer.value(i) < tracer.value(smallest_in_rest) {
                        smallest_in_rest = i;
                    }
                }

                if unsorted != smallest_in_rest {
                    tracer.swap(unsorted, smallest_in_rest);
                    tracer.swapped(unsorted, smallest_in_rest).await?;
                }
                tracer.mark_sorted(unsorted);
            }

            if n > 0 {
                tracer.mark_sorted(n - 1);
            }
            tracer.settle().await
        }
        .boxed()
    }
}
