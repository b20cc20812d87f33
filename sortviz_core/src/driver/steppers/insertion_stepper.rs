use futures::future::{BoxFuture, FutureExt};

use crate::driver::{Flow, Stepper, Tracer};
use crate::step::VisualizationStep;

/// An instrumented [Insertion Sort](https://en.wikipedia.org/wiki/Insertion_sort)
///
/// # Explanation
///
/// Insertion sort builds the final sorted list one item at a time. Each element is held aside
/// while the larger values before it are shifted one slot to the right, then dropped into the gap
/// that opens up.
///
/// # Steps
///
/// - Index `0` starts out sorted.
/// - `comparing = [j, j + 1]` while walking left from the held element.
/// - `swapping = [j, j + 1]` after each shift. A shift duplicates `arr[j]` into `arr[j + 1]`, so
///   the held value is absent from the snapshot until it is placed.
/// - The final snapshot marks every index sorted.
pub struct InsertionStepper;

impl Stepper for InsertionStepper {
    fn steps<'a, F, C>(&self, tracer: &'a mut Tracer<F, C>) -> BoxFuture<'a, Flow>
    where
        F: FnMut(VisualizationStep) + Send,
        C: Fn() -> bool + Send + Sync,
    {
        async move {
            let n = tracer.len();
            if n > 0 {
                tracer.mark_sorted(0);
            }

            for unsorted in 1..n {
                let key = tracer.value(unsorted);

                // `gap` is the slot the key would land in if the walk stopped now
                let mut gap = unsorted;
                while gap > 0 {
                    tracer.compare(gap - 1, gap).await?;

                    if tracer.value(gap - 1) > key {
                        let shifted = tracer.value(gap - 1);
                        tracer.set(gap, shifted);
                        tracer.swapped(gap - 1, gap).await?;
                        gap -= 1;
                    } else {
                        break;
                    }
                }

                tracer.set(gap, key);
                tracer.mark_sorted(unsorted);
            }

            tracer.mark_all_sorted();
            tracer.settle().await
        }
        .boxed()
    }
}
