use futures::future::{BoxFuture, FutureExt};

use crate::driver::{Flow, Stepper, Tracer};
use crate::step::VisualizationStep;

/// An instrumented [Bubble Sort](https://en.wikipedia.org/wiki/Bubble_sort)
///
/// # Explanation
///
/// Bubble sort repeatedly steps through the list, compares adjacent elements and swaps them if
/// they are in the wrong order. After pass `i` the largest remaining value has "bubbled" up to
/// index `n - 1 - i`, which is then marked sorted.
///
/// # Steps
///
/// - `comparing = [j, j + 1]` before every adjacent comparison.
/// - `swapping = [j, j + 1]` after every swap. Equal values are never swapped.
/// - After the last pass index `0` is marked sorted too and a final snapshot is emitted.
#[derive(Default)]
pub struct BubbleStepper;

impl Stepper for BubbleStepper {
    fn steps<'a, F, C>(&self, tracer: &'a mut Tracer<F, C>) -> BoxFuture<'a, Flow>
    where
        F: FnMut(VisualizationStep) + Send,
        C: Fn() -> bool + Send + Sync,
    {
        async move {
            let n = tracer.len();

            for i in 0..n.saturating_sub(1) {
                for j in 0..(n - i - 1) {
                    tracer.compare(j, j + 1).await?;

                    if tracer.value(j) > tracer.value(j + 1) {
                        tracer.swap(j, j + 1);
                        tracer.swapped(j, j + 1).await?;
                    }
                }
                tracer.mark_sorted(n - 1 - i);
            }

            if n > 0 {
                tracer.mark_sorted(0);
            }
            tracer.settle().await
        }
        .boxed()
    }
}
