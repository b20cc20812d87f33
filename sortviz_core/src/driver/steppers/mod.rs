pub mod bubble_stepper;
pub mod insertion_stepper;
pub mod merge_stepper;
pub mod quick_stepper;
pub mod selection_stepper;

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use crate::driver::{Stepper, Tracer};
    use crate::step::VisualizationStep;

    /// Runs `stepper` over `input` without delay and returns every snapshot it produced.
    pub(crate) async fn record<S: Stepper>(stepper: S, input: &[u32]) -> Vec<VisualizationStep> {
        let mut steps = Vec::new();
        let mut tracer = Tracer::new(input.to_vec(), Duration::ZERO, |s| steps.push(s), || false);
        stepper
            .steps(&mut tracer)
            .await
            .expect("run was not cancelled");
        drop(tracer);
        steps
    }

    /// The sequence of the final snapshot.
    pub(crate) async fn sorted<S: Stepper>(stepper: S, input: &[u32]) -> Vec<u32> {
        let steps = record(stepper, input).await;
        let last = steps.last().expect("every run ends with a snapshot");
        assert!(last.is_final());
        last.sequence().to_vec()
    }
}
