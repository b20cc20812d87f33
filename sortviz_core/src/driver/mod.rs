//! Step-by-step drivers for the five visualized sorting algorithms.
//!
//! A run works on a private copy of the input. Every comparison or swap produces a
//! [`VisualizationStep`] handed to the `on_step` callback, after which the run suspends for the
//! configured delay. Cancellation is polled before and after each step and ends the run quietly.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use sortviz_core::driver::{self, AlgorithmKind, RunOutcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut steps = Vec::new();
//! let outcome = driver::run(
//!     &[5, 3, 1],
//!     AlgorithmKind::Bubble,
//!     Duration::ZERO,
//!     |step| steps.push(step),
//!     || false,
//! )
//! .await;
//!
//! assert_eq!(outcome, RunOutcome::Completed);
//! assert_eq!(steps.last().unwrap().sequence(), &[1, 3, 5]);
//! # }
//! ```

mod steppers;

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use futures::future::BoxFuture;
use tracing::{debug, info};

use crate::error::SortvizError;
use crate::step::{RoleSet, VisualizationStep};

pub use steppers::bubble_stepper::BubbleStepper;
pub use steppers::insertion_stepper::InsertionStepper;
pub use steppers::merge_stepper::MergeStepper;
pub use steppers::quick_stepper::QuickStepper;
pub use steppers::selection_stepper::SelectionStepper;

/// Returned by a stepper once it observes the cancellation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Control flow of an instrumented algorithm: keep going or unwind because the run was cancelled.
pub type Flow = Result<(), Cancelled>;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// Every visualized algorithm must implement the trait `Stepper`.
///
/// Implementations mutate the working copy through the [`Tracer`] and report each comparison and
/// swap through it. Any `Err(Cancelled)` returned by the tracer must be propagated immediately.
pub trait Stepper {
    fn steps<'a, F, C>(&self, tracer: &'a mut Tracer<F, C>) -> BoxFuture<'a, Flow>
    where
        F: FnMut(VisualizationStep) + Send,
        C: Fn() -> bool + Send + Sync;
}

/// The selectable algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlgorithmKind {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 5] = [
        AlgorithmKind::Bubble,
        AlgorithmKind::Selection,
        AlgorithmKind::Insertion,
        AlgorithmKind::Merge,
        AlgorithmKind::Quick,
    ];

    /// The key used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            AlgorithmKind::Bubble => "bubble",
            AlgorithmKind::Selection => "selection",
            AlgorithmKind::Insertion => "insertion",
            AlgorithmKind::Merge => "merge",
            AlgorithmKind::Quick => "quick",
        }
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Bubble => "Bubble Sort",
            AlgorithmKind::Selection => "Selection Sort",
            AlgorithmKind::Insertion => "Insertion Sort",
            AlgorithmKind::Merge => "Merge Sort",
            AlgorithmKind::Quick => "Quick Sort",
        }
    }

    /// The algorithm after this one, wrapping around.
    pub fn next(self) -> Self {
        let position = Self::ALL.iter().position(|&kind| kind == self).unwrap_or(0);
        Self::ALL[(position + 1) % Self::ALL.len()]
    }

    fn drive<'a, F, C>(self, tracer: &'a mut Tracer<F, C>) -> BoxFuture<'a, Flow>
    where
        F: FnMut(VisualizationStep) + Send,
        C: Fn() -> bool + Send + Sync,
    {
        match self {
            AlgorithmKind::Bubble => BubbleStepper.steps(tracer),
            AlgorithmKind::Selection => SelectionStepper.steps(tracer),
            AlgorithmKind::Insertion => InsertionStepper.steps(tracer),
            AlgorithmKind::Merge => MergeStepper.steps(tracer),
            AlgorithmKind::Quick => QuickStepper.steps(tracer),
        }
    }
}

impl Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses a command line key such as `quick`, ignoring case and surrounding whitespace.
impl FromStr for AlgorithmKind {
    type Err = SortvizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SortvizError::UnknownAlgorithm(s.to_string()))
    }
}

/// The working copy of a run together with its accumulated `sorted` set, the step callback and
/// the cancellation check.
pub struct Tracer<F, C> {
    working: Vec<u32>,
    sorted: BTreeSet<usize>,
    delay: Duration,
    on_step: F,
    is_cancelled: C,
    emitted: usize,
}

impl<F, C> Tracer<F, C>
where
    F: FnMut(VisualizationStep) + Send,
    C: Fn() -> bool + Send + Sync,
{
    pub fn new(working: Vec<u32>, delay: Duration, on_step: F, is_cancelled: C) -> Self {
        Self {
            working,
            sorted: BTreeSet::new(),
            delay,
            on_step,
            is_cancelled,
            emitted: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    pub fn value(&self, index: usize) -> u32 {
        self.working[index]
    }

    pub fn values(&self) -> &[u32] {
        &self.working
    }

    pub fn set(&mut self, index: usize, value: u32) {
        self.working[index] = value;
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.working.swap(a, b);
    }

    /// Adds `index` to the `sorted` role set. Indices never leave it during a run.
    pub fn mark_sorted(&mut self, index: usize) {
        self.sorted.insert(index);
    }

    pub fn mark_all_sorted(&mut self) {
        self.sorted.extend(0..self.working.len());
    }

    /// Number of snapshots delivered so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Polls the cancellation flag without reporting anything.
    pub fn check(&self) -> Flow {
        if (self.is_cancelled)() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Reports that `a` and `b` are being compared.
    pub async fn compare(&mut self, a: usize, b: usize) -> Flow {
        self.emit(vec![a, b], Vec::new()).await
    }

    /// Reports that `a` and `b` were just swapped or overwritten.
    pub async fn swapped(&mut self, a: usize, b: usize) -> Flow {
        self.emit(Vec::new(), vec![a, b]).await
    }

    /// Reports the current state with no active pair.
    pub async fn settle(&mut self) -> Flow {
        self.emit(Vec::new(), Vec::new()).await
    }

    async fn emit(&mut self, comparing: Vec<usize>, swapping: Vec<usize>) -> Flow {
        self.check()?;

        let roles = RoleSet {
            comparing,
            swapping,
            sorted: self.sorted.clone(),
        };
        (self.on_step)(VisualizationStep::new(self.working.clone(), roles));
        self.emitted += 1;

        pause(self.delay).await;
        self.check()
    }
}

async fn pause(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}

/// Runs `kind` over a copy of `sequence`, calling `on_step` with a snapshot after every
/// comparison and swap and waiting `step_delay` in between.
///
/// `is_cancelled` is polled before and after every step. Once it returns `true` the run returns
/// [`RunOutcome::Cancelled`] without touching `on_step` again.
pub async fn run<F, C>(
    sequence: &[u32],
    kind: AlgorithmKind,
    step_delay: Duration,
    on_step: F,
    is_cancelled: C,
) -> RunOutcome
where
    F: FnMut(VisualizationStep) + Send,
    C: Fn() -> bool + Send + Sync,
{
    debug!(algorithm = kind.key(), len = sequence.len(), ?step_delay, "starting run");

    let mut tracer = Tracer::new(sequence.to_vec(), step_delay, on_step, is_cancelled);
    match kind.drive(&mut tracer).await {
        Ok(()) => {
            info!(algorithm = kind.key(), steps = tracer.emitted(), "run completed");
            RunOutcome::Completed
        }
        Err(Cancelled) => {
            info!(algorithm = kind.key(), steps = tracer.emitted(), "run cancelled");
            RunOutcome::Cancelled
        }
    }
}
