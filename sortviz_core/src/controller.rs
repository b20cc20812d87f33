//! The playback controls: start/stop, reset, shuffle, algorithm and speed selection.
//!
//! The [`Controller`] owns the [`ArrayModel`] and at most one active run. Runs execute as tokio
//! tasks and report back through a [`RunEvent`] channel, also owned by the controller. Every event
//! carries the id of the run that produced it.
//!
//! Stopping a run awaits its task and then applies whatever steps it had already delivered, so
//! the model always ends on the last snapshot the run produced. Events of any other run are
//! dropped instead of repainting the model.

use rand::Rng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::driver::{self, AlgorithmKind, RunOutcome};
use crate::model::{generate_sequence, ArrayModel, DatasetConfig, StopFlag};
use crate::speed::Speed;
use crate::step::VisualizationStep;

/// How much a single faster/slower command moves the speed setting.
pub const SPEED_INCREMENT: u8 = 5;

/// User intents understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a run when idle, stop the active run otherwise.
    Toggle,
    Reset,
    Shuffle,
    Select(AlgorithmKind),
    CycleAlgorithm,
    Faster,
    Slower,
}

/// Whether a [`Command`] had an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Applied,
    /// The command is disabled while a run is active.
    Ignored,
}

/// Messages sent by a run task.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Step { run: u64, step: VisualizationStep },
    Finished { run: u64, outcome: RunOutcome },
}

impl RunEvent {
    pub fn run(&self) -> u64 {
        match self {
            RunEvent::Step { run, .. } | RunEvent::Finished { run, .. } => *run,
        }
    }
}

struct ActiveRun {
    id: u64,
    flag: StopFlag,
    task: JoinHandle<RunOutcome>,
}

pub struct Controller<R> {
    model: ArrayModel,
    algorithm: AlgorithmKind,
    speed: Speed,
    dataset: DatasetConfig,
    rng: R,
    next_run: u64,
    active: Option<ActiveRun>,
    events: UnboundedSender<RunEvent>,
    receiver: UnboundedReceiver<RunEvent>,
}

impl<R> Controller<R>
where
    R: Rng,
{
    /// Creates a controller with a freshly generated dataset. Run events are read with
    /// [`Controller::recv`] and must be fed back through [`Controller::on_event`].
    pub fn new(dataset: DatasetConfig, mut rng: R) -> Self {
        let (events, receiver) = mpsc::unbounded_channel();
        let model = ArrayModel::new(generate_sequence(&dataset, &mut rng));

        Self {
            model,
            algorithm: AlgorithmKind::default(),
            speed: Speed::default(),
            dataset,
            rng,
            next_run: 0,
            active: None,
            events,
            receiver,
        }
    }

    pub fn with_algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Replaces the sequence on screen. Ignored while a run is active.
    pub fn load(&mut self, sequence: Vec<u32>) -> Handled {
        if self.is_playing() {
            return Handled::Ignored;
        }

        self.model = ArrayModel::new(sequence);
        Handled::Applied
    }

    pub fn model(&self) -> &ArrayModel {
        &self.model
    }

    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn dataset(&self) -> &DatasetConfig {
        &self.dataset
    }

    pub fn is_playing(&self) -> bool {
        self.model.is_playing()
    }

    pub async fn handle(&mut self, command: Command) -> Handled {
        if self.is_playing() && command != Command::Toggle {
            debug!(?command, "ignoring command while a run is active");
            return Handled::Ignored;
        }

        match command {
            Command::Toggle => {
                if self.is_playing() {
                    self.stop().await;
                } else {
                    self.start().await;
                }
            }
            Command::Reset => self.model.reset(),
            Command::Shuffle => {
                let DatasetConfig {
                    length,
                    min_value,
                    max_value,
                } = self.dataset;

                // the config was validated when it was built
                if let Err(err) = self
                    .model
                    .generate(length, min_value, max_value, &mut self.rng)
                {
                    warn!(%err, "could not generate a new dataset");
                }
            }
            Command::Select(algorithm) => self.algorithm = algorithm,
            Command::CycleAlgorithm => self.algorithm = self.algorithm.next(),
            Command::Faster => self.speed = self.speed.faster(SPEED_INCREMENT),
            Command::Slower => self.speed = self.speed.slower(SPEED_INCREMENT),
        }

        Handled::Applied
    }

    /// Starts a fresh run of the selected algorithm over the current sequence.
    ///
    /// An active run is cancelled first, and awaited until it has observed the cancellation.
    pub async fn start(&mut self) {
        self.cancel_active().await;

        let flag = self.model.run_state_mut().begin();
        let id = self.next_run;
        self.next_run += 1;

        let sequence = self.model.sequence().to_vec();
        let kind = self.algorithm;
        let delay = self.speed.delay();
        let events = self.events.clone();
        let cancelled = flag.clone();

        debug!(run = id, algorithm = kind.key(), ?delay, "spawning run");

        let task = tokio::spawn(async move {
            let step_events = events.clone();
            let outcome = driver::run(
                &sequence,
                kind,
                delay,
                move |step| {
                    // fails only once the controller itself is gone
                    let _ = step_events.send(RunEvent::Step { run: id, step });
                },
                move || cancelled.is_stopped(),
            )
            .await;

            let _ = events.send(RunEvent::Finished { run: id, outcome });
            outcome
        });

        self.active = Some(ActiveRun { id, flag, task });
    }

    /// Waits for the next event of any run.
    ///
    /// Pending forever while no run is active, which makes it safe to poll in a `select!` loop.
    pub async fn recv(&mut self) -> Option<RunEvent> {
        self.receiver.recv().await
    }

    /// Stops the active run, if any, keeping the sequence and role sets it last delivered.
    pub async fn stop(&mut self) {
        self.cancel_active().await;
        self.model.run_state_mut().stop();
    }

    /// Stops everything before the controller is dropped.
    pub async fn shutdown(&mut self) {
        self.stop().await;
    }

    /// Applies an event coming from a run task. Returns `true` when the model changed.
    pub fn on_event(&mut self, event: RunEvent) -> bool {
        let current = self.active.as_ref().map(|active| active.id);
        if current != Some(event.run()) {
            debug!(run = event.run(), "dropping event from a stale run");
            return false;
        }

        match event {
            RunEvent::Step { step, .. } => {
                self.model.apply(step);
                true
            }
            RunEvent::Finished { outcome, .. } => {
                debug!(?outcome, "run finished");
                self.active = None;
                self.model.run_state_mut().finish();
                true
            }
        }
    }

    async fn cancel_active(&mut self) -> Option<RunOutcome> {
        let active = self.active.take()?;
        active.flag.stop();

        let outcome = match active.task.await {
            Ok(outcome) => {
                debug!(run = active.id, ?outcome, "run stopped");
                Some(outcome)
            }
            Err(err) => {
                warn!(run = active.id, %err, "run task did not finish cleanly");
                None
            }
        };

        // the task is gone, so everything it sent is already queued
        while let Ok(event) = self.receiver.try_recv() {
            if let RunEvent::Step { run, step } = event {
                if run == active.id {
                    self.model.apply(step);
                }
            }
        }

        outcome
    }
}
