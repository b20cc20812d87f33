//! The array being visualized, its role sets and the state of the current run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use crate::error::{Result, SortvizError};
use crate::step::{RoleSet, VisualizationStep};

pub const DEFAULT_LENGTH: usize = 50;
pub const DEFAULT_MIN_VALUE: u32 = 10;
pub const DEFAULT_MAX_VALUE: u32 = 309;

/// Shape of a generated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetConfig {
    pub length: usize,
    pub min_value: u32,
    pub max_value: u32,
}

impl DatasetConfig {
    pub fn new(length: usize, min_value: u32, max_value: u32) -> Result<Self> {
        if min_value > max_value {
            return Err(SortvizError::InvalidRange {
                min: min_value,
                max: max_value,
            });
        }

        Ok(Self {
            length,
            min_value,
            max_value,
        })
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
        }
    }
}

/// Cooperative cancellation flag shared between a run and whoever controls it.
///
/// Cloning gives another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Whether a run is active, and the flag that run polls.
///
/// A fresh [`StopFlag`] is handed out for every run so that stopping one run can never leak into
/// the next.
#[derive(Debug, Default)]
pub struct RunState {
    playing: bool,
    flag: StopFlag,
}

impl RunState {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Marks the state active and returns the flag the new run must poll.
    pub fn begin(&mut self) -> StopFlag {
        self.flag.stop();
        self.flag = StopFlag::new();
        self.playing = true;
        self.flag.clone()
    }

    /// Signals the current run to stop and returns to idle.
    pub fn stop(&mut self) {
        self.flag.stop();
        self.playing = false;
    }

    /// Returns to idle after the run ended on its own.
    pub fn finish(&mut self) {
        self.playing = false;
    }
}

/// Owns the sequence on screen together with its role sets.
#[derive(Debug, Default)]
pub struct ArrayModel {
    sequence: Vec<u32>,
    roles: RoleSet,
    run_state: RunState,
}

impl ArrayModel {
    pub fn new(sequence: Vec<u32>) -> Self {
        Self {
            sequence,
            ..Default::default()
        }
    }

    /// Fills the model with `length` uniformly random values in `[min_value, max_value]`.
    ///
    /// Role sets are cleared and any active run is stopped.
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use sortviz_core::ArrayModel;
    ///
    /// let mut model = ArrayModel::default();
    /// let mut rng = StdRng::seed_from_u64(7);
    /// model.generate(50, 10, 309, &mut rng).unwrap();
    ///
    /// assert_eq!(model.sequence().len(), 50);
    /// assert!(model.sequence().iter().all(|v| (10..=309).contains(v)));
    /// ```
    pub fn generate<R>(
        &mut self,
        length: usize,
        min_value: u32,
        max_value: u32,
        rng: &mut R,
    ) -> Result<&[u32]>
    where
        R: Rng + ?Sized,
    {
        let config = DatasetConfig::new(length, min_value, max_value)?;
        self.sequence = generate_sequence(&config, rng);
        self.roles.clear();
        self.run_state.stop();

        Ok(&self.sequence)
    }

    /// Clears the role sets and stops any active run. Values are left untouched.
    pub fn reset(&mut self) {
        self.roles.clear();
        self.run_state.stop();
    }

    /// Replaces sequence and role sets with the contents of a delivered step.
    pub fn apply(&mut self, step: VisualizationStep) {
        let (sequence, roles) = step.into_parts();
        self.sequence = sequence;
        self.roles = roles;
    }

    pub fn sequence(&self) -> &[u32] {
        &self.sequence
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    pub fn run_state_mut(&mut self) -> &mut RunState {
        &mut self.run_state
    }

    pub fn is_playing(&self) -> bool {
        self.run_state.is_playing()
    }
}

/// Draws a fresh sequence for `config`.
pub fn generate_sequence<R>(config: &DatasetConfig, rng: &mut R) -> Vec<u32>
where
    R: Rng + ?Sized,
{
    (0..config.length)
        .map(|_| rng.gen_range(config.min_value..=config.max_value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generate_in_bounds() {
        let mut model = ArrayModel::default();
        let mut rng = StdRng::seed_from_u64(42);
        let sequence = model.generate(1000, 10, 309, &mut rng).unwrap();

        assert_eq!(sequence.len(), 1000);
        assert!(sequence.iter().all(|v| (10..=309).contains(v)));
    }

    #[test]
    fn generate_single_value_range() {
        let mut model = ArrayModel::default();
        let mut rng = StdRng::seed_from_u64(1);
        let sequence = model.generate(5, 7, 7, &mut rng).unwrap();
        assert_eq!(sequence, &[7, 7, 7, 7, 7]);
    }

    #[test]
    fn generate_rejects_inverted_range() {
        let mut model = ArrayModel::default();
        let mut rng = StdRng::seed_from_u64(1);
        let err = model.generate(5, 10, 1, &mut rng).unwrap_err();
        assert_eq!(err, SortvizError::InvalidRange { min: 10, max: 1 });
    }

    #[test]
    fn generate_clears_roles_and_run() {
        let mut model = ArrayModel::new(vec![3, 1, 2]);
        let flag = model.run_state_mut().begin();
        model.apply(VisualizationStep::new(
            vec![1, 3, 2],
            RoleSet {
                comparing: vec![0, 1],
                swapping: vec![],
                sorted: [0].into_iter().collect(),
            },
        ));

        let mut rng = StdRng::seed_from_u64(3);
        model.generate(10, 10, 20, &mut rng).unwrap();

        assert!(model.roles().is_empty());
        assert!(!model.is_playing());
        assert!(flag.is_stopped());
    }

    #[test]
    fn reset_when_idle_is_idempotent() {
        let mut model = ArrayModel::new(vec![5, 3, 1]);
        model.reset();
        model.reset();

        assert_eq!(model.sequence(), &[5, 3, 1]);
        assert!(model.roles().is_empty());
        assert!(!model.is_playing());
    }

    #[test]
    fn reset_keeps_values_and_stops_run() {
        let mut model = ArrayModel::new(vec![5, 3, 1]);
        let flag = model.run_state_mut().begin();
        model.apply(VisualizationStep::new(
            vec![3, 5, 1],
            RoleSet {
                comparing: vec![],
                swapping: vec![0, 1],
                sorted: Default::default(),
            },
        ));

        model.reset();

        assert_eq!(model.sequence(), &[3, 5, 1]);
        assert!(model.roles().is_empty());
        assert!(flag.is_stopped());
        assert!(!model.is_playing());
    }

    #[test]
    fn every_run_gets_a_fresh_flag() {
        let mut state = RunState::default();
        let first = state.begin();
        let second = state.begin();

        assert!(first.is_stopped());
        assert!(!second.is_stopped());
        assert!(state.is_playing());

        state.finish();
        assert!(!state.is_playing());
        assert!(!second.is_stopped());
    }
}
