//! # Introduction
//!
//! Terminal front end of the sorting visualizer. Install the `sortviz` binary and run
//! `sortviz --help` to see what options are available.
//!
//! - `play` opens an interactive bar chart with start/stop, reset, shuffle, algorithm and speed
//!   controls.
//! - `run` animates a single run behind a progress bar.
//! - `trace` prints every step of a run as a table.

mod app;
pub mod chart;
mod headless;
pub mod input;
mod trace;

use anyhow::Context;
use clap::Args;
use rand::{rngs::StdRng, SeedableRng};
use sortviz_core::model::{DEFAULT_LENGTH, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE};
use sortviz_core::{AlgorithmKind, DatasetConfig, SortvizError, Speed};

pub use trace::{paint, step_table};

fn parse_algorithm(key: &str) -> Result<AlgorithmKind, SortvizError> {
    key.parse()
}

/// Shape of the randomly generated dataset.
#[derive(Debug, Clone, Args)]
pub struct DatasetArgs {
    /// Number of bars.
    #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Smallest value that may be generated.
    #[arg(long, default_value_t = DEFAULT_MIN_VALUE)]
    pub min: u32,

    /// Largest value that may be generated.
    #[arg(long, default_value_t = DEFAULT_MAX_VALUE)]
    pub max: u32,

    /// Seed for reproducible datasets. A random seed is used when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl DatasetArgs {
    pub fn config(&self) -> anyhow::Result<DatasetConfig> {
        DatasetConfig::new(self.length, self.min, self.max).context("invalid dataset options")
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for DatasetArgs {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            min: DEFAULT_MIN_VALUE,
            max: DEFAULT_MAX_VALUE,
            seed: None,
        }
    }
}

/// Algorithm and pacing of a run.
#[derive(Debug, Clone, Args)]
pub struct PlaybackArgs {
    /// Sorting algorithm to animate: bubble, selection, insertion, merge or quick.
    #[arg(short, long, default_value = "bubble", value_parser = parse_algorithm)]
    pub algorithm: AlgorithmKind,

    /// Playback speed from 1 (100 ms per step) to 100 (1 ms per step).
    #[arg(
        long,
        default_value_t = Speed::default().setting(),
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub speed: u8,
}

impl PlaybackArgs {
    pub fn speed(&self) -> Speed {
        Speed::new(self.speed)
    }
}

impl Default for PlaybackArgs {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::default(),
            speed: Speed::default().setting(),
        }
    }
}

/// Open the interactive visualizer.
#[derive(Debug, Clone, Default, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub playback: PlaybackArgs,
}

impl PlayArgs {
    pub async fn run(self) -> anyhow::Result<()> {
        app::play(self).await
    }
}

/// Animate one run behind a progress bar. Ctrl-C stops the run.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub playback: PlaybackArgs,
}

impl RunArgs {
    pub async fn run(self) -> anyhow::Result<()> {
        headless::run(self).await
    }
}

/// Print every step of a run as a table.
#[derive(Debug, Clone, Args)]
pub struct TraceArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Sorting algorithm to trace: bubble, selection, insertion, merge or quick.
    #[arg(short, long, default_value = "bubble", value_parser = parse_algorithm)]
    pub algorithm: AlgorithmKind,

    /// Trace these values instead of a generated dataset, e.g. `--values 5,3,1`.
    #[arg(long, value_delimiter = ',')]
    pub values: Option<Vec<u32>>,
}

impl TraceArgs {
    pub async fn run(self) -> anyhow::Result<()> {
        trace::trace(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Playback {
        #[command(flatten)]
        playback: PlaybackArgs,
    }

    #[test]
    fn algorithm_keys_are_case_insensitive() {
        let parsed = Playback::try_parse_from(["sortviz", "-a", "Merge"]).unwrap();
        assert_eq!(parsed.playback.algorithm, AlgorithmKind::Merge);

        let parsed = Playback::try_parse_from(["sortviz"]).unwrap();
        assert_eq!(parsed.playback.algorithm, AlgorithmKind::Bubble);
        assert_eq!(parsed.playback.speed(), Speed::default());
    }

    #[test]
    fn unknown_algorithm_is_reported() {
        let err = Playback::try_parse_from(["sortviz", "--algorithm", "bogo"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown sorting algorithm `bogo`"));
    }

    #[test]
    fn speed_is_bounded() {
        assert!(Playback::try_parse_from(["sortviz", "--speed", "0"]).is_err());
        assert!(Playback::try_parse_from(["sortviz", "--speed", "101"]).is_err());
    }
}
