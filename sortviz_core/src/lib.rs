//! # Introduction
//!
//! The engine behind the sorting visualizer: an [`ArrayModel`] holding the bars on screen, five
//! instrumented sorting algorithms that report every comparison and swap as a
//! [`VisualizationStep`], and a [`Controller`] that paces, cancels and restarts runs.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use sortviz_core::{driver, AlgorithmKind, Role};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut last = None;
//! driver::run(
//!     &[4, 1, 3],
//!     AlgorithmKind::Insertion,
//!     Duration::ZERO,
//!     |step| last = Some(step),
//!     || false,
//! )
//! .await;
//!
//! let last = last.unwrap();
//! assert_eq!(last.sequence(), &[1, 3, 4]);
//! assert_eq!(last.roles().role_of(0), Role::Sorted);
//! # }
//! ```

pub mod controller;
pub mod driver;
mod error;
pub mod model;
mod speed;
pub mod step;

pub use controller::{Command, Controller, Handled, RunEvent};
pub use driver::{AlgorithmKind, RunOutcome};
pub use error::{Result, SortvizError};
pub use model::{ArrayModel, DatasetConfig, RunState, StopFlag};
pub use speed::Speed;
pub use step::{BarColor, Role, RoleSet, StepKind, VisualizationStep};
