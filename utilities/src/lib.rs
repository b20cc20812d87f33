//! Helpers shared by the integration tests of the workspace.

mod steps;

pub use steps::*;
