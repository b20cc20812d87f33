use thiserror::Error;

/// Contract violations reported by the library. Cancelling a run is not one of these, see
/// [`RunOutcome`](crate::driver::RunOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortvizError {
    #[error("unknown sorting algorithm `{0}`, expected one of: bubble, selection, insertion, merge, quick")]
    UnknownAlgorithm(String),

    #[error("invalid value range: minimum {min} is greater than maximum {max}")]
    InvalidRange { min: u32, max: u32 },
}

pub type Result<T> = std::result::Result<T, SortvizError>;
