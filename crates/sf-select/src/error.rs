use sf_core::SfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectError {
    /// Nothing to work on.  Callers may retry with a finer grid or a larger
    /// top N.
    #[error("no sites to {stage}")]
    EmptyInput { stage: &'static str },

    #[error("merge distance must be finite and non-negative, got {0}")]
    InvalidDistance(f64),

    #[error("region {region:?} has invalid demand {value}")]
    InvalidDemand { region: String, value: f64 },

    #[error(transparent)]
    Core(#[from] SfError),
}

pub type SelectResult<T> = Result<T, SelectError>;
