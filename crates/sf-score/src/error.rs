use sf_core::SfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("grid step must be positive and finite, got {0}")]
    InvalidStep(f64),

    /// The lattice would hold more points than the allocation cap.
    #[error("grid step {step} gives {points:e} lattice points, more than the limit of {limit}")]
    GridTooLarge { step: f64, points: f64, limit: usize },

    #[error("network has no extent to lay a grid over and no candidates were supplied")]
    EmptyExtent,

    #[error("hub area {index} has no centroid")]
    InvalidHubArea { index: usize },

    #[error(transparent)]
    Core(#[from] SfError),
}

pub type ScoreResult<T> = Result<T, ScoreError>;
