use sf_core::SfError;
use sf_network::NetworkError;
use sf_score::ScoreError;
use sf_select::SelectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] SfError),

    #[error("road network: {0}")]
    Network(#[from] NetworkError),

    #[error("scoring: {0}")]
    Score(#[from] ScoreError),

    #[error("selection: {0}")]
    Select(#[from] SelectError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
