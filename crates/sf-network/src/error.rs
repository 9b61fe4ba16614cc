use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    /// An input record is not a usable curve: wrong geometry type, too few
    /// coordinates, or non-finite coordinates.  `index` is the record's
    /// position in the builder's input order.
    #[error("road record {index}: invalid geometry: {reason}")]
    InvalidGeometry { index: usize, reason: String },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
