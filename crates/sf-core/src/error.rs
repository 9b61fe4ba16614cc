//! Engine-wide base error type.
//!
//! Sub-crates define their own error enums and wrap `SfError` as one
//! `#[from]` variant, so a normalization or configuration failure raised here
//! surfaces unchanged at the pipeline level.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SfError {
    /// A population cannot be min-max scaled: it is empty, holds a
    /// non-finite value, or every value is identical.
    #[error("cannot normalize {what}: {reason}")]
    Normalization { what: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for all `sf-*` crates.
pub type SfResult<T> = Result<T, SfError>;
