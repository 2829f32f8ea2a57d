//! Error types for the particle core.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown shape: {0:?}")]
    UnknownShape(String),

    #[error("hand landmark count mismatch: expected {expected}, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("hand landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },

    #[error("flat landmark buffer of length {len} is not a multiple of 3")]
    MalformedLandmarks { len: usize },

    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
