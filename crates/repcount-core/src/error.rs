//! Error types for the repetition counting system.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Landmark count mismatch: expected {expected}, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Unknown landmark index: {0}")]
    UnknownLandmark(u8),

    #[error("Unknown exercise label: {0:?}")]
    UnknownExercise(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Label decoder has no class for index {0}")]
    UnknownLabelIndex(usize),

    #[error("Insufficient data: need {required} frames, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Classifier service is no longer running")]
    ServiceClosed,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
