//! Core error types for intentgen
use std::path::PathBuf;

/// Result type alias for intentgen
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Core error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dataset directory does not exist: {}", .0.display())]
    MissingDatasetDirectory(PathBuf),

    #[error("Intent \"{intent}\" references unknown entity \"{entity}\"")]
    UnknownEntityReference { intent: String, entity: String },

    #[error("Intent \"{0}\" is missing from the intent label map")]
    UnknownIntent(String),

    #[error("Intent \"{intent}\" produced no utterances to sample from")]
    EmptyPopulation { intent: String },

    #[error("Discovery pattern error: {0}")]
    Pattern(String),
}

impl From<bincode::error::EncodeError> for Error {
    fn from(err: bincode::error::EncodeError) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for Error {
    fn from(err: bincode::error::DecodeError) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::Pattern(err.to_string())
    }
}

impl From<glob::GlobError> for Error {
    fn from(err: glob::GlobError) -> Self {
        Error::Io(err.into())
    }
}
