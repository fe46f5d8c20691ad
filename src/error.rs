//! Error types for the tensile simulator

use thiserror::Error;

/// Main error type for simulation operations
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Material '{0}' not found in catalog")]
    MaterialNotFound(String),

    #[error("Duplicate material id '{0}' already exists")]
    DuplicateName(String),

    #[error("Specimen did not rupture within {0} steps")]
    StepLimitExceeded(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;
