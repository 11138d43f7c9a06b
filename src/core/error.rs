use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
